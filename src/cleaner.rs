use regex::Regex;
use std::sync::LazyLock;

static INLINE_MATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$[^$]*\$").unwrap());
static DEEP_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#{4,}").unwrap());

/// Strip formatting artifacts from free-text model output.
///
/// The rules run in a fixed order: inline math first, so a stray `$` inside a
/// formula can never reach the heading pass, then heading collapse, bullet
/// rewriting and finally removal of `**` emphasis markers.
pub fn clean_response(text: &str) -> String {
    let text = INLINE_MATH.replace_all(text, "");
    let text = DEEP_HEADING.replace_all(&text, "###");
    let text = text.replace("\n* ", "\n• ");
    text.replace("**", "")
}
