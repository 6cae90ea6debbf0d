use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

const PDF_MAGIC: &[u8] = b"%PDF";

pub fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Extract plain text from an in-memory PDF using `pdftotext`.
///
/// Returns an empty string when the tool is missing, fails, or the document
/// holds no text layer. Callers treat blank output as an unreadable upload.
pub async fn extract_text_from_pdf(data: &[u8]) -> String {
    let child = Command::new("pdftotext")
        .arg("-layout")
        .arg("-")
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let mut child = match child {
        Ok(child) => child,
        Err(e) => {
            tracing::error!("Failed to run pdftotext: {}", e);
            return String::new();
        }
    };

    // Feed stdin from a separate task so a large document cannot deadlock
    // against a full stdout pipe.
    if let Some(mut stdin) = child.stdin.take() {
        let data = data.to_vec();
        tokio::spawn(async move {
            if let Err(e) = stdin.write_all(&data).await {
                tracing::debug!("pdftotext closed stdin early: {}", e);
            }
        });
    }

    match child.wait_with_output().await {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).to_string(),
        Ok(out) => {
            tracing::warn!(
                status = %out.status,
                stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                "pdftotext could not read the upload"
            );
            String::new()
        }
        Err(e) => {
            tracing::error!("Failed to collect pdftotext output: {}", e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(b"%PDF-1.7\n..."));
        assert!(!is_pdf(b"PK\x03\x04"));
        assert!(!is_pdf(b""));
    }

    #[tokio::test]
    async fn test_garbage_yields_no_text() {
        // Either pdftotext rejects it or is not installed; both give "".
        assert_eq!(extract_text_from_pdf(b"%PDF-not really a document").await.trim(), "");
    }
}
