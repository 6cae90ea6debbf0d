//! Parsers turning semi-structured model output into quiz questions and
//! flashcards.
//!
//! Both parsers are total: malformed blocks are dropped, never reported.

use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{Flashcard, QuizQuestion, OPTION_KEYS};

const QUESTION_MARKER: &str = "Question ";
const CARD_MARKER: &str = "Card ";
const ANSWER_MARKER: &str = "Correct Answer:";

/// Fields collected from one `Question ` block before validation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QuizDraft {
    pub question: Option<String>,
    pub options: BTreeMap<String, String>,
    pub correct_answer: Option<String>,
}

impl QuizDraft {
    /// Read one block. `None` when the first line carries no `label: text` header.
    pub fn from_block(block: &str) -> Option<Self> {
        let mut lines = block.trim().lines();
        let (_label, question) = lines.next()?.split_once(':')?;

        let mut draft = QuizDraft {
            question: Some(question.trim().to_string()).filter(|q| !q.is_empty()),
            ..Default::default()
        };

        for line in lines.map(str::trim) {
            if let Some((key, text)) = option_line(line) {
                draft.options.insert(key.to_string(), text.to_string());
            } else if line.contains(ANSWER_MARKER) {
                if let Some((_, answer)) = line.split_once(':') {
                    draft.correct_answer = answer_letter(answer);
                }
            }
        }

        Some(draft)
    }

    /// A complete question: text, all four options and an answer naming one of them.
    pub fn finish(self) -> Option<QuizQuestion> {
        let question = self.question?;
        let correct_answer = self.correct_answer?;

        if self.options.len() != OPTION_KEYS.len() || !self.options.contains_key(&correct_answer) {
            return None;
        }

        Some(QuizQuestion {
            question,
            options: self.options,
            correct_answer,
        })
    }
}

/// Fields collected from one `Card ` block before validation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FlashcardDraft {
    pub front: Option<String>,
    pub back: Option<String>,
}

impl FlashcardDraft {
    pub fn from_block(block: &str) -> Self {
        let mut draft = FlashcardDraft::default();

        for line in block.lines().map(str::trim) {
            if line.starts_with("Front:") {
                draft.front = field_value(line);
            } else if line.starts_with("Back:") {
                draft.back = field_value(line);
            }
        }

        draft
    }

    pub fn finish(self, id: u32) -> Option<Flashcard> {
        Some(Flashcard {
            id,
            front: self.front?,
            back: self.back?,
        })
    }
}

/// Match `A)` or `A )` through `D)`; returns the letter and the option text.
fn option_line(line: &str) -> Option<(&'static str, &str)> {
    OPTION_KEYS.iter().find_map(|key| {
        let rest = line.strip_prefix(*key)?;
        let rest = rest.strip_prefix(')').or_else(|| rest.strip_prefix(" )"))?;
        Some((*key, rest.trim_start()))
    })
}

/// First word of the answer, uppercased: `b) two` -> `B`.
fn answer_letter(answer: &str) -> Option<String> {
    answer
        .split(|c: char| !c.is_alphanumeric())
        .find(|token| !token.is_empty())
        .map(str::to_uppercase)
}

/// Text after the first `:`; blank values count as missing.
fn field_value(line: &str) -> Option<String> {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Placeholder questions used when nothing in a response could be parsed.
pub fn placeholder_questions(count: usize) -> Vec<QuizQuestion> {
    (1..=count)
        .map(|i| {
            QuizQuestion::with_options(
                format!("Question {}: What is a key point from the material?", i),
                ["Option A", "Option B", "Option C", "Option D"],
                "A",
            )
        })
        .collect()
}

/// Parse a quiz response into at most `requested` questions.
///
/// Blocks start at each `Question ` marker. A block is kept only when it has
/// question text, exactly four options and a `Correct Answer:` naming one of
/// them. If no block survives, `requested` placeholder questions are
/// returned instead.
pub fn parse_quiz(response_text: &str, requested: usize) -> Vec<QuizQuestion> {
    let mut questions: Vec<QuizQuestion> = response_text
        .split(QUESTION_MARKER)
        .skip(1)
        .filter(|block| !block.trim().is_empty())
        .filter_map(QuizDraft::from_block)
        .filter_map(QuizDraft::finish)
        .collect();

    debug!(
        parsed_count = questions.len(),
        requested,
        "Parsed quiz response"
    );

    if questions.is_empty() {
        questions = placeholder_questions(requested);
    }

    questions.truncate(requested);
    questions
}

/// Parse a flashcard response into at most `requested` cards.
///
/// Ids are assigned from 1 in emission order, so blocks missing a `Front:`
/// or `Back:` value leave no gaps. An unparseable response yields no cards.
pub fn parse_flashcards(response_text: &str, requested: usize) -> Vec<Flashcard> {
    let mut flashcards = Vec::new();

    for block in response_text.split(CARD_MARKER).skip(1) {
        if block.trim().is_empty() {
            continue;
        }

        let next_id = flashcards.len() as u32 + 1;
        if let Some(card) = FlashcardDraft::from_block(block).finish(next_id) {
            flashcards.push(card);
        }
    }

    debug!(
        parsed_count = flashcards.len(),
        requested,
        "Parsed flashcard response"
    );

    flashcards.truncate(requested);
    flashcards
}
