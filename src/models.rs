use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Choice letters of a multiple-choice question, in display order.
pub const OPTION_KEYS: [&str; 4] = ["A", "B", "C", "D"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: BTreeMap<String, String>, // "A".."D" -> option text
    pub correct_answer: String,
}

impl QuizQuestion {
    /// Build a question from four option texts given in A..D order.
    pub fn with_options(question: impl Into<String>, options: [&str; 4], correct_answer: &str) -> Self {
        let options = OPTION_KEYS
            .iter()
            .zip(options)
            .map(|(key, text)| (key.to_string(), text.to_string()))
            .collect();

        Self {
            question: question.into(),
            options,
            correct_answer: correct_answer.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: u32, // 1-based, sequential within a response
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-insensitive; anything other than easy/medium is treated as Hard.
    pub fn from_request(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    /// Output token budget requested from the model for an explanation.
    pub fn max_output_tokens(self) -> u32 {
        match self {
            Difficulty::Easy => 2500,
            Difficulty::Medium => 4000,
            Difficulty::Hard => 7000,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

// Request payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainRequest {
    pub topic: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String, // Easy, Medium, Hard
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRequest {
    pub material: String,
    #[serde(default = "default_item_count")]
    pub num_questions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashcardRequest {
    pub topic: String,
    #[serde(default = "default_item_count")]
    pub num_cards: usize,
}

fn default_difficulty() -> String {
    "Medium".to_string()
}

fn default_item_count() -> usize {
    5
}

// Response payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplanationResponse {
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashcardsResponse {
    pub flashcards: Vec<Flashcard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parsing_is_case_insensitive() {
        assert_eq!(Difficulty::from_request("easy"), Difficulty::Easy);
        assert_eq!(Difficulty::from_request("EASY"), Difficulty::Easy);
        assert_eq!(Difficulty::from_request("Medium"), Difficulty::Medium);
        assert_eq!(Difficulty::from_request("hard"), Difficulty::Hard);
        assert_eq!(Difficulty::from_request("Impossible"), Difficulty::Hard);
        assert_eq!(Difficulty::from_request(""), Difficulty::Hard);
    }

    #[test]
    fn test_token_budgets() {
        assert_eq!(Difficulty::Easy.max_output_tokens(), 2500);
        assert_eq!(Difficulty::Medium.max_output_tokens(), 4000);
        assert_eq!(Difficulty::Hard.max_output_tokens(), 7000);
    }

    #[test]
    fn test_request_defaults() {
        let explain: ExplainRequest = serde_json::from_str(r#"{"topic": "Deadlock"}"#).unwrap();
        assert_eq!(explain.difficulty, "Medium");

        let quiz: QuizRequest = serde_json::from_str(r#"{"material": "text"}"#).unwrap();
        assert_eq!(quiz.num_questions, 5);

        let cards: FlashcardRequest = serde_json::from_str(r#"{"topic": "Rust"}"#).unwrap();
        assert_eq!(cards.num_cards, 5);
    }

    #[test]
    fn test_quiz_question_options_serialize_in_letter_order() {
        let question = QuizQuestion::with_options("Q?", ["one", "two", "three", "four"], "B");
        let json = serde_json::to_string(&question).unwrap();
        assert_eq!(
            json,
            r#"{"question":"Q?","options":{"A":"one","B":"two","C":"three","D":"four"},"correct_answer":"B"}"#
        );
    }
}
