use tracing::debug;

use crate::cleaner::clean_response;
use crate::fallback::{mock_explanation, mock_flashcards, mock_quiz, mock_summary};
use crate::model_discovery::ModelGateway;
use crate::models::{Difficulty, Flashcard, QuizQuestion};
use crate::prompts::{
    clamp_quiz_count, explanation_prompt, flashcard_prompt, quiz_prompt, summary_prompt, QUIZ_MAX_TOKENS,
    SUMMARY_MAX_TOKENS,
};
use crate::response_parser::{parse_flashcards, parse_quiz};

// Import logging macros
use crate::log_fallback;

/// The four study operations. None of them fail: any gateway error is
/// logged and answered with static fallback content.
#[derive(Clone, Debug)]
pub struct StudyService {
    gateway: ModelGateway,
}

impl StudyService {
    pub fn new(gateway: ModelGateway) -> Self {
        Self { gateway }
    }

    pub async fn get_explanation(&self, topic: &str, difficulty: &str) -> String {
        let (prompt, max_tokens) = explanation_prompt(topic, Difficulty::from_request(difficulty));

        match self.gateway.generate(&prompt, Some(max_tokens)).await {
            Ok(text) => clean_response(&text),
            Err(e) => {
                log_fallback!("get_explanation", reason = e);
                mock_explanation(topic, difficulty)
            }
        }
    }

    /// Model summaries are returned as-is, without cleaning.
    pub async fn get_summary(&self, text: &str) -> String {
        match self.gateway.generate(&summary_prompt(text), Some(SUMMARY_MAX_TOKENS)).await {
            Ok(summary) => summary,
            Err(e) => {
                log_fallback!("get_summary", reason = e);
                mock_summary(text)
            }
        }
    }

    pub async fn get_quiz(&self, material: &str, num_questions: usize) -> Vec<QuizQuestion> {
        let count = clamp_quiz_count(num_questions);

        match self.gateway.generate(&quiz_prompt(material, count), Some(QUIZ_MAX_TOKENS)).await {
            Ok(text) => parse_quiz(&text, count),
            Err(e) => {
                log_fallback!("get_quiz", reason = e);
                mock_quiz(material, num_questions)
            }
        }
    }

    pub async fn get_flashcards(&self, topic: &str, num_cards: usize) -> Vec<Flashcard> {
        match self.gateway.generate(&flashcard_prompt(topic, num_cards), None).await {
            Ok(text) => {
                let cards = parse_flashcards(&text, num_cards);
                if cards.is_empty() && num_cards > 0 {
                    debug!(topic = %topic, "Model response contained no flashcards");
                    log_fallback!("get_flashcards", reason = "no flashcards parsed from model response");
                    return mock_flashcards(topic, num_cards);
                }
                cards
            }
            Err(e) => {
                log_fallback!("get_flashcards", reason = e);
                mock_flashcards(topic, num_cards)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GatewayError;
    use crate::llm_providers::TextGenerator;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Replies with a fixed text and records every call.
    struct ScriptedGenerator {
        reply: Result<String, u16>,
        calls: Arc<Mutex<Vec<(String, Option<u32>)>>>,
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str, max_output_tokens: Option<u32>) -> Result<String, GatewayError> {
            self.calls.lock().unwrap().push((prompt.to_string(), max_output_tokens));
            self.reply.clone().map_err(|status| GatewayError::Status {
                provider: "Scripted",
                status,
                body: "failure".to_string(),
            })
        }

        fn provider_name(&self) -> &'static str {
            "Scripted"
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    fn scripted(reply: Result<&str, u16>) -> (StudyService, Arc<Mutex<Vec<(String, Option<u32>)>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let generator = ScriptedGenerator {
            reply: reply.map(str::to_string),
            calls: calls.clone(),
        };
        (StudyService::new(ModelGateway::available(generator)), calls)
    }

    fn disabled() -> StudyService {
        StudyService::new(ModelGateway::disabled("test"))
    }

    #[tokio::test]
    async fn test_explanation_is_cleaned_and_budgeted() {
        let (service, calls) = scripted(Ok("#### **Mutex** costs $O(1)$\n* lock"));
        let text = service.get_explanation("Mutex", "easy").await;

        assert_eq!(text, "### Mutex costs \n• lock");
        assert_eq!(calls.lock().unwrap()[0].1, Some(2500));
    }

    #[tokio::test]
    async fn test_unknown_difficulty_uses_hard_budget() {
        let (service, calls) = scripted(Ok("text"));
        service.get_explanation("Mutex", "Impossible").await;
        assert_eq!(calls.lock().unwrap()[0].1, Some(7000));
    }

    #[tokio::test]
    async fn test_explanation_fallback_keeps_raw_difficulty() {
        let text = disabled().get_explanation("Deadlock", "Impossible").await;
        assert_eq!(text, mock_explanation("Deadlock", "Medium"));

        let (service, _) = scripted(Err(500));
        assert_eq!(
            service.get_explanation("Photosynthesis", "Easy").await,
            mock_explanation("Photosynthesis", "Easy")
        );
    }

    #[tokio::test]
    async fn test_summary_is_not_cleaned() {
        let (service, calls) = scripted(Ok("**Key** point"));
        assert_eq!(service.get_summary("some text").await, "**Key** point");
        assert_eq!(calls.lock().unwrap()[0].1, Some(SUMMARY_MAX_TOKENS));
    }

    #[tokio::test]
    async fn test_summary_fallback() {
        assert_eq!(disabled().get_summary("abc").await, mock_summary("abc"));
    }

    #[tokio::test]
    async fn test_quiz_request_is_clamped() {
        let (service, calls) = scripted(Ok("nothing parseable"));
        let questions = service.get_quiz("material", 9).await;

        assert_eq!(questions.len(), 5);
        let (prompt, tokens) = calls.lock().unwrap()[0].clone();
        assert!(prompt.starts_with("Create 5 multiple-choice questions"));
        assert_eq!(tokens, Some(QUIZ_MAX_TOKENS));
    }

    #[tokio::test]
    async fn test_quiz_parses_model_output() {
        let (service, _) = scripted(Ok(
            "Question 1: What is 2+2?\nA) 3\nB) 4\nC) 5\nD) 22\nCorrect Answer: B",
        ));
        let questions = service.get_quiz("arithmetic", 3).await;
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer, "B");
    }

    #[tokio::test]
    async fn test_quiz_fallback_is_mock_quiz() {
        let questions = disabled().get_quiz("anything", 7).await;
        assert_eq!(questions, mock_quiz("anything", 7));
        assert_eq!(questions.len(), 5);
    }

    #[tokio::test]
    async fn test_flashcards_have_no_token_budget() {
        let (service, calls) = scripted(Ok("Card 1\nFront: Q\nBack: A"));
        let cards = service.get_flashcards("rust", 3).await;

        assert_eq!(cards.len(), 1);
        assert_eq!(calls.lock().unwrap()[0].1, None);
    }

    #[tokio::test]
    async fn test_unparseable_flashcards_fall_back() {
        let (service, _) = scripted(Ok("I cannot help with that."));
        let cards = service.get_flashcards("Deadlock", 2).await;
        assert_eq!(cards, mock_flashcards("Deadlock", 2));
        assert_eq!(cards[0].front, "What is Deadlock?");
    }

    #[tokio::test]
    async fn test_blank_flashcards_fall_back() {
        let (service, _) = scripted(Ok("Card 1\nFront:\nBack:\n"));
        let cards = service.get_flashcards("Deadlock", 3).await;
        assert_eq!(cards, mock_flashcards("Deadlock", 3));
    }

    #[tokio::test]
    async fn test_flashcards_fallback_when_disabled() {
        let cards = disabled().get_flashcards("graph theory", 10).await;
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].front, "What is Graph Theory?");
    }
}
