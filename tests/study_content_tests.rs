use study_buddy::cleaner::clean_response;
use study_buddy::fallback::{mock_explanation, mock_flashcards, mock_quiz, mock_summary};
use study_buddy::models::OPTION_KEYS;
use study_buddy::prompts::{explanation_prompt, quiz_prompt, truncate_chars, QUIZ_INPUT_LIMIT};
use study_buddy::response_parser::{parse_flashcards, parse_quiz};
use study_buddy::Difficulty;

const MODEL_QUIZ: &str = r#"Sure! Here are your questions.

Question 1: What is the time complexity of binary search?
A) O(n)
B) O(log n)
C) O(n log n)
D) O(1)
Correct Answer: B

Question 2: Which structure does breadth-first search use?
A) Stack
B) Heap
C) Queue
D) Tree
Correct Answer: C

Question 3: Which sort is stable?
A) Merge sort
B) Heap sort
C) Quick sort
D) Selection sort
Correct Answer: A
"#;

#[test]
fn test_cleaner_is_idempotent_on_clean_text() {
    let samples = [
        "### Heading\n• point one\n• point two",
        "Plain sentence with no markup.",
        "",
    ];

    for sample in samples {
        assert_eq!(clean_response(sample), sample);
        let once = clean_response(&format!("{sample}\n* extra **bold** $y$"));
        assert_eq!(clean_response(&once), once);
    }
}

#[test]
fn test_quiz_parse_respects_requested_count() {
    for requested in 0..=5 {
        let questions = parse_quiz(MODEL_QUIZ, requested);
        assert!(questions.len() <= requested);
        for question in &questions {
            let keys: Vec<&str> = question.options.keys().map(String::as_str).collect();
            assert_eq!(keys, OPTION_KEYS);
            assert!(question.options.contains_key(&question.correct_answer));
        }
    }
    assert_eq!(parse_quiz(MODEL_QUIZ, 5).len(), 3);
}

#[test]
fn test_quiz_prompt_output_round_trips_through_parser() {
    let prompt = quiz_prompt("sorting algorithms", 3);
    assert!(prompt.contains("Question 1: [question]"));
    assert!(prompt.contains("Correct Answer: [A/B/C/D]"));

    // A model echoing the requested layout is read back in full
    let questions = parse_quiz(MODEL_QUIZ, 3);
    assert_eq!(questions[2].question, "Which sort is stable?");
    assert_eq!(questions[2].correct_answer, "A");
}

#[test]
fn test_quiz_prompt_truncates_material() {
    let material = "ζ".repeat(QUIZ_INPUT_LIMIT + 50);
    let prompt = quiz_prompt(&material, 2);
    assert!(prompt.contains(truncate_chars(&material, QUIZ_INPUT_LIMIT)));
    assert_eq!(prompt.matches('ζ').count(), QUIZ_INPUT_LIMIT);
}

#[test]
fn test_explanation_budgets() {
    assert_eq!(explanation_prompt("x", Difficulty::Easy).1, 2500);
    assert_eq!(explanation_prompt("x", Difficulty::Medium).1, 4000);
    assert_eq!(explanation_prompt("x", Difficulty::Hard).1, 7000);
    assert_eq!(Difficulty::from_request("EASY"), Difficulty::Easy);
    assert_eq!(Difficulty::from_request("expert"), Difficulty::Hard);
}

#[test]
fn test_flashcard_ids_are_contiguous() {
    let text = "Card 1\nFront: A\nBack: a\nCard 2\nBack: missing front\nCard 3\nFront: C\nBack: c\nCard 4\nFront: D\nBack: d";
    let cards = parse_flashcards(text, 10);

    let ids: Vec<u32> = cards.iter().map(|card| card.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(cards[1].front, "C");
}

#[test]
fn test_fallbacks_are_deterministic() {
    assert_eq!(mock_explanation("Deadlock", "Easy"), mock_explanation("Deadlock", "Easy"));
    assert_eq!(mock_summary("same input"), mock_summary("same input"));
    assert_eq!(mock_quiz("a", 3), mock_quiz("b", 3));
    assert_eq!(mock_flashcards("Graphs", 4), mock_flashcards("Graphs", 4));
}

#[test]
fn test_mock_quiz_clamps_to_five() {
    let questions = mock_quiz("anything", 7);
    assert_eq!(questions.len(), 5);
    assert!(questions.iter().all(|question| question.correct_answer == "A"));
}

#[test]
fn test_mock_flashcards_prefix() {
    let cards = mock_flashcards("Deadlock", 2);
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].front, "What is Deadlock?");
    assert_eq!(cards[1].front, "Key characteristics of Deadlock");
    assert_eq!(mock_flashcards("Deadlock", 9).len(), 5);
}

#[test]
fn test_deadlock_levels() {
    let hard = mock_explanation("deadlock", "Hard");
    assert!(hard.starts_with("## Deadlock in Operating System - Advanced Analysis (Hard Level)"));
    assert!(hard.len() > mock_explanation("Deadlock", "Easy").len());
    assert_eq!(mock_explanation("Deadlock", "Impossible"), mock_explanation("Deadlock", "Medium"));
}
