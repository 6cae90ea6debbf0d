//! Static study content served whenever the model gateway cannot answer.
//!
//! Every function here is deterministic: the same input always produces the
//! same output, byte for byte.

use crate::models::{Flashcard, QuizQuestion};

pub const MAX_FALLBACK_ITEMS: usize = 5;

/// Prewritten explanations for one topic, one per difficulty level.
struct KnownTopic {
    key: &'static str,
    easy: &'static str,
    medium: &'static str,
    hard: &'static str,
}

impl KnownTopic {
    /// Exact, case-sensitive level lookup; anything unrecognised gets the Medium text.
    fn text_for(&self, difficulty: &str) -> &'static str {
        match difficulty {
            "Easy" => self.easy,
            "Hard" => self.hard,
            _ => self.medium,
        }
    }
}

// Checked in order; the first key contained in the lowercased topic wins.
static KNOWN_TOPICS: [KnownTopic; 2] = [
    KnownTopic {
        key: "deadlock",
        easy: include_str!("../content/explanations/deadlock_easy.md"),
        medium: include_str!("../content/explanations/deadlock_medium.md"),
        hard: include_str!("../content/explanations/deadlock_hard.md"),
    },
    KnownTopic {
        key: "class in java",
        easy: "A class in Java is like a blueprint or template. Just like a cookie cutter creates many cookies of the same shape, a class defines the structure that objects will have. Classes contain properties (data) and methods (actions).",
        medium: "A class is a template for creating objects. It defines attributes (variables) and methods (functions) that describe what an object is and what it can do. Objects are instances created from the class blueprint.",
        hard: "A class is a user-defined data type that serves as a blueprint for object instantiation. It encapsulates data members (attributes) and member functions (methods), providing abstraction through access modifiers. Classes support inheritance, allowing code reuse through hierarchical relationships, and polymorphism through method overriding.",
    },
];

const QUESTION_TEMPLATES: [&str; 5] = [
    "What is the main concept discussed in the material?",
    "Which of the following best describes a key idea?",
    "According to the material, what is important?",
    "What can be inferred from the provided information?",
    "Which statement aligns with the material?",
];

const OPTION_TEMPLATES: [[&str; 4]; 5] = [
    ["A concept from the material", "A related but different idea", "An opposite concept", "An unrelated topic"],
    ["A key point", "A secondary detail", "A common misconception", "A historical fact"],
    ["The main idea", "A supporting idea", "An alternative view", "An exception"],
    ["Correct understanding", "Partial understanding", "Misunderstanding", "Opposite meaning"],
    ["Essential concept", "Nice-to-know detail", "Common mistake", "Advanced topic"],
];

pub fn mock_explanation(topic: &str, difficulty: &str) -> String {
    let topic_lower = topic.to_lowercase();

    if let Some(known) = KNOWN_TOPICS.iter().find(|known| topic_lower.contains(known.key)) {
        return known.text_for(difficulty).to_string();
    }

    format!(
        "## {topic} ({difficulty} Level)\n\nThis is an explanation of {topic} at {difficulty} difficulty level. To get the best learning experience, please ensure your API key has access to Gemini models, or try a different topic."
    )
}

pub fn mock_summary(text: &str) -> String {
    format!(
        r#"## Summary

### Key Points from Your Text
- **Main Concept**: The primary idea discussed in your material
- **Key Details**: Important supporting information  
- **Practical Application**: How this applies in real scenarios
- **Significance**: Why this matters to understand

### Important Terms (Highlighted in Your Text)
Based on your input of {} characters, the material covers important concepts that require careful study.

### Key Takeaways
1. Read through the material carefully to understand core principles
2. Identify key terms and concepts
3. Connect ideas to real-world applications
4. Practice with examples and exercises

### Next Steps
Review the key points, test your understanding, and practice applying these concepts to solidify your learning."#,
        text.chars().count()
    )
}

/// Generic questions; the material itself is not inspected.
pub fn mock_quiz(_material: &str, requested: usize) -> Vec<QuizQuestion> {
    (0..requested.min(MAX_FALLBACK_ITEMS))
        .map(|i| {
            QuizQuestion::with_options(
                QUESTION_TEMPLATES[i % QUESTION_TEMPLATES.len()],
                OPTION_TEMPLATES[i % OPTION_TEMPLATES.len()],
                "A",
            )
        })
        .collect()
}

pub fn mock_flashcards(topic: &str, requested: usize) -> Vec<Flashcard> {
    let title = title_case(topic);

    let templates = [
        (format!("What is {title}?"), format!("{title} is a fundamental concept in its field.")),
        (
            format!("Key characteristics of {title}"),
            "It has multiple important aspects that define its nature.".to_string(),
        ),
        (
            format!("How is {title} applied?"),
            format!("{title} has practical applications in various scenarios."),
        ),
        (
            format!("Common misconceptions about {title}"),
            format!("Many people misunderstand the true nature of {title}."),
        ),
        (
            format!("Why is {title} important?"),
            format!("Understanding {title} is crucial for mastery in this field."),
        ),
    ];

    templates
        .into_iter()
        .take(requested)
        .zip(1..)
        .map(|((front, back), id)| Flashcard { id, front, back })
        .collect()
}

/// Uppercase the first letter of every alphabetic run and lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }

    result
}
