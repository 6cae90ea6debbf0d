use crate::models::Difficulty;

pub const SUMMARY_INPUT_LIMIT: usize = 1000;
pub const QUIZ_INPUT_LIMIT: usize = 500;
pub const PDF_INPUT_LIMIT: usize = 10_000;
pub const MAX_QUIZ_QUESTIONS: usize = 5;

pub const SUMMARY_MAX_TOKENS: u32 = 300;
pub const QUIZ_MAX_TOKENS: u32 = 400;

/// First `limit` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

pub fn clamp_quiz_count(requested: usize) -> usize {
    requested.min(MAX_QUIZ_QUESTIONS)
}

/// Explanation prompt and the output token budget for its difficulty.
pub fn explanation_prompt(topic: &str, difficulty: Difficulty) -> (String, u32) {
    let prompt = match difficulty {
        Difficulty::Easy => format!(
            r#"Provide a comprehensive explanation of '{topic}' at Easy level.

REQUIREMENTS:
- Write at least 1500 words (equivalent to half a page of dense text)
- Use simple, beginner-friendly language
- Start with a clear, simple definition
- Include 5-7 key concepts explained simply
- Provide 3-4 real-world examples
- Add a summary at the end
- Use bullet points and clear sections
- Avoid technical jargon

Structure:
1. Simple Definition (explain like to a 10-year-old)
2. Why it matters (real-world importance)
3. Key Concepts (5-7 points with examples)
4. Real-world Examples (3-4 detailed examples)
5. Common Misconceptions
6. Summary and Takeaways

Do NOT use mathematical symbols, dollar signs, or special characters."#
        ),
        Difficulty::Medium => format!(
            r#"Provide an in-depth explanation of '{topic}' at Medium level.

REQUIREMENTS:
- Write at least 2500-3000 words (equivalent to a full page)
- Use intermediate technical language
- Include detailed definition with context
- Explain 7-10 key concepts thoroughly
- Provide 4-5 practical examples with code/scenarios if applicable
- Include diagrams descriptions or algorithm explanations
- Add comparison tables or lists
- Discuss advantages and disadvantages
- Include a comprehensive summary

Structure:
1. Detailed Definition and Context
2. Historical Background or Evolution
3. Key Concepts and Principles (7-10 concepts)
4. Practical Examples and Use Cases (4-5 examples)
5. Advantages and Disadvantages
6. Common Patterns and Best Practices
7. Performance Considerations
8. Related Topics
9. Summary and Conclusion

Do NOT use mathematical symbols, dollar signs, or special characters."#
        ),
        Difficulty::Hard => format!(
            r#"Provide an extremely comprehensive, advanced explanation of '{topic}' at Hard level.

REQUIREMENTS:
- Write at least 4000-5000 words (equivalent to 1.5-2 pages)
- Use advanced technical language suitable for experts
- Include formal definitions with theoretical context
- Explain 12-15 advanced concepts in depth
- Provide 6-8 complex examples with detailed analysis
- Include algorithm explanations, pseudocode, or detailed workflows
- Add comparison matrices and analysis tables
- Discuss theoretical frameworks and mathematical principles
- Include advanced use cases and edge cases
- Discuss performance analysis and complexity
- Include emerging trends and future directions
- Add implementation considerations and pitfalls

Structure:
1. Formal Definition and Mathematical Context
2. Historical Development and Evolution
3. Foundational Concepts (5-6 concepts)
4. Advanced Concepts and Theory (7-9 concepts)
5. Detailed Examples and Case Studies (6-8 examples)
6. Algorithm/Process Analysis
7. Performance Analysis and Optimization
8. Comparison with Alternatives
9. Implementation Strategies and Pitfalls
10. Advanced Use Cases and Edge Cases
11. Modern Approaches and Emerging Trends
12. Research and Future Directions
13. Best Practices and Recommendations
14. Conclusion and Critical Analysis

Make it detailed enough for a graduate-level course or technical interview preparation.
Do NOT use mathematical symbols, dollar signs, or special characters.
Use plain text formatting with clear headers and sections."#
        ),
    };

    (prompt, difficulty.max_output_tokens())
}

pub fn summary_prompt(text: &str) -> String {
    format!(
        "Summarize this in 3-4 bullet points with key terms highlighted:\n\n{}",
        truncate_chars(text, SUMMARY_INPUT_LIMIT)
    )
}

/// Quiz prompt; the requested layout is exactly what `parse_quiz` reads.
pub fn quiz_prompt(material: &str, num_questions: usize) -> String {
    format!(
        r#"Create {num_questions} multiple-choice questions based on this:

{material}

Format each question EXACTLY like this, with every option on its own line:
Question 1: [question]
A) [option]
B) [option]
C) [option]
D) [option]
Correct Answer: [A/B/C/D]"#,
        material = truncate_chars(material, QUIZ_INPUT_LIMIT)
    )
}

pub fn flashcard_prompt(topic: &str, num_cards: usize) -> String {
    format!(
        r#"Create {num_cards} study flashcards about '{topic}'.

Format EXACTLY like this:
Card 1
Front: [Question or concept]
Back: [Answer or explanation]

Card 2
Front: [Question or concept]
Back: [Answer or explanation]

(repeat for all {num_cards} cards)

Make the flashcards educational and focused on key concepts."#
    )
}
