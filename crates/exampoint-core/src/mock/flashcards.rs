//! Keyword-matched flashcard generation.
//!
//! Short question-like input is matched against a fixed topic list; anything
//! else is treated as study material and mined for sentences.

use crate::mock::catalog::{self, CardTable};
use crate::study::Flashcard;

/// Inputs at or above this many characters are always treated as material.
const QUESTION_MAX_CHARS: usize = 200;
const MAX_SENTENCE_CARDS: usize = 5;

/// Topic keywords and the canned set each one selects, checked in order.
const TOPICS: &[(&[&str], CardTable)] = &[
    (&["photosynthesis"], catalog::EXAMPLE_FLASHCARDS),
    (&["mitochondria", "cell biology"], catalog::CELL_BIOLOGY),
    (&["algebra", "equation", "math"], catalog::ALGEBRA),
    (&["history", "revolution", "war"], catalog::AMERICAN_REVOLUTION),
    (&["chemistry", "element", "atom"], catalog::CHEMISTRY),
];

/// Build a flashcard set from a topic question or pasted study material.
pub fn flashcards_from_text(text: &str) -> Vec<Flashcard> {
    let lower = text.to_lowercase();
    if is_subject_question(text, &lower) {
        return subject_cards(text, &lower);
    }
    material_cards(text, &lower)
}

fn is_subject_question(text: &str, lower: &str) -> bool {
    text.chars().count() < QUESTION_MAX_CHARS
        && (lower.contains('?')
            || lower.starts_with("what")
            || lower.starts_with("how")
            || lower.starts_with("why")
            || lower.starts_with("explain")
            || lower.contains("about"))
}

fn subject_cards(text: &str, lower: &str) -> Vec<Flashcard> {
    for (keywords, table) in TOPICS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return catalog::cards(table);
        }
    }
    generic_cards(text)
}

fn generic_cards(topic: &str) -> Vec<Flashcard> {
    vec![
        Flashcard::new(
            format!("What is the main concept of {}?", topic),
            "This concept involves understanding the fundamental principles and how they apply in various contexts. Study the definitions, examples, and relationships between ideas.",
        ),
        Flashcard::new(
            format!("Why is {} important to learn?", topic),
            "Understanding this topic builds foundational knowledge for more advanced concepts and helps develop critical thinking skills in this subject area.",
        ),
        Flashcard::new(
            format!("What are the key components of {}?", topic),
            "Break down the topic into smaller parts: identify main ideas, supporting details, examples, and how they connect to broader concepts.",
        ),
        Flashcard::new(
            format!("How can you apply {} in real situations?", topic),
            "Look for practical examples, solve related problems, and connect the concept to real-world scenarios to deepen understanding.",
        ),
        Flashcard::new(
            format!("What are common misconceptions about {}?", topic),
            "Review the topic carefully, identify areas of confusion, and compare correct understanding with common errors to avoid mistakes.",
        ),
    ]
}

fn material_cards(text: &str, lower: &str) -> Vec<Flashcard> {
    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.chars().count() > 10)
        .collect();

    if sentences.is_empty() {
        return vec![
            Flashcard::new(
                format!("What is the main topic of: \"{}...\"?", prefix(text, 50)),
                "This topic requires further study material to generate detailed flashcards.",
            ),
            Flashcard::new(
                "How would you explain this concept?",
                "Review the material and create your own explanation to reinforce learning.",
            ),
        ];
    }

    let mut cards: Vec<Flashcard> = sentences
        .iter()
        .take(MAX_SENTENCE_CARDS)
        .filter(|s| s.chars().count() > 15)
        .map(|s| {
            Flashcard::new(
                format!("What key concept is explained by: \"{}...\"?", prefix(s, 60)),
                *s,
            )
        })
        .collect();

    if lower.contains("photosynthesis") {
        cards.extend(catalog::cards(catalog::EXAMPLE_FLASHCARDS));
    } else {
        cards.push(Flashcard::new(
            "Summarize the main points from this material",
            format!("Key concepts: {}...", prefix(text, 100)),
        ));
    }
    cards
}

/// First `n` characters of `s`.
pub(crate) fn prefix(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photosynthesis_question_returns_example_set() {
        let cards = flashcards_from_text("What is photosynthesis?");
        assert_eq!(cards, catalog::cards(catalog::EXAMPLE_FLASHCARDS));
        assert_eq!(cards.len(), 3);
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let cards = flashcards_from_text("Explain MITOCHONDRIA please");
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].question, "What is the primary function of mitochondria?");
    }

    #[test]
    fn earlier_topics_win() {
        // "history" and "math" both match; math is listed first.
        let cards = flashcards_from_text("Tell me about the history of math");
        assert_eq!(cards[0].question, "What is the order of operations in algebra?");
    }

    #[test]
    fn unknown_subject_question_uses_template() {
        let cards = flashcards_from_text("Tell me about volcanoes");
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].question, "What is the main concept of Tell me about volcanoes?");
        assert!(cards.iter().all(|c| c.question.contains("Tell me about volcanoes")));
    }

    #[test]
    fn long_material_becomes_sentence_cards_plus_summary() {
        let text = "Volcanoes form where magma reaches the surface of the crust. \
                    Lava cools into igneous rock over long periods of time. Short one.";
        let cards = flashcards_from_text(text);
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[1].answer, "Lava cools into igneous rock over long periods of time");
        assert!(cards[0].question.starts_with("What key concept is explained by: \""));
        assert_eq!(cards[2].question, "Summarize the main points from this material");
    }

    #[test]
    fn material_mentioning_photosynthesis_appends_examples() {
        let text = "Photosynthesis happens inside chloroplasts of plant cells. It releases oxygen as a byproduct";
        let cards = flashcards_from_text(text);
        assert_eq!(cards.len(), 2 + 3);
        assert_eq!(cards[4].question, "What does DNA stand for?");
    }

    #[test]
    fn material_with_no_usable_sentence_gets_placeholders() {
        let cards = flashcards_from_text("cells. dna!");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "What is the main topic of: \"cells. dna!...\"?");
    }

    #[test]
    fn at_most_five_sentence_cards() {
        let text = "This sentence is long enough to count. ".repeat(8);
        let cards = flashcards_from_text(&text);
        assert_eq!(cards.len(), 5 + 1);
    }
}
