//! Keyword-matched tutor chat replies.

use once_cell::sync::Lazy;
use regex::Regex;

static WHAT_IS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)what is |what are |[?!.]").expect("valid tutor topic pattern")
});

/// Reply to a student question. Rules are checked in order; the first hit wins.
pub fn tutor_response(question: &str) -> String {
    let lower = question.to_lowercase();

    if lower.contains("1 + 1") || lower.contains("one plus one") {
        return "1 + 1 = 2\n\nStudy Tip: Practice basic addition daily to build speed and confidence!".to_string();
    }

    if lower.contains("photosynthesis") {
        return "Photosynthesis is how plants make food using sunlight, water, and CO₂ to create glucose and oxygen.\n\n\
                Equation: 6CO₂ + 6H₂O + Light → C₆H₁₂O₆ + 6O₂\n\n\
                Study Tip: Remember it happens in chloroplasts and produces the oxygen we breathe!"
            .to_string();
    }

    if lower.contains("mitochondria") {
        return "Mitochondria is the powerhouse of the cell - it makes ATP (energy) from glucose.\n\n\
                Study Tip: Think of it like a battery that powers the cell!"
            .to_string();
    }

    if lower.contains("solve") || lower.contains("equation") {
        return "To solve equations:\n1. Get the variable alone\n2. Do the same thing to both sides\n3. Check your answer\n\n\
                Example: 2x + 5 = 13\nSubtract 5: 2x = 8\nDivide by 2: x = 4\n\n\
                Study Tip: Practice one problem type at a time until you master it!"
            .to_string();
    }

    if lower.contains("what is") || lower.contains("what are") {
        let topic = WHAT_IS.replace_all(question, "");
        return format!(
            "{} is a concept you'll understand better with practice.\n\n\
             Study Tip: Try teaching this to a friend - if you can explain it simply, you really get it!",
            capitalize(topic.trim())
        );
    }

    if lower.contains("how") {
        return "Here's the simple answer:\n\nBreak it into small steps, practice each step, then put them together.\n\n\
                Study Tip: Use flashcards to memorize the key steps!"
            .to_string();
    }

    "Good question! The key is to understand the basics first, then practice.\n\n\
     Study Tip: Review this topic for 10 minutes today, then again in 3 days for better memory!"
        .to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_wins_over_everything() {
        assert!(tutor_response("What is 1 + 1?").starts_with("1 + 1 = 2"));
    }

    #[test]
    fn photosynthesis_before_generic_what_is() {
        let r = tutor_response("What is photosynthesis?");
        assert!(r.starts_with("Photosynthesis is how plants make food"));
    }

    #[test]
    fn what_is_extracts_and_capitalizes_topic() {
        let r = tutor_response("What is osmosis?");
        assert!(r.starts_with("Osmosis is a concept you'll understand better with practice."), "{r}");
        let r = tutor_response("WHAT ARE prime numbers!");
        assert!(r.starts_with("Prime numbers is a concept"), "{r}");
    }

    #[test]
    fn how_and_default_replies() {
        assert!(tutor_response("how do I study").starts_with("Here's the simple answer"));
        assert!(tutor_response("Tell me something").starts_with("Good question!"));
    }

    #[test]
    fn equations_get_worked_example() {
        assert!(tutor_response("Can you solve 2x + 5 = 13").contains("x = 4"));
    }
}
