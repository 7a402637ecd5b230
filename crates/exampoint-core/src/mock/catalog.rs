//! Canned study content returned by the keyword dispatchers.

use crate::study::{Flashcard, QuestionType, QuizQuestion};

pub(crate) type CardTable = &'static [(&'static str, &'static str)];

pub(crate) const EXAMPLE_FLASHCARDS: CardTable = &[
    (
        "What is the Pythagorean theorem?",
        "a² + b² = c² (in a right triangle, the square of the hypotenuse equals the sum of squares of the other two sides)",
    ),
    (
        "What is photosynthesis?",
        "The process by which plants use sunlight, water, and carbon dioxide to create oxygen and energy in the form of sugar",
    ),
    ("What does DNA stand for?", "Deoxyribonucleic Acid"),
];

pub(crate) const CELL_BIOLOGY: CardTable = &[
    (
        "What is the primary function of mitochondria?",
        "Mitochondria are the powerhouse of the cell, producing ATP through cellular respiration to provide energy for cellular processes.",
    ),
    (
        "What is the structure of mitochondria?",
        "Mitochondria have a double membrane structure with an outer membrane and an inner membrane with cristae (folds) that increase surface area for ATP production.",
    ),
    (
        "What is cellular respiration?",
        "Cellular respiration is the process where glucose and oxygen are converted into ATP, carbon dioxide, and water. Formula: C₆H₁₂O₆ + 6O₂ → 6CO₂ + 6H₂O + ATP",
    ),
    (
        "Why do mitochondria have their own DNA?",
        "Mitochondria have their own DNA (mtDNA) because they evolved from ancient bacteria that were engulfed by early eukaryotic cells, supporting the endosymbiotic theory.",
    ),
    (
        "Where in the cell are mitochondria located?",
        "Mitochondria are found in the cytoplasm of nearly all eukaryotic cells, with higher concentrations in cells that require more energy, such as muscle cells.",
    ),
];

pub(crate) const ALGEBRA: CardTable = &[
    (
        "What is the order of operations in algebra?",
        "PEMDAS: Parentheses, Exponents, Multiplication/Division (left to right), Addition/Subtraction (left to right)",
    ),
    (
        "How do you solve a linear equation?",
        "1) Simplify both sides, 2) Use inverse operations to isolate the variable, 3) Whatever you do to one side, do to the other, 4) Check your answer",
    ),
    (
        "What is the quadratic formula?",
        "x = (-b ± √(b² - 4ac)) / 2a, used to solve equations in the form ax² + bx + c = 0",
    ),
    (
        "What is the slope-intercept form?",
        "y = mx + b, where m is the slope and b is the y-intercept of a linear equation",
    ),
    (
        "How do you factor a quadratic expression?",
        "Find two numbers that multiply to c and add to b in x² + bx + c, then write as (x + p)(x + q)",
    ),
];

pub(crate) const AMERICAN_REVOLUTION: CardTable = &[
    (
        "What were the main causes of the American Revolution?",
        "Taxation without representation, restrictions on colonial trade, the Stamp Act, Tea Act, and increased British control over colonial affairs",
    ),
    (
        "When did the American Revolution take place?",
        "The American Revolution lasted from 1775 to 1783, starting with the Battles of Lexington and Concord and ending with the Treaty of Paris",
    ),
    (
        "Who were the key figures in the American Revolution?",
        "George Washington (Commander), Thomas Jefferson (Declaration author), Benjamin Franklin, John Adams, and Paul Revere were major American leaders",
    ),
    (
        "What was the Declaration of Independence?",
        "A document written in 1776 declaring the 13 American colonies independent from British rule, emphasizing natural rights and self-governance",
    ),
    (
        "What was the outcome of the American Revolution?",
        "The colonies gained independence, formed the United States, established a democratic government, and influenced future revolutions worldwide",
    ),
];

pub(crate) const CHEMISTRY: CardTable = &[
    (
        "What is the basic structure of an atom?",
        "Atoms consist of a nucleus (containing protons and neutrons) surrounded by electrons in orbitals or shells",
    ),
    (
        "What are the three main types of chemical bonds?",
        "Ionic bonds (transfer of electrons), covalent bonds (sharing of electrons), and metallic bonds (sea of electrons)",
    ),
    (
        "What is the periodic table?",
        "An organized chart of chemical elements arranged by atomic number, showing patterns in element properties and behavior",
    ),
    (
        "What is a chemical reaction?",
        "A process where substances (reactants) are transformed into different substances (products) through breaking and forming chemical bonds",
    ),
    (
        "What is the difference between an element and a compound?",
        "An element is a pure substance made of one type of atom, while a compound is made of two or more different elements chemically bonded together",
    ),
];

pub(crate) fn cards(table: CardTable) -> Vec<Flashcard> {
    table.iter().map(|(q, a)| Flashcard::new(*q, *a)).collect()
}

pub(crate) const POWERHOUSE_QUESTION: &str = "What is the powerhouse of the cell?";

pub(crate) fn powerhouse_question() -> QuizQuestion {
    QuizQuestion {
        question_text: POWERHOUSE_QUESTION.to_string(),
        question_type: QuestionType::MultipleChoice,
        options: Some(
            ["Nucleus", "Ribosome", "Mitochondria", "Chloroplast"]
                .into_iter()
                .map(String::from)
                .collect(),
        ),
        correct_answer: "Mitochondria".to_string(),
        explanation: Some(
            "Mitochondria are called the powerhouse of the cell because they produce ATP, the energy currency used by cells."
                .to_string(),
        ),
    }
}

pub(crate) fn revolution_question() -> QuizQuestion {
    QuizQuestion {
        question_text: "The American Revolution ended in which year?".to_string(),
        question_type: QuestionType::ShortAnswer,
        options: None,
        correct_answer: "1783".to_string(),
        explanation: Some(
            "The Treaty of Paris was signed in 1783, officially ending the American Revolutionary War.".to_string(),
        ),
    }
}

pub(crate) const POWERHOUSE_CORRECT: &str = "Excellent! You're absolutely right - Mitochondria are the powerhouse of the cell. You clearly understand that mitochondria produce ATP through cellular respiration. This energy currency is essential for all cellular processes. Great job!";

pub(crate) const POWERHOUSE_INCORRECT: &str = "You chose B (Nucleus), but the correct answer is C (Mitochondria). The nucleus is actually the control center of the cell that contains DNA, but it doesn't produce energy. Mitochondria are the organelles responsible for cellular respiration and ATP production, which is why they're called the powerhouse of the cell. Think of mitochondria as tiny power plants inside each cell!";
