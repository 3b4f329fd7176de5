//! Built-in question set and difficulty table

use std::collections::BTreeMap;

use super::{Difficulty, DifficultyConfig, Question};

pub fn difficulties() -> BTreeMap<Difficulty, DifficultyConfig> {
    BTreeMap::from([
        (Difficulty::Easy, DifficultyConfig::new("Easy", 10, "emerald")),
        (Difficulty::Medium, DifficultyConfig::new("Medium", 7, "blue")),
        (Difficulty::Hard, DifficultyConfig::new("Hard", 5, "orange")),
        (Difficulty::Expert, DifficultyConfig::new("Expert", 3, "red")),
    ])
}

pub fn questions() -> Vec<Question> {
    vec![
        Question::new(
            1,
            "Which planet is closest to the Sun?",
            &["Venus", "Mercury", "Mars", "Earth"],
            1,
            "Astronomy",
        ),
        Question::new(
            2,
            "How many continents are there on Earth?",
            &["Five", "Six", "Seven", "Eight"],
            2,
            "Geography",
        ),
        Question::new(
            3,
            "What is the chemical symbol for gold?",
            &["Ag", "Gd", "Go", "Au"],
            3,
            "Science",
        ),
        Question::new(
            4,
            "Which ocean is the largest by area?",
            &["Pacific", "Atlantic", "Indian", "Arctic"],
            0,
            "Geography",
        ),
        Question::new(
            5,
            "How many sides does a hexagon have?",
            &["Five", "Six", "Seven", "Eight"],
            1,
            "Mathematics",
        ),
        Question::new(
            6,
            "What gas do plants absorb from the atmosphere for photosynthesis?",
            &["Oxygen", "Nitrogen", "Carbon dioxide", "Hydrogen"],
            2,
            "Science",
        ),
        Question::new(
            7,
            "Which is the longest river in Africa?",
            &["Congo", "Niger", "Zambezi", "Nile"],
            3,
            "Geography",
        ),
        Question::new(
            8,
            "What is the square root of 144?",
            &["12", "14", "11", "16"],
            0,
            "Mathematics",
        ),
        Question::new(
            9,
            "Which instrument measures atmospheric pressure?",
            &["Thermometer", "Barometer", "Hygrometer", "Anemometer"],
            1,
            "Science",
        ),
        Question::new(
            10,
            "How many minutes are there in a full day?",
            &["1240", "1340", "1440", "1540"],
            2,
            "Mathematics",
        ),
    ]
}
