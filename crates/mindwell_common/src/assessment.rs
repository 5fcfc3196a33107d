//! Mental health assessment scoring.
//!
//! A fixed ten-question battery. Each answer is a severity weight (0 = no
//! symptoms), so the reported percentage is inverted: 100 is the best
//! possible result and 0 the worst.

use crate::error::AssessmentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mood,
    Anxiety,
    Stress,
    Sleep,
    Social,
    Energy,
    Coping,
    Overall,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mood => "mood",
            Self::Anxiety => "anxiety",
            Self::Stress => "stress",
            Self::Sleep => "sleep",
            Self::Social => "social",
            Self::Energy => "energy",
            Self::Coping => "coping",
            Self::Overall => "overall",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOption {
    pub text: &'static str,
    pub weight: u8,
}

pub const fn opt(text: &'static str, weight: u8) -> AnswerOption {
    AnswerOption { text, weight }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: u8,
    pub category: Category,
    pub prompt: &'static str,
    pub options: &'static [AnswerOption],
}

impl Question {
    pub fn max_weight(&self) -> u8 {
        self.options.iter().map(|o| o.weight).max().unwrap_or(0)
    }

    fn offers(&self, weight: u8) -> bool {
        self.options.iter().any(|o| o.weight == weight)
    }
}

pub const FREQUENCY: &[AnswerOption] = &[
    opt("Not at all", 0),
    opt("Several days", 1),
    opt("More than half the days", 2),
    opt("Nearly every day", 3),
];

pub const STRESS: &[AnswerOption] = &[
    opt("Very low", 0),
    opt("Low", 1),
    opt("Moderate", 2),
    opt("High", 3),
    opt("Very high", 4),
];

pub const SLEEP: &[AnswerOption] = &[
    opt("Excellent", 0),
    opt("Good", 1),
    opt("Fair", 2),
    opt("Poor", 3),
    opt("Very poor", 4),
];

pub const CONNECTION: &[AnswerOption] = &[
    opt("Very connected", 0),
    opt("Somewhat connected", 1),
    opt("Neutral", 2),
    opt("Somewhat isolated", 3),
    opt("Very isolated", 4),
];

pub const ENERGY: &[AnswerOption] = &[
    opt("Very high", 0),
    opt("High", 1),
    opt("Moderate", 2),
    opt("Low", 3),
    opt("Very low", 4),
];

pub const COPING: &[AnswerOption] = &[
    opt("Very well", 0),
    opt("Well", 1),
    opt("Okay", 2),
    opt("Poorly", 3),
    opt("Very poorly", 4),
];

pub const SATISFACTION: &[AnswerOption] = &[
    opt("Very satisfied", 0),
    opt("Satisfied", 1),
    opt("Neutral", 2),
    opt("Dissatisfied", 3),
    opt("Very dissatisfied", 4),
];

/// Banded reading of a percentage score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpretation {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl Interpretation {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::Excellent
        } else if score >= 60 {
            Self::Good
        } else if score >= 40 {
            Self::Fair
        } else if score >= 20 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent mental health",
            Self::Good => "Good mental health",
            Self::Fair => "Fair mental health - consider some improvements",
            Self::Poor => "Poor mental health - seek support",
            Self::VeryPoor => "Very poor mental health - please seek professional help",
        }
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub total: u32,
    pub max: u32,
    pub count: u32,
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub score: u8,
    pub total_score: u32,
    pub max_possible_score: u32,
    pub interpretation: Interpretation,
    pub category_scores: BTreeMap<Category, CategoryScore>,
}

/// `round((1 - total/max) * 100)`; an empty scale counts as perfect
fn inverted_percentage(total: u32, max: u32) -> u8 {
    if max == 0 {
        return 100;
    }
    let pct = (1.0 - total as f64 / max as f64) * 100.0;
    pct.round().clamp(0.0, 100.0) as u8
}

/// A battery of questions and the scorer over it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Questionnaire {
    questions: Vec<Question>,
}

impl Questionnaire {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The ten-question wellbeing battery
    #[rustfmt::skip]
    pub fn standard() -> Self {
        let q = |id, category, prompt, options| Question { id, category, prompt, options };
        Self::new(vec![
            q(1, Category::Mood, "How often have you felt down, depressed, or hopeless in the past two weeks?", FREQUENCY),
            q(2, Category::Mood, "How often have you had little interest or pleasure in doing things?", FREQUENCY),
            q(3, Category::Anxiety, "How often have you felt nervous, anxious, or on edge?", FREQUENCY),
            q(4, Category::Anxiety, "How often have you been unable to stop or control worrying?", FREQUENCY),
            q(5, Category::Stress, "How would you rate your current stress level?", STRESS),
            q(6, Category::Sleep, "How is your sleep quality recently?", SLEEP),
            q(7, Category::Social, "How connected do you feel to others around you?", CONNECTION),
            q(8, Category::Energy, "How would you describe your energy levels?", ENERGY),
            q(9, Category::Coping, "How well are you coping with daily challenges?", COPING),
            q(10, Category::Overall, "Overall, how satisfied are you with your life currently?", SATISFACTION),
        ])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn max_possible_score(&self) -> u32 {
        self.questions.iter().map(|q| q.max_weight() as u32).sum()
    }

    /// Score one selected weight per question, in question order.
    pub fn score(&self, answers: &[u8]) -> Result<AssessmentResult, AssessmentError> {
        if answers.len() != self.questions.len() {
            return Err(AssessmentError::AnswerCount {
                expected: self.questions.len(),
                got: answers.len(),
            });
        }
        for (question, &weight) in self.questions.iter().zip(answers) {
            if !question.offers(weight) {
                return Err(AssessmentError::InvalidWeight {
                    question: question.id,
                    weight,
                });
            }
        }

        let total_score: u32 = answers.iter().map(|&w| w as u32).sum();
        let max_possible_score = self.max_possible_score();
        let score = inverted_percentage(total_score, max_possible_score);

        Ok(AssessmentResult {
            score,
            total_score,
            max_possible_score,
            interpretation: Interpretation::from_score(score),
            category_scores: self.category_scores(answers),
        })
    }

    fn category_scores(&self, answers: &[u8]) -> BTreeMap<Category, CategoryScore> {
        let mut categories: BTreeMap<Category, CategoryScore> = BTreeMap::new();
        for (question, &weight) in self.questions.iter().zip(answers) {
            let entry = categories.entry(question.category).or_insert(CategoryScore {
                total: 0,
                max: 0,
                count: 0,
                percentage: 0,
            });
            entry.total += weight as u32;
            entry.max += question.max_weight() as u32;
            entry.count += 1;
        }
        for cat in categories.values_mut() {
            cat.percentage = inverted_percentage(cat.total, cat.max);
        }
        categories
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::standard()
    }
}
