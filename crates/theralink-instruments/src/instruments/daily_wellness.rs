use crate::Instrument;
use crate::scoring::{Question, ScoreRange};

/// Number of questions in the daily check-in.
pub const QUESTION_COUNT: usize = 20;

/// Slider position each question starts at.
pub const DEFAULT_RESPONSE: u8 = 3;

const QUESTIONS: [&str; QUESTION_COUNT] = [
    "How stable was your mood today?",
    "How intense was your anxiety today?",
    "How well could you regulate your emotions?",
    "How irritable did you feel?",
    "How calm did you feel overall?",
    "How frequent were negative thoughts?",
    "How much did you overthink today?",
    "How focused were you?",
    "How difficult was decision-making?",
    "How clear did your thinking feel?",
    "How would you rate your sleep quality?",
    "Were you satisfied with your sleep duration?",
    "How was your energy level today?",
    "How was your appetite?",
    "Did you feel physical tension or restlessness?",
    "How motivated did you feel?",
    "How socially connected did you feel?",
    "How stressful was work/study today?",
    "Did you feel overwhelmed?",
    "Overall mental well-being today?",
];

/// Daily 2-minute mental health check-in.
/// Twenty Likert items, 1–5. The score is the plain mean of all answers;
/// no item is reverse-keyed.
pub struct DailyWellness;

impl DailyWellness {
    pub const ID: &'static str = "daily_wellness";
}

impl Instrument for DailyWellness {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Daily Wellness Check-In"
    }

    fn questions(&self) -> &[Question] {
        static ITEMS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
            QUESTIONS
                .iter()
                .enumerate()
                .map(|(i, text)| Question {
                    id: format!("q{}", i + 1),
                    text: (*text).to_string(),
                    range: ScoreRange::LIKERT_5,
                    default_value: DEFAULT_RESPONSE,
                })
                .collect()
        });
        &ITEMS
    }
}
