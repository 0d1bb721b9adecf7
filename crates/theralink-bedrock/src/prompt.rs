//! The session prep prompt.

/// Target summary length, in words.
pub const TARGET_WORDS: u32 = 110;

/// Build the prompt for a patient's latest wellness score.
///
/// The wording is fixed; only the score varies. The model is told not to
/// diagnose or advise and to stay neutral.
pub fn build_summary_prompt(score: f64) -> String {
    format!(
        "\
You are an AI clinical assistant supporting a licensed mental health professional.

Rules:
- No diagnosis
- No advice
- Neutral language

Data:
Average wellness score today: {score:.2}

Task:
Generate a short {TARGET_WORDS} words factual summary for therapist preparation.
"
    )
}
