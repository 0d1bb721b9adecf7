use theralink_core::models::risk::{RiskTier, classify};
use theralink_instruments::error::InstrumentError;
use theralink_instruments::instruments::daily_wellness::{DailyWellness, QUESTION_COUNT};
use theralink_instruments::scoring::mean_score;
use theralink_instruments::{Instrument, all_instruments, get_instrument, require_instrument};

fn today() -> jiff::civil::Date {
    jiff::civil::date(2026, 10, 19)
}

fn submit(responses: Vec<u8>) -> Result<theralink_core::models::check_in::CheckIn, InstrumentError> {
    DailyWellness.check_in(responses, today(), jiff::Timestamp::UNIX_EPOCH)
}

#[test]
fn has_twenty_likert_questions() {
    let questions = DailyWellness.questions();
    assert_eq!(questions.len(), QUESTION_COUNT);
    assert_eq!(questions[0].id, "q1");
    assert_eq!(questions[19].id, "q20");
    assert_eq!(questions[0].text, "How stable was your mood today?");
    for q in questions {
        assert_eq!(q.range.min, 1.0);
        assert_eq!(q.range.max, 5.0);
        assert_eq!(q.default_value, 3);
    }
}

#[test]
fn registry_lookup() {
    assert_eq!(all_instruments().len(), 1);
    assert!(get_instrument("daily_wellness").is_some());
    assert!(get_instrument("phq9").is_none());
    assert!(matches!(
        require_instrument("phq9"),
        Err(InstrumentError::UnknownInstrument(id)) if id == "phq9"
    ));
}

#[test]
fn uniform_answers_score_and_classify() {
    let ones = submit(vec![1; 20]).unwrap();
    assert_eq!(ones.score, 1.0);
    assert_eq!(classify(ones.score), RiskTier::Red);

    let fives = submit(vec![5; 20]).unwrap();
    assert_eq!(fives.score, 5.0);
    assert_eq!(classify(fives.score), RiskTier::Green);

    let threes = submit(vec![3; 20]).unwrap();
    assert_eq!(threes.score, 3.0);
    assert_eq!(classify(threes.score), RiskTier::Yellow);
}

#[test]
fn check_in_keeps_responses_and_date() {
    let responses: Vec<u8> = (0..20).map(|i| (i % 5) as u8 + 1).collect();
    let check_in = submit(responses.clone()).unwrap();
    assert_eq!(check_in.responses, responses);
    assert_eq!(check_in.date, today());
    assert_eq!(check_in.score, 3.0);
}

#[test]
fn score_is_rounded_mean_within_domain() {
    // Walk every possible response sum for twenty answers.
    for extra in 0..=80u32 {
        let mut responses = vec![1u8; 20];
        let mut remaining = extra;
        for r in responses.iter_mut() {
            let add = remaining.min(4);
            *r += add as u8;
            remaining -= add;
        }
        let check_in = submit(responses.clone()).unwrap();
        let sum: u32 = responses.iter().map(|&r| u32::from(r)).sum();
        let expected = (f64::from(sum) / 20.0 * 100.0).round() / 100.0;
        assert!((check_in.score - expected).abs() < 1e-9, "sum {sum}");
        assert!((1.0..=5.0).contains(&check_in.score));
    }
}

#[test]
fn two_decimal_rounding() {
    assert_eq!(mean_score(&[1, 2, 2]), Some(1.67));
    assert_eq!(mean_score(&[1, 1, 2]), Some(1.33));
    assert_eq!(mean_score(&[]), None);
}

#[test]
fn rejects_wrong_length() {
    let err = submit(vec![3; 19]).unwrap_err();
    let errors = err.validation_errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].question_id.is_none());
    assert!(err.to_string().contains("expected 20 responses, got 19"));

    assert!(submit(vec![3; 21]).is_err());
    assert!(submit(Vec::new()).is_err());
}

#[test]
fn rejects_out_of_range_values() {
    let mut responses = vec![3u8; 20];
    responses[4] = 0;
    responses[9] = 6;

    let err = submit(responses).unwrap_err();
    let errors = err.validation_errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].question_id.as_deref(), Some("q5"));
    assert_eq!(errors[0].value, Some(0));
    assert_eq!(errors[1].question_id.as_deref(), Some("q10"));
    assert_eq!(errors[1].value, Some(6));
}
