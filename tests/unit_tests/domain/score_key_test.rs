use std::collections::HashSet;

use call_analyzer::domain::ScoreKey;

#[test]
fn given_all_keys_when_listed_then_there_are_ten_distinct_names() {
    let names: HashSet<&str> = ScoreKey::ALL.iter().map(ScoreKey::as_str).collect();
    assert_eq!(names.len(), 10);
}

#[test]
fn given_keys_when_reading_ranges_then_match_evaluation_rubric() {
    assert_eq!(ScoreKey::Greeting.max_score(), 5.0);
    assert_eq!(ScoreKey::CollectionUrgency.max_score(), 15.0);
    assert_eq!(ScoreKey::RebuttalCustomerHandling.max_score(), 15.0);
    assert_eq!(ScoreKey::CallEtiquette.max_score(), 15.0);
    assert_eq!(ScoreKey::CallDisclaimer.max_score(), 5.0);
    assert_eq!(ScoreKey::CorrectDisposition.max_score(), 10.0);
    assert_eq!(ScoreKey::CallClosing.max_score(), 5.0);
    assert_eq!(ScoreKey::FatalIdentification.max_score(), 5.0);
    assert_eq!(ScoreKey::FatalTapeDiscloser.max_score(), 10.0);
    assert_eq!(ScoreKey::FatalToneLanguage.max_score(), 15.0);
}

#[test]
fn given_camel_case_name_when_parsing_then_returns_key() {
    assert_eq!(
        "rebuttalCustomerHandling".parse::<ScoreKey>(),
        Ok(ScoreKey::RebuttalCustomerHandling)
    );
}

#[test]
fn given_unknown_name_when_parsing_then_returns_error() {
    assert!("greeting_score".parse::<ScoreKey>().is_err());
    assert!("Greeting".parse::<ScoreKey>().is_err());
}

#[test]
fn given_key_when_serialized_then_uses_wire_name() {
    let json = serde_json::to_string(&ScoreKey::FatalTapeDiscloser).unwrap();
    assert_eq!(json, "\"fatalTapeDiscloser\"");
}
