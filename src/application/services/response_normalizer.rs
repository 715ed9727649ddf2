use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{EvaluationResult, ScoreKey, ScoreMap};

/// What to do with score values outside a key's declared range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    /// Clamp into `0..=max` for the key.
    #[default]
    Clamp,
    /// Keep values as returned. Negative values still become zero.
    PassThrough,
}

/// Turns raw model output into a complete [`EvaluationResult`]. Never fails.
///
/// Output that is not a JSON object degrades to a result whose feedback is the
/// raw text. Either way every score key is present afterwards.
pub fn normalize(raw: &str, policy: ScorePolicy) -> EvaluationResult {
    let mut result = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(object)) => from_object(&object, policy),
        Ok(_) => {
            tracing::warn!("Model output is JSON but not an object, using degraded result");
            EvaluationResult::degraded(raw)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Model output is not valid JSON, using degraded result");
            EvaluationResult::degraded(raw)
        }
    };

    result.complete_scores();
    result
}

fn from_object(object: &Map<String, Value>, policy: ScorePolicy) -> EvaluationResult {
    let scores = object
        .get("scores")
        .and_then(Value::as_object)
        .map(|raw_scores| read_scores(raw_scores, policy))
        .unwrap_or_default();

    EvaluationResult {
        scores,
        overall_feedback: string_field(object, "overallFeedback"),
        observation: string_field(object, "observation"),
    }
}

fn read_scores(raw_scores: &Map<String, Value>, policy: ScorePolicy) -> ScoreMap {
    let mut scores = ScoreMap::new();

    for (name, value) in raw_scores {
        let Ok(key) = name.parse::<ScoreKey>() else {
            tracing::debug!(key = %name, "Dropping unknown score key");
            continue;
        };
        let Some(score) = numeric_value(value) else {
            tracing::warn!(key = %key, value = %value, "Non-numeric score treated as missing");
            continue;
        };
        scores.insert(key, apply_policy(key, score, policy));
    }

    scores
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn apply_policy(key: ScoreKey, score: f64, policy: ScorePolicy) -> f64 {
    let max = key.max_score();
    let in_range = (0.0..=max).contains(&score);

    if !in_range {
        tracing::warn!(key = %key, score, max, policy = ?policy, "Score outside declared range");
    }

    match policy {
        ScorePolicy::Clamp => score.clamp(0.0, max),
        ScorePolicy::PassThrough => score.max(0.0),
    }
}

fn string_field(object: &Map<String, Value>, name: &str) -> String {
    object
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
