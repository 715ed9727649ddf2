use std::collections::BTreeMap;

use serde::Serialize;

use super::ScoreKey;

pub type ScoreMap = BTreeMap<ScoreKey, f64>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub scores: ScoreMap,
    pub overall_feedback: String,
    pub observation: String,
}

impl EvaluationResult {
    /// Result used when the model output could not be read as a JSON object.
    pub fn degraded(raw: &str) -> Self {
        Self {
            scores: ScoreMap::new(),
            overall_feedback: raw.to_string(),
            observation: String::new(),
        }
    }

    /// Inserts a zero score for every key the model left out.
    pub fn complete_scores(&mut self) {
        for key in ScoreKey::ALL {
            self.scores.entry(key).or_insert(0.0);
        }
    }

    pub fn score(&self, key: ScoreKey) -> Option<f64> {
        self.scores.get(&key).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallAnalysis {
    pub transcript: String,
    pub ai_result: EvaluationResult,
}
