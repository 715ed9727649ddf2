use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the ten fixed evaluation dimensions a call is scored on.
///
/// Declaration order is the order keys appear in the evaluator prompt and in
/// serialized score maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreKey {
    Greeting,
    CollectionUrgency,
    RebuttalCustomerHandling,
    CallEtiquette,
    CallDisclaimer,
    CorrectDisposition,
    CallClosing,
    FatalIdentification,
    FatalTapeDiscloser,
    FatalToneLanguage,
}

impl ScoreKey {
    pub const ALL: [ScoreKey; 10] = [
        ScoreKey::Greeting,
        ScoreKey::CollectionUrgency,
        ScoreKey::RebuttalCustomerHandling,
        ScoreKey::CallEtiquette,
        ScoreKey::CallDisclaimer,
        ScoreKey::CorrectDisposition,
        ScoreKey::CallClosing,
        ScoreKey::FatalIdentification,
        ScoreKey::FatalTapeDiscloser,
        ScoreKey::FatalToneLanguage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreKey::Greeting => "greeting",
            ScoreKey::CollectionUrgency => "collectionUrgency",
            ScoreKey::RebuttalCustomerHandling => "rebuttalCustomerHandling",
            ScoreKey::CallEtiquette => "callEtiquette",
            ScoreKey::CallDisclaimer => "callDisclaimer",
            ScoreKey::CorrectDisposition => "correctDisposition",
            ScoreKey::CallClosing => "callClosing",
            ScoreKey::FatalIdentification => "fatalIdentification",
            ScoreKey::FatalTapeDiscloser => "fatalTapeDiscloser",
            ScoreKey::FatalToneLanguage => "fatalToneLanguage",
        }
    }

    /// Inclusive upper bound of the range the evaluator is asked to respect.
    /// Every range starts at zero.
    pub fn max_score(&self) -> f64 {
        match self {
            ScoreKey::Greeting
            | ScoreKey::CallDisclaimer
            | ScoreKey::CallClosing
            | ScoreKey::FatalIdentification => 5.0,
            ScoreKey::CorrectDisposition | ScoreKey::FatalTapeDiscloser => 10.0,
            ScoreKey::CollectionUrgency
            | ScoreKey::RebuttalCustomerHandling
            | ScoreKey::CallEtiquette
            | ScoreKey::FatalToneLanguage => 15.0,
        }
    }
}

impl FromStr for ScoreKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScoreKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown score key: {}", s))
    }
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
