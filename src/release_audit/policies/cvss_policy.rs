use crate::release_audit::domain::CvssScoring;
use serde::Deserialize;

/// CvssPolicy decides which metric block wins when a database entry carries
/// several CVSS versions.
///
/// - `V31Only`: only a v3.x block is accepted; entries with only v2 scoring
///   come back without scoring. This is the live lookup default.
/// - `V31ThenV2`: v3.x first, v2 as fallback. This is the offline feed default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CvssPolicy {
    #[default]
    V31Only,
    V31ThenV2,
}

impl CvssPolicy {
    /// Selects the scoring block according to the policy
    ///
    /// # Arguments
    /// * `v31` - Scoring parsed from the first v3.x metric block, if any
    /// * `v2` - Scoring parsed from the first v2 metric block, if any
    pub fn select(self, v31: Option<CvssScoring>, v2: Option<CvssScoring>) -> Option<CvssScoring> {
        match self {
            CvssPolicy::V31Only => v31,
            CvssPolicy::V31ThenV2 => v31.or(v2),
        }
    }
}

impl std::str::FromStr for CvssPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "v31-only" | "v31" => Ok(CvssPolicy::V31Only),
            "v31-then-v2" | "fallback" => Ok(CvssPolicy::V31ThenV2),
            _ => Err(format!(
                "Invalid CVSS policy: {}. Please specify 'v31-only' or 'v31-then-v2'",
                s
            )),
        }
    }
}

impl std::fmt::Display for CvssPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CvssPolicy::V31Only => write!(f, "v31-only"),
            CvssPolicy::V31ThenV2 => write!(f, "v31-then-v2"),
        }
    }
}
