use serde::Deserialize;

/// How the aggregator attributes a vulnerability id seen in several matches.
///
/// Both modes keep one record per id with last-write-wins artifact fields and
/// concatenated urls. `AllAttributions` additionally keeps every
/// (artifact, urls) pair in sighting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributionMode {
    #[default]
    LastWriteWins,
    AllAttributions,
}

impl std::str::FromStr for AttributionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last-write-wins" | "last" => Ok(AttributionMode::LastWriteWins),
            "all-attributions" | "all" => Ok(AttributionMode::AllAttributions),
            _ => Err(format!(
                "Invalid attribution mode: {}. Please specify 'last-write-wins' or 'all-attributions'",
                s
            )),
        }
    }
}

impl std::fmt::Display for AttributionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributionMode::LastWriteWins => write!(f, "last-write-wins"),
            AttributionMode::AllAttributions => write!(f, "all-attributions"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_from_str_aliases() {
        assert_eq!(
            AttributionMode::from_str("last-write-wins").unwrap(),
            AttributionMode::LastWriteWins
        );
        assert_eq!(
            AttributionMode::from_str("ALL").unwrap(),
            AttributionMode::AllAttributions
        );
    }

    #[test]
    fn test_from_str_invalid() {
        let err = AttributionMode::from_str("first").unwrap_err();
        assert!(err.contains("Invalid attribution mode"));
        assert!(err.contains("first"));
    }

    #[test]
    fn test_deserialize_kebab_case() {
        let mode: AttributionMode = serde_yaml_ng::from_str("all-attributions").unwrap();
        assert_eq!(mode, AttributionMode::AllAttributions);
    }
}
