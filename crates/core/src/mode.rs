//! Scoring mode

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Escalation policy deciding which criteria the oracle may override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Rule engine only; the oracle is never invoked
    #[default]
    Rule,
    /// Oracle consulted only for low-confidence or evidence-less criteria
    Hybrid,
    /// Oracle consulted for every criterion
    Llm,
}

impl ScoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::Rule => "rule",
            ScoringMode::Hybrid => "hybrid",
            ScoringMode::Llm => "llm",
        }
    }

    /// Does this mode ever call the oracle?
    pub fn uses_oracle(&self) -> bool {
        !matches!(self, ScoringMode::Rule)
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "rule" => Ok(ScoringMode::Rule),
            "hybrid" => Ok(ScoringMode::Hybrid),
            "llm" => Ok(ScoringMode::Llm),
            other => Err(Error::Config(format!(
                "unknown scoring mode '{}', expected rule|hybrid|llm",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("rule".parse::<ScoringMode>().unwrap(), ScoringMode::Rule);
        assert_eq!(" HYBRID ".parse::<ScoringMode>().unwrap(), ScoringMode::Hybrid);
        assert_eq!("llm".parse::<ScoringMode>().unwrap(), ScoringMode::Llm);
        assert_eq!("".parse::<ScoringMode>().unwrap(), ScoringMode::Rule);
        assert!("auto".parse::<ScoringMode>().is_err());
    }

    #[test]
    fn test_default_is_rule() {
        assert_eq!(ScoringMode::default(), ScoringMode::Rule);
        assert!(!ScoringMode::Rule.uses_oracle());
        assert!(ScoringMode::Hybrid.uses_oracle());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ScoringMode::Hybrid).unwrap();
        assert_eq!(json, "\"hybrid\"");
        let mode: ScoringMode = serde_json::from_str("\"llm\"").unwrap();
        assert_eq!(mode, ScoringMode::Llm);
    }
}
