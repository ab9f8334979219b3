//! Prompt bundle for criterion scoring
//!
//! The system prompt describes the five criteria and the reply contract; the
//! user template carries `{criterion}` and `{transcript}` placeholders.

use std::path::Path;

use call_qc_config::OracleConfig;
use serde::{Deserialize, Serialize};

use crate::Result;

pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a quality-control reviewer for a telecom contact center. \
Score one operator criterion of a customer-service call on a 0-3 scale.

Criteria:
- KR2.1 ownership: the operator takes responsibility and proposes an active step.
- KR2.2 understanding: the operator clarifies the customer's need and shows empathy.
- KR2.3 resolution: a practical, correct resolution is offered.
- KR2.4 process and next steps: the request is registered and next steps are stated.
- KR2.5 professionalism: etiquette, tone, brand protection and safe handling of personal data.

Scale: 0 severe violation, 1 poor, 2 partial, 3 good.

Reply with a single JSON object and nothing else, with keys:
score (integer 0-3), reasoning (one or two sentences), \
evidence (a quote copied verbatim from the transcript, or an empty string), \
probability (HIGH, MEDIUM or LOW).
Never invent evidence. Never repeat card numbers or other personal data.";

pub const DEFAULT_USER_TEMPLATE: &str = "\
CRITERION: {criterion}
Return ONLY JSON with keys: score (0-3), reasoning, evidence, probability (HIGH|MEDIUM|LOW).
TRANSCRIPT:
{transcript}
";

/// System instruction plus user template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptBundle {
    #[serde(default)]
    pub system: String,
    #[serde(default)]
    pub user_template: String,
}

impl Default for PromptBundle {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            user_template: DEFAULT_USER_TEMPLATE.to_string(),
        }
    }
}

impl PromptBundle {
    /// Load a TOML bundle; blank fields fall back to the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let mut bundle: PromptBundle = toml::from_str(&raw)?;

        if bundle.system.trim().is_empty() {
            bundle.system = DEFAULT_SYSTEM_PROMPT.to_string();
        }
        if bundle.user_template.trim().is_empty() {
            bundle.user_template = DEFAULT_USER_TEMPLATE.to_string();
        }
        Ok(bundle)
    }

    /// Bundle from `oracle.prompt_file`, or the defaults
    pub fn from_config(config: &OracleConfig) -> Self {
        match &config.prompt_file {
            Some(path) => Self::load(path).unwrap_or_else(|e| {
                tracing::warn!(path = %path, "Using default prompts: {}", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Fill the user template
    pub fn render_user(&self, criterion: &str, transcript: &str) -> String {
        // transcript goes in last so its text is never treated as a placeholder
        self.user_template
            .replace("{criterion}", criterion)
            .replace("{transcript}", transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_render_user() {
        let bundle = PromptBundle::default();
        let user = bundle.render_user("KR2.3", "Operator: Salam");
        assert!(user.starts_with("CRITERION: KR2.3\n"));
        assert!(user.contains("TRANSCRIPT:\nOperator: Salam"));
        assert!(!user.contains("{criterion}"));
    }

    #[test]
    fn test_transcript_placeholders_left_alone() {
        let bundle = PromptBundle::default();
        let user = bundle.render_user("KR2.1", "Customer: {criterion}");
        assert!(user.contains("Customer: {criterion}"));
    }

    #[test]
    fn test_load_with_blank_template() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "system = \"Custom system\"\nuser_template = \"  \"").unwrap();

        let bundle = PromptBundle::load(file.path()).unwrap();
        assert_eq!(bundle.system, "Custom system");
        assert_eq!(bundle.user_template, DEFAULT_USER_TEMPLATE);
    }

    #[test]
    fn test_from_config_missing_file_uses_default() {
        let config = OracleConfig {
            prompt_file: Some("/no/such/prompts.toml".to_string()),
            ..OracleConfig::default()
        };
        assert_eq!(PromptBundle::from_config(&config), PromptBundle::default());
    }
}
