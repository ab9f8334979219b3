//! Derived-criteria policy
//!
//! In the calls this scorer was tuned on, understanding (KR2.2) and process
//! (KR2.4) track the ownership result closely. That observation is a
//! heuristic, so it sits behind a trait and can be switched off.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use call_qc_core::{Criterion, Error};
use serde::{Deserialize, Serialize};

use crate::criteria;
use crate::rules::Rule;

/// Chooses the rule table for each criterion
pub trait CorrelationPolicy: Send + Sync {
    /// Table used for the criterion; ownership is scored before all others
    fn rules(&self, criterion: Criterion) -> &'static [Rule];

    fn name(&self) -> &str;
}

/// Understanding and process follow ownership: 3 is inherited, otherwise a
/// partial-credit ladder applies
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipCorrelation;

impl CorrelationPolicy for OwnershipCorrelation {
    fn rules(&self, criterion: Criterion) -> &'static [Rule] {
        match criterion {
            Criterion::Understanding => criteria::UNDERSTANDING_DERIVED,
            Criterion::ProcessNextSteps => criteria::PROCESS_NEXT_STEPS_DERIVED,
            other => criteria::table(other),
        }
    }

    fn name(&self) -> &str {
        "ownership_correlation"
    }
}

/// Every criterion runs its own cascade
#[derive(Debug, Clone, Copy, Default)]
pub struct Independent;

impl CorrelationPolicy for Independent {
    fn rules(&self, criterion: Criterion) -> &'static [Rule] {
        criteria::table(criterion)
    }

    fn name(&self) -> &str {
        "independent"
    }
}

/// Configured policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedPolicy {
    #[default]
    OwnershipCorrelation,
    Independent,
}

impl DerivedPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DerivedPolicy::OwnershipCorrelation => "ownership_correlation",
            DerivedPolicy::Independent => "independent",
        }
    }
}

impl fmt::Display for DerivedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DerivedPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "ownership_correlation" => Ok(DerivedPolicy::OwnershipCorrelation),
            "independent" => Ok(DerivedPolicy::Independent),
            other => Err(Error::Config(format!("unknown derived policy '{}'", other))),
        }
    }
}

/// Create a policy from configuration
pub fn create_policy(policy: DerivedPolicy) -> Arc<dyn CorrelationPolicy> {
    match policy {
        DerivedPolicy::OwnershipCorrelation => Arc::new(OwnershipCorrelation),
        DerivedPolicy::Independent => Arc::new(Independent),
    }
}
