use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NO_TIER: &str = "n/a";

#[derive(Debug, Clone, Deserialize)]
pub struct WorkItem {
    pub number: u64,
    #[serde(default)]
    pub assignees: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyLabel {
    pub language: String,
    pub tier: String,
}

impl PolicyLabel {
    pub fn new(language: impl Into<String>, tier: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            tier: tier.into(),
        }
    }

    pub fn has_tier(&self) -> bool {
        self.tier != NO_TIER
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EligibilityVerdict {
    pub passed: bool,
    pub reasons: Vec<String>,
}

impl EligibilityVerdict {
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            passed: reasons.is_empty(),
            reasons,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserOutcome {
    pub user: String,
    pub passed: bool,
    pub bypassed: bool,
    pub reasons: Vec<String>,
    pub rank: Option<f64>,
    pub error: Option<String>,
}

impl UserOutcome {
    pub fn bypassed(user: &str) -> Self {
        Self {
            user: user.to_string(),
            passed: true,
            bypassed: true,
            reasons: Vec::new(),
            rank: None,
            error: None,
        }
    }

    pub fn evaluated(user: &str, verdict: EligibilityVerdict, rank: f64) -> Self {
        Self {
            user: user.to_string(),
            passed: verdict.passed,
            bypassed: false,
            reasons: verdict.reasons,
            rank: Some(rank),
            error: None,
        }
    }

    pub fn errored(user: &str, error: String) -> Self {
        Self {
            user: user.to_string(),
            passed: false,
            bypassed: false,
            reasons: vec![format!("{user} could not be evaluated: {error}")],
            rank: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub work_item: u64,
    pub labels: Vec<PolicyLabel>,
    pub notes: Vec<String>,
    pub outcomes: Vec<UserOutcome>,
}

impl EvaluationReport {
    pub fn passed_map(&self) -> BTreeMap<String, bool> {
        self.outcomes
            .iter()
            .map(|outcome| (outcome.user.clone(), outcome.passed))
            .collect()
    }

    pub fn failing(&self) -> impl Iterator<Item = &UserOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed)
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.passed)
    }
}
