use crate::error::GuardError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    pub min_account_age_in_days: u32,
    pub label_filters: Vec<String>,
    pub xp_tiers: BTreeMap<String, f64>,
    pub stat_thresholds: StatThresholdsConfig,
    pub enable_checks_for_org_members: bool,
    pub retry: Option<RetryConfig>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            min_account_age_in_days: 365,
            label_filters: vec!["Solidity".to_string()],
            xp_tiers: BTreeMap::from([
                ("N/A".to_string(), 0.0),
                ("Junior".to_string(), 5.0),
                ("Mid".to_string(), 20.0),
                ("Pro".to_string(), 50.0),
            ]),
            stat_thresholds: StatThresholdsConfig::default(),
            enable_checks_for_org_members: false,
            retry: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatThresholdsConfig {
    pub stars: u64,
    pub min_commits: u64,
    pub prs: u64,
    pub issues: u64,
}

impl Default for StatThresholdsConfig {
    fn default() -> Self {
        Self {
            stars: 1,
            min_commits: 1,
            prs: 1,
            issues: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    pub attempts: Option<u32>,
    pub backoff_ms: Option<u64>,
}

/// Minimum language percentage per tier, keyed by lower-cased tier name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierThresholds {
    tiers: HashMap<String, f64>,
}

impl TierThresholds {
    pub fn new<I, K>(tiers: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        Self {
            tiers: tiers
                .into_iter()
                .map(|(name, value)| (name.as_ref().trim().to_lowercase(), value))
                .collect(),
        }
    }

    pub fn get(&self, tier: &str) -> Option<f64> {
        self.tiers.get(&tier.trim().to_lowercase()).copied()
    }

    /// Ordering key for duplicate resolution; unknown tiers sort below every configured one.
    pub fn rank_of(&self, tier: &str) -> f64 {
        self.get(tier).unwrap_or(f64::NEG_INFINITY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.tiers.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatThresholds {
    pub min_account_age_in_days: u32,
    pub min_commits: u64,
    pub min_prs: u64,
    pub min_issues: u64,
    pub min_stars: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_millis(250),
        }
    }
}

impl GuardConfig {
    pub fn tier_thresholds(&self) -> TierThresholds {
        TierThresholds::new(
            self.xp_tiers
                .iter()
                .map(|(name, value)| (name.as_str(), *value)),
        )
    }

    pub fn stat_thresholds(&self) -> StatThresholds {
        StatThresholds {
            min_account_age_in_days: self.min_account_age_in_days,
            min_commits: self.stat_thresholds.min_commits,
            min_prs: self.stat_thresholds.prs,
            min_issues: self.stat_thresholds.issues,
            min_stars: self.stat_thresholds.stars,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        match &self.retry {
            Some(retry) => RetryPolicy {
                attempts: retry.attempts.unwrap_or(defaults.attempts),
                backoff: retry
                    .backoff_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.backoff),
            },
            None => defaults,
        }
    }

    /// Whether privileged members skip evaluation entirely.
    pub fn bypass_privileged_members(&self) -> bool {
        !self.enable_checks_for_org_members
    }

    pub fn validate(&self) -> Result<(), GuardError> {
        let mut seen = HashMap::<String, &str>::new();
        for (name, value) in &self.xp_tiers {
            let normalized = name.trim().to_lowercase();
            if normalized.is_empty() {
                return Err(GuardError::ConfigParse(
                    "xp_tiers keys must be non-empty tier names".to_string(),
                ));
            }
            if !value.is_finite() || *value < 0.0 {
                return Err(GuardError::ConfigParse(format!(
                    "xp_tiers.{name} must be a non-negative number (found {value})"
                )));
            }
            if let Some(existing) = seen.get(&normalized) {
                return Err(GuardError::ConfigParse(format!(
                    "xp_tiers.{existing} and xp_tiers.{name} collide once lower-cased"
                )));
            }
            seen.insert(normalized, name.as_str());
        }

        if self
            .label_filters
            .iter()
            .any(|filter| filter.trim().is_empty())
        {
            return Err(GuardError::ConfigParse(
                "label_filters entries must be non-empty language names".to_string(),
            ));
        }

        if let Some(retry) = &self.retry {
            if retry.attempts == Some(0) {
                return Err(GuardError::ConfigParse(
                    "retry.attempts must be greater than 0".to_string(),
                ));
            }
        }

        Ok(())
    }
}
