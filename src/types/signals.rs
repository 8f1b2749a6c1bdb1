use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityCounters {
    pub total_commits: u64,
    pub total_prs: u64,
    pub total_prs_merged: u64,
    pub total_issues: u64,
    pub total_stars: u64,
    pub total_reviews: u64,
    pub followers: u64,
    pub contributed_to_count: u64,
}

impl ActivityCounters {
    pub fn merged_pr_percentage(&self) -> f64 {
        if self.total_prs == 0 {
            return 0.0;
        }
        self.total_prs_merged as f64 / self.total_prs as f64 * 100.0
    }
}

/// Snapshot of one user's signals, fetched once per evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSignals {
    pub account_created_at: Option<DateTime<Utc>>,
    pub counters: ActivityCounters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageEdge {
    pub size: u64,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub name: String,
    pub percentage: f64,
    pub size: u64,
    pub count: usize,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LanguageProfile {
    pub shares: Vec<LanguageShare>,
}

impl LanguageProfile {
    pub fn get(&self, language: &str) -> Option<&LanguageShare> {
        let key = language.trim().to_lowercase();
        self.shares.iter().find(|share| share.name == key)
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn total_percentage(&self) -> f64 {
        self.shares.iter().map(|share| share.percentage).sum()
    }
}
