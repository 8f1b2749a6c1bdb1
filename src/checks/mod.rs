pub mod account_age;
pub mod stats;
pub mod tiers;

use crate::types::config::{StatThresholds, TierThresholds};
use crate::types::report::{EligibilityVerdict, PolicyLabel};
use crate::types::signals::{LanguageProfile, UserSignals};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct EligibilityPolicy {
    pub tiers: TierThresholds,
    pub stats: StatThresholds,
}

/// Account age gates everything else: when it fails, label and stat
/// checks are skipped. Otherwise every check runs and every failure is
/// reported, in age, label, stat order.
pub fn evaluate(
    user: &str,
    signals: &UserSignals,
    profile: &LanguageProfile,
    labels: &[PolicyLabel],
    policy: &EligibilityPolicy,
    now: DateTime<Utc>,
) -> EligibilityVerdict {
    if let Some(reason) = account_age::check_account_age(
        user,
        signals.account_created_at,
        policy.stats.min_account_age_in_days,
        now,
    ) {
        tracing::error!(user, "{reason}");
        return EligibilityVerdict::from_reasons(vec![reason]);
    }

    let mut reasons = tiers::check_label_tiers(user, profile, labels, &policy.tiers);
    reasons.extend(stats::check_stats(user, &signals.counters, &policy.stats));

    for reason in &reasons {
        tracing::error!(user, "{reason}");
    }
    tracing::info!(
        user,
        commits = signals.counters.total_commits,
        prs = signals.counters.total_prs,
        issues = signals.counters.total_issues,
        stars = signals.counters.total_stars,
        merged_pr_pct = signals.counters.merged_pr_percentage(),
        failures = reasons.len(),
        "evaluated"
    );

    EligibilityVerdict::from_reasons(reasons)
}
