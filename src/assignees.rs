use crate::checks::{self, EligibilityPolicy};
use crate::error::{GuardError, Result};
use crate::labels;
use crate::rank;
use crate::signals::{self, SignalSource};
use crate::types::config::GuardConfig;
use crate::types::report::{EvaluationReport, PolicyLabel, UserOutcome, WorkItem};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Assignee logins in first-seen order, blank and repeated entries dropped.
pub fn resolve_assignees(work_item: &WorkItem) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let users = work_item
        .assignees
        .iter()
        .map(|login| login.trim())
        .filter(|login| !login.is_empty())
        .filter(|login| seen.insert(login.to_lowercase()))
        .map(str::to_string)
        .collect::<Vec<_>>();

    if users.is_empty() {
        return Err(GuardError::NoAssignees(work_item.number.to_string()));
    }
    Ok(users)
}

/// Evaluates every assignee of `work_item` one after another. A failure
/// while evaluating one user is recorded as a failing outcome for that
/// user and never stops the others.
pub fn evaluate_assignees<S: SignalSource + ?Sized>(
    work_item: &WorkItem,
    config: &GuardConfig,
    source: &S,
    now: DateTime<Utc>,
) -> Result<EvaluationReport> {
    let users = resolve_assignees(work_item)?;

    let policy = EligibilityPolicy {
        tiers: config.tier_thresholds(),
        stats: config.stat_thresholds(),
    };
    let guarded = labels::retain_guarded(
        labels::parse_labels(work_item.labels.as_slice()),
        config.label_filters.as_slice(),
    );
    let resolved = labels::resolve_duplicates(guarded, &policy.tiers);

    let mut outcomes = Vec::with_capacity(users.len());
    for user in &users {
        tracing::info!("Checking {user}'s experience");
        let outcome = match evaluate_user(user, config, &policy, &resolved.labels, source, now) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(user = %user, error = %err, "failed to check experience");
                UserOutcome::errored(user, err.to_string())
            }
        };
        if outcome.passed {
            tracing::info!("{user} meets all requirements");
        } else {
            tracing::info!("{user} has not passed the experience check");
        }
        outcomes.push(outcome);
    }

    let report = EvaluationReport {
        work_item: work_item.number,
        labels: resolved.labels,
        notes: resolved.notes,
        outcomes,
    };
    tracing::info!(verdicts = ?report.passed_map(), "evaluation complete");
    Ok(report)
}

fn evaluate_user<S: SignalSource + ?Sized>(
    user: &str,
    config: &GuardConfig,
    policy: &EligibilityPolicy,
    labels: &[PolicyLabel],
    source: &S,
    now: DateTime<Utc>,
) -> Result<UserOutcome> {
    if config.bypass_privileged_members() && source.is_privileged_member(user)? {
        tracing::info!("{user} is a member of the organization, skipping experience checks");
        return Ok(UserOutcome::bypassed(user));
    }

    let fetched = signals::fetch_signals(source, user)?;
    let verdict = checks::evaluate(user, &fetched.signals, &fetched.profile, labels, policy, now);
    let percentile = rank::score(&rank::RankInput::from(&fetched.signals.counters));
    tracing::debug!(user, percentile, "rank computed");

    Ok(UserOutcome::evaluated(user, verdict, percentile))
}
