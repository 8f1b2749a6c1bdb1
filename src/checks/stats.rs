use crate::types::config::StatThresholds;
use crate::types::signals::ActivityCounters;

pub fn check_stats(user: &str, counters: &ActivityCounters, thresholds: &StatThresholds) -> Vec<String> {
    [
        ("commits", counters.total_commits, thresholds.min_commits),
        ("PRs", counters.total_prs, thresholds.min_prs),
        ("issues", counters.total_issues, thresholds.min_issues),
        ("stars", counters.total_stars, thresholds.min_stars),
    ]
    .into_iter()
    .filter(|(_, actual, required)| actual < required)
    .map(|(metric, actual, required)| {
        format!(
            "{user} does not meet the minimum {metric} requirement. Required: {required}, Actual: {actual}"
        )
    })
    .collect()
}
