//! Percentile rank over a user's activity counters.
//!
//! Each counter is pushed through a CDF scaled by its median, the results
//! are averaged by weight, and the average is subtracted from one. A user
//! with no activity therefore scores 100 and the score falls as activity
//! grows: higher means rarer under this model, not better-than-most.

use crate::types::signals::ActivityCounters;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPrior {
    pub median: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankPriors {
    pub commits: MetricPrior,
    pub prs: MetricPrior,
    pub issues: MetricPrior,
    pub reviews: MetricPrior,
    pub stars: MetricPrior,
    pub followers: MetricPrior,
}

impl Default for RankPriors {
    fn default() -> Self {
        Self {
            commits: MetricPrior {
                median: 1000.0,
                weight: 2.0,
            },
            prs: MetricPrior {
                median: 50.0,
                weight: 3.0,
            },
            issues: MetricPrior {
                median: 25.0,
                weight: 1.0,
            },
            reviews: MetricPrior {
                median: 2.0,
                weight: 1.0,
            },
            stars: MetricPrior {
                median: 50.0,
                weight: 4.0,
            },
            followers: MetricPrior {
                median: 10.0,
                weight: 1.0,
            },
        }
    }
}

impl RankPriors {
    fn total_weight(&self) -> f64 {
        self.commits.weight
            + self.prs.weight
            + self.issues.weight
            + self.reviews.weight
            + self.stars.weight
            + self.followers.weight
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RankInput {
    pub commits: u64,
    pub prs: u64,
    pub issues: u64,
    pub reviews: u64,
    pub stars: u64,
    pub followers: u64,
}

impl From<&ActivityCounters> for RankInput {
    fn from(counters: &ActivityCounters) -> Self {
        Self {
            commits: counters.total_commits,
            prs: counters.total_prs,
            issues: counters.total_issues,
            reviews: counters.total_reviews,
            stars: counters.total_stars,
            followers: counters.followers,
        }
    }
}

pub fn score(input: &RankInput) -> f64 {
    score_with(input, &RankPriors::default())
}

pub fn score_with(input: &RankInput, priors: &RankPriors) -> f64 {
    let weighted = priors.commits.weight * exponential_cdf(input.commits, priors.commits.median)
        + priors.prs.weight * exponential_cdf(input.prs, priors.prs.median)
        + priors.issues.weight * exponential_cdf(input.issues, priors.issues.median)
        + priors.reviews.weight * exponential_cdf(input.reviews, priors.reviews.median)
        + priors.stars.weight * log_normal_cdf(input.stars, priors.stars.median)
        + priors.followers.weight * log_normal_cdf(input.followers, priors.followers.median);

    let rank = 1.0 - weighted / priors.total_weight();
    round2((rank * 100.0).clamp(0.0, 100.0))
}

fn exponential_cdf(value: u64, median: f64) -> f64 {
    1.0 - (-(value as f64) / median).exp()
}

// Not a true log-normal CDF; kept as-is so scores stay comparable with existing ones.
fn log_normal_cdf(value: u64, median: f64) -> f64 {
    let ratio = value as f64 / median;
    0.5 * (1.0 + (ratio - 1.0) / (1.0 + ratio * ratio).sqrt())
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
