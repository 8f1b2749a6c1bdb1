use crate::rank::round2;
use crate::types::signals::{LanguageEdge, LanguageProfile, LanguageShare};
use std::collections::BTreeMap;

/// Shares at or below this percentage are dropped from a profile.
pub const MIN_LANGUAGE_PERCENTAGE: f64 = 1.0;

#[derive(Debug, Default)]
struct LanguageGroup {
    size: u64,
    count: usize,
    color: Option<String>,
}

pub fn build_profile(edges: &[LanguageEdge]) -> LanguageProfile {
    let mut groups = BTreeMap::<String, LanguageGroup>::new();
    for edge in edges {
        let name = edge.name.trim().to_lowercase();
        if name.is_empty() {
            continue;
        }
        let group = groups.entry(name).or_default();
        group.size = group.size.saturating_add(edge.size);
        group.count += 1;
        if edge.color.is_some() {
            group.color = edge.color.clone();
        }
    }

    let total: u128 = groups.values().map(|group| u128::from(group.size)).sum();
    if total == 0 {
        return LanguageProfile::default();
    }

    let mut shares = groups
        .into_iter()
        .map(|(name, group)| LanguageShare {
            percentage: round2(group.size as f64 / total as f64 * 100.0),
            name,
            size: group.size,
            count: group.count,
            color: group.color,
        })
        .filter(|share| share.percentage > MIN_LANGUAGE_PERCENTAGE)
        .collect::<Vec<_>>();

    shares.sort_by(|a, b| {
        b.percentage
            .total_cmp(&a.percentage)
            .then_with(|| a.name.cmp(&b.name))
    });

    LanguageProfile { shares }
}
