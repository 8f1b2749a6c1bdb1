//! Work-item label parsing.
//!
//! Policy labels follow `"<Language>: (<Tier>)"`. Anything before the first
//! colon names the language; the first parenthesised group names the tier.
//! A label with a colon but no parentheses gates on language presence only.

use crate::types::config::TierThresholds;
use crate::types::report::{PolicyLabel, NO_TIER};
use once_cell::sync::Lazy;
use regex::Regex;

static TIER_CAPTURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("tier capture regex is valid"));

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedLabels {
    pub labels: Vec<PolicyLabel>,
    pub notes: Vec<String>,
}

pub fn parse_label(raw: &str) -> Option<PolicyLabel> {
    let (language, rest) = raw.split_once(':')?;
    let language = language.trim().to_lowercase();
    if language.is_empty() {
        return None;
    }
    let tier = TIER_CAPTURE
        .captures(rest)
        .and_then(|captures| captures.get(1))
        .map(|tier| tier.as_str().trim().to_lowercase())
        .filter(|tier| !tier.is_empty())
        .unwrap_or_else(|| NO_TIER.to_string());
    Some(PolicyLabel::new(language, tier))
}

pub fn parse_labels<S: AsRef<str>>(raw: &[S]) -> Vec<PolicyLabel> {
    raw.iter()
        .filter_map(|label| parse_label(label.as_ref()))
        .collect()
}

/// Keeps only labels whose language is one of the configured guards.
pub fn retain_guarded<S: AsRef<str>>(labels: Vec<PolicyLabel>, filters: &[S]) -> Vec<PolicyLabel> {
    let filters = filters
        .iter()
        .map(|filter| filter.as_ref().trim().to_lowercase())
        .collect::<Vec<_>>();
    labels
        .into_iter()
        .filter(|label| filters.contains(&label.language))
        .collect()
}

/// Collapses labels sharing a language down to the one with the highest
/// tier threshold. Ties keep the label seen first. Never fails: a tier
/// missing from `tiers` simply loses every comparison.
pub fn resolve_duplicates(labels: Vec<PolicyLabel>, tiers: &TierThresholds) -> ResolvedLabels {
    let mut resolved: Vec<PolicyLabel> = Vec::new();
    let mut dropped: Vec<(String, String)> = Vec::new();

    for label in labels {
        let Some(index) = resolved
            .iter()
            .position(|kept| kept.language == label.language)
        else {
            resolved.push(label);
            continue;
        };

        let existing = &mut resolved[index];
        if tiers.rank_of(&label.tier) > tiers.rank_of(&existing.tier) {
            let replaced = std::mem::replace(existing, label);
            dropped.push((replaced.language, replaced.tier));
        } else {
            dropped.push((label.language, label.tier));
        }
    }

    let notes = resolved
        .iter()
        .filter_map(|kept| {
            let lost = dropped
                .iter()
                .filter(|(language, _)| *language == kept.language)
                .map(|(_, tier)| tier.as_str())
                .collect::<Vec<_>>();
            if lost.is_empty() {
                return None;
            }
            Some(format!(
                "Duplicate labels found for {}: kept tier {}, dropped {}",
                kept.language,
                kept.tier,
                lost.join(", ")
            ))
        })
        .collect::<Vec<_>>();

    for note in &notes {
        tracing::info!("{note}");
    }

    ResolvedLabels {
        labels: resolved,
        notes,
    }
}
