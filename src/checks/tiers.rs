use crate::types::config::TierThresholds;
use crate::types::report::PolicyLabel;
use crate::types::signals::LanguageProfile;

/// Checks each resolved label against the user's language profile.
/// No labels means the work item is not language gated.
pub fn check_label_tiers(
    user: &str,
    profile: &LanguageProfile,
    labels: &[PolicyLabel],
    tiers: &TierThresholds,
) -> Vec<String> {
    if !labels.is_empty() && profile.is_empty() {
        tracing::warn!(user, "no language data available");
    }

    let mut reasons = Vec::new();
    for label in labels {
        let Some(share) = profile.get(&label.language) else {
            reasons.push(format!(
                "{user} does not have the required language for: {}",
                label.language
            ));
            continue;
        };

        if !label.has_tier() {
            tracing::debug!(user, language = %label.language, "label has no tier, presence is enough");
            continue;
        }

        let Some(required) = tiers.get(&label.tier) else {
            reasons.push(format!(
                "No tier value found for {}/{}",
                label.language, label.tier
            ));
            continue;
        };

        if share.percentage < required {
            reasons.push(format!(
                "{user} does not meet the required tier for {}. Required: {} ({required}%), Actual: {}%",
                label.language, label.tier, share.percentage
            ));
        }
    }
    reasons
}
