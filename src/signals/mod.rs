pub mod languages;
pub mod retry;
pub mod snapshot;

use crate::error::Result;
use crate::types::signals::{ActivityCounters, LanguageEdge, LanguageProfile, UserSignals};
use chrono::{DateTime, Utc};

/// Roles that count as privileged, whether granted as a repository
/// permission or an organisation membership.
pub const PRIVILEGED_ROLES: [&str; 6] = [
    "admin",
    "billing_manager",
    "owner",
    "member",
    "maintainer",
    "write",
];

pub fn is_privileged_role(role: &str) -> bool {
    let role = role.trim().to_lowercase();
    PRIVILEGED_ROLES.contains(&role.as_str())
}

/// Where per-user signals come from. Implementations own transport,
/// pagination and any upstream quirks.
pub trait SignalSource {
    /// `Ok(None)` when the account exists but reports no creation date.
    fn account_created_at(&self, user: &str) -> Result<Option<DateTime<Utc>>>;
    fn language_edges(&self, user: &str) -> Result<Vec<LanguageEdge>>;
    fn activity_counters(&self, user: &str) -> Result<ActivityCounters>;
    fn is_privileged_member(&self, user: &str) -> Result<bool>;
}

#[derive(Debug, Clone)]
pub struct FetchedSignals {
    pub signals: UserSignals,
    pub profile: LanguageProfile,
}

pub fn fetch_signals<S: SignalSource + ?Sized>(source: &S, user: &str) -> Result<FetchedSignals> {
    let account_created_at = source.account_created_at(user)?;
    let edges = source.language_edges(user)?;
    let counters = source.activity_counters(user)?;
    let profile = languages::build_profile(&edges);
    tracing::debug!(
        user,
        edges = edges.len(),
        languages = profile.shares.len(),
        coverage = profile.total_percentage(),
        "fetched signals"
    );

    Ok(FetchedSignals {
        signals: UserSignals {
            account_created_at,
            counters,
        },
        profile,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privileged_roles_match_case_insensitively() {
        assert!(is_privileged_role("Admin"));
        assert!(is_privileged_role("write"));
        assert!(is_privileged_role(" maintainer "));
        assert!(!is_privileged_role("read"));
        assert!(!is_privileged_role("n/a"));
    }
}
