use super::{is_privileged_role, SignalSource};
use crate::error::{GuardError, Result};
use crate::types::signals::{ActivityCounters, LanguageEdge};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignalSnapshot {
    #[serde(default)]
    pub users: HashMap<String, UserRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserRecord {
    pub created_at: Option<DateTime<Utc>>,
    /// Organisation membership role, if any.
    pub role: Option<String>,
    /// Repository collaborator permission, if any.
    pub permission: Option<String>,
    pub languages: Vec<LanguageEdge>,
    pub counters: ActivityCounters,
    /// Upstream failure captured when the snapshot was taken.
    pub error: Option<String>,
}

/// Signal source backed by a captured JSON snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    users: HashMap<String, UserRecord>,
}

impl SnapshotSource {
    /// Logins are case-insensitive, so two entries differing only in case
    /// are rejected rather than one silently shadowing the other.
    pub fn new(snapshot: SignalSnapshot) -> Result<Self> {
        let mut users = HashMap::with_capacity(snapshot.users.len());
        for (login, record) in snapshot.users {
            if users.insert(login.to_lowercase(), record).is_some() {
                return Err(GuardError::ConfigParse(format!(
                    "signal snapshot lists user {login} more than once (logins ignore case)"
                )));
            }
        }
        Ok(Self { users })
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GuardError::PathNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let snapshot: SignalSnapshot = serde_json::from_str(&content)?;
        Self::new(snapshot)
    }

    fn record(&self, user: &str) -> Result<&UserRecord> {
        let record = self
            .users
            .get(&user.to_lowercase())
            .ok_or_else(|| GuardError::UserNotFound(user.to_string()))?;
        match &record.error {
            Some(error) => Err(GuardError::Transport(format!("{user}: {error}"))),
            None => Ok(record),
        }
    }
}

impl SignalSource for SnapshotSource {
    fn account_created_at(&self, user: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.record(user)?.created_at)
    }

    fn language_edges(&self, user: &str) -> Result<Vec<LanguageEdge>> {
        Ok(self.record(user)?.languages.clone())
    }

    fn activity_counters(&self, user: &str) -> Result<ActivityCounters> {
        Ok(self.record(user)?.counters)
    }

    fn is_privileged_member(&self, user: &str) -> Result<bool> {
        let record = self.record(user)?;
        Ok([&record.permission, &record.role]
            .into_iter()
            .flatten()
            .any(|role| is_privileged_role(role)))
    }
}
