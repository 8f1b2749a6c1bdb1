use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days between creation and `now`, rounded down.
pub fn age_in_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.signed_duration_since(created_at)
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY)
}

pub fn check_account_age(
    user: &str,
    created_at: Option<DateTime<Utc>>,
    min_days: u32,
    now: DateTime<Utc>,
) -> Option<String> {
    let Some(created_at) = created_at else {
        return Some(format!("{user} has no valid account creation date"));
    };

    let age = age_in_days(created_at, now);
    if age < i64::from(min_days) {
        return Some(format!(
            "{user} has not met the minimum account age requirement of {min_days} days (account age: {age} days)"
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("fixed timestamp is valid")
    }

    #[test]
    fn exact_minimum_age_passes() {
        let created = now() - Duration::days(365);
        assert_eq!(check_account_age("alice", Some(created), 365, now()), None);
    }

    #[test]
    fn one_day_short_fails() {
        let created = now() - Duration::days(364);
        let reason = check_account_age("alice", Some(created), 365, now())
            .expect("364 days should fail");
        assert!(reason.contains("minimum account age requirement of 365 days"));
        assert!(reason.contains("364 days"));
    }

    #[test]
    fn partial_days_round_down() {
        let created = now() - Duration::days(365) + Duration::hours(1);
        assert_eq!(age_in_days(created, now()), 364);
        assert!(check_account_age("alice", Some(created), 365, now()).is_some());
    }

    #[test]
    fn missing_creation_date_fails() {
        let reason = check_account_age("alice", None, 0, now()).expect("missing date should fail");
        assert!(reason.contains("no valid account creation date"));
    }

    #[test]
    fn future_creation_date_fails_even_without_minimum() {
        let created = now() + Duration::hours(2);
        assert_eq!(age_in_days(created, now()), -1);
        assert!(check_account_age("alice", Some(created), 0, now()).is_some());
    }
}
