// Splits a purge into one bulk delete plus single deletes.
//
// Bulk delete refuses the whole batch if any message is older than two
// weeks, and needs at least two ids.

use chrono::{DateTime, Duration, Utc};

/// Oldest message age bulk delete accepts, less a minute of slack for clock
/// skew between us and the platform.
fn bulk_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(14) + Duration::minutes(1)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PurgePlan {
    pub bulk: Vec<u64>,
    pub individual: Vec<u64>,
}

impl PurgePlan {
    pub fn total(&self) -> usize {
        self.bulk.len() + self.individual.len()
    }
}

/// Decide how to delete `messages` (id, creation time) as of `now`.
pub fn plan_purge(messages: &[(u64, DateTime<Utc>)], now: DateTime<Utc>) -> PurgePlan {
    let cutoff = bulk_cutoff(now);

    let (recent, old): (Vec<&(u64, DateTime<Utc>)>, Vec<&(u64, DateTime<Utc>)>) = messages
        .iter()
        .partition(|(_, created_at)| *created_at > cutoff);

    let mut plan = PurgePlan {
        bulk: recent.into_iter().map(|(id, _)| *id).collect(),
        individual: old.into_iter().map(|(id, _)| *id).collect(),
    };

    if plan.bulk.len() == 1 {
        plan.individual.append(&mut plan.bulk);
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_recent_messages_are_bulk_deleted() {
        let now = now();
        let messages = [(1, now), (2, now - Duration::hours(1)), (3, now - Duration::days(13))];

        let plan = plan_purge(&messages, now);

        assert_eq!(plan.bulk, vec![1, 2, 3]);
        assert!(plan.individual.is_empty());
    }

    #[test]
    fn test_messages_older_than_two_weeks_are_deleted_one_by_one() {
        let now = now();
        let messages = [
            (1, now),
            (2, now - Duration::minutes(5)),
            (3, now - Duration::days(14)),
            (4, now - Duration::days(30)),
        ];

        let plan = plan_purge(&messages, now);

        assert_eq!(plan.bulk, vec![1, 2]);
        assert_eq!(plan.individual, vec![3, 4]);
        assert_eq!(plan.total(), 4);
    }

    #[test]
    fn test_single_recent_message_is_not_bulk_deleted() {
        let now = now();
        let messages = [(1, now), (2, now - Duration::days(20))];

        let plan = plan_purge(&messages, now);

        assert!(plan.bulk.is_empty());
        assert_eq!(plan.individual, vec![2, 1]);
    }

    #[test]
    fn test_empty_channel() {
        assert_eq!(plan_purge(&[], now()), PurgePlan::default());
    }
}
