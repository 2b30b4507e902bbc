use chrono::NaiveDate;
use penfolio_db::user_profile;
use penfolio_entity::user_profile as user_profile_entity;
use sea_orm::{ConnectionTrait, DbErr};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak {
    pub current: i32,
    pub longest: i32,
    pub last_content_date: Option<NaiveDate>,
}

impl Streak {
    /// Apply one content-creating action dated `today`.
    ///
    /// Exactly one branch fires for every calendar relationship between
    /// `last_content_date` and `today`: same day keeps the state, the day
    /// after extends the run, anything else starts a new run of one.
    /// `longest >= current` holds afterwards in all three cases.
    #[must_use]
    pub fn advance(self, today: NaiveDate) -> Self {
        let current = match self.last_content_date {
            Some(last) if last == today => return self,
            Some(last) if Some(last) == today.pred_opt() => self.current + 1,
            _ => 1,
        };

        Self {
            current,
            longest: self.longest.max(current),
            last_content_date: Some(today),
        }
    }
}

impl From<&user_profile_entity::Model> for Streak {
    fn from(profile: &user_profile_entity::Model) -> Self {
        Self {
            current: profile.current_streak,
            longest: profile.longest_streak,
            last_content_date: profile.last_content_date,
        }
    }
}

/// Fold one content-creating action dated `today` into the user's profile.
///
/// Runs on the caller's connection, usually the transaction that created
/// the content, so the read-increment-write is serialized by the store.
/// A missing profile only logs: losing a streak tick must not fail the
/// journal that triggered it.
pub async fn record_activity<C: ConnectionTrait>(conn: &C, user_id: Uuid, today: NaiveDate) -> Result<(), DbErr> {
    let Some(profile) = user_profile::Query::find_by_user_id(conn, user_id).await? else {
        tracing::warn!(%user_id, "no profile found while recording streak activity, skipping");
        return Ok(());
    };

    if profile.last_content_date == Some(today) {
        // Already counted today, repeated entries don't inflate the streak.
        return Ok(());
    }

    let streak = Streak::from(&profile).advance(today);
    user_profile::Mutation::update_streak(conn, user_id, streak.current, streak.longest, today).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_first_activity_starts_at_one() {
        let streak = Streak {
            current: 0,
            longest: 0,
            last_content_date: None,
        }
        .advance(date("2024-01-01"));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 1);
        assert_eq!(streak.last_content_date, Some(date("2024-01-01")));
    }

    #[test]
    fn test_same_day_is_idempotent() {
        let before = Streak {
            current: 3,
            longest: 5,
            last_content_date: Some(date("2024-01-02")),
        };
        assert_eq!(before.advance(date("2024-01-02")), before);
    }

    #[test]
    fn test_next_day_extends_the_run() {
        let streak = Streak {
            current: 1,
            longest: 1,
            last_content_date: Some(date("2024-01-01")),
        }
        .advance(date("2024-01-02"));
        assert_eq!(streak.current, 2);
        assert_eq!(streak.longest, 2);
    }

    #[test]
    fn test_gap_resets_the_run() {
        let streak = Streak {
            current: 4,
            longest: 4,
            last_content_date: Some(date("2024-01-01")),
        }
        .advance(date("2024-01-05"));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 4);
        assert_eq!(streak.last_content_date, Some(date("2024-01-05")));
    }

    #[test]
    fn test_longest_never_below_current() {
        let mut streak = Streak {
            current: 0,
            longest: 0,
            last_content_date: None,
        };
        for day in [
            "2024-01-01",
            "2024-01-02",
            "2024-01-03",
            "2024-01-03",
            "2024-01-07",
            "2024-01-08",
        ] {
            streak = streak.advance(date(day));
            assert!(streak.longest >= streak.current);
        }
        assert_eq!(streak.current, 2);
        assert_eq!(streak.longest, 3);
    }

    #[test]
    fn test_activity_before_last_date_resets() {
        // Clock skew: "today" before the recorded date falls through to reset.
        let streak = Streak {
            current: 3,
            longest: 3,
            last_content_date: Some(date("2024-01-05")),
        }
        .advance(date("2024-01-03"));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 3);
    }
}
