//! crates/devotional_core/src/streak.rs
//!
//! The streak calculator and leaderboard ranking. Pure functions over
//! devotional records: no clock, no I/O, deterministic for a given input.

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Devotional, User};

/// Upper bound on the backward day walk. A true streak longer than this
/// reports the cap; the bound keeps the loop finite for any input.
pub const MAX_STREAK_DAYS: u32 = 365;

/// Length of the user's current run of consecutive done days.
///
/// "Current" is anchored at the most recent done day, not at the wall clock:
/// a run that ended last month still reports its full length. Multiple
/// records on the same UTC calendar day collapse to a single day, whatever
/// their time-of-day components were.
pub fn current_streak<'a, I>(devotionals: I) -> u32
where
    I: IntoIterator<Item = &'a Devotional>,
{
    let done_days: HashSet<NaiveDate> = devotionals
        .into_iter()
        .filter(|d| d.is_done())
        .map(|d| d.day())
        .collect();

    let Some(&most_recent) = done_days.iter().max() else {
        return 0;
    };

    let mut streak = 0;
    let mut cursor = most_recent;
    for _ in 0..MAX_STREAK_DAYS {
        if !done_days.contains(&cursor) {
            break;
        }
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break, // ran off the calendar floor
        }
    }
    streak
}

/// One row of the leaderboard.
#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub name: String,
    pub streak: u32,
}

/// Ranks every user by current streak, highest first. Users with no
/// qualifying devotionals appear with a streak of zero. The sort is stable,
/// so tied users keep their input order.
pub fn rank_users(users: &[User], devotionals: &[Devotional]) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = users
        .iter()
        .map(|user| LeaderboardEntry {
            user_id: user.id,
            name: user.name.clone(),
            streak: current_streak(devotionals.iter().filter(|d| d.user_id == user.id)),
        })
        .collect();
    entries.sort_by(|a, b| b.streak.cmp(&a.streak));
    entries
}
