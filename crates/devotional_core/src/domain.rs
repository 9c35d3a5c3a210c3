//! crates/devotional_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

/// One calendar day's study record for one user.
#[derive(Debug, Clone)]
pub struct Devotional {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Stored at UTC midnight. Day comparisons use UTC calendar fields only.
    pub date: DateTime<Utc>,
    pub title: String,
    pub content: String,
    pub reference: String,
    pub user_notes: String,
    pub completed: bool,
}

impl Devotional {
    /// A devotional counts toward a streak only when it is marked completed
    /// AND carries non-whitespace notes. Both conditions, not either one.
    pub fn is_done(&self) -> bool {
        self.completed && !self.user_notes.trim().is_empty()
    }

    /// The UTC calendar day this record belongs to.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

// Represents a user - used throughout app
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

// Only used internally for login/registration - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// A resolved scripture passage.
#[derive(Debug, Clone)]
pub struct Passage {
    pub reference: String,
    pub content: String,
}

/// The reference of last resort when nothing else resolves.
pub const DEFAULT_REFERENCE: &str = "John 3:16";

// The 66-book Protestant canon, in order. Indexed by day-of-year when
// generating a fallback reference.
const CANON_BOOKS: [&str; 66] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Normalizes a calendar day to its UTC-midnight instant, the canonical
/// form every stored `Devotional.date` takes.
pub fn utc_midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Deterministic fallback reference for a day that has no caller-supplied one.
///
/// The zero-based day-of-year picks the book, cycling through the canon; the
/// day-of-month picks a chapter between 1 and 30; the verse is always 1. The
/// result is cosmetic - it only has to look like a plausible reference.
pub fn generated_reference(day: NaiveDate) -> String {
    let book = CANON_BOOKS[day.ordinal0() as usize % CANON_BOOKS.len()];
    let chapter = (day.day() % 30) + 1;
    format!("{} {}:1", book, chapter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn devotional(completed: bool, user_notes: &str) -> Devotional {
        Devotional {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: "2024-05-01T00:00:00Z".parse().unwrap(),
            title: "Morning reading".to_string(),
            content: "Read and reflect.".to_string(),
            reference: "John 3:16".to_string(),
            user_notes: user_notes.to_string(),
            completed,
        }
    }

    #[test]
    fn done_requires_completion_and_notes_together() {
        assert!(devotional(true, "Grace upon grace.").is_done());
        assert!(!devotional(true, "").is_done());
        assert!(!devotional(false, "Grace upon grace.").is_done());
        assert!(!devotional(false, "").is_done());
    }

    #[test]
    fn whitespace_only_notes_do_not_count() {
        assert!(!devotional(true, "   \t\n  ").is_done());
    }

    #[test]
    fn day_uses_utc_calendar_fields() {
        let mut d = devotional(true, "notes");
        d.date = "2024-05-01T23:59:59Z".parse().unwrap();
        assert_eq!(d.day(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn utc_midnight_strips_the_time_component() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let instant = utc_midnight(day);
        assert_eq!(instant.date_naive(), day);
        assert_eq!(instant.hour(), 0);
        assert_eq!(instant.minute(), 0);
        assert_eq!(instant.second(), 0);
    }

    #[test]
    fn generated_reference_starts_the_year_in_genesis() {
        // Jan 1: day-of-year 0 picks the first book, day-of-month 1 gives
        // chapter 2, and the verse is always 1.
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(generated_reference(day), "Genesis 2:1");
    }

    #[test]
    fn generated_reference_wraps_around_the_canon() {
        // 2024 is a leap year: March 6 is day-of-year 65 (Revelation, the
        // last book) and March 7 is day 66, wrapping back to Genesis.
        let last = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        assert_eq!(generated_reference(last), "Revelation 7:1");

        let wrapped = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(generated_reference(wrapped), "Genesis 8:1");
    }

    #[test]
    fn generated_reference_is_deterministic() {
        let day = NaiveDate::from_ymd_opt(2025, 8, 25).unwrap();
        assert_eq!(generated_reference(day), generated_reference(day));
    }
}
