pub mod domain;
pub mod ports;
pub mod streak;

pub use domain::{Devotional, Passage, User, UserCredentials};
pub use ports::{
    DevotionalChanges, DevotionalStore, NewDevotional, NewUser, PortError, PortResult,
    ScriptureService, UserStore,
};
pub use streak::{current_streak, rank_users, LeaderboardEntry};
