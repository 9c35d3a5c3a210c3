pub mod db;
pub mod scripture;

pub use db::DbAdapter;
pub use scripture::BibleApiAdapter;
