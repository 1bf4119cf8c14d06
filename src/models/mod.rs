//! Data models for the GreenLens application.
//!
//! Field names match the JSON document and the frontend's expectations exactly.

mod datastore;
mod leaderboard;
mod scan;
mod user;

pub use datastore::*;
pub use leaderboard::*;
pub use scan::*;
pub use user::*;
