//! Domain logic for the forklore recipe platform.
//!
//! Pure types and functions only -- no I/O, no database access. The `db`
//! and `api` crates depend on this crate, never the other way around.

pub mod conversions;
pub mod diary;
pub mod diff;
pub mod error;
pub mod nutrition;
pub mod recipe;
pub mod types;
pub mod versioning;
