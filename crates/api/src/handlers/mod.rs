//! HTTP handlers, one module per feature area.

pub mod auth;
pub mod diary;
pub mod recipes;
pub mod versioning;
