//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod diary_entry_repo;
pub mod recipe_change_repo;
pub mod recipe_repo;
pub mod recipe_version_repo;
pub mod user_repo;

pub use diary_entry_repo::DiaryEntryRepo;
pub use recipe_change_repo::RecipeChangeRepo;
pub use recipe_repo::RecipeRepo;
pub use recipe_version_repo::RecipeVersionRepo;
pub use user_repo::UserRepo;
