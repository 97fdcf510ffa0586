//! Integration tests for diary entries: creator joins, newest-first
//! listing, and the ownership-filter-as-authorization contract.

use sqlx::PgPool;

use forklore_db::models::diary_entry::{CreateDiaryEntry, UpdateDiaryEntry};
use forklore_db::models::recipe::CreateRecipe;
use forklore_db::models::recipe_version::ForkRecipeRequest;
use forklore_db::repositories::{DiaryEntryRepo, RecipeRepo, RecipeVersionRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, email: &str, name: &str) -> i64 {
    UserRepo::create(pool, email, name, "argon2-hash")
        .await
        .unwrap()
        .id
}

/// Create a recipe plus its lineage root version; returns the version id.
async fn new_version(pool: &PgPool, user_id: i64) -> i64 {
    let recipe_input = CreateRecipe {
        name: "Gumbo".to_string(),
        description: None,
        category: "main".to_string(),
        subcategory: None,
        difficulty: 2,
        servings: 6,
        total_time_mins: 90,
        ingredients: vec![],
        instructions: vec![],
    };
    let original = RecipeRepo::create(pool, user_id, &recipe_input, "published")
        .await
        .unwrap();
    let request = ForkRecipeRequest {
        parent_version_id: None,
        recipe: recipe_input,
        change_summary: "initial".to_string(),
        is_public: Some(true),
        success_rating: None,
        changes_made: vec![],
    };
    let (_, version) = RecipeVersionRepo::create_with_snapshot(pool, user_id, original.id, &request)
        .await
        .unwrap();
    version.id
}

fn entry(entry_type: &str, content: &str) -> CreateDiaryEntry {
    CreateDiaryEntry {
        entry_type: entry_type.to_string(),
        content: content.to_string(),
        cooked_on: None,
        image_paths: vec![],
    }
}

// ---------------------------------------------------------------------------
// Test: create resolves the creator join
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_returns_entry_with_creator_name(pool: PgPool) {
    let user_id = new_user(&pool, "ana@example.com", "Ana").await;
    let version_id = new_version(&pool, user_id).await;

    let created = DiaryEntryRepo::create(&pool, version_id, user_id, &entry("pre_cooking", "Brined overnight"))
        .await
        .unwrap();

    assert_eq!(created.version_id, version_id);
    assert_eq!(created.entry_type, "pre_cooking");
    assert_eq!(created.creator_name, "Ana");
    assert!(created.image_paths.0.is_empty());
}

// ---------------------------------------------------------------------------
// Test: foreign-owned update matches zero rows, content untouched
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn foreign_update_matches_zero_rows(pool: PgPool) {
    let owner = new_user(&pool, "ben@example.com", "Ben").await;
    let stranger = new_user(&pool, "cal@example.com", "Cal").await;
    let version_id = new_version(&pool, owner).await;

    let created = DiaryEntryRepo::create(&pool, version_id, owner, &entry("post_cooking", "Too salty"))
        .await
        .unwrap();

    let update = UpdateDiaryEntry {
        content: Some("Hijacked".to_string()),
        cooked_on: None,
        image_paths: None,
    };
    let denied = DiaryEntryRepo::update(&pool, created.id, stranger, &update)
        .await
        .unwrap();
    assert!(denied.is_none());

    // Stored content is unchanged.
    let reloaded = DiaryEntryRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.content, "Too salty");

    // The owner's update goes through.
    let updated = DiaryEntryRepo::update(&pool, created.id, owner, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.content, "Hijacked");
}

// ---------------------------------------------------------------------------
// Test: foreign-owned delete matches zero rows
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn foreign_delete_matches_zero_rows(pool: PgPool) {
    let owner = new_user(&pool, "dee@example.com", "Dee").await;
    let stranger = new_user(&pool, "eve@example.com", "Eve").await;
    let version_id = new_version(&pool, owner).await;

    let created = DiaryEntryRepo::create(&pool, version_id, owner, &entry("next_time", "Use fresh thyme"))
        .await
        .unwrap();

    assert!(!DiaryEntryRepo::delete(&pool, created.id, stranger).await.unwrap());
    assert!(DiaryEntryRepo::find_by_id(&pool, created.id).await.unwrap().is_some());

    assert!(DiaryEntryRepo::delete(&pool, created.id, owner).await.unwrap());
    assert!(DiaryEntryRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: listing is newest first
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn list_is_newest_first(pool: PgPool) {
    let user_id = new_user(&pool, "fay@example.com", "Fay").await;
    let version_id = new_version(&pool, user_id).await;

    let first = DiaryEntryRepo::create(&pool, version_id, user_id, &entry("pre_cooking", "first"))
        .await
        .unwrap();
    let second = DiaryEntryRepo::create(&pool, version_id, user_id, &entry("during_cooking", "second"))
        .await
        .unwrap();

    let listed = DiaryEntryRepo::list_by_version(&pool, version_id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}
