//! Integration tests for the version lineage: fork transaction, sequence
//! numbering, root uniqueness, fork counters, and rating ownership.

use forklore_core::recipe::Ingredient;
use sqlx::PgPool;

use forklore_db::models::recipe::CreateRecipe;
use forklore_db::models::recipe_version::{CreateRecipeVersion, ForkRecipeRequest};
use forklore_db::repositories::{RecipeRepo, RecipeVersionRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(pool, email, "Test Cook", "argon2-hash")
        .await
        .unwrap()
        .id
}

fn new_recipe(name: &str) -> CreateRecipe {
    CreateRecipe {
        name: name.to_string(),
        description: None,
        category: "main".to_string(),
        subcategory: None,
        difficulty: 2,
        servings: 4,
        total_time_mins: 45,
        ingredients: vec![Ingredient {
            id: Some("i1".to_string()),
            name: "salt".to_string(),
            amount: "1".to_string(),
            unit: "tsp".to_string(),
            optional: false,
        }],
        instructions: vec![],
    }
}

fn fork_request(parent_version_id: Option<i64>, summary: &str) -> ForkRecipeRequest {
    ForkRecipeRequest {
        parent_version_id,
        recipe: new_recipe("Forked Stew"),
        change_summary: summary.to_string(),
        is_public: Some(false),
        success_rating: None,
        changes_made: vec![],
    }
}

// ---------------------------------------------------------------------------
// Test: fork transaction creates snapshot + version + back-link
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn fork_creates_snapshot_version_and_backlink(pool: PgPool) {
    let user_id = new_user(&pool, "ana@example.com").await;
    let original = RecipeRepo::create(&pool, user_id, &new_recipe("Stew"), "published")
        .await
        .unwrap();

    let request = fork_request(None, "initial version");
    let (snapshot, version) =
        RecipeVersionRepo::create_with_snapshot(&pool, user_id, original.id, &request)
            .await
            .unwrap();

    // Snapshot forced to published and owned by the forking user.
    assert_eq!(snapshot.status, "published");
    assert_eq!(snapshot.owner_id, user_id);
    assert_ne!(snapshot.id, original.id);

    // Version row links lineage, snapshot, and creator.
    assert_eq!(version.original_recipe_id, original.id);
    assert_eq!(version.recipe_id, snapshot.id);
    assert_eq!(version.parent_version_id, None);
    assert_eq!(version.version_seq, 1);
    assert_eq!(version.version_number, "v1");
    assert!(!version.is_public);
    assert_eq!(version.fork_count, 0);

    // Back-link was applied inside the transaction.
    let reloaded = RecipeRepo::find_by_id(&pool, snapshot.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.current_version_id, Some(version.id));
}

// ---------------------------------------------------------------------------
// Test: sequence numbers increment within one lineage
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn version_seq_increments_per_lineage(pool: PgPool) {
    let user_id = new_user(&pool, "ben@example.com").await;
    let original = RecipeRepo::create(&pool, user_id, &new_recipe("Bread"), "published")
        .await
        .unwrap();

    let (_, root) =
        RecipeVersionRepo::create_with_snapshot(&pool, user_id, original.id, &fork_request(None, "root"))
            .await
            .unwrap();
    let (_, child) = RecipeVersionRepo::create_with_snapshot(
        &pool,
        user_id,
        original.id,
        &fork_request(Some(root.id), "more yeast"),
    )
    .await
    .unwrap();

    assert_eq!(root.version_seq, 1);
    assert_eq!(child.version_seq, 2);
    assert_eq!(child.version_number, "v2");
    assert_eq!(child.parent_version_id, Some(root.id));
}

// ---------------------------------------------------------------------------
// Test: at most one root per lineage
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn second_root_in_lineage_is_rejected(pool: PgPool) {
    let user_id = new_user(&pool, "cal@example.com").await;
    let original = RecipeRepo::create(&pool, user_id, &new_recipe("Soup"), "published")
        .await
        .unwrap();

    RecipeVersionRepo::create_with_snapshot(&pool, user_id, original.id, &fork_request(None, "root"))
        .await
        .unwrap();

    let second = RecipeVersionRepo::create_with_snapshot(
        &pool,
        user_id,
        original.id,
        &fork_request(None, "root again"),
    )
    .await;
    assert!(second.is_err());
}

// ---------------------------------------------------------------------------
// Test: one sequence number per lineage
// ---------------------------------------------------------------------------

/// Two concurrent forks of one lineage can both compute the same next
/// sequence number before either commits; the second insert must then die
/// on the (original_recipe_id, version_seq) unique constraint rather than
/// minting a duplicate public version number.
#[sqlx::test(migrations = "./migrations")]
async fn duplicate_version_seq_in_lineage_is_rejected(pool: PgPool) {
    let user_id = new_user(&pool, "fay@example.com").await;
    let original = RecipeRepo::create(&pool, user_id, &new_recipe("Chili"), "published")
        .await
        .unwrap();
    let (snapshot, root) =
        RecipeVersionRepo::create_with_snapshot(&pool, user_id, original.id, &fork_request(None, "root"))
            .await
            .unwrap();

    // Replay the root insert with its sequence number pinned, as the loser
    // of a sequencing race would.
    let duplicate = sqlx::query(
        "INSERT INTO recipe_versions
            (original_recipe_id, parent_version_id, recipe_id, version_seq,
             created_by_id, change_summary, is_public)
         VALUES ($1, $2, $3, $4, $5, 'raced root', TRUE)",
    )
    .bind(original.id)
    .bind(root.id)
    .bind(snapshot.id)
    .bind(root.version_seq)
    .bind(user_id)
    .execute(&pool)
    .await;

    let err = duplicate.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_recipe_versions_lineage_seq"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: fork counter
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn fork_count_increments_and_reports_missing_rows(pool: PgPool) {
    let user_id = new_user(&pool, "dee@example.com").await;
    let original = RecipeRepo::create(&pool, user_id, &new_recipe("Curry"), "published")
        .await
        .unwrap();
    let (_, root) =
        RecipeVersionRepo::create_with_snapshot(&pool, user_id, original.id, &fork_request(None, "root"))
            .await
            .unwrap();

    assert!(RecipeVersionRepo::increment_fork_count(&pool, root.id)
        .await
        .unwrap());
    assert!(RecipeVersionRepo::increment_fork_count(&pool, root.id)
        .await
        .unwrap());

    let reloaded = RecipeVersionRepo::find_by_id(&pool, root.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.fork_count, 2);

    // A vanished version is reported, not an error.
    assert!(!RecipeVersionRepo::increment_fork_count(&pool, 999_999)
        .await
        .unwrap());
}

// ---------------------------------------------------------------------------
// Test: history ordering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn history_is_newest_first_and_tree_input_oldest_first(pool: PgPool) {
    let user_id = new_user(&pool, "eve@example.com").await;
    let original = RecipeRepo::create(&pool, user_id, &new_recipe("Pie"), "published")
        .await
        .unwrap();

    let (_, root) =
        RecipeVersionRepo::create_with_snapshot(&pool, user_id, original.id, &fork_request(None, "root"))
            .await
            .unwrap();
    let (_, child) = RecipeVersionRepo::create_with_snapshot(
        &pool,
        user_id,
        original.id,
        &fork_request(Some(root.id), "flakier crust"),
    )
    .await
    .unwrap();

    let history = RecipeVersionRepo::list_by_lineage(&pool, original.id)
        .await
        .unwrap();
    assert_eq!(history[0].id, child.id);
    assert_eq!(history[1].id, root.id);

    let chronological = RecipeVersionRepo::list_by_lineage_chronological(&pool, original.id)
        .await
        .unwrap();
    assert_eq!(chronological[0].id, root.id);
    assert_eq!(chronological[1].id, child.id);
}

// ---------------------------------------------------------------------------
// Test: success rating is creator-scoped
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn success_rating_is_creator_scoped(pool: PgPool) {
    let creator = new_user(&pool, "fay@example.com").await;
    let stranger = new_user(&pool, "gil@example.com").await;
    let original = RecipeRepo::create(&pool, creator, &new_recipe("Tart"), "published")
        .await
        .unwrap();
    let (_, version) =
        RecipeVersionRepo::create_with_snapshot(&pool, creator, original.id, &fork_request(None, "root"))
            .await
            .unwrap();

    // A stranger's update matches zero rows.
    let denied = RecipeVersionRepo::set_success_rating(&pool, version.id, stranger, 5)
        .await
        .unwrap();
    assert!(denied.is_none());

    let rated = RecipeVersionRepo::set_success_rating(&pool, version.id, creator, 4)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rated.success_rating, Some(4));
}

// ---------------------------------------------------------------------------
// Test: plain version insert for a pre-existing snapshot
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_assigns_sequence_for_existing_snapshot(pool: PgPool) {
    let user_id = new_user(&pool, "hal@example.com").await;
    let original = RecipeRepo::create(&pool, user_id, &new_recipe("Ragu"), "published")
        .await
        .unwrap();
    let snapshot = RecipeRepo::create(&pool, user_id, &new_recipe("Ragu copy"), "published")
        .await
        .unwrap();

    let version = RecipeVersionRepo::create(
        &pool,
        user_id,
        &CreateRecipeVersion {
            original_recipe_id: original.id,
            parent_version_id: None,
            recipe_id: snapshot.id,
            change_summary: "imported".to_string(),
            is_public: true,
            success_rating: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(version.version_seq, 1);
    assert_eq!(version.recipe_id, snapshot.id);
}
