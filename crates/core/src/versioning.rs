//! Version comparison engine and lineage tree builder.
//!
//! Both halves are pure: the diff engine turns two recipe snapshots into
//! add/remove/modify buckets, and the tree builder reconstructs a full
//! multi-level forest from a flat list of parent-pointer records.

use std::collections::HashMap;

use serde::Serialize;

use crate::recipe::{Ingredient, Instruction, RecipeSnapshot};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Comparison types
// ---------------------------------------------------------------------------

/// An item present in both snapshots (paired by stable id) whose content
/// changed between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModifiedItem<T> {
    pub previous: T,
    pub current: T,
}

/// Add/remove/modify buckets for one ordered list (ingredients or
/// instructions).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListDiff<T> {
    pub added: Vec<T>,
    pub removed: Vec<T>,
    pub modified: Vec<ModifiedItem<T>>,
}

impl<T> ListDiff<T> {
    /// True when no bucket holds any item.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// An old/new pair for one scalar recipe field that differs between
/// snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDiff {
    pub field: &'static str,
    pub old: serde_json::Value,
    pub new: serde_json::Value,
}

/// The full structural comparison between two recipe snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionComparison {
    pub ingredients: ListDiff<Ingredient>,
    pub instructions: ListDiff<Instruction>,
    pub general: Vec<FieldDiff>,
}

impl VersionComparison {
    /// True when the two snapshots are structurally identical.
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.instructions.is_empty() && self.general.is_empty()
    }
}

// ---------------------------------------------------------------------------
// List diff
// ---------------------------------------------------------------------------

/// Diff two ordered lists, pairing items by stable identifier first and
/// falling back to full-value (deep) equality for items without one.
///
/// Pairing rules:
/// - Items sharing an id on both sides: `modified` if unequal, otherwise
///   unchanged (position is not identity -- a pure reorder is a no-op).
/// - Items without a shared id: matched by deep equality; unmatched items
///   of the modified list are `added`, unmatched items of the original
///   are `removed`. An edited item that carries no id therefore shows up
///   as one `removed` plus one `added`, since its identity is unknowable.
fn diff_items<T, F>(original: &[T], modified: &[T], key_of: F) -> ListDiff<T>
where
    T: PartialEq + Clone,
    F: Fn(&T) -> Option<&str>,
{
    // First occurrence wins when ids are (erroneously) duplicated.
    let mut original_by_key: HashMap<&str, &T> = HashMap::new();
    for item in original {
        if let Some(key) = key_of(item) {
            original_by_key.entry(key).or_insert(item);
        }
    }
    let mut modified_keys: HashMap<&str, ()> = HashMap::new();
    for item in modified {
        if let Some(key) = key_of(item) {
            modified_keys.entry(key).or_insert(());
        }
    }

    let mut diff = ListDiff {
        added: Vec::new(),
        removed: Vec::new(),
        modified: Vec::new(),
    };

    for item in modified {
        match key_of(item).and_then(|key| original_by_key.get(key)) {
            Some(counterpart) => {
                if *counterpart != item {
                    diff.modified.push(ModifiedItem {
                        previous: (*counterpart).clone(),
                        current: item.clone(),
                    });
                }
            }
            None => {
                if !original.contains(item) {
                    diff.added.push(item.clone());
                }
            }
        }
    }

    for item in original {
        let id_survives = key_of(item).is_some_and(|key| modified_keys.contains_key(key));
        if !id_survives && !modified.contains(item) {
            diff.removed.push(item.clone());
        }
    }

    diff
}

// ---------------------------------------------------------------------------
// Snapshot comparison
// ---------------------------------------------------------------------------

/// Compare two recipe snapshots.
///
/// Ingredient and instruction lists are diffed via [`diff_items`]; the
/// general bucket gets an old/new entry for every scalar field in the
/// fixed set {name, description, category, subcategory, difficulty,
/// servings, total_time_mins} whose value differs by strict inequality.
///
/// Deterministic: identical inputs always produce identical output.
pub fn compare_snapshots(original: &RecipeSnapshot, modified: &RecipeSnapshot) -> VersionComparison {
    let mut general = Vec::new();

    macro_rules! field_diff {
        ($field:ident) => {
            if original.$field != modified.$field {
                general.push(FieldDiff {
                    field: stringify!($field),
                    old: serde_json::json!(original.$field),
                    new: serde_json::json!(modified.$field),
                });
            }
        };
    }

    field_diff!(name);
    field_diff!(description);
    field_diff!(category);
    field_diff!(subcategory);
    field_diff!(difficulty);
    field_diff!(servings);
    field_diff!(total_time_mins);

    VersionComparison {
        ingredients: diff_items(&original.ingredients, &modified.ingredients, |i| {
            i.id.as_deref()
        }),
        instructions: diff_items(&original.instructions, &modified.instructions, |i| {
            i.id.as_deref()
        }),
        general,
    }
}

// ---------------------------------------------------------------------------
// Version tree
// ---------------------------------------------------------------------------

/// One node of a reconstructed lineage forest.
#[derive(Debug, Clone, Serialize)]
pub struct VersionTreeNode<T> {
    #[serde(flatten)]
    pub version: T,
    pub depth: i32,
    pub children: Vec<VersionTreeNode<T>>,
}

/// Reconstruct a forest from a flat list of parent-pointer records.
///
/// Accessors keep this independent of any concrete row type: `id_of` must
/// return each record's id and `parent_of` its optional parent id.
///
/// - Roots (no parent) appear in input order; children keep input order
///   under their parent. With chronologically-ordered input, every level
///   is oldest-first.
/// - A record whose parent id is absent from the input is promoted to a
///   root rather than dropped, so incomplete lineages degrade to a
///   flatter tree instead of losing history.
pub fn build_version_forest<T, I, P>(
    versions: Vec<T>,
    id_of: I,
    parent_of: P,
) -> Vec<VersionTreeNode<T>>
where
    I: Fn(&T) -> DbId,
    P: Fn(&T) -> Option<DbId>,
{
    let index_by_id: HashMap<DbId, usize> = versions
        .iter()
        .enumerate()
        .map(|(i, v)| (id_of(v), i))
        .collect();

    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); versions.len()];
    let mut roots: Vec<usize> = Vec::new();

    for (i, version) in versions.iter().enumerate() {
        match parent_of(version).and_then(|pid| index_by_id.get(&pid).copied()) {
            // Guard against a record claiming itself as parent.
            Some(parent_index) if parent_index != i => children_of[parent_index].push(i),
            _ => roots.push(i),
        }
    }

    let mut slots: Vec<Option<T>> = versions.into_iter().map(Some).collect();

    fn assemble<T>(
        index: usize,
        depth: i32,
        slots: &mut [Option<T>],
        children_of: &[Vec<usize>],
    ) -> VersionTreeNode<T> {
        let version = slots[index]
            .take()
            .unwrap_or_else(|| unreachable!("each index is assembled exactly once"));
        let children = children_of[index]
            .iter()
            .map(|&child| assemble(child, depth + 1, slots, children_of))
            .collect();
        VersionTreeNode {
            version,
            depth,
            children,
        }
    }

    roots
        .into_iter()
        .map(|root| assemble(root, 0, &mut slots, &children_of))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
