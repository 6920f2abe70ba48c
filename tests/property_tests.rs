//! Property-based tests for core domain types.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::collections::BTreeMap;

use proptest::prelude::*;

use gitlet::core::commit::{Commit, Tree};
use gitlet::core::merge::{classify, MergeAction, MergePlan};
use gitlet::core::staging::StagingArea;
use gitlet::core::store::{MemoryBackend, ObjectStore};
use gitlet::core::types::{BranchName, CommitTime, ObjectId, SHORT_ID_LEN};

/// Strategy for generating valid branch names.
fn valid_branch_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_][a-zA-Z0-9_/-]{0,30}"
        .prop_filter("no trailing slash or '..'", |s| {
            !s.ends_with('/') && !s.contains("..")
        })
}

/// Strategy for an optional digest drawn from a small pool, so that
/// equal versions come up often.
fn version() -> impl Strategy<Value = Option<ObjectId>> {
    prop::option::of((0u8..4).prop_map(|n| ObjectId::for_bytes(&[n])))
}

/// Strategy for trees over a handful of paths.
fn tree() -> impl Strategy<Value = Tree> {
    prop::collection::btree_map(
        prop::sample::select(vec!["a", "b", "c", "d/e", "f"]).prop_map(String::from),
        (0u8..4).prop_map(|n| ObjectId::for_bytes(&[n])),
        0..5,
    )
}

proptest! {
    /// Any valid branch name round-trips through serde.
    #[test]
    fn branch_name_serde_roundtrip(name in valid_branch_name()) {
        let branch = BranchName::new(&name).unwrap();
        let json = serde_json::to_string(&branch).unwrap();
        let parsed: BranchName = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(branch, parsed);
    }

    /// Digests are lowercase hex of fixed length, and short ids are prefixes.
    #[test]
    fn object_id_shape(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let id = ObjectId::for_bytes(&bytes);
        prop_assert_eq!(id.as_str().len(), 64);
        prop_assert!(id.as_str().chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        prop_assert!(id.as_str().starts_with(id.short(SHORT_ID_LEN)));
        prop_assert_eq!(ObjectId::new(id.as_str()).unwrap(), id);
    }

    /// Storing the same bytes twice keeps one object under one id.
    #[test]
    fn blob_put_is_idempotent(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let store = ObjectStore::new(MemoryBackend::new());
        let first = store.put_blob(&bytes).unwrap();
        let second = store.put_blob(&bytes).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(store.backend().len(), 1);
        prop_assert_eq!(store.get_blob(&first).unwrap(), bytes);
    }

    /// A commit's id is the digest of its encoding and survives decoding.
    #[test]
    fn commit_identity_is_content_derived(files in tree(), message in "[a-z ]{1,20}") {
        let parent = Commit::root().id().unwrap();
        let commit = Commit::new(message, parent, files, CommitTime::epoch());
        let bytes = commit.to_bytes().unwrap();
        prop_assert_eq!(commit.id().unwrap(), ObjectId::for_bytes(&bytes));
        prop_assert_eq!(Commit::from_bytes(&bytes).unwrap(), commit);
    }

    /// Agreeing sides never conflict and keep what they have.
    #[test]
    fn identical_sides_keep(s in version(), c in version()) {
        prop_assert_eq!(classify(s.as_ref(), c.as_ref(), c.as_ref()), MergeAction::Keep);
    }

    /// Conflicts do not depend on which side is current.
    #[test]
    fn conflicts_are_symmetric(s in version(), c in version(), o in version()) {
        let forward = classify(s.as_ref(), c.as_ref(), o.as_ref()) == MergeAction::Conflict;
        let backward = classify(s.as_ref(), o.as_ref(), c.as_ref()) == MergeAction::Conflict;
        prop_assert_eq!(forward, backward);
    }

    /// A path only one side changed resolves to that side's version.
    #[test]
    fn one_sided_change_wins(s in version(), o in version()) {
        let action = classify(s.as_ref(), s.as_ref(), o.as_ref());
        let expected = match (&o, s == o) {
            (_, true) => MergeAction::Keep,
            (Some(_), false) => MergeAction::TakeOther,
            (None, false) => MergeAction::Remove,
        };
        prop_assert_eq!(action, expected);
    }

    /// The plan covers exactly the union of paths, in sorted order.
    #[test]
    fn plan_covers_union(s in tree(), c in tree(), o in tree()) {
        let plan = MergePlan::build(&s, &c, &o);
        let mut union: Vec<&String> = s.keys().chain(c.keys()).chain(o.keys()).collect();
        union.sort();
        union.dedup();
        let planned: Vec<&String> = plan.changes().iter().map(|p| &p.path).collect();
        prop_assert_eq!(planned, union);
    }

    /// Applying staged changes never mutates the base tree, and removals win.
    #[test]
    fn staging_apply_leaves_base_untouched(base in tree(), added in tree(), removed in tree()) {
        let snapshot = base.clone();
        let mut staging = StagingArea::new();
        for (path, blob) in &added {
            staging.stage_addition(path.clone(), blob.clone());
        }
        for (path, blob) in &removed {
            staging.stage_removal(path.clone(), blob.clone());
        }

        let result = staging.apply(&base);
        prop_assert_eq!(&base, &snapshot);
        for path in removed.keys() {
            prop_assert!(!result.contains_key(path));
        }
        let expected: BTreeMap<_, _> = base
            .iter()
            .chain(added.iter())
            .filter(|(p, _)| !removed.contains_key(*p))
            .map(|(p, b)| (p.clone(), added.get(p).unwrap_or(b).clone()))
            .collect();
        prop_assert_eq!(result, expected);
    }
}
