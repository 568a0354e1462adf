//! Integration tests for the store → graph → snapshot → cache → batch pipeline.
//!
//! These tests validate the end-to-end flow:
//! 1. Loading a graph from a people store
//! 2. Snapshot identity across loads and edits
//! 3. Cached resolution keyed by snapshot
//! 4. Batch resolution over every root

use std::num::NonZeroUsize;
use std::sync::Arc;

use kinship_kernel::{
    resolve, BatchResolver, CacheConfig, Gender, GraphIndex, GraphSnapshot, InMemoryPeopleStore,
    Marriage, PeopleStore, Person, PersonId, RelationCode, ResolutionCache,
    KINSHIP_SCHEMA_VERSION,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn id(s: &str) -> PersonId {
    PersonId::from(s)
}

fn family_people() -> Vec<Person> {
    vec![
        Person::new("abuela", "Rosa", Gender::Female)
            .with_marriage(Marriage::with_spouse("abuelo", true).child("papa").child("tia")),
        Person::new("abuelo", "Manuel", Gender::Male)
            .with_marriage(Marriage::with_spouse("abuela", true).child("papa").child("tia")),
        Person::new("papa", "Jorge", Gender::Male)
            .with_parents(Some("abuelo"), Some("abuela"))
            .with_marriage(Marriage::with_spouse("mama", true).child("yo").child("hermano")),
        Person::new("mama", "Isabel", Gender::Female)
            .with_marriage(Marriage::with_spouse("papa", true).child("yo").child("hermano")),
        Person::new("tia", "Teresa", Gender::Female)
            .with_parents(Some("abuelo"), Some("abuela"))
            .with_marriage(Marriage::default().child("primo")),
        Person::new("primo", "Diego", Gender::Male).with_parents(Some("tia"), None),
        Person::new("yo", "Clara", Gender::Female)
            .with_parents(Some("papa"), Some("mama"))
            .with_marriage(Marriage::with_spouse("ex", false)),
        Person::new("hermano", "Mario", Gender::Male).with_parents(Some("papa"), Some("mama")),
        Person::new("ex", "Víctor", Gender::Male)
            .with_marriage(Marriage::with_spouse("yo", false)),
    ]
}

async fn seeded_store() -> InMemoryPeopleStore {
    let store = InMemoryPeopleStore::new();
    for person in family_people() {
        store.upsert(person).await.unwrap();
    }
    store
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading & Snapshot Identity
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_load_from_store() {
    let store = seeded_store().await;
    let graph = GraphIndex::load(&store).await.unwrap();

    assert_eq!(graph.len(), 9);
    assert!(graph.dangling_edges().is_empty());
    assert_eq!(graph.get(&id("yo")).unwrap().name, "Clara");
}

#[tokio::test]
async fn test_snapshot_stable_across_loads() {
    let store = seeded_store().await;
    let first = GraphSnapshot::compute(&GraphIndex::load(&store).await.unwrap());
    let second = GraphSnapshot::compute(&GraphIndex::load(&store).await.unwrap());

    assert_eq!(first.snapshot_id, second.snapshot_id);
    assert_eq!(first.person_count, 9);
    assert_eq!(first.schema_version, KINSHIP_SCHEMA_VERSION);

    // Insertion order in the store does not matter
    let reversed: GraphIndex = family_people().into_iter().rev().collect();
    assert_eq!(GraphSnapshot::compute(&reversed).snapshot_id, first.snapshot_id);
}

#[tokio::test]
async fn test_store_edit_changes_snapshot() {
    let store = seeded_store().await;
    let graph = GraphIndex::load(&store).await.unwrap();
    let before = GraphSnapshot::compute(&graph);

    store
        .upsert(Person::new("yo", "Clara", Gender::Female).with_parents(Some("papa"), Some("mama")))
        .await
        .unwrap();
    let edited = GraphIndex::load(&store).await.unwrap();

    assert!(before.verify(&graph));
    assert!(!before.verify(&edited));
    assert_ne!(GraphSnapshot::compute(&edited).snapshot_id, before.snapshot_id);
}

// ─────────────────────────────────────────────────────────────────────────────
// Cached Resolution
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_cache_switching_roots() {
    let store = seeded_store().await;
    let graph = GraphIndex::load(&store).await.unwrap();
    let snapshot = GraphSnapshot::compute(&graph);
    let cache = ResolutionCache::new(CacheConfig { max_entries: 16, enabled: true });

    let yo = cache.resolve(&graph, &snapshot, &id("yo"));
    let primo = cache.resolve(&graph, &snapshot, &id("primo"));
    let yo_again = cache.resolve(&graph, &snapshot, &id("yo"));

    assert!(!yo.cache_hit);
    assert!(!primo.cache_hit);
    assert!(yo_again.cache_hit);
    assert!(Arc::ptr_eq(&yo.index, &yo_again.index));
    assert_eq!(*yo.index, resolve(&graph, &id("yo")));
    assert_eq!(cache.stats().unwrap().len, 2);
}

#[tokio::test]
async fn test_cache_misses_after_store_edit() {
    let store = seeded_store().await;
    let cache = ResolutionCache::default();

    let graph = GraphIndex::load(&store).await.unwrap();
    let before = cache.resolve(&graph, &GraphSnapshot::compute(&graph), &id("yo"));
    assert_eq!(before.index.familiar(&id("ex")).unwrap().relation.as_deref(), Some("Pareja"));

    // The root's former partnership becomes active again
    store
        .upsert(
            Person::new("yo", "Clara", Gender::Female)
                .with_parents(Some("papa"), Some("mama"))
                .with_marriage(Marriage::with_spouse("ex", true)),
        )
        .await
        .unwrap();
    let graph = GraphIndex::load(&store).await.unwrap();
    let after = cache.resolve(&graph, &GraphSnapshot::compute(&graph), &id("yo"));

    assert!(!after.cache_hit);
    assert_eq!(after.index.familiar(&id("ex")).unwrap().relation.as_deref(), Some("Esposo"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Batch Resolution
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_batch_over_every_root() {
    let store = seeded_store().await;
    let graph = GraphIndex::load(&store).await.unwrap();
    let roots: Vec<PersonId> = graph.ids().cloned().collect();

    let batch = BatchResolver::new(&graph);
    let result = batch
        .resolve_all_parallel(&roots, NonZeroUsize::new(3).unwrap())
        .unwrap();

    assert_eq!(result.indexes.len(), 9);
    assert_eq!(result.registry.entries.len(), 9);
    assert_eq!(result.snapshot_id, GraphSnapshot::compute(&graph).snapshot_id);

    for (root, index) in &result.indexes {
        assert_eq!(index, &resolve(&graph, root), "batch differs for {root}");
        let entry = result.registry.get(root).unwrap();
        assert_eq!(entry.familiar_count, index.len());
        assert_eq!(entry.index_fingerprint, index.fingerprint().unwrap());
    }
}

#[tokio::test]
async fn test_batch_registry_for_root() {
    let store = seeded_store().await;
    let graph = GraphIndex::load(&store).await.unwrap();
    let result = BatchResolver::new(&graph)
        .resolve_all(&[id("yo"), id("abuelo")])
        .unwrap();

    let yo = &result.indexes[&id("yo")];
    assert_eq!(yo.familiar(&id("hermano")).unwrap().relation.as_deref(), Some("Hermano"));
    assert_eq!(yo.familiar(&id("tia")).unwrap().relation_code, RelationCode::Uncle);
    assert_eq!(yo.familiar(&id("primo")).unwrap().relation.as_deref(), Some("Primo"));

    let entry = result.registry.get(&id("yo")).unwrap();
    assert_eq!(entry.familiar_count, 9);
    assert_eq!(entry.deepest_grade, Some(4));
    assert_eq!(entry.unclassified_count, 0);
}

#[tokio::test]
async fn test_batch_registry_hash_deterministic() {
    let store = seeded_store().await;
    let graph = GraphIndex::load(&store).await.unwrap();
    let roots = [id("yo"), id("primo"), id("abuela")];

    let a = BatchResolver::new(&graph).resolve_all(&roots).unwrap();
    let b = BatchResolver::new(&graph)
        .resolve_all_parallel(&roots, NonZeroUsize::new(2).unwrap())
        .unwrap();

    assert_eq!(a.registry.registry_hash, b.registry.registry_hash);
    assert_eq!(a, b);
}
