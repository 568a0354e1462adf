//! Relationship resolver.
//!
//! Walks the family graph breadth-first from a root person, keeps the first
//! (shortest) path that reaches each person, classifies it and buckets the
//! result by closeness grade.

use std::collections::{HashSet, VecDeque};

use crate::classify::classify;
use crate::graph::GraphIndex;
use crate::types::{Familiar, Marriage, Person, PersonId, RelationPath, RelationshipIndex};

/// Error type for strict resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Root person not found.
    #[error("Root person not found: {0}")]
    RootNotFound(PersonId),
}

/// A queued person and the path that reached it.
struct Frontier<'g> {
    id: &'g PersonId,
    path: RelationPath,
    /// The person this hop was taken from.
    via: Option<&'g PersonId>,
}

/// Resolve how every reachable person is related to `root`.
///
/// ## Algorithm
///
/// 1. Queue the root with the path `self`
/// 2. Pop the front; skip it if already visited or missing from the graph
/// 3. Mark visited, classify its path and record it
/// 4. Queue every unvisited neighbor with the path extended by its hop,
///    in neighbor order (parents, then each marriage's spouse and
///    children, then siblings)
/// 5. Stop when the queue is empty
///
/// The visited set is checked both before queueing and after popping, so
/// each person is recorded once, under its shortest path, with ties going
/// to the earlier neighbor category.
///
/// A root missing from the graph yields an empty index. Dangling edges are
/// skipped; paths nothing can classify are logged and recorded at grade 6.
pub fn resolve(graph: &GraphIndex, root: &PersonId) -> RelationshipIndex {
    let mut index = RelationshipIndex::empty(root.clone());

    let Some(root_person) = graph.get(root) else {
        tracing::debug!(root = %root, "root person not in graph, nothing to resolve");
        return index;
    };

    let mut visited: HashSet<&PersonId> = HashSet::with_capacity(graph.len());
    let mut frontier: VecDeque<Frontier<'_>> = VecDeque::new();
    frontier.push_back(Frontier { id: root, path: RelationPath::root(), via: None });

    while let Some(Frontier { id, path, via }) = frontier.pop_front() {
        if visited.contains(id) {
            continue;
        }
        let Some(person) = graph.get(id) else {
            tracing::trace!(person_id = %id, path = %path, "skipping dangling reference");
            continue;
        };
        visited.insert(id);

        for (hop, next) in person.relationships.neighbors() {
            if !visited.contains(next) {
                frontier.push_back(Frontier {
                    id: next,
                    path: path.extended(hop),
                    via: Some(id),
                });
            }
        }

        let classification = classify(&path, person.gender.label_branch(), || {
            marriage_active(root_person, id, via)
        });
        if classification.label.is_none() {
            tracing::warn!(
                root = %root,
                person_id = %id,
                path = %path,
                "no relationship label for path"
            );
        }

        index.push(Familiar {
            relation_code: classification.code,
            relation: classification.label,
            relation_path: path,
            grade: classification.grade,
            person: person.clone(),
        });
    }

    tracing::debug!(
        root = %root,
        visited = visited.len(),
        buckets = index.grades().len(),
        "relationships resolved"
    );

    index
}

/// Like [`resolve`], but a root missing from the graph is an error.
pub fn resolve_strict(graph: &GraphIndex, root: &PersonId) -> Result<RelationshipIndex, ResolveError> {
    if !graph.contains(root) {
        return Err(ResolveError::RootNotFound(root.clone()));
    }
    Ok(resolve(graph, root))
}

/// Whether the root's partnership with `person` is current.
///
/// Looks for the root's marriage to `person` first, then for the marriage
/// that produced `via` (the shared child on a `self -> child -> parent`
/// path). No matching marriage counts as inactive.
fn marriage_active(root: &Person, person: &PersonId, via: Option<&PersonId>) -> bool {
    let relationships = &root.relationships;
    relationships
        .marriage_with(person)
        .or_else(|| via.and_then(|child| relationships.marriage_of_child(child)))
        .map(Marriage::is_active)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Gender, HopKind, RelationCode};

    fn id(s: &str) -> PersonId {
        PersonId::from(s)
    }

    fn build_linear_graph(n: usize) -> GraphIndex {
        // p1 is the oldest ancestor, pn the youngest descendant
        (1..=n)
            .map(|i| {
                let parent = format!("p{}", i - 1);
                let mut person = Person::new(format!("p{i}"), format!("P{i}"), Gender::Male);
                if i > 1 {
                    person = person.with_parents(Some(parent.as_str()), None);
                }
                person
            })
            .collect()
    }

    #[test]
    fn test_root_is_self_at_grade_zero() {
        let graph = build_linear_graph(3);
        let index = resolve(&graph, &id("p3"));

        let zero = index.bucket(0);
        assert_eq!(zero.len(), 1);
        assert_eq!(zero[0].id(), &id("p3"));
        assert_eq!(zero[0].relation_code, RelationCode::Myself);
        assert!(zero[0].relation_path.is_root());
    }

    #[test]
    fn test_missing_root_is_empty() {
        let graph = build_linear_graph(3);
        let index = resolve(&graph, &id("nobody"));
        assert!(index.is_empty());
        assert_eq!(index.root(), &id("nobody"));

        assert_eq!(
            resolve_strict(&graph, &id("nobody")).unwrap_err(),
            ResolveError::RootNotFound(id("nobody"))
        );
    }

    #[test]
    fn test_parent_edges_only_point_up() {
        // Parents are declared on the child only, so the oldest ancestor
        // reaches nobody.
        let graph = build_linear_graph(4);
        let index = resolve(&graph, &id("p1"));
        assert_eq!(index.len(), 1);

        let index = resolve(&graph, &id("p4"));
        assert_eq!(index.len(), 4);
        assert_eq!(index.familiar(&id("p1")).unwrap().relation_code, RelationCode::GreatGrandparent);
    }

    #[test]
    fn test_dangling_edges_skipped() {
        let graph: GraphIndex = vec![
            Person::new("me", "Me", Gender::Male)
                .with_parents(Some("ghost"), Some("mom"))
                .with_sibling("phantom"),
            Person::new("mom", "Mom", Gender::Female),
        ]
        .into_iter()
        .collect();

        let index = resolve(&graph, &id("me"));
        assert_eq!(index.len(), 2);
        assert!(index.familiar(&id("ghost")).is_none());
        assert!(index.familiar(&id("phantom")).is_none());
    }

    #[test]
    fn test_marriage_cycle_terminates() {
        let graph: GraphIndex = vec![
            Person::new("a", "A", Gender::Male)
                .with_marriage(Marriage::with_spouse("b", true).child("c")),
            Person::new("b", "B", Gender::Female)
                .with_marriage(Marriage::with_spouse("a", true).child("c")),
            Person::new("c", "C", Gender::Male).with_parents(Some("a"), Some("b")),
        ]
        .into_iter()
        .collect();

        let index = resolve(&graph, &id("c"));
        assert_eq!(index.len(), 3);
        assert_eq!(index.familiar(&id("a")).unwrap().relation_code, RelationCode::Parent);
        assert_eq!(index.familiar(&id("b")).unwrap().relation.as_deref(), Some("Madre"));
    }

    #[test]
    fn test_shortest_path_wins() {
        // "sis" is reachable as parent -> child and directly as a declared
        // sibling; the one-hop path must be kept.
        let graph: GraphIndex = vec![
            Person::new("me", "Me", Gender::Male)
                .with_parents(Some("dad"), None)
                .with_sibling("sis"),
            Person::new("sis", "Sis", Gender::Female).with_parents(Some("dad"), None),
            Person::new("dad", "Dad", Gender::Male)
                .with_marriage(Marriage::default().child("me").child("sis")),
        ]
        .into_iter()
        .collect();

        let index = resolve(&graph, &id("me"));
        let sis = index.familiar(&id("sis")).unwrap();
        assert_eq!(sis.relation_path.hops(), &[HopKind::Sibling]);
        assert_eq!(sis.relation.as_deref(), Some("Hermana"));
        assert_eq!(sis.grade, 2);
    }

    #[test]
    fn test_tie_break_prefers_parents() {
        // "x" is two hops away both as parent -> parent and as
        // sibling -> parent; the parent route is enumerated first.
        let graph: GraphIndex = vec![
            Person::new("me", "Me", Gender::Male)
                .with_parents(Some("dad"), None)
                .with_sibling("bro"),
            Person::new("dad", "Dad", Gender::Male).with_parents(Some("x"), None),
            Person::new("bro", "Bro", Gender::Male).with_parents(Some("x"), None),
            Person::new("x", "X", Gender::Female),
        ]
        .into_iter()
        .collect();

        let index = resolve(&graph, &id("me"));
        let x = index.familiar(&id("x")).unwrap();
        assert_eq!(x.relation_path.hops(), &[HopKind::Parent, HopKind::Parent]);
        assert_eq!(x.relation.as_deref(), Some("Abuela"));
    }

    #[test]
    fn test_spouse_wording_follows_marriage_state() {
        let graph: GraphIndex = vec![
            Person::new("me", "Me", Gender::Male)
                .with_marriage(Marriage::with_spouse("ex", false))
                .with_marriage(Marriage::with_spouse("wife", true)),
            Person::new("ex", "Ex", Gender::Female),
            Person::new("wife", "Wife", Gender::Female),
        ]
        .into_iter()
        .collect();

        let index = resolve(&graph, &id("me"));
        assert_eq!(index.familiar(&id("wife")).unwrap().relation.as_deref(), Some("Esposa"));
        assert_eq!(index.familiar(&id("ex")).unwrap().relation.as_deref(), Some("Pareja"));
        assert_eq!(index.bucket(0).len(), 3);
    }

    #[test]
    fn test_child_other_parent_uses_child_marriage() {
        // The root's marriage has no recorded spouse; the other parent is
        // only reachable through the child.
        let graph: GraphIndex = vec![
            Person::new("me", "Me", Gender::Female).with_marriage(Marriage {
                spouse_id: None,
                active: Some(true),
                children_ids: vec![id("kid")],
            }),
            Person::new("kid", "Kid", Gender::Male).with_parents(Some("me"), Some("him")),
            Person::new("him", "Him", Gender::Male),
        ]
        .into_iter()
        .collect();

        let index = resolve(&graph, &id("me"));
        let him = index.familiar(&id("him")).unwrap();
        assert_eq!(him.relation_path.hops(), &[HopKind::Child, HopKind::Parent]);
        assert_eq!(him.relation_code, RelationCode::Spouse);
        assert_eq!(him.relation.as_deref(), Some("Esposo"));
    }

    #[test]
    fn test_unclassified_path_degrades() {
        // sibling -> parent has no table entry
        let graph: GraphIndex = vec![
            Person::new("me", "Me", Gender::Male).with_sibling("bro"),
            Person::new("bro", "Bro", Gender::Male).with_parents(Some("other"), None),
            Person::new("other", "Other", Gender::Male),
        ]
        .into_iter()
        .collect();

        let index = resolve(&graph, &id("me"));
        let other = index.familiar(&id("other")).unwrap();
        assert_eq!(other.grade, 6);
        assert_eq!(other.relation_code, RelationCode::Other);
        assert!(other.relation.is_none());
        assert_eq!(index.unclassified().count(), 1);
    }

    #[test]
    fn test_determinism() {
        let graph = build_linear_graph(10);
        let a = resolve(&graph, &id("p10"));
        let b = resolve(&graph, &id("p10"));
        assert_eq!(a, b);
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }
}
