//! In-memory family graph snapshot.
//!
//! A `GraphIndex` is the read-only mapping of person id to person record a
//! resolution pass runs against. It is built once from whatever the data
//! layer returned and never mutated during a pass.

use std::collections::BTreeMap;

use crate::store::PeopleStore;
use crate::types::{HopKind, Person, PersonId};

/// Error type for building a graph snapshot.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The same id appears on two person records.
    #[error("Duplicate person id: {0}")]
    DuplicatePerson(PersonId),
    /// The people document is not valid JSON.
    #[error("Invalid people document: {0}")]
    Json(#[from] serde_json::Error),
    /// The people store failed.
    #[error("Store error: {0}")]
    Store(String),
}

impl GraphError {
    /// Create a store error from any error type.
    pub fn from_store<E: std::error::Error>(e: E) -> Self {
        Self::Store(e.to_string())
    }
}

/// A declared adjacency between two people.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GraphEdge {
    /// Person declaring the relationship.
    pub from: PersonId,
    /// Hop kind.
    pub hop: HopKind,
    /// Referenced person (may be absent from the graph).
    pub to: PersonId,
}

/// Read-only snapshot of the family graph.
///
/// Uses a BTreeMap for deterministic iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphIndex {
    people: BTreeMap<PersonId, Person>,
}

impl GraphIndex {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from person records, rejecting repeated ids.
    pub fn from_people<I>(people: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = Person>,
    {
        let mut graph = Self::new();
        for person in people {
            if graph.people.contains_key(&person.id) {
                return Err(GraphError::DuplicatePerson(person.id));
            }
            graph.people.insert(person.id.clone(), person);
        }
        Ok(graph)
    }

    /// Build a graph from a JSON array of person documents.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let people: Vec<Person> = serde_json::from_str(json)?;
        Self::from_people(people)
    }

    /// Materialize a snapshot of everything a store holds.
    pub async fn load<S: PeopleStore + ?Sized>(store: &S) -> Result<Self, GraphError> {
        let people = store.get_people().await.map_err(GraphError::from_store)?;
        Self::from_people(people)
    }

    /// Insert or replace a person. Returns the previous record.
    pub fn insert(&mut self, person: Person) -> Option<Person> {
        self.people.insert(person.id.clone(), person)
    }

    /// Look up a person.
    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.people.get(id)
    }

    /// Whether a person is present.
    pub fn contains(&self, id: &PersonId) -> bool {
        self.people.contains_key(id)
    }

    /// Number of people.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Whether the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// All people, ordered by id.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    /// All person ids, ordered.
    pub fn ids(&self) -> impl Iterator<Item = &PersonId> {
        self.people.keys()
    }

    /// Every declared adjacency, in person order then neighbor order.
    pub fn edges(&self) -> Vec<GraphEdge> {
        self.people
            .values()
            .flat_map(|person| {
                person.relationships.neighbors().map(move |(hop, to)| GraphEdge {
                    from: person.id.clone(),
                    hop,
                    to: to.clone(),
                })
            })
            .collect()
    }

    /// Adjacencies that point at ids missing from the graph.
    pub fn dangling_edges(&self) -> Vec<GraphEdge> {
        self.edges()
            .into_iter()
            .filter(|edge| !self.contains(&edge.to))
            .collect()
    }
}

impl FromIterator<Person> for GraphIndex {
    /// Collect people, later records replacing earlier ones with the same id.
    fn from_iter<T: IntoIterator<Item = Person>>(iter: T) -> Self {
        let mut graph = Self::new();
        for person in iter {
            graph.insert(person);
        }
        graph
    }
}
