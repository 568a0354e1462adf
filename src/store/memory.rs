//! In-memory people store for testing and embedding.

use std::collections::BTreeMap;
use async_trait::async_trait;
use parking_lot::RwLock;

use crate::types::{Person, PersonId};
use super::PeopleStore;

/// Error type for in-memory store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InMemoryError {
    /// Person not found.
    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),
}

/// In-memory people store.
///
/// Uses a BTreeMap for deterministic iteration order.
#[derive(Debug, Default)]
pub struct InMemoryPeopleStore {
    people: RwLock<BTreeMap<PersonId, Person>>,
}

impl InMemoryPeopleStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given people.
    pub fn with_people(people: impl IntoIterator<Item = Person>) -> Self {
        let store = Self::new();
        {
            let mut map = store.people.write();
            for person in people {
                map.insert(person.id.clone(), person);
            }
        }
        store
    }

    /// Get number of people.
    pub fn num_people(&self) -> usize {
        self.people.read().len()
    }

    /// Remove a person.
    pub fn remove(&self, id: &PersonId) -> Result<Person, InMemoryError> {
        self.people
            .write()
            .remove(id)
            .ok_or_else(|| InMemoryError::PersonNotFound(id.clone()))
    }
}

#[async_trait]
impl PeopleStore for InMemoryPeopleStore {
    type Error = InMemoryError;

    async fn get_person(&self, id: &PersonId) -> Result<Option<Person>, Self::Error> {
        Ok(self.people.read().get(id).cloned())
    }

    async fn get_people(&self) -> Result<Vec<Person>, Self::Error> {
        Ok(self.people.read().values().cloned().collect())
    }

    async fn upsert(&self, mut person: Person) -> Result<PersonId, Self::Error> {
        if person.id.is_empty() {
            person.id = PersonId::generate();
        }
        let id = person.id.clone();
        self.people.write().insert(id.clone(), person);
        Ok(id)
    }
}
