//! People storage backends.
//!
//! The resolver never talks to a store. Stores only feed
//! [`GraphIndex::load`](crate::graph::GraphIndex::load), which materializes
//! the snapshot a resolution pass runs against.

pub mod memory;

use async_trait::async_trait;
use crate::types::{Person, PersonId};

/// Trait for people storage backends.
///
/// Implementations must return people in a deterministic order.
#[async_trait]
pub trait PeopleStore: Send + Sync {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync;

    /// Fetch a person by id.
    async fn get_person(&self, id: &PersonId) -> Result<Option<Person>, Self::Error>;

    /// Fetch every person.
    async fn get_people(&self) -> Result<Vec<Person>, Self::Error>;

    /// Create or replace a person.
    ///
    /// A person with an empty id is created under a freshly assigned id.
    /// Returns the id the person is stored under.
    async fn upsert(&self, person: Person) -> Result<PersonId, Self::Error>;
}

pub use memory::InMemoryPeopleStore;
