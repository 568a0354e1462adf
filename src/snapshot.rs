//! Graph snapshot identity.
//!
//! A `GraphSnapshot` fingerprints the whole person mapping so results
//! computed against it can be cached and later told apart from results
//! computed after an edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::canonical::{hash_parts, to_hex};
use crate::graph::GraphIndex;
use crate::KINSHIP_SCHEMA_VERSION;

/// A deterministic fingerprint of the graph state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Identifier derived from every other field except `computed_at`.
    pub snapshot_id: String,
    /// Number of people in the graph.
    pub person_count: u64,
    /// Number of declared adjacencies, dangling ones included.
    pub edge_count: u64,
    /// Schema version used for types.
    pub schema_version: String,
    /// Hash of sorted person ids.
    pub person_id_hash: String,
    /// Hash of sorted (from, hop, to) edges.
    pub edge_hash: String,
    /// Hash of the per-person attributes (gender, marriage state, names, notes).
    pub attribute_hash: String,
    /// When this snapshot was computed.
    pub computed_at: DateTime<Utc>,
}

impl GraphSnapshot {
    /// Compute a snapshot of a graph.
    ///
    /// The id covers everything a resolution result is built from:
    /// membership, adjacency, genders, marriage activity and the person
    /// data carried on each entry.
    pub fn compute(graph: &GraphIndex) -> Self {
        // GraphIndex iterates in id order already
        let person_id_hash = to_hex(hash_parts(graph.ids().map(|id| id.as_str().as_bytes())));

        let mut edges = graph.edges();
        edges.sort();
        let edge_hash = to_hex(hash_parts(edges.iter().flat_map(|edge| {
            [
                edge.from.as_str().as_bytes(),
                edge.hop.as_str().as_bytes(),
                edge.to.as_str().as_bytes(),
            ]
        })));

        let attribute_tokens: Vec<String> = graph
            .people()
            .flat_map(|person| {
                let activity: String = person
                    .relationships
                    .marriages
                    .iter()
                    .map(|m| if m.is_active() { '1' } else { '0' })
                    .collect();
                [
                    person.id.to_string(),
                    person.gender.to_string(),
                    activity,
                    person.name.clone(),
                    person.first_surname.clone(),
                    person.second_surname.clone(),
                    person.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        let attribute_hash = to_hex(hash_parts(attribute_tokens.iter().map(|t| t.as_bytes())));

        let person_count = graph.len() as u64;
        let edge_count = edges.len() as u64;
        let snapshot_id = Self::derive_id(
            person_count,
            edge_count,
            &person_id_hash,
            &edge_hash,
            &attribute_hash,
        );

        Self {
            snapshot_id,
            person_count,
            edge_count,
            schema_version: KINSHIP_SCHEMA_VERSION.to_string(),
            person_id_hash,
            edge_hash,
            attribute_hash,
            computed_at: Utc::now(),
        }
    }

    fn derive_id(
        person_count: u64,
        edge_count: u64,
        person_id_hash: &str,
        edge_hash: &str,
        attribute_hash: &str,
    ) -> String {
        let counts = [person_count.to_le_bytes(), edge_count.to_le_bytes()];
        let parts = counts.iter().map(|c| c.as_slice()).chain([
            KINSHIP_SCHEMA_VERSION.as_bytes(),
            person_id_hash.as_bytes(),
            edge_hash.as_bytes(),
            attribute_hash.as_bytes(),
        ]);
        to_hex(hash_parts(parts))
    }

    /// Verify that this snapshot still matches a graph.
    pub fn verify(&self, graph: &GraphIndex) -> bool {
        Self::compute(graph).snapshot_id == self.snapshot_id
    }
}
