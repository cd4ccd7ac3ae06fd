//! Save-through repositories over a key-value store.

use anyhow::{Context, Result};
use roster_common::debug::{DebugLog, MutationAction, MutationEntry};
use roster_common::store::KeyValueStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::codec;
use crate::schema::{Game, TeamMember};

/// A record that lives in its own store key and is matched by identity.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    /// Store key holding the encoded collection.
    const STORE_KEY: &'static str;

    fn id(&self) -> Uuid;
}

impl Entity for TeamMember {
    const STORE_KEY: &'static str = "teamMembers";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Entity for Game {
    const STORE_KEY: &'static str = "games";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Outcome of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    /// Appended at this position
    Inserted(usize),
    /// Replaced the record at this position
    Replaced(usize),
}

impl Upserted {
    pub fn position(self) -> usize {
        match self {
            Upserted::Inserted(position) | Upserted::Replaced(position) => position,
        }
    }
}

/// Owning, ordered collection of one entity type, persisted on every mutation.
///
/// Records are matched by identity for upserts and by position for removal.
/// Positions are only meaningful against the current [`Repository::items`]
/// snapshot; read them and remove in the same step.
#[derive(Debug)]
pub struct Repository<E, S> {
    store: S,
    items: Vec<E>,
    journal: Option<DebugLog>,
}

impl<E: Entity, S: KeyValueStore> Repository<E, S> {
    /// Create an empty repository without reading the store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            items: Vec::new(),
            journal: None,
        }
    }

    /// Create a repository and hydrate it from the store.
    pub fn open(store: S) -> Self {
        let mut repo = Self::new(store);
        repo.hydrate();
        repo
    }

    /// Attach a mutation journal.
    pub fn with_journal(mut self, journal: Option<DebugLog>) -> Self {
        self.journal = journal;
        self
    }

    /// Replace the in-memory collection with the stored one.
    ///
    /// A missing key, unreadable store or malformed blob all leave the
    /// collection empty.
    pub fn hydrate(&mut self) {
        let stored = match self.store.get(E::STORE_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(key = E::STORE_KEY, error = %e, "failed to read collection");
                None
            }
        };
        self.items = codec::decode_or_empty(stored.as_deref());
        tracing::debug!(key = E::STORE_KEY, len = self.items.len(), "hydrated collection");
    }

    /// Current records in storage order.
    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&E> {
        self.items.get(position)
    }

    /// Find a record by identity.
    pub fn find(&self, id: Uuid) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Position of the record with this identity.
    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Replace the record with the same identity in place, or append it.
    ///
    /// The in-memory change is kept even if persisting fails.
    pub fn upsert(&mut self, entity: E) -> Result<Upserted> {
        let id = entity.id();
        let outcome = match self.position_of(id) {
            Some(position) => {
                self.items[position] = entity;
                Upserted::Replaced(position)
            }
            None => {
                self.items.push(entity);
                Upserted::Inserted(self.items.len() - 1)
            }
        };

        let action = match outcome {
            Upserted::Inserted(_) => MutationAction::Insert,
            Upserted::Replaced(_) => MutationAction::Replace,
        };
        self.record_mutation(action, id, outcome.position());

        self.persist()?;
        Ok(outcome)
    }

    /// Remove the record at `position`.
    ///
    /// Out-of-bounds positions change nothing and return `None`.
    pub fn remove_at(&mut self, position: usize) -> Result<Option<E>> {
        if position >= self.items.len() {
            tracing::warn!(
                key = E::STORE_KEY,
                position,
                len = self.items.len(),
                "ignoring out-of-bounds removal"
            );
            return Ok(None);
        }

        let removed = self.items.remove(position);
        self.record_mutation(MutationAction::Remove, removed.id(), position);

        self.persist()?;
        Ok(Some(removed))
    }

    /// Write the full collection to the store.
    pub fn persist(&self) -> Result<()> {
        let encoded = codec::encode(&self.items)?;
        self.store
            .set(E::STORE_KEY, &encoded)
            .with_context(|| format!("Failed to persist collection: {}", E::STORE_KEY))?;
        tracing::debug!(key = E::STORE_KEY, len = self.items.len(), "persisted collection");
        Ok(())
    }

    fn record_mutation(&self, action: MutationAction, id: Uuid, position: usize) {
        if let Some(journal) = &self.journal {
            journal.record(
                MutationEntry::new(E::STORE_KEY, action, id).at(position, self.items.len()),
            );
        }
    }
}
