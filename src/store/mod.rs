//! In-memory pet storage
//!
//! A single mutex guards both the pet map and the id counter, and every
//! operation holds it for its whole duration.

mod pet;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

pub use pet::{NewPet, Pet, PetFilter, PetId};

/// First id handed out by [`PetStore::new`]
pub const DEFAULT_STARTING_ID: PetId = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("pet {id} not found")]
    NotFound { id: PetId },
    #[error("no pet ids left after {last}")]
    IdsExhausted { last: PetId },
}

struct Inner {
    pets: BTreeMap<PetId, Pet>,
    next_id: PetId,
}

pub struct PetStore {
    inner: Mutex<Inner>,
}

impl PetStore {
    pub fn new() -> Self {
        Self::with_starting_id(DEFAULT_STARTING_ID)
    }

    pub fn with_starting_id(starting_id: PetId) -> Self {
        Self {
            inner: Mutex::new(Inner {
                pets: BTreeMap::new(),
                next_id: starting_id,
            }),
        }
    }

    // Nothing is left half-written if a holder panics, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a new pet under the next free id and return the stored copy.
    ///
    /// Fails only when the counter cannot advance past the id it would hand out,
    /// in which case nothing is stored.
    pub fn create(&self, candidate: NewPet) -> Result<Pet, StoreError> {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id = id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted { last: id })?;
        let pet = candidate.into_pet(id);
        inner.pets.insert(id, pet.clone());
        Ok(pet)
    }

    /// Pets passing `filter`, in ascending id order, each at most once.
    pub fn list(&self, filter: &PetFilter) -> Vec<Pet> {
        let inner = self.lock();
        let limit = filter.limit.map_or(usize::MAX, |limit| limit as usize);
        inner
            .pets
            .values()
            .filter(|pet| filter.matches(pet))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn get_by_id(&self, id: PetId) -> Result<Pet, StoreError> {
        self.lock()
            .pets
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    /// Remove a pet, returning what was stored.
    pub fn delete_by_id(&self, id: PetId) -> Result<Pet, StoreError> {
        self.lock()
            .pets
            .remove(&id)
            .ok_or(StoreError::NotFound { id })
    }

    pub fn len(&self) -> usize {
        self.lock().pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().pets.is_empty()
    }

    /// The id the next `create` will assign.
    pub fn next_id(&self) -> PetId {
        self.lock().next_id
    }
}

impl Default for PetStore {
    fn default() -> Self {
        Self::new()
    }
}
