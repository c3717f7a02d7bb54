//! Concurrency-safe keyed room storage.
//!
//! Rooms live behind `Arc<Mutex<..>>` so a play holds exclusive access to
//! its room for the full resolution while plays in other rooms proceed in
//! parallel. There is no process-wide mutable state beyond this store.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use crate::room::{Room, RoomId};

/// Shared handle to one room.
pub type RoomHandle = Arc<Mutex<Room>>;

/// Keyed store of active rooms.
#[derive(Debug, Default)]
pub struct RoomStore {
    rooms: Mutex<FxHashMap<RoomId, RoomHandle>>,
    next_id: Mutex<u64>,
}

impl RoomStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room with the given RNG seed and return its handle.
    pub fn create(&self, seed: u64) -> (RoomId, RoomHandle) {
        let id = {
            let mut next = self.next_id.lock().expect("room store lock poisoned");
            let id = RoomId(*next);
            *next += 1;
            id
        };

        let handle = Arc::new(Mutex::new(Room::new(id, seed)));
        self.rooms
            .lock()
            .expect("room store lock poisoned")
            .insert(id, Arc::clone(&handle));
        (id, handle)
    }

    /// Get a handle to an existing room.
    #[must_use]
    pub fn get(&self, id: RoomId) -> Option<RoomHandle> {
        self.rooms
            .lock()
            .expect("room store lock poisoned")
            .get(&id)
            .cloned()
    }

    /// Discard a room. Existing handles stay valid until dropped.
    pub fn remove(&self, id: RoomId) -> Option<RoomHandle> {
        self.rooms
            .lock()
            .expect("room store lock poisoned")
            .remove(&id)
    }

    /// Number of active rooms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.lock().expect("room store lock poisoned").len()
    }

    /// Whether the store holds no rooms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
