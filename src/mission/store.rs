//! Keyed mission storage.
//!
//! The table lock is held only long enough to look up or insert an entry;
//! all mutation happens under the per-mission mutex, so concurrent updates
//! for one accident serialize while different accidents never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::geo::GeoPoint;
use crate::mission::record::Mission;

/// Handle to one mission's serialized state.
pub type MissionHandle = Arc<Mutex<Mission>>;

/// Mission table with per-accident locking.
pub struct MissionStore {
    missions: RwLock<HashMap<String, MissionHandle>>,
}

impl MissionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            missions: RwLock::new(HashMap::new()),
        }
    }

    /// Get the handle for an accident, creating the mission if absent.
    ///
    /// Returns the handle and whether it was newly created.
    pub fn get_or_create(
        &self,
        accident_id: &str,
        scene_location: GeoPoint,
        now_ms: u64,
    ) -> (MissionHandle, bool) {
        // Fast path under the read lock
        {
            let map = self.missions.read().expect("mission table poisoned");
            if let Some(handle) = map.get(accident_id) {
                return (Arc::clone(handle), false);
            }
        }

        let mut map = self.missions.write().expect("mission table poisoned");
        // Another writer may have raced us between the locks
        if let Some(handle) = map.get(accident_id) {
            return (Arc::clone(handle), false);
        }
        let handle = Arc::new(Mutex::new(Mission::new(accident_id, scene_location, now_ms)));
        map.insert(accident_id.to_string(), Arc::clone(&handle));
        (handle, true)
    }

    /// Get the handle for an existing mission.
    pub fn get(&self, accident_id: &str) -> Option<MissionHandle> {
        let map = self.missions.read().expect("mission table poisoned");
        map.get(accident_id).cloned()
    }

    /// Handles for all missions.
    pub fn all(&self) -> Vec<MissionHandle> {
        let map = self.missions.read().expect("mission table poisoned");
        map.values().cloned().collect()
    }

    /// Number of tracked missions. Missions are never deleted.
    pub fn len(&self) -> usize {
        let map = self.missions.read().expect("mission table poisoned");
        map.len()
    }

    /// Whether any mission is tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MissionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_get_or_create() {
        let store = MissionStore::new();
        let (_, created) = store.get_or_create("ACC-1", GeoPoint::new(18.53, 73.87), 1_000);
        assert!(created);
        let (_, created) = store.get_or_create("ACC-1", GeoPoint::new(18.53, 73.87), 2_000);
        assert!(!created);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let store = MissionStore::new();
        assert!(store.get("ACC-404").is_none());
    }

    #[test]
    fn test_concurrent_create_single_mission() {
        let store = Arc::new(MissionStore::new());
        let scene = GeoPoint::new(18.53, 73.87);

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let (_, created) = store.get_or_create("ACC-1", scene, 1_000);
                    created
                })
            })
            .collect();

        let created_count = threads
            .into_iter()
            .map(|t| t.join().unwrap())
            .filter(|created| *created)
            .count();

        assert_eq!(created_count, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_same_handle_shared() {
        let store = MissionStore::new();
        let (a, _) = store.get_or_create("ACC-1", GeoPoint::new(18.53, 73.87), 1_000);
        let b = store.get("ACC-1").unwrap();

        a.lock().unwrap().record_location("AMB-1", GeoPoint::new(18.52, 73.86), 2_000);
        assert_eq!(b.lock().unwrap().entity_id.as_deref(), Some("AMB-1"));
    }
}
