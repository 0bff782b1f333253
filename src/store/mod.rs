use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{UpdateUserRequest, User};

/// In-memory user store. Owns every record; handlers share one instance via
/// `web::Data<UserStore>`, so tests can run against isolated stores.
///
/// Ids come from a monotonic counter starting at 1 and are never reused,
/// even after a delete.
pub struct UserStore {
    inner: RwLock<StoreInner>,
}

struct StoreInner {
    users: HashMap<u64, User>,
    next_id: u64,
}

impl UserStore {
    pub fn new() -> Self {
        UserStore {
            inner: RwLock::new(StoreInner {
                users: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// All records, in no particular order.
    pub fn list(&self) -> Vec<User> {
        self.read().users.values().cloned().collect()
    }

    pub fn get(&self, id: u64) -> Option<User> {
        self.read().users.get(&id).cloned()
    }

    /// Assigns the next id and inserts the record in a single critical
    /// section, so concurrent creates cannot observe the same id.
    pub fn insert(&self, name: String, email: String, role: String) -> User {
        let mut inner = self.write();
        let id = inner.next_id;
        inner.next_id += 1;

        let user = User { id, name, email, role };
        inner.users.insert(id, user.clone());
        user
    }

    /// Merges the supplied fields into the record and returns the result,
    /// or `None` if the id is absent.
    pub fn update(&self, id: u64, changes: UpdateUserRequest) -> Option<User> {
        let mut inner = self.write();
        let user = inner.users.get_mut(&id)?;

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }

        Some(user.clone())
    }

    /// Removes the record permanently. Its id is not handed out again.
    pub fn remove(&self, id: u64) -> Option<User> {
        self.write().users.remove(&id)
    }

    pub fn count(&self) -> usize {
        self.read().users.len()
    }

    // A poisoned lock only means some holder panicked; the map itself is
    // still consistent.
    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
