use super::{Action, AppState};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Owner of the one `AppState`. Writers go through `dispatch`.
#[derive(Debug, Default)]
pub struct Store {
    state: RwLock<AppState>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // Poisoned locks are recovered
    fn write_guard(&self) -> RwLockWriteGuard<'_, AppState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, AppState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reduces a copy and swaps it in, so a panicking reducer leaves the
    /// previous state in place.
    pub fn dispatch(&self, action: Action) {
        let mut guard = self.write_guard();
        let next = (*guard).clone().reduce(action);
        *guard = next;
    }

    /// Runs `f` against the current state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.read_guard())
    }

    pub fn snapshot(&self) -> AppState {
        self.read_guard().clone()
    }
}
