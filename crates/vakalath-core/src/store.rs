//! The Draft State Store: single writer of draft data, with observers.
//!
//! Sync components never hold the store directly. They receive a
//! [`StoreAccess`] (read a copy of the state, dispatch status actions) when
//! they are built, and they see every dispatched action through
//! [`StoreObserver`].

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tracing::trace;

use crate::action::Action;
use crate::state::DraftState;

/// Sees every action after it has been applied.
///
/// Called synchronously inside [`DraftStore::dispatch`], so implementations
/// must not block and must not dispatch back into the same store.
pub trait StoreObserver: Send {
    fn on_dispatch(&mut self, action: &Action, state: &DraftState);
}

/// Read/dispatch capability handed to components that live outside the store.
pub trait StoreAccess: Send + Sync {
    /// A copy of the current state, or `None` once the store is gone.
    fn read(&self) -> Option<DraftState>;

    /// Dispatch an action. Returns `false` if the store is gone.
    fn dispatch(&self, action: Action) -> bool;
}

#[derive(Default)]
pub struct DraftStore {
    state: DraftState,
    observers: Vec<Box<dyn StoreObserver>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    pub fn add_observer(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    /// Apply the action, then notify observers in registration order.
    pub fn dispatch(&mut self, action: Action) {
        trace!(action = action.name(), "dispatch");
        self.state.apply(&action);
        for observer in &mut self.observers {
            observer.on_dispatch(&action, &self.state);
        }
    }
}

/// Shared handle to a [`DraftStore`].
#[derive(Clone, Default)]
pub struct StoreHandle {
    inner: Arc<Mutex<DraftStore>>,
}

impl StoreHandle {
    pub fn new(store: DraftStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn dispatch(&self, action: Action) {
        self.lock().dispatch(action);
    }

    /// Copy of the current state.
    pub fn state(&self) -> DraftState {
        self.lock().state().clone()
    }

    pub fn add_observer(&self, observer: Box<dyn StoreObserver>) {
        self.lock().add_observer(observer);
    }

    /// Non-owning access for observers that must call back into the store.
    pub fn downgrade(&self) -> WeakStoreHandle {
        WeakStoreHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DraftStore> {
        // A panicking observer must not wedge the store for everyone else.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StoreAccess for StoreHandle {
    fn read(&self) -> Option<DraftState> {
        Some(self.state())
    }

    fn dispatch(&self, action: Action) -> bool {
        StoreHandle::dispatch(self, action);
        true
    }
}

/// Weak counterpart of [`StoreHandle`]; does not keep the store alive.
#[derive(Clone)]
pub struct WeakStoreHandle {
    inner: Weak<Mutex<DraftStore>>,
}

impl WeakStoreHandle {
    fn upgrade(&self) -> Option<StoreHandle> {
        self.inner.upgrade().map(|inner| StoreHandle { inner })
    }
}

impl StoreAccess for WeakStoreHandle {
    fn read(&self) -> Option<DraftState> {
        self.upgrade().map(|store| store.state())
    }

    fn dispatch(&self, action: Action) -> bool {
        match self.upgrade() {
            Some(store) => {
                store.dispatch(action);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Party, PartyRole};

    struct Recorder(Arc<Mutex<Vec<(&'static str, bool)>>>);

    impl StoreObserver for Recorder {
        fn on_dispatch(&mut self, action: &Action, state: &DraftState) {
            self.0
                .lock()
                .unwrap()
                .push((action.name(), state.current_draft.is_some()));
        }
    }

    #[test]
    fn observers_see_post_mutation_state() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let store = StoreHandle::default();
        store.add_observer(Box::new(Recorder(seen.clone())));

        store.dispatch(Action::start_new_draft());
        store.dispatch(Action::ClearDraft);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![("start_new_draft", true), ("clear_draft", false)]
        );
    }

    #[test]
    fn collection_mutator_without_draft_keeps_none() {
        let store = StoreHandle::default();
        store.dispatch(Action::AddParty(Party::new(PartyRole::Plaintiff, "x")));
        store.dispatch(Action::ReorderParties {
            role: PartyRole::Defendant,
            from: 0,
            to: 3,
        });
        assert!(store.state().current_draft.is_none());
    }

    #[test]
    fn weak_handle_stops_after_store_dropped() {
        let store = StoreHandle::default();
        let weak = store.downgrade();
        assert!(weak.dispatch(Action::start_new_draft()));
        assert!(weak.read().unwrap().current_draft.is_some());

        drop(store);
        assert!(weak.read().is_none());
        assert!(!weak.dispatch(Action::ClearDraft));
    }
}
