//! Session context for the selected hunter.

use crate::error::{WebError, WebResult};
use hunter_api::{HunterId, HUNTER_ID_STORAGE_KEY};
use leptos::prelude::*;
use std::sync::{Arc, Mutex};

/// Where the selected hunter's id is kept between visits.
pub trait HunterStore: Send + Sync {
    fn load(&self) -> Option<HunterId>;
    fn save(&self, hunter_id: &HunterId) -> WebResult<()>;
    fn clear(&self) -> WebResult<()>;
}

/// The browser's local storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> WebResult<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| WebError::missing("No window available"))?;
        window
            .local_storage()
            .map_err(WebError::from_js)?
            .ok_or_else(|| WebError::missing("Local storage is unavailable"))
    }
}

impl HunterStore for LocalStorage {
    fn load(&self) -> Option<HunterId> {
        let stored = Self::storage()
            .ok()?
            .get_item(HUNTER_ID_STORAGE_KEY)
            .ok()??;
        let hunter_id = HunterId::new(stored);
        (!hunter_id.is_empty()).then_some(hunter_id)
    }

    fn save(&self, hunter_id: &HunterId) -> WebResult<()> {
        Self::storage()?
            .set_item(HUNTER_ID_STORAGE_KEY, hunter_id.as_str())
            .map_err(WebError::from_js)
    }

    fn clear(&self) -> WebResult<()> {
        Self::storage()?
            .remove_item(HUNTER_ID_STORAGE_KEY)
            .map_err(WebError::from_js)
    }
}

/// Keeps the id in memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<HunterId>>,
}

impl MemoryStore {
    pub fn with(hunter_id: impl Into<HunterId>) -> Self {
        Self {
            slot: Mutex::new(Some(hunter_id.into())),
        }
    }
}

impl HunterStore for MemoryStore {
    fn load(&self) -> Option<HunterId> {
        self.slot.lock().ok()?.clone()
    }

    fn save(&self, hunter_id: &HunterId) -> WebResult<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(hunter_id.clone());
        }
        Ok(())
    }

    fn clear(&self) -> WebResult<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}

/// The hunter currently in use, written through to a [`HunterStore`].
#[derive(Clone)]
pub struct Selection {
    store: Arc<dyn HunterStore>,
    current: Option<HunterId>,
}

impl Selection {
    /// Reads the stored id, this is the only time the store is read.
    pub fn restore(store: Arc<dyn HunterStore>) -> Self {
        let current = store.load();
        tracing::info!("Restored hunter: {current:?}");
        Self { store, current }
    }

    pub fn current(&self) -> Option<&HunterId> {
        self.current.as_ref()
    }

    pub fn select(&mut self, hunter_id: HunterId) {
        tracing::info!("Selecting hunter {hunter_id}");
        if let Err(err) = self.store.save(&hunter_id) {
            tracing::warn!("Failed to persist hunter {hunter_id}: {err}");
        }
        self.current = Some(hunter_id);
    }

    pub fn reset(&mut self) {
        tracing::info!("Clearing selected hunter");
        if let Err(err) = self.store.clear() {
            tracing::warn!("Failed to clear stored hunter: {err}");
        }
        self.current = None;
    }
}

/// What the root of the app shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Setup,
    Dashboard(HunterId),
}

impl Screen {
    pub fn for_selection(hunter_id: Option<HunterId>) -> Self {
        match hunter_id {
            Some(hunter_id) => Screen::Dashboard(hunter_id),
            None => Screen::Setup,
        }
    }
}

#[derive(Clone, Copy)]
pub struct Session {
    selection: RwSignal<Selection>,
}

impl Session {
    pub fn new(store: Arc<dyn HunterStore>) -> Self {
        Self {
            selection: RwSignal::new(Selection::restore(store)),
        }
    }

    pub fn hunter_id(&self) -> Option<HunterId> {
        self.selection.with(|selection| selection.current().cloned())
    }

    pub fn screen(&self) -> Screen {
        Screen::for_selection(self.hunter_id())
    }

    pub fn select(&self, hunter_id: HunterId) {
        self.selection.update(|selection| selection.select(hunter_id));
    }

    pub fn reset(&self) {
        self.selection.update(Selection::reset);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn restores_stored_hunter_once() {
        let store = Arc::new(MemoryStore::with("u1"));
        let selection = Selection::restore(store.clone());
        store.clear().unwrap();
        assert_eq!(selection.current(), Some(&HunterId::from("u1")));
    }

    #[test]
    fn select_and_reset_write_through() {
        let store = Arc::new(MemoryStore::default());
        let mut selection = Selection::restore(store.clone());
        assert_eq!(selection.current(), None);

        selection.select(HunterId::from("u2"));
        assert_eq!(store.load(), Some(HunterId::from("u2")));
        assert_eq!(selection.current(), Some(&HunterId::from("u2")));

        selection.reset();
        assert_eq!(store.load(), None);
        assert_eq!(selection.current(), None);
    }

    #[test]
    fn screen_follows_selection() {
        let empty = Selection::restore(Arc::new(MemoryStore::default()));
        assert_eq!(
            Screen::for_selection(empty.current().cloned()),
            Screen::Setup
        );

        let stored = Selection::restore(Arc::new(MemoryStore::with("u1")));
        assert_eq!(
            Screen::for_selection(stored.current().cloned()),
            Screen::Dashboard(HunterId::from("u1"))
        );
    }
}
