//! Admin list managers
//!
//! A [`ResourceManager`] owns one fetched collection and its list view. Every
//! mutation is one HTTP request followed by a full refetch. Toggling
//! visibility and drag-and-drop reordering are optimistic instead: the local
//! state changes at once and a debounced request syncs it later. When that
//! sync fails the local state goes back to how it was before the first
//! unsynced change.

use super::api::ApiClient;
use super::debounce::Debouncer;
use super::error::ClientError;
use crate::core::entity::{Entity, Orderable, Visibility};
use crate::core::listing::ListView;
use crate::core::query::PaginationMeta;
use crate::core::service::apply_order;
use crate::entities::{Destination, DestinationIndex, Tour};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

type LoadFuture<T> = Pin<Box<dyn Future<Output = Result<Vec<T>, ClientError>> + Send>>;

/// Runs on every fetched collection before it reaches the list view
type AfterLoad<T> = Arc<dyn Fn(ApiClient, Vec<T>) -> LoadFuture<T> + Send + Sync>;

const REORDER_KEY: &str = "reorder";

/// Local state to restore when a debounced sync fails
#[derive(Debug, Clone)]
enum Snapshot<T> {
    /// One record as it was before the first unsynced toggle
    Record(T),
    /// The whole collection before the first unsynced reorder
    Collection(Vec<T>),
}

#[derive(Debug)]
struct ManagerState<T> {
    view: ListView<T>,
    loading: bool,
    error: Option<String>,
    snapshots: HashMap<String, Snapshot<T>>,
}

/// Fetch, filter, sort, paginate and mutate one admin collection
pub struct ResourceManager<T> {
    api: ApiClient,
    state: Arc<RwLock<ManagerState<T>>>,
    debouncer: Debouncer,
    after_load: Option<AfterLoad<T>>,
}

impl<T> Clone for ResourceManager<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: self.state.clone(),
            debouncer: self.debouncer.clone(),
            after_load: self.after_load.clone(),
        }
    }
}

impl<T: Entity> ResourceManager<T> {
    pub fn new(api: ApiClient, items_per_page: usize, debounce: Duration) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(ManagerState {
                view: ListView::new(items_per_page),
                loading: false,
                error: None,
                snapshots: HashMap::new(),
            })),
            debouncer: Debouncer::new(debounce),
            after_load: None,
        }
    }

    /// Transform every fetched collection, e.g. to fill derived fields
    ///
    /// The hook runs on each [`load`](Self::load), including the refetch
    /// after every mutation.
    pub fn with_after_load<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(ApiClient, Vec<T>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>, ClientError>> + Send + 'static,
    {
        self.after_load = Some(Arc::new(move |api, items| Box::pin(hook(api, items))));
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, ManagerState<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ManagerState<T>> {
        write_state(&self.state)
    }

    fn record_error(&self, error: &ClientError) {
        self.write().error = Some(error.to_string());
    }

    /// Fetch the whole collection and replace the local items
    pub async fn load(&self) -> Result<(), ClientError> {
        {
            let mut state = self.write();
            state.loading = true;
            state.error = None;
        }

        let result = match (self.api.fetch_all::<T>().await, &self.after_load) {
            (Ok(items), Some(hook)) => hook(self.api.clone(), items).await,
            (result, _) => result,
        };

        let mut state = self.write();
        state.loading = false;
        match result {
            Ok(items) => {
                tracing::debug!(resource = T::resource_name(), count = items.len(), "loaded");
                state.view.set_items(items);
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Create a record then refetch
    pub async fn create(&self, entity: T) -> Result<T, ClientError> {
        let created = self
            .api
            .create(&entity)
            .await
            .inspect_err(|e| self.record_error(e))?;
        self.load().await?;
        Ok(created)
    }

    /// Replace a record then refetch
    pub async fn update(&self, id: u64, entity: T) -> Result<T, ClientError> {
        let updated = self
            .api
            .update(id, &entity)
            .await
            .inspect_err(|e| self.record_error(e))?;
        self.load().await?;
        Ok(updated)
    }

    /// Delete a record then refetch
    pub async fn delete(&self, id: u64) -> Result<(), ClientError> {
        self.api
            .delete::<T>(id)
            .await
            .inspect_err(|e| self.record_error(e))?;
        self.load().await
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    /// Message of the last failure, cleared by the next load
    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    /// Records of the current page after filter and sort
    pub fn visible(&self) -> Vec<T> {
        self.read().view.visible().into_iter().cloned().collect()
    }

    /// All filtered and sorted records
    pub fn processed(&self) -> Vec<T> {
        self.read().view.processed().into_iter().cloned().collect()
    }

    /// All fetched records in server order
    pub fn items(&self) -> Vec<T> {
        self.read().view.items().to_vec()
    }

    pub fn meta(&self) -> PaginationMeta {
        self.read().view.meta()
    }

    /// Run a closure over the list view
    pub fn with_view<R>(&self, f: impl FnOnce(&ListView<T>) -> R) -> R {
        f(&self.read().view)
    }

    /// Adjust the fetched items in place (e.g. resolve destination names)
    pub fn update_items(&self, f: impl FnOnce(&mut Vec<T>)) {
        f(self.write().view.items_mut());
    }

    pub fn set_search(&self, term: &str) {
        self.write().view.set_search(term);
    }

    pub fn set_filter(&self, field: &str, value: &str) {
        self.write().view.set_filter(field, value);
    }

    pub fn clear_filters(&self) {
        self.write().view.clear_filters();
    }

    /// Sort by a column; selecting the same column again flips direction
    pub fn sort_by(&self, field: &str) {
        self.write().view.sort_by(field);
    }

    pub fn next_page(&self) -> bool {
        self.write().view.next_page()
    }

    pub fn previous_page(&self) -> bool {
        self.write().view.previous_page()
    }

    pub fn go_to_page(&self, page: usize) {
        self.write().view.go_to_page(page);
    }

    /// Whether an optimistic change is still waiting to be synced
    pub fn has_pending_sync(&self) -> bool {
        self.debouncer.has_pending()
    }
}

fn write_state<T>(state: &RwLock<ManagerState<T>>) -> RwLockWriteGuard<'_, ManagerState<T>> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// Put the snapshot for `key` back into the local items
fn revert<T: Entity>(state: &RwLock<ManagerState<T>>, key: &str, error: &ClientError) {
    let mut state = write_state(state);
    match state.snapshots.remove(key) {
        Some(Snapshot::Record(original)) => {
            if let Some(slot) = state
                .view
                .items_mut()
                .iter_mut()
                .find(|item| item.id() == original.id())
            {
                *slot = original;
            }
        }
        Some(Snapshot::Collection(items)) => state.view.set_items(items),
        None => {}
    }
    state.error = Some(error.to_string());
    tracing::warn!(resource = T::resource_name(), key, "sync failed, local change reverted: {}", error);
}

impl<T: Visibility> ResourceManager<T> {
    /// Flip a record's listed/active flag locally and sync it after the
    /// debounce window
    ///
    /// Returns the new flag value, or `None` when the id is unknown.
    pub fn toggle_listing(&self, id: u64) -> Option<bool> {
        let key = format!("toggle:{}", id);

        let listed = {
            let mut state = self.write();
            let current = state.view.items().iter().find(|item| item.id() == id)?.clone();
            state
                .snapshots
                .entry(key.clone())
                .or_insert_with(|| Snapshot::Record(current.clone()));

            let item = state
                .view
                .items_mut()
                .iter_mut()
                .find(|item| item.id() == id)?;
            let listed = !item.is_listed();
            item.set_listed(listed);
            listed
        };

        let api = self.api.clone();
        let state = self.state.clone();
        let sync_key = key.clone();
        self.debouncer.schedule(&key, async move {
            // Send whatever the record looks like when the timer fires
            let latest = {
                let state = write_state(&state);
                state.view.items().iter().find(|item| item.id() == id).cloned()
            };
            let Some(latest) = latest else {
                write_state(&state).snapshots.remove(&sync_key);
                return;
            };

            match api.update(id, &latest).await {
                Ok(_) => {
                    write_state(&state).snapshots.remove(&sync_key);
                }
                Err(e) => revert(&state, &sync_key, &e),
            }
        });

        Some(listed)
    }
}

impl<T: Orderable> ResourceManager<T> {
    /// Apply a drag-and-drop order locally and sync it after the debounce
    /// window
    pub fn reorder(&self, ids: &[u64]) {
        {
            let mut state = self.write();
            let current = state.view.items().to_vec();
            state
                .snapshots
                .entry(REORDER_KEY.to_string())
                .or_insert_with(|| Snapshot::Collection(current.clone()));
            state.view.set_items(apply_order(current, ids));
        }

        let api = self.api.clone();
        let state = self.state.clone();
        self.debouncer.schedule(REORDER_KEY, async move {
            let order: Vec<u64> = {
                let state = write_state(&state);
                state.view.items().iter().map(Entity::id).collect()
            };

            match api.reorder::<T>(&order).await {
                Ok(_) => {
                    write_state(&state).snapshots.remove(REORDER_KEY);
                }
                Err(e) => revert(&state, REORDER_KEY, &e),
            }
        });
    }
}

impl ResourceManager<Tour> {
    /// Resolve destination names on every load so search matches them
    pub fn with_destination_search(self) -> Self {
        self.with_after_load(|api, mut tours| async move {
            let destinations = api.fetch_all::<Destination>().await?;
            DestinationIndex::new(&destinations).annotate(&mut tours);
            Ok::<_, ClientError>(tours)
        })
    }
}
