//! Generic per-kind resource store.

use super::auxiliary::{AuxiliaryList, DetailSlot};
use super::notify::Notifier;
use super::state::{is_loading, Loading, Pagination, ResourceCollectionState};
use super::StoreError;
use crate::catalog::{Catalog, Resource};
use crate::router::RouteMatch;
use log::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Decides which of several overlapping page requests ends up in the store.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Supersede {
    /// Only the most recently dispatched request may update the store.
    #[default]
    IgnoreStale,
    /// Every response is applied as it resolves, so the last one wins.
    LastResolvedWins,
}

struct PagedSlot<T> {
    state: ResourceCollectionState<T>,
    /// Ticket of the most recently dispatched page request.
    issued: u64,
}

struct Shared<T> {
    paged: Mutex<PagedSlot<T>>,
    in_flight: AtomicUsize,
    all: AuxiliaryList<T>,
    detail: DetailSlot<T>,
}

/// Reactive state for one entity kind plus the operations that fill it.
/// Clones share the same state.
///
pub struct ResourceStore<T: Resource> {
    catalog: Arc<Catalog>,
    notifier: Arc<dyn Notifier>,
    per_page: Option<u32>,
    supersede: Supersede,
    shared: Arc<Shared<T>>,
}

impl<T: Resource> Clone for ResourceStore<T> {
    fn clone(&self) -> Self {
        ResourceStore {
            catalog: Arc::clone(&self.catalog),
            notifier: Arc::clone(&self.notifier),
            per_page: self.per_page,
            supersede: self.supersede,
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Resource> ResourceStore<T> {
    pub fn new(catalog: Arc<Catalog>, notifier: Arc<dyn Notifier>) -> Self {
        ResourceStore {
            catalog,
            notifier,
            per_page: None,
            supersede: Supersede::default(),
            shared: Arc::new(Shared {
                paged: Mutex::new(PagedSlot {
                    state: ResourceCollectionState::default(),
                    issued: 0,
                }),
                in_flight: AtomicUsize::new(0),
                all: AuxiliaryList::new(),
                detail: DetailSlot::new(),
            }),
        }
    }

    /// Send a page size with every page request.
    ///
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn with_supersede(mut self, supersede: Supersede) -> Self {
        self.supersede = supersede;
        self
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub(crate) fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Load one page of the listing. Only an invalid page number is an
    /// error; request failures are recorded on the store and toasted.
    ///
    pub async fn fetch_page(&self, page: u32) -> Result<(), StoreError> {
        if page == 0 {
            return Err(StoreError::InvalidArgument(format!(
                "page for {} must be at least 1",
                T::KIND
            )));
        }

        let _loading = Loading::begin(&self.shared.in_flight);
        let ticket = {
            let mut slot = self.shared.paged.lock().await;
            slot.state.error = None;
            slot.issued += 1;
            slot.issued
        };

        let result = self.catalog.page::<T>(page, self.per_page).await;

        let mut slot = self.shared.paged.lock().await;
        if self.supersede == Supersede::IgnoreStale && ticket != slot.issued {
            debug!(
                "Discarding page {} of {}: superseded by a newer request.",
                page,
                T::KIND
            );
            return Ok(());
        }

        match result {
            Ok(fetched) => {
                let state = &mut slot.state;
                state.items = fetched.items;
                match fetched.meta {
                    Some(meta) => {
                        state.pagination = Pagination::from(&meta);
                        if let Some(total) = meta.total_entries {
                            state.total_count = total;
                        }
                    }
                    None => warn!(
                        "Page {} of {} carried no pagination metadata.",
                        page,
                        T::KIND
                    ),
                }
                state.error = None;
                info!(
                    "Received {} {} (page {} of {}).",
                    state.items.len(),
                    T::KIND,
                    state.pagination.current_page,
                    state.pagination.total_pages
                );
            }
            Err(e) => {
                error!("Failed to fetch page {} of {}: {}", page, T::KIND, e);
                slot.state.error = Some(e.into());
                drop(slot);
                self.notifier.error(&format!("Failed to fetch {}.", T::KIND));
            }
        }
        Ok(())
    }

    /// Load the unpaginated listing. Failures are logged and recorded but
    /// not toasted.
    ///
    pub async fn fetch_all(&self) {
        let label = format!("all {}", T::KIND);
        self.shared
            .all
            .load(&label, self.catalog.all::<T>(), None)
            .await;
    }

    /// Load a single record into the detail slot.
    ///
    pub async fn fetch_one(&self, id: &str) -> Result<(), StoreError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(StoreError::InvalidArgument(format!(
                "{} record requires an identifier",
                T::KIND
            )));
        }
        let label = format!("{} record {}", T::KIND, id);
        self.shared
            .detail
            .load(&label, self.catalog.one::<T>(id), None)
            .await;
        Ok(())
    }

    /// Load the record named by the route's `id` parameter.
    ///
    pub async fn fetch_one_for_route(&self, route: &RouteMatch) -> Result<(), StoreError> {
        let id = route.param("id").ok_or_else(|| {
            StoreError::InvalidArgument(format!("route '{}' has no id parameter", route.path))
        })?;
        self.fetch_one(id).await
    }

    pub async fn snapshot(&self) -> ResourceCollectionState<T> {
        let mut state = self.shared.paged.lock().await.state.clone();
        state.is_loading = self.is_loading();
        state
    }

    pub async fn items(&self) -> Vec<T> {
        self.shared.paged.lock().await.state.items.clone()
    }

    /// Number of items on the current page.
    ///
    pub async fn count(&self) -> usize {
        self.shared.paged.lock().await.state.items.len()
    }

    pub async fn total_count(&self) -> u64 {
        self.shared.paged.lock().await.state.total_count
    }

    pub async fn pagination(&self) -> Pagination {
        self.shared.paged.lock().await.state.pagination
    }

    pub fn is_loading(&self) -> bool {
        is_loading(&self.shared.in_flight)
    }

    pub fn all(&self) -> &AuxiliaryList<T> {
        &self.shared.all
    }

    pub fn detail(&self) -> &DetailSlot<T> {
        &self.shared.detail
    }
}
