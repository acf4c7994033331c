//! Snapshot types handed out by the stores.

use super::StoreFailure;
use crate::catalog::PageMeta;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Position within a paged listing.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            current_page: 1,
            total_pages: 1,
        }
    }
}

impl From<&PageMeta> for Pagination {
    fn from(meta: &PageMeta) -> Self {
        Pagination {
            current_page: meta.current_page.max(1),
            total_pages: meta.total_pages.max(1),
        }
    }
}

/// State of one entity kind's paged listing.
///
#[derive(Debug, Clone, Serialize)]
pub struct ResourceCollectionState<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub pagination: Pagination,
    pub is_loading: bool,
    pub error: Option<StoreFailure>,
}

impl<T> ResourceCollectionState<T> {
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for ResourceCollectionState<T> {
    fn default() -> Self {
        ResourceCollectionState {
            items: vec![],
            total_count: 0,
            pagination: Pagination::default(),
            is_loading: false,
            error: None,
        }
    }
}

/// State of an unpaginated listing.
///
#[derive(Debug, Clone, Serialize)]
pub struct AuxiliaryListState<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub error: Option<StoreFailure>,
}

impl<T> AuxiliaryListState<T> {
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for AuxiliaryListState<T> {
    fn default() -> Self {
        AuxiliaryListState {
            items: vec![],
            is_loading: false,
            error: None,
        }
    }
}

/// State of a single-record slot.
///
#[derive(Debug, Clone, Serialize)]
pub struct DetailState<T> {
    pub record: Option<T>,
    pub is_loading: bool,
    pub error: Option<StoreFailure>,
}

impl<T> Default for DetailState<T> {
    fn default() -> Self {
        DetailState {
            record: None,
            is_loading: false,
            error: None,
        }
    }
}

/// Marks a request as in flight for as long as it is alive, so the loading
/// flag drops on every exit path, including a dropped future.
///
pub(crate) struct Loading<'a>(&'a AtomicUsize);

impl<'a> Loading<'a> {
    pub(crate) fn begin(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Loading(in_flight)
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub(crate) fn is_loading(in_flight: &AtomicUsize) -> bool {
    in_flight.load(Ordering::SeqCst) > 0
}
