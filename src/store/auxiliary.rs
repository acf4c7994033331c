//! Unpaginated listings and single-record slots.

use super::notify::Notifier;
use super::state::{is_loading, AuxiliaryListState, DetailState, Loading};
use crate::catalog::CatalogError;
use log::*;
use std::future::Future;
use std::sync::atomic::AtomicUsize;
use tokio::sync::Mutex;

/// An unpaginated listing with its own loading and error tracking.
///
pub struct AuxiliaryList<T> {
    state: Mutex<AuxiliaryListState<T>>,
    in_flight: AtomicUsize,
}

impl<T: Clone> AuxiliaryList<T> {
    pub fn new() -> Self {
        AuxiliaryList {
            state: Mutex::new(AuxiliaryListState::default()),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Replace the listing with the request's result. Failures are logged
    /// and recorded, and toasted only when a notifier is given.
    ///
    pub(crate) async fn load<F>(&self, label: &str, request: F, notifier: Option<&dyn Notifier>)
    where
        F: Future<Output = Result<Vec<T>, CatalogError>>,
    {
        let _loading = Loading::begin(&self.in_flight);
        self.state.lock().await.error = None;
        match request.await {
            Ok(items) => {
                debug!("Loaded {} {}.", items.len(), label);
                let mut state = self.state.lock().await;
                state.items = items;
                state.error = None;
            }
            Err(e) => {
                error!("Failed to fetch {}: {}", label, e);
                self.state.lock().await.error = Some(e.into());
                if let Some(notifier) = notifier {
                    notifier.error(&format!("Failed to fetch {}.", label));
                }
            }
        }
    }

    pub async fn snapshot(&self) -> AuxiliaryListState<T> {
        let mut state = self.state.lock().await.clone();
        state.is_loading = self.is_loading();
        state
    }

    pub async fn items(&self) -> Vec<T> {
        self.state.lock().await.items.clone()
    }

    pub async fn count(&self) -> usize {
        self.state.lock().await.items.len()
    }

    pub fn is_loading(&self) -> bool {
        is_loading(&self.in_flight)
    }
}

impl<T: Clone> Default for AuxiliaryList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A single record slot, overwritten by every successful load.
///
pub struct DetailSlot<T> {
    state: Mutex<DetailState<T>>,
    in_flight: AtomicUsize,
}

impl<T: Clone> DetailSlot<T> {
    pub fn new() -> Self {
        DetailSlot {
            state: Mutex::new(DetailState::default()),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Replace the record with the request's result. A failure keeps the
    /// previous record.
    ///
    pub(crate) async fn load<F>(&self, label: &str, request: F, notifier: Option<&dyn Notifier>)
    where
        F: Future<Output = Result<T, CatalogError>>,
    {
        let _loading = Loading::begin(&self.in_flight);
        self.state.lock().await.error = None;
        match request.await {
            Ok(record) => {
                debug!("Loaded {}.", label);
                let mut state = self.state.lock().await;
                state.record = Some(record);
                state.error = None;
            }
            Err(e) => {
                error!("Failed to fetch {}: {}", label, e);
                self.state.lock().await.error = Some(e.into());
                if let Some(notifier) = notifier {
                    notifier.error(&format!("Failed to fetch {}.", label));
                }
            }
        }
    }

    pub async fn snapshot(&self) -> DetailState<T> {
        let mut state = self.state.lock().await.clone();
        state.is_loading = self.is_loading();
        state
    }

    pub async fn record(&self) -> Option<T> {
        self.state.lock().await.record.clone()
    }

    pub fn is_loading(&self) -> bool {
        is_loading(&self.in_flight)
    }
}

impl<T: Clone> Default for DetailSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
