//! Client-side state stores.
//!
//! This module contains the reactive state the dashboard views read from:
//! - `ResourceStore`, one generic store per entity kind
//! - Unpaginated listings and single-record slots
//! - Entity-specific extras for users, artists and the profile
//! - The session's `AuthStore`
//! - Failure notifications and store errors

mod artists;
mod auth;
mod auxiliary;
mod collection;
mod error;
mod notify;
mod profile;
mod state;
mod users;

pub use artists::ArtistsStore;
pub use auth::{AuthState, AuthStore};
pub use auxiliary::{AuxiliaryList, DetailSlot};
pub use collection::{ResourceStore, Supersede};
pub use error::{StoreError, StoreFailure};
pub use notify::{LogNotifier, MemoryNotifier, Notifier};
pub use profile::ProfileStore;
pub use state::{AuxiliaryListState, DetailState, Pagination, ResourceCollectionState};
pub use users::UsersStore;

use crate::catalog::{Album, Catalog, Music};
use std::sync::Arc;

/// Settings shared by every store.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub users_per_page: u32,
    pub supersede: Supersede,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            users_per_page: 20,
            supersede: Supersede::default(),
        }
    }
}

/// One store per entity kind, all backed by the same catalog and notifier.
///
#[derive(Clone)]
pub struct Stores {
    pub users: UsersStore,
    pub artists: ArtistsStore,
    pub albums: ResourceStore<Album>,
    pub musics: ResourceStore<Music>,
    pub profile: ProfileStore,
}

impl Stores {
    pub fn new(catalog: Arc<Catalog>, notifier: Arc<dyn Notifier>, options: StoreOptions) -> Self {
        let supersede = options.supersede;
        Stores {
            users: UsersStore::new(
                ResourceStore::new(Arc::clone(&catalog), Arc::clone(&notifier))
                    .with_per_page(options.users_per_page)
                    .with_supersede(supersede),
            ),
            artists: ArtistsStore::new(
                ResourceStore::new(Arc::clone(&catalog), Arc::clone(&notifier))
                    .with_supersede(supersede),
            ),
            albums: ResourceStore::new(Arc::clone(&catalog), Arc::clone(&notifier))
                .with_supersede(supersede),
            musics: ResourceStore::new(Arc::clone(&catalog), Arc::clone(&notifier))
                .with_supersede(supersede),
            profile: ProfileStore::new(catalog, notifier),
        }
    }
}
