//! User listing with manager and unassigned-artist views.

use super::auxiliary::AuxiliaryList;
use super::collection::ResourceStore;
use crate::catalog::User;
use std::sync::Arc;

/// Users page plus the lists the user management screen derives from it.
///
#[derive(Clone)]
pub struct UsersStore {
    list: ResourceStore<User>,
    unassigned_artists: Arc<AuxiliaryList<User>>,
}

impl UsersStore {
    pub fn new(list: ResourceStore<User>) -> Self {
        UsersStore {
            list,
            unassigned_artists: Arc::new(AuxiliaryList::new()),
        }
    }

    /// The paged users listing.
    ///
    pub fn list(&self) -> &ResourceStore<User> {
        &self.list
    }

    /// Artist managers on the current page.
    ///
    pub async fn managers(&self) -> Vec<User> {
        self.list
            .items()
            .await
            .into_iter()
            .filter(User::is_artist_manager)
            .collect()
    }

    pub async fn managers_count(&self) -> usize {
        self.managers().await.len()
    }

    /// Load artist accounts not yet assigned to a manager. Failures are
    /// toasted.
    ///
    pub async fn fetch_unassigned_artists(&self) {
        self.unassigned_artists
            .load(
                "unassigned artists",
                self.list.catalog().unassigned_artists(),
                Some(self.list.notifier()),
            )
            .await;
    }

    pub fn unassigned_artists(&self) -> &AuxiliaryList<User> {
        &self.unassigned_artists
    }
}
