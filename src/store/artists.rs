//! Artist listing with the signed-in manager's own artists.

use super::auxiliary::AuxiliaryList;
use super::collection::ResourceStore;
use crate::catalog::Artist;
use std::sync::Arc;

#[derive(Clone)]
pub struct ArtistsStore {
    list: ResourceStore<Artist>,
    my_artists: Arc<AuxiliaryList<Artist>>,
}

impl ArtistsStore {
    pub fn new(list: ResourceStore<Artist>) -> Self {
        ArtistsStore {
            list,
            my_artists: Arc::new(AuxiliaryList::new()),
        }
    }

    pub fn list(&self) -> &ResourceStore<Artist> {
        &self.list
    }

    /// Load the artists managed by the signed-in user. Failures are logged
    /// only.
    ///
    pub async fn fetch_my_artists(&self) {
        self.my_artists
            .load("my artists", self.list.catalog().my_artists(), None)
            .await;
    }

    pub fn my_artists(&self) -> &AuxiliaryList<Artist> {
        &self.my_artists
    }

    pub async fn my_artists_count(&self) -> usize {
        self.my_artists.count().await
    }
}
