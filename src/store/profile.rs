//! Signed-in user's profile.

use super::auxiliary::DetailSlot;
use super::notify::Notifier;
use crate::catalog::{Catalog, UserProfile};
use std::sync::Arc;

#[derive(Clone)]
pub struct ProfileStore {
    catalog: Arc<Catalog>,
    notifier: Arc<dyn Notifier>,
    profile: Arc<DetailSlot<UserProfile>>,
}

impl ProfileStore {
    pub fn new(catalog: Arc<Catalog>, notifier: Arc<dyn Notifier>) -> Self {
        ProfileStore {
            catalog,
            notifier,
            profile: Arc::new(DetailSlot::new()),
        }
    }

    /// Load the profile, bypassing caches. Failures are toasted.
    ///
    pub async fn fetch_profile(&self) {
        self.profile
            .load(
                "profile",
                self.catalog.profile(),
                Some(self.notifier.as_ref()),
            )
            .await;
    }

    pub fn profile(&self) -> &DetailSlot<UserProfile> {
        &self.profile
    }
}
