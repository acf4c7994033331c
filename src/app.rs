use crate::catalog::{Catalog, Client, Resource, ResourceKind, UserProfile};
use crate::config::Config;
use crate::error::AppResult;
use crate::router::Router;
use crate::store::{AuthStore, LogNotifier, Notifier, ResourceStore, StoreError, Stores};
use log::*;
use serde_json::{json, Value};
use std::sync::Arc;

/// Specify the operations the command line can run.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { kind: ResourceKind, page: u32 },
    All { kind: ResourceKind },
    Show { kind: ResourceKind, id: String },
    Profile,
    Unassigned,
    MyArtists,
    Route { path: String, logged_in: bool },
}

/// Oversees the catalog client, the stores and the router for one session.
///
pub struct App {
    auth: Arc<AuthStore>,
    router: Router,
    stores: Stores,
}

impl App {
    /// Wire up a session according to the given configuration, reporting
    /// failures through the log.
    ///
    pub fn new(config: &Config) -> App {
        App::with_notifier(config, Arc::new(LogNotifier))
    }

    pub fn with_notifier(config: &Config, notifier: Arc<dyn Notifier>) -> App {
        let client = Client::new(&config.base_url, config.access_token.as_deref());
        let catalog = Arc::new(Catalog::new(client));
        let auth = Arc::new(AuthStore::new());
        App {
            router: Router::new(Arc::clone(&auth)),
            stores: Stores::new(catalog, notifier, config.store_options()),
            auth,
        }
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Run a command and return its result as JSON.
    ///
    pub async fn run(&self, command: Command) -> AppResult<Value> {
        debug!("Running command '{:?}'...", command);
        match command {
            Command::List { kind, page } => self.list(kind, page).await,
            Command::All { kind } => self.all(kind).await,
            Command::Show { kind, id } => self.show(kind, &id).await,
            Command::Profile => {
                self.stores.profile.fetch_profile().await;
                Ok(serde_json::to_value(
                    self.stores.profile.profile().snapshot().await,
                )?)
            }
            Command::Unassigned => {
                let users = &self.stores.users;
                users.fetch_unassigned_artists().await;
                Ok(serde_json::to_value(
                    users.unassigned_artists().snapshot().await,
                )?)
            }
            Command::MyArtists => {
                let artists = &self.stores.artists;
                artists.fetch_my_artists().await;
                Ok(serde_json::to_value(artists.my_artists().snapshot().await)?)
            }
            Command::Route { path, logged_in } => {
                if logged_in {
                    self.auth.login(UserProfile::default());
                } else {
                    self.auth.logout();
                }
                let requested = self.router.resolve(&path);
                let shown = self.router.navigate(&path)?;
                Ok(json!({ "requested": requested, "shown": shown }))
            }
        }
    }

    async fn list(&self, kind: ResourceKind, page: u32) -> AppResult<Value> {
        match kind {
            ResourceKind::Users => {
                let users = &self.stores.users;
                let mut value = page_of(users.list(), page).await?;
                value["managers_count"] = json!(users.managers_count().await);
                Ok(value)
            }
            ResourceKind::Artists => page_of(self.stores.artists.list(), page).await,
            ResourceKind::Albums => page_of(&self.stores.albums, page).await,
            ResourceKind::Musics => page_of(&self.stores.musics, page).await,
            ResourceKind::Profile => Err(unpaged(kind).into()),
        }
    }

    async fn all(&self, kind: ResourceKind) -> AppResult<Value> {
        match kind {
            ResourceKind::Users => all_of(self.stores.users.list()).await,
            ResourceKind::Artists => all_of(self.stores.artists.list()).await,
            ResourceKind::Albums => all_of(&self.stores.albums).await,
            ResourceKind::Musics => all_of(&self.stores.musics).await,
            ResourceKind::Profile => Err(unpaged(kind).into()),
        }
    }

    async fn show(&self, kind: ResourceKind, id: &str) -> AppResult<Value> {
        match kind {
            ResourceKind::Users => one_of(self.stores.users.list(), id).await,
            ResourceKind::Artists => one_of(self.stores.artists.list(), id).await,
            ResourceKind::Albums => one_of(&self.stores.albums, id).await,
            ResourceKind::Musics => one_of(&self.stores.musics, id).await,
            ResourceKind::Profile => Err(unpaged(kind).into()),
        }
    }
}

fn unpaged(kind: ResourceKind) -> StoreError {
    StoreError::InvalidArgument(format!("{} has no listing; use the profile command", kind))
}

async fn page_of<T: Resource>(store: &ResourceStore<T>, page: u32) -> AppResult<Value> {
    store.fetch_page(page).await?;
    Ok(serde_json::to_value(store.snapshot().await)?)
}

async fn all_of<T: Resource>(store: &ResourceStore<T>) -> AppResult<Value> {
    store.fetch_all().await;
    Ok(serde_json::to_value(store.all().snapshot().await)?)
}

async fn one_of<T: Resource>(store: &ResourceStore<T>, id: &str) -> AppResult<Value> {
    store.fetch_one(id).await?;
    Ok(serde_json::to_value(store.detail().snapshot().await)?)
}
