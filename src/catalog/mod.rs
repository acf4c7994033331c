mod client;
mod error;
mod resource;

pub use client::Client;
pub use error::CatalogError;
pub use resource::*;

use log::*;
use serde_json::{Map, Value};

/// Responsible for asynchronous interaction with the catalog API including
/// transformation of response data into explicitly-defined types.
///
pub struct Catalog {
    client: Client,
}

impl Catalog {
    /// Returns a new instance backed by the given client.
    ///
    pub fn new(client: Client) -> Catalog {
        debug!("Initializing catalog client for {}...", client.base_url);
        Catalog { client }
    }

    /// Returns one page of a kind's list endpoint along with its pagination
    /// metadata, if the server sent any.
    ///
    pub async fn page<T: Resource>(
        &self,
        page: u32,
        per_page: Option<u32>,
    ) -> Result<Page<T>, CatalogError> {
        let kind = T::KIND;
        debug!("Requesting page {} of {}...", page, kind);

        let mut params = vec![("page", page.to_string())];
        if let Some(per_page) = per_page {
            params.push(("per_page", per_page.to_string()));
        }

        let mut body: Map<String, Value> = self.client.get(kind.path(), &params).await?;
        let items = body
            .remove(kind.path())
            .ok_or_else(|| CatalogError::MissingCollection {
                key: kind.path().to_owned(),
            })?;
        let items: Vec<T> = serde_json::from_value(items)?;
        let meta = match body.remove("meta") {
            None | Some(Value::Null) => None,
            Some(meta) => Some(serde_json::from_value(meta)?),
        };

        debug!("Retrieved {} {} on page {}", items.len(), kind, page);
        Ok(Page { items, meta })
    }

    /// Returns the unpaginated listing of a kind.
    ///
    pub async fn all<T: Resource>(&self) -> Result<Vec<T>, CatalogError> {
        debug!("Requesting all {}...", T::KIND);
        self.client
            .get(&format!("{}/all", T::KIND.path()), &[])
            .await
    }

    /// Returns the record of a kind with the given identifier.
    ///
    pub async fn one<T: Resource>(&self, id: &str) -> Result<T, CatalogError> {
        debug!("Requesting {} record {}...", T::KIND, id);
        self.client.get_record(T::KIND.path(), id).await
    }

    /// Returns the artists managed by the signed-in user.
    ///
    pub async fn my_artists(&self) -> Result<Vec<Artist>, CatalogError> {
        debug!("Requesting artists managed by the current user...");
        self.client.get("artists/my_artists", &[]).await
    }

    /// Returns artist accounts not yet assigned to a manager.
    ///
    pub async fn unassigned_artists(&self) -> Result<Vec<User>, CatalogError> {
        debug!("Requesting unassigned artists...");
        self.client.get("users/unassigned_artists", &[]).await
    }

    /// Returns the signed-in user's profile. A timestamp parameter keeps
    /// intermediaries from serving a cached copy.
    ///
    pub async fn profile(&self) -> Result<UserProfile, CatalogError> {
        debug!("Requesting profile...");
        let t = chrono::Utc::now().timestamp_millis().to_string();
        self.client
            .get(ResourceKind::Profile.path(), &[("t", t)])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use serde_json::json;

    fn catalog(server: &MockServer) -> Catalog {
        Catalog::new(Client::new(&server.base_url(), None))
    }

    #[tokio::test]
    async fn page_success() -> Result<(), CatalogError> {
        let albums: [Album; 2] = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/albums").query_param("page", "2");
                then.status(200).json_body(json!({
                    "albums": albums,
                    "meta": { "current_page": 2, "total_pages": 4, "total_entries": 31 }
                }));
            })
            .await;

        let page = catalog(&server).page::<Album>(2, None).await?;
        assert_eq!(page.items, albums.to_vec());
        assert_eq!(
            page.meta,
            Some(PageMeta {
                current_page: 2,
                total_pages: 4,
                total_entries: Some(31),
            })
        );
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn page_sends_per_page() -> Result<(), CatalogError> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/users")
                    .query_param("page", "1")
                    .query_param("per_page", "20");
                then.status(200).json_body(json!({ "users": [] }));
            })
            .await;

        let page = catalog(&server).page::<User>(1, Some(20)).await?;
        assert!(page.items.is_empty());
        assert_eq!(page.meta, None);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn page_without_collection_key_fails() {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET").path("/musics");
                then.status(200).json_body(json!({ "tracks": [] }));
            })
            .await;

        let result = catalog(&server).page::<Music>(1, None).await;
        assert!(matches!(
            result,
            Err(CatalogError::MissingCollection { ref key }) if key == "musics"
        ));
    }

    #[tokio::test]
    async fn all_success() -> Result<(), CatalogError> {
        let artists: [Artist; 3] = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/artists/all");
                then.status(200).json_body(json!(artists));
            })
            .await;

        let all = catalog(&server).all::<Artist>().await?;
        assert_eq!(all.len(), 3);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn one_success() -> Result<(), CatalogError> {
        let music: Music = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/musics/42");
                then.status(200).json_body(json!(music));
            })
            .await;

        let one = catalog(&server).one::<Music>("42").await?;
        assert_eq!(one, music);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn one_not_found() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/albums/9");
                then.status(404);
            })
            .await;

        let result = catalog(&server).one::<Album>("9").await;
        assert_eq!(result.unwrap_err().status(), Some(404));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn one_cannot_escape_its_collection() {
        let server = MockServer::start();
        let users = server
            .mock_async(|when, then| {
                when.method("GET").path("/users");
                then.status(200).json_body(json!({ "users": [] }));
            })
            .await;
        let smuggled = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/albums/1")
                    .query_param("admin", "true");
                then.status(200).json_body(json!({ "id": 1 }));
            })
            .await;

        let catalog = catalog(&server);
        assert!(catalog.one::<Album>("..").await.is_err());
        assert!(catalog.one::<Album>("1?admin=true").await.is_err());
        users.assert_hits_async(0).await;
        smuggled.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn auxiliary_listings() -> Result<(), CatalogError> {
        let managed: [Artist; 2] = Faker.fake();
        let unassigned: [User; 1] = Faker.fake();

        let server = MockServer::start();
        let mine = server
            .mock_async(|when, then| {
                when.method("GET").path("/artists/my_artists");
                then.status(200).json_body(json!(managed));
            })
            .await;
        let orphans = server
            .mock_async(|when, then| {
                when.method("GET").path("/users/unassigned_artists");
                then.status(200).json_body(json!(unassigned));
            })
            .await;

        let catalog = catalog(&server);
        assert_eq!(catalog.my_artists().await?, managed.to_vec());
        assert_eq!(catalog.unassigned_artists().await?, unassigned.to_vec());
        mine.assert_async().await;
        orphans.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn profile_busts_caches() -> Result<(), CatalogError> {
        let profile: UserProfile = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/profile").query_param_exists("t");
                then.status(200).json_body(json!(profile));
            })
            .await;

        assert_eq!(catalog(&server).profile().await?, profile);
        mock.assert_async().await;
        Ok(())
    }
}
