use fake::Dummy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Specifying the entity kinds exposed by the catalog API.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Users,
    Artists,
    Albums,
    Musics,
    Profile,
}

impl ResourceKind {
    /// All kinds, in dashboard menu order.
    ///
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Users,
        ResourceKind::Artists,
        ResourceKind::Albums,
        ResourceKind::Musics,
        ResourceKind::Profile,
    ];

    /// Path segment of the kind's endpoints, which is also the key that
    /// holds the items in a paged response body.
    ///
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Users => "users",
            ResourceKind::Artists => "artists",
            ResourceKind::Albums => "albums",
            ResourceKind::Musics => "musics",
            ResourceKind::Profile => "profile",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.path().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown resource kind '{}'", s))
    }
}

/// Implemented by entity types that can be listed page by page.
///
pub trait Resource:
    DeserializeOwned + Serialize + Clone + fmt::Debug + Send + Sync + 'static
{
    const KIND: ResourceKind;
}

/// Defines user data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
}

impl User {
    pub const ROLE_ARTIST_MANAGER: &'static str = "artist_manager";

    pub fn is_artist_manager(&self) -> bool {
        self.role.as_deref() == Some(Self::ROLE_ARTIST_MANAGER)
    }
}

impl Resource for User {
    const KIND: ResourceKind = ResourceKind::Users;
}

/// Defines a social media link on an artist profile.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMediaLink {
    pub platform: String,
    pub link: String,
}

/// Defines artist data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub first_release_year: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub social_media_links: Vec<SocialMediaLink>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub manager_id: Option<u64>,
}

impl Resource for Artist {
    const KIND: ResourceKind = ResourceKind::Artists;
}

/// Defines album data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub artist_ids: Vec<u64>,
    #[serde(default)]
    pub music_ids: Vec<u64>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl Resource for Album {
    const KIND: ResourceKind = ResourceKind::Albums;
}

/// Defines music track data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Music {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub album_id: Option<u64>,
    #[serde(default)]
    pub artist_ids: Vec<u64>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl Resource for Music {
    const KIND: ResourceKind = ResourceKind::Musics;
}

/// Defines the signed-in user's profile, including the artist fields
/// shown on the profile form.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub first_release_year: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub social_media_links: Vec<SocialMediaLink>,
}

/// Pagination metadata attached to every paged list response.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_entries: Option<u64>,
}

fn first_page() -> u32 {
    1
}

/// One page of results as returned by a paged list endpoint.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: Option<PageMeta>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use serde_json::json;

    #[test]
    fn test_resource_kind_round_trips_through_str() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.path().parse::<ResourceKind>(), Ok(kind));
        }
        assert_eq!("ALBUMS".parse::<ResourceKind>(), Ok(ResourceKind::Albums));
        assert!("songs".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_partial_payloads_decode() {
        let album: Album = serde_json::from_value(json!({ "id": 7, "name": "Blue" })).unwrap();
        assert_eq!(album.id, 7);
        assert!(album.artist_ids.is_empty());

        let meta: PageMeta = serde_json::from_value(json!({})).unwrap();
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.total_entries, None);
    }

    #[test]
    fn test_artist_manager_role() {
        let mut user: User = Faker.fake();
        user.role = Some("artist_manager".to_string());
        assert!(user.is_artist_manager());
        user.role = Some("artist".to_string());
        assert!(!user.is_artist_manager());
        user.role = None;
        assert!(!user.is_artist_manager());
    }
}
