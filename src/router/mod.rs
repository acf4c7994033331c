//! Client-side routing.
//!
//! This module holds the dashboard's route table, resolves paths against
//! it, and runs the authentication guard before every navigation.

mod error;
mod guard;

pub use error::RouterError;
pub use guard::{guard, GuardOutcome};

use crate::store::AuthStore;
use log::*;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Route a signed-in user lands on when they ask for the login page.
pub const LANDING: RouteName = RouteName::Dashboard;

const MAX_REDIRECTS: usize = 8;

/// Specifying the named routes.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum RouteName {
    Home,
    Login,
    Register,
    Dashboard,
    DashboardMain,
    Users,
    Artists,
    ArtistDetail,
    Albums,
    AlbumDetail,
    Musics,
    MusicDetail,
    Profile,
    NotFound,
}

impl RouteName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::Home => "home",
            RouteName::Login => "login",
            RouteName::Register => "register",
            RouteName::Dashboard => "dashboard",
            RouteName::DashboardMain => "dashboardmain",
            RouteName::Users => "users",
            RouteName::Artists => "artists",
            RouteName::ArtistDetail => "ArtistDetail",
            RouteName::Albums => "albums",
            RouteName::AlbumDetail => "AlbumDetail",
            RouteName::Musics => "musics",
            RouteName::MusicDetail => "MusicDetail",
            RouteName::Profile => "profile",
            RouteName::NotFound => "not-found",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RouteName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

struct RouteDef {
    name: RouteName,
    pattern: &'static str,
    requires_auth: bool,
    redirect: Option<RouteName>,
}

const fn route(name: RouteName, pattern: &'static str, requires_auth: bool) -> RouteDef {
    RouteDef {
        name,
        pattern,
        requires_auth,
        redirect: None,
    }
}

// Everything under /dashboard requires authentication.
const ROUTES: &[RouteDef] = &[
    route(RouteName::Home, "/", false),
    route(RouteName::Login, "/login", false),
    route(RouteName::Register, "/register", false),
    RouteDef {
        name: RouteName::Dashboard,
        pattern: "/dashboard",
        requires_auth: true,
        redirect: Some(RouteName::DashboardMain),
    },
    route(RouteName::DashboardMain, "/dashboard/dashboardmain", true),
    route(RouteName::Users, "/dashboard/users", true),
    route(RouteName::Artists, "/dashboard/artists", true),
    route(RouteName::ArtistDetail, "/dashboard/artists/:id", true),
    route(RouteName::Albums, "/dashboard/albums", true),
    route(RouteName::AlbumDetail, "/dashboard/albums/:id", true),
    route(RouteName::Musics, "/dashboard/musics", true),
    route(RouteName::MusicDetail, "/dashboard/musics/:id", true),
    route(RouteName::Profile, "/dashboard/profile", true),
];

impl RouteDef {
    fn matches(&self, segments: &[&str]) -> Option<BTreeMap<String, String>> {
        let pattern: Vec<&str> = split_segments(self.pattern);
        if pattern.len() != segments.len() {
            return None;
        }
        let mut params = BTreeMap::new();
        for (expected, actual) in pattern.iter().zip(segments) {
            match expected.strip_prefix(':') {
                Some(param) => {
                    params.insert(param.to_owned(), (*actual).to_owned());
                }
                None if expected.eq_ignore_ascii_case(actual) => {}
                None => return None,
            }
        }
        Some(params)
    }
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// A path resolved against the route table.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub name: RouteName,
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub requires_auth: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<RouteName>,
}

impl RouteMatch {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Resolves paths and applies the authentication guard to navigations.
///
pub struct Router {
    auth: Arc<AuthStore>,
}

impl Router {
    pub fn new(auth: Arc<AuthStore>) -> Self {
        Router { auth }
    }

    /// Match a path against the route table. Query strings and fragments
    /// are ignored; unknown paths resolve to the not-found route.
    ///
    pub fn resolve(&self, path: &str) -> RouteMatch {
        let clean = path.split(&['?', '#'][..]).next().unwrap_or_default();
        let segments = split_segments(clean);
        let normalized = format!("/{}", segments.join("/"));

        for def in ROUTES {
            if let Some(params) = def.matches(&segments) {
                return RouteMatch {
                    name: def.name,
                    path: normalized,
                    params,
                    requires_auth: def.requires_auth,
                    redirect: def.redirect,
                };
            }
        }

        RouteMatch {
            name: RouteName::NotFound,
            path: normalized,
            params: BTreeMap::new(),
            requires_auth: false,
            redirect: None,
        }
    }

    fn named(&self, name: RouteName) -> RouteMatch {
        match ROUTES.iter().find(|def| def.name == name) {
            Some(def) => self.resolve(def.pattern),
            None => self.resolve("/404"),
        }
    }

    /// Navigate to a path, following guard and route redirects, and return
    /// the route that is finally displayed.
    ///
    pub fn navigate(&self, path: &str) -> Result<RouteMatch, RouterError> {
        let mut target = self.resolve(path);
        for _ in 0..MAX_REDIRECTS {
            let next = match guard(&target, self.auth.is_logged_in()) {
                GuardOutcome::Proceed => match target.redirect {
                    Some(name) => name,
                    None => {
                        debug!("Navigated to '{}' ({}).", target.path, target.name);
                        return Ok(target);
                    }
                },
                GuardOutcome::RedirectToLogin => {
                    info!("'{}' requires authentication, redirecting to login.", target.path);
                    RouteName::Login
                }
                GuardOutcome::RedirectToLanding => {
                    debug!("Already logged in, redirecting to {}.", LANDING);
                    LANDING
                }
            };
            target = self.named(next);
        }
        Err(RouterError::TooManyRedirects {
            path: path.to_owned(),
        })
    }
}
