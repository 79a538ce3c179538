//! Navigation boundary for the flow controllers. Routing itself belongs to the
//! host (browser shell, CLI); controllers only say where to go, either as an
//! in-app route change or as a full location change to an external URL.

use std::borrow::Cow;
use std::sync::{Mutex, PoisonError};
use tracing::info;
use url::Url;

/// Query parameter carrying the caller's return URL through login and logout.
pub const SERVICE_REFERER: &str = "serviceReferer";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login { service_referer: Option<String> },
}

impl Route {
    /// In-app path, with the service referer re-appended for the login route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login {
                service_referer: Some(referer),
            } => {
                let query = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair(SERVICE_REFERER, referer)
                    .finish();
                format!("/login?{query}")
            }
            Route::Login {
                service_referer: None,
            } => "/login".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Route(Route),
    Redirect(String),
}

pub trait Navigator: Send + Sync {
    /// In-app route change.
    fn navigate(&self, route: Route);
    /// Full location change, used for post-login destinations outside the app.
    fn redirect(&self, url: &str);
}

/// Navigator that only logs the requested destination.
#[derive(Clone, Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        info!(path = %route.path(), "navigate");
    }

    fn redirect(&self, url: &str) {
        info!(url = %url, "redirect");
    }
}

/// Navigator that keeps every request in order, so callers can report where a
/// flow ended.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Navigation>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn history(&self) -> Vec<Navigation> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<Navigation> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn push(&self, navigation: Navigation) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(navigation);
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        info!(path = %route.path(), "navigate");
        self.push(Navigation::Route(route));
    }

    fn redirect(&self, url: &str) {
        info!(url = %url, "redirect");
        self.push(Navigation::Redirect(url.to_string()));
    }
}

/// Reads a non-empty `serviceReferer` from a page URL.
#[must_use]
pub fn service_referer(page_url: &str) -> Option<String> {
    query_param(page_url, SERVICE_REFERER)
}

/// Reads a non-empty query parameter from a page URL.
///
/// Hash-routed pages (`https://host/#/login?serviceReferer=...`) carry the query
/// inside the fragment, so the fragment is searched when the query has none.
#[must_use]
pub fn query_param(page_url: &str, name: &str) -> Option<String> {
    let url = Url::parse(page_url).ok()?;

    let from_query = find_param(url.query_pairs(), name);
    if from_query.is_some() {
        return from_query;
    }

    let fragment_query = url.fragment()?.split_once('?')?.1;
    find_param(url::form_urlencoded::parse(fragment_query.as_bytes()), name)
}

fn find_param<'a>(
    mut pairs: impl Iterator<Item = (Cow<'a, str>, Cow<'a, str>)>,
    name: &str,
) -> Option<String> {
    pairs
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
