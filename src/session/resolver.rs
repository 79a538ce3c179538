//! Identity resolution against `api/account`.
//!
//! A failed fetch is not an error for callers: it resolves the session as
//! anonymous and only the log keeps the cause. Concurrent calls are not
//! coalesced; whichever response lands last defines the stored identity.

use super::{store::SessionStore, types::Identity};
use crate::api::{paths, ApiClient};
use tracing::{debug, instrument, warn};

#[derive(Clone, Debug)]
pub struct IdentityResolver {
    client: ApiClient,
    store: SessionStore,
}

impl IdentityResolver {
    #[must_use]
    pub fn new(client: ApiClient, store: SessionStore) -> Self {
        Self { client, store }
    }

    /// Fetches the current identity and records it in the store.
    /// With `force`, the stored identity is forgotten before the request starts.
    #[instrument(skip(self))]
    pub async fn resolve(&self, force: bool) -> Option<Identity> {
        if force {
            self.store.begin_forced_resolution();
        }

        let identity = match self.client.get_json::<Identity>(paths::ACCOUNT).await {
            Ok(identity) => {
                debug!(anonymous = !identity.has_login(), "identity fetched");
                Some(identity)
            }
            Err(err) => {
                warn!(error = %err, "identity resolution failed; continuing as anonymous");
                None
            }
        };

        self.store.complete_resolution(identity.clone());
        identity
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }
}
