//! Session store: the single in-memory holder of the current identity, the
//! derived authentication flag and the resolution status.
//!
//! The store is a cheap `Clone` handle injected into every consumer. Mutation
//! happens only through `authenticate` (logout) and the resolver hooks; each
//! mutation recomputes `authenticated` from the identity in one place and then
//! notifies subscribers synchronously, in registration order, after the lock is
//! released. Notifications are not replayed to late subscribers.

use super::types::{Identity, ADMIN_ROLES};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::debug;

/// Callback registered on the change channel.
pub type Handler = Arc<dyn Fn(&SessionSnapshot) + Send + Sync>;

/// Point-in-time copy of the session state handed to readers and subscribers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSnapshot {
    pub identity: Option<Identity>,
    pub authenticated: bool,
    pub resolved: bool,
}

impl SessionSnapshot {
    #[must_use]
    pub fn is_in_role(&self, role: &str) -> bool {
        in_role(self.authenticated, self.identity.as_ref(), role)
    }

    #[must_use]
    pub fn is_in_any_role<I>(&self, roles: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        roles.into_iter().any(|role| self.is_in_role(role.as_ref()))
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_in_any_role(ADMIN_ROLES)
    }
}

fn in_role(authenticated: bool, identity: Option<&Identity>, role: &str) -> bool {
    authenticated && identity.is_some_and(|identity| identity.has_role(role))
}

#[derive(Default)]
struct SessionInner {
    identity: Option<Identity>,
    authenticated: bool,
    resolved: bool,
    next_subscription: u64,
    subscribers: Vec<(u64, Handler)>,
}

impl SessionInner {
    fn set_identity(&mut self, identity: Option<Identity>) {
        self.authenticated = identity.as_ref().is_some_and(Identity::has_login);
        self.identity = identity;
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            identity: self.identity.clone(),
            authenticated: self.authenticated,
            resolved: self.resolved,
        }
    }

    fn handlers(&self) -> Vec<Handler> {
        self.subscribers
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect()
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<SessionInner>>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        formatter
            .debug_struct("SessionStore")
            .field("authenticated", &inner.authenticated)
            .field("resolved", &inner.resolved)
            .field("subscribers", &inner.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether an identity fetch completed since startup or the last forced reset.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.lock().resolved
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().authenticated
    }

    /// False unless authenticated with a role list containing `role`.
    #[must_use]
    pub fn is_in_role(&self, role: &str) -> bool {
        let inner = self.lock();
        in_role(inner.authenticated, inner.identity.as_ref(), role)
    }

    /// True if any of `roles` passes `is_in_role`; false for an empty list.
    #[must_use]
    pub fn is_in_any_role<I>(&self, roles: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.snapshot().is_in_any_role(roles)
    }

    /// Operator or IMS administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_in_any_role(ADMIN_ROLES)
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.lock().identity.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    /// Replaces the identity, recomputes `authenticated` and notifies subscribers.
    /// `None` clears the session (logout); `resolved` is left as is.
    pub fn authenticate(&self, identity: Option<Identity>) {
        let (snapshot, handlers) = {
            let mut inner = self.lock();
            inner.set_identity(identity);
            (inner.snapshot(), inner.handlers())
        };
        debug!(authenticated = snapshot.authenticated, "session authenticated");
        notify(&snapshot, handlers);
    }

    /// Forgets the identity ahead of a forced fetch so stale reads cannot race it.
    pub(crate) fn begin_forced_resolution(&self) {
        let mut inner = self.lock();
        inner.set_identity(None);
        inner.resolved = false;
    }

    /// Records the outcome of an identity fetch and notifies subscribers.
    pub(crate) fn complete_resolution(&self, identity: Option<Identity>) {
        let (snapshot, handlers) = {
            let mut inner = self.lock();
            inner.set_identity(identity);
            inner.resolved = true;
            (inner.snapshot(), inner.handlers())
        };
        debug!(authenticated = snapshot.authenticated, "session resolved");
        notify(&snapshot, handlers);
    }

    /// Registers a change handler until the returned handle is dropped.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&SessionSnapshot) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        inner.next_subscription += 1;
        let id = inner.next_subscription;
        inner.subscribers.push((id, Arc::new(handler)));

        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

fn notify(snapshot: &SessionSnapshot, handlers: Vec<Handler>) {
    for handler in handlers {
        handler(snapshot);
    }
}

/// Registration handle on the store's change channel.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    store: Weak<Mutex<SessionInner>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.store.upgrade() else {
            return;
        };
        // The handler may own other subscriptions; drop it after the lock is released.
        let removed = {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner
                .subscribers
                .iter()
                .position(|(id, _)| *id == self.id)
                .map(|index| inner.subscribers.remove(index))
        };
        drop(removed);
    }
}
