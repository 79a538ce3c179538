//! Navigation bar view model: who is signed in and whether the admin menu shows.
//! Fields stay `None` until the session is resolved, so the bar renders nothing
//! rather than a wrong state.

use super::logout::{LogoutController, LogoutOutcome};
use super::navigation::Navigator;
use crate::app::App;
use crate::session::{Identity, SessionSnapshot, Subscription};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavbarView {
    pub is_authenticated: Option<bool>,
    pub is_admin: Option<bool>,
    pub user: Option<Identity>,
}

impl NavbarView {
    fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self {
            is_authenticated: Some(snapshot.authenticated),
            is_admin: Some(snapshot.is_admin()),
            user: snapshot.identity.clone(),
        }
    }
}

#[derive(Debug)]
pub struct NavbarController {
    view: Arc<Mutex<NavbarView>>,
    logout: LogoutController,
    _subscription: Subscription,
}

impl NavbarController {
    #[must_use]
    pub fn init(app: &App, navigator: Arc<dyn Navigator>) -> Self {
        let view = Arc::new(Mutex::new(NavbarView::default()));

        let snapshot = app.store().snapshot();
        if snapshot.resolved {
            *view.lock().unwrap_or_else(PoisonError::into_inner) =
                NavbarView::from_snapshot(&snapshot);
        }

        let target = Arc::clone(&view);
        let subscription = app.store().subscribe(move |snapshot| {
            *target.lock().unwrap_or_else(PoisonError::into_inner) =
                NavbarView::from_snapshot(snapshot);
        });

        Self {
            view,
            logout: LogoutController::new(app, navigator, None),
            _subscription: subscription,
        }
    }

    #[must_use]
    pub fn view(&self) -> NavbarView {
        self.view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn logout(&self) -> LogoutOutcome {
        self.logout.run().await
    }
}
