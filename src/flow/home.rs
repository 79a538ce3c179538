//! Home page view model: whether to offer sign-in or the authoring service link.
//! Fields stay `None` until the session is resolved.

use crate::app::App;
use crate::session::{SessionSnapshot, Subscription, SCA_AUTHOR_ROLE};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HomeView {
    pub is_authenticated: Option<bool>,
    pub is_sca_author: Option<bool>,
}

impl HomeView {
    fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self {
            is_authenticated: Some(snapshot.authenticated),
            is_sca_author: Some(snapshot.is_in_role(SCA_AUTHOR_ROLE)),
        }
    }
}

#[derive(Debug)]
pub struct HomeController {
    view: Arc<Mutex<HomeView>>,
    _subscription: Subscription,
}

impl HomeController {
    #[must_use]
    pub fn init(app: &App) -> Self {
        let snapshot = app.store().snapshot();
        let initial = if snapshot.resolved {
            HomeView::from_snapshot(&snapshot)
        } else {
            HomeView::default()
        };
        let view = Arc::new(Mutex::new(initial));

        let target = Arc::clone(&view);
        let subscription = app.store().subscribe(move |snapshot| {
            *target.lock().unwrap_or_else(PoisonError::into_inner) =
                HomeView::from_snapshot(snapshot);
        });

        Self {
            view,
            _subscription: subscription,
        }
    }

    #[must_use]
    pub fn view(&self) -> HomeView {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
