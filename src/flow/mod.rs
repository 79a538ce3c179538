//! Page controllers driving the session core: login, logout, password
//! recovery, the home page and the navigation bar. Controllers own no routing;
//! they ask a `Navigator`.

pub mod forgot_password;
pub mod home;
pub mod login;
pub mod logout;
pub mod navbar;
pub mod navigation;
pub mod reset_password;

pub use forgot_password::{ForgotPasswordController, ForgotPasswordStatus};
pub use home::{HomeController, HomeView};
pub use login::{LoginController, LoginFailure, LoginForm, LoginStatus};
pub use logout::{LogoutController, LogoutOutcome};
pub use navbar::{NavbarController, NavbarView};
pub use navigation::{
    query_param, service_referer, LogNavigator, Navigation, Navigator, RecordingNavigator, Route,
};
pub use reset_password::{ResetPasswordController, ResetPasswordStatus};
