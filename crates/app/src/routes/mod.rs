pub mod login;
pub mod not_found;
pub mod schools;

use dioxus::prelude::*;

use login::Login;
use not_found::NotFound;
use schools::SchoolsPage;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    SchoolsPage {},
    #[route("/login?:redirect")]
    Login { redirect: Option<String> },
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}
