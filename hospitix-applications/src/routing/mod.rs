//! Role Router / Guard
//!
//! Turns `(current role, requested path)` into a navigation decision.

pub mod guard;
pub mod navigation;
pub mod routes;

pub use guard::{is_authorized, landing_path, navigate, Navigation, Page};
pub use navigation::{navigation_for, settings_path, NavItem};
pub use routes::{resolve, AuthView, ProtectedRoute, Route, PROTECTED_ROUTES};

/// Where anonymous visitors are sent
pub const LOGIN_PATH: &str = "/auth/login";

/// Where authenticated visitors without the required role are sent
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";
