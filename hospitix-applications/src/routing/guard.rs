//! Navigation guard

use super::routes::{resolve, AuthView, ProtectedRoute, Route};
use super::{LOGIN_PATH, UNAUTHORIZED_PATH};
use hospitix_core::Role;
use tracing::{debug, warn};

/// A page the host should render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Auth(AuthView),
    Protected(&'static ProtectedRoute),
    Unauthorized,
    NotFound,
}

/// Outcome of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Page),
    Redirect(&'static str),
}

/// Default view for each role after authentication
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Patient => "/dashboard/patient",
        Role::Doctor => "/dashboard/doctor",
        Role::Assistant => "/dashboard/assistant",
        Role::Pathology => "/dashboard/pathology",
    }
}

pub fn is_authorized(role: Role, allowed: &[Role]) -> bool {
    allowed.contains(&role)
}

/// Decide what happens when the holder of `role` (or nobody) requests `path`
pub fn navigate(role: Option<Role>, path: &str) -> Navigation {
    let decision = match (resolve(path), role) {
        (Route::Unauthorized, _) => Navigation::Render(Page::Unauthorized),
        (Route::NotFound, _) => Navigation::Render(Page::NotFound),

        (Route::Auth(view), None) => Navigation::Render(Page::Auth(view)),
        (Route::Root | Route::DashboardRoot | Route::Protected(_), None) => {
            Navigation::Redirect(LOGIN_PATH)
        }

        (Route::Root | Route::DashboardRoot | Route::Auth(_), Some(role)) => {
            Navigation::Redirect(landing_path(role))
        }
        (Route::Protected(route), Some(role)) => {
            if is_authorized(role, route.allowed) {
                Navigation::Render(Page::Protected(route))
            } else {
                warn!("Role {} denied access to {}", role, route.path);
                Navigation::Redirect(UNAUTHORIZED_PATH)
            }
        }
    };

    debug!(path, ?role, ?decision, "Navigation decided");
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::PROTECTED_ROUTES;

    #[test]
    fn test_anonymous_is_sent_to_login() {
        for path in ["/", "/dashboard", "/dashboard/doctor", "/dashboard/patient/reports"] {
            assert_eq!(navigate(None, path), Navigation::Redirect("/auth/login"));
        }
    }

    #[test]
    fn test_anonymous_can_reach_auth_views() {
        assert_eq!(
            navigate(None, "/auth/login"),
            Navigation::Render(Page::Auth(AuthView::Login))
        );
        assert_eq!(
            navigate(None, "/auth/signup/doctor"),
            Navigation::Render(Page::Auth(AuthView::StaffSignup))
        );
    }

    #[test]
    fn test_roots_and_auth_views_redirect_to_landing() {
        for role in Role::ALL {
            for path in ["/", "/dashboard", "/auth/login", "/auth/signup", "/auth/signup/patient"] {
                assert_eq!(
                    navigate(Some(role), path),
                    Navigation::Redirect(landing_path(role))
                );
            }
        }
    }

    #[test]
    fn test_landing_paths() {
        assert_eq!(landing_path(Role::Patient), "/dashboard/patient");
        assert_eq!(landing_path(Role::Doctor), "/dashboard/doctor");
        assert_eq!(landing_path(Role::Assistant), "/dashboard/assistant");
        assert_eq!(landing_path(Role::Pathology), "/dashboard/pathology");
    }

    #[test]
    fn test_landing_path_renders_for_its_role() {
        for role in Role::ALL {
            assert!(matches!(
                navigate(Some(role), landing_path(role)),
                Navigation::Render(Page::Protected(_))
            ));
        }
    }

    #[test]
    fn test_every_protected_route_is_guarded() {
        for route in PROTECTED_ROUTES {
            for role in Role::ALL {
                let expected = if route.allowed.contains(&role) {
                    Navigation::Render(Page::Protected(route))
                } else {
                    Navigation::Redirect("/unauthorized")
                };
                assert_eq!(navigate(Some(role), route.path), expected);
            }
        }
    }

    #[test]
    fn test_patient_on_doctor_page_is_unauthorized() {
        assert_eq!(
            navigate(Some(Role::Patient), "/dashboard/doctor/appointments"),
            Navigation::Redirect("/unauthorized")
        );
    }

    #[test]
    fn test_unauthorized_and_not_found_render_for_everyone() {
        for role in [None, Some(Role::Doctor)] {
            assert_eq!(
                navigate(role, "/unauthorized"),
                Navigation::Render(Page::Unauthorized)
            );
            assert_eq!(
                navigate(role, "/no/such/page"),
                Navigation::Render(Page::NotFound)
            );
        }
    }

    #[test]
    fn test_is_authorized() {
        assert!(is_authorized(Role::Doctor, &[Role::Doctor, Role::Assistant]));
        assert!(!is_authorized(Role::Pathology, &[Role::Doctor]));
        assert!(!is_authorized(Role::Patient, &[]));
    }
}
