//! Session extractors
//!
//! Handlers never read the session directly. They take [`GuardedPage`], which
//! runs the role router for the request path, or [`OptionalUser`].

pub mod forms;
pub mod handlers;

use crate::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use hospitix_applications::{navigate, Identity, Navigation, Page};
use std::convert::Infallible;
use tracing::debug;

/// The identity held by the session, if any
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<Identity>);

impl<S> FromRequestParts<S> for OptionalUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        Ok(OptionalUser(app_state.session().current().await))
    }
}

/// Redirect issued by the role router
#[derive(Debug)]
pub struct GuardRedirect(pub &'static str);

impl IntoResponse for GuardRedirect {
    fn into_response(self) -> Response {
        Redirect::temporary(self.0).into_response()
    }
}

/// A page the current session may render at the request path
#[derive(Debug, Clone)]
pub struct GuardedPage {
    pub page: Page,
    pub user: Option<Identity>,
}

impl<S> FromRequestParts<S> for GuardedPage
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = GuardRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let user = app_state.session().current().await;
        let role = user.as_ref().map(|identity| identity.role);

        match navigate(role, parts.uri.path()) {
            Navigation::Render(page) => Ok(GuardedPage { page, user }),
            Navigation::Redirect(target) => {
                debug!("Redirecting {} to {}", parts.uri.path(), target);
                Err(GuardRedirect(target))
            }
        }
    }
}
