//! Login, registration and logout handlers

use super::forms::{LoginForm, PatientSignupForm, StaffSignupForm};
use crate::{
    handlers::{html, render_auth_view},
    templates::LoginTemplate,
    AppState, WebResult,
};
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use hospitix_applications::routing::LOGIN_PATH;
use hospitix_applications::{landing_path, AuthView, RegistrationProfile, Role};
use hospitix_core::HospitixError;
use tracing::{info, warn};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Try demo: patient@demo.com / demo123";

const REGISTRATION_FAILED: &str = "Registration failed. Please try again";

fn form_message(err: HospitixError) -> String {
    err.log();
    match err {
        HospitixError::Validation { message, .. } => message,
        other => other.to_string(),
    }
}

/// Send the visitor to whatever the session now lands on
async fn redirect_to_landing(state: &AppState) -> Response {
    let target = state
        .session()
        .state()
        .await
        .role()
        .map(landing_path)
        .unwrap_or(LOGIN_PATH);
    Redirect::to(target).into_response()
}

fn login_page(status: StatusCode, identifier: String, error: String) -> WebResult<Response> {
    html(
        status,
        LoginTemplate {
            title: "Sign in".to_string(),
            identifier,
            error: Some(error),
        },
    )
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> WebResult<Response> {
    if let Err(e) = form.validate() {
        return login_page(StatusCode::BAD_REQUEST, form.identifier, form_message(e));
    }

    if state
        .session()
        .login_detached(form.identifier.trim().to_string(), form.password.clone())
        .await?
    {
        info!("Login succeeded");
        Ok(redirect_to_landing(&state).await)
    } else {
        login_page(
            StatusCode::UNAUTHORIZED,
            form.identifier,
            INVALID_CREDENTIALS.to_string(),
        )
    }
}

async fn register(
    state: &AppState,
    view: AuthView,
    profile: RegistrationProfile,
    role: Role,
) -> WebResult<Response> {
    if state.session().register_detached(profile, role).await? {
        Ok(redirect_to_landing(state).await)
    } else {
        warn!("Registration as {} was not accepted", role);
        render_auth_view(
            view,
            StatusCode::BAD_REQUEST,
            Some(REGISTRATION_FAILED.to_string()),
        )
    }
}

pub async fn signup_patient(
    State(state): State<AppState>,
    Form(form): Form<PatientSignupForm>,
) -> WebResult<Response> {
    if let Err(e) = form.validate() {
        return render_auth_view(
            AuthView::PatientSignup,
            StatusCode::BAD_REQUEST,
            Some(form_message(e)),
        );
    }

    register(&state, AuthView::PatientSignup, form.into_profile(), Role::Patient).await
}

/// Doctor, assistant and pathologist registration
pub async fn signup_staff(
    State(state): State<AppState>,
    Form(form): Form<StaffSignupForm>,
) -> WebResult<Response> {
    let role = match form.validate() {
        Ok(role) => role,
        Err(e) => {
            return render_auth_view(
                AuthView::StaffSignup,
                StatusCode::BAD_REQUEST,
                Some(form_message(e)),
            );
        }
    };

    register(&state, AuthView::StaffSignup, form.into_profile(), role).await
}

pub async fn logout(State(state): State<AppState>) -> WebResult<Response> {
    state.session().logout().await?;
    Ok(Redirect::to(LOGIN_PATH).into_response())
}
