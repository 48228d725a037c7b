//! HTTP request handlers
//!
//! Page rendering for every routed path, the patient AI chat and the JSON
//! status endpoints.

use crate::{
    auth::{GuardRedirect, GuardedPage, OptionalUser},
    templates::{
        ChatView, DashboardTemplate, ErrorTemplate, LoginTemplate, PatientSignupTemplate,
        SignupTemplate, StaffSignupTemplate, UnauthorizedTemplate, ASSIGNABLE_DOCTORS,
        DEPARTMENTS,
    },
    AppState, WebError, WebResult,
};
use askama::Template;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use hospitix_applications::routing::{navigation_for, settings_path, LOGIN_PATH};
use hospitix_applications::{
    landing_path, ApplicationError, AuthView, Identity, Page, ProtectedRoute, SessionState,
    SymptomImage,
};
use serde::Serialize;
use tracing::{debug, warn};

/// The only page with an interactive panel
pub const AI_CHAT_PATH: &str = "/dashboard/patient/ai-chat-symptoms";

const ASSISTANT_UNAVAILABLE: &str =
    "The health assistant is unavailable right now. Please try again later.";

/// Render `template` with `status`
pub(crate) fn html<T: Template>(status: StatusCode, template: T) -> WebResult<Response> {
    Ok((status, Html(template.render()?)).into_response())
}

/// Render whatever page the role router allowed for this request
pub async fn page(guarded: GuardedPage) -> WebResult<Response> {
    let GuardedPage { page, user } = guarded;

    match page {
        Page::Auth(view) => render_auth_view(view, StatusCode::OK, None),
        Page::Protected(route) => {
            let chat = (route.path == AI_CHAT_PATH).then(ChatView::default);
            render_protected(route, user, chat, StatusCode::OK)
        }
        Page::Unauthorized => html(
            StatusCode::FORBIDDEN,
            UnauthorizedTemplate {
                title: "Access Denied".to_string(),
                landing_path: user.map(|identity| landing_path(identity.role)),
            },
        ),
        Page::NotFound => not_found(),
    }
}

pub(crate) fn render_auth_view(
    view: AuthView,
    status: StatusCode,
    error: Option<String>,
) -> WebResult<Response> {
    match view {
        AuthView::Login => html(
            status,
            LoginTemplate {
                title: "Sign in".to_string(),
                identifier: String::new(),
                error,
            },
        ),
        AuthView::Signup => html(
            status,
            SignupTemplate {
                title: "Create an account".to_string(),
            },
        ),
        AuthView::PatientSignup => html(
            status,
            PatientSignupTemplate {
                title: "Patient registration".to_string(),
                error,
            },
        ),
        AuthView::StaffSignup => html(
            status,
            StaffSignupTemplate {
                title: "Staff registration".to_string(),
                error,
                doctors: ASSIGNABLE_DOCTORS,
                departments: DEPARTMENTS,
            },
        ),
    }
}

fn render_protected(
    route: &'static ProtectedRoute,
    user: Option<Identity>,
    chat: Option<ChatView>,
    status: StatusCode,
) -> WebResult<Response> {
    // The router only renders protected pages for a session holder
    let Some(user) = user else {
        return Ok(GuardRedirect(LOGIN_PATH).into_response());
    };

    html(
        status,
        DashboardTemplate {
            title: route.title.to_string(),
            current_path: route.path.to_string(),
            nav: navigation_for(user.role),
            settings_path: settings_path(user.role),
            user,
            chat,
        },
    )
}

fn not_found() -> WebResult<Response> {
    html(
        StatusCode::NOT_FOUND,
        ErrorTemplate {
            title: "Page not found".to_string(),
            error_code: 404,
            error_message: "The page you are looking for does not exist.".to_string(),
        },
    )
}

/// A question, or a symptom description with an optional photo
#[derive(Debug, Default)]
struct ChatSubmission {
    question: String,
    symptoms: String,
    image: Option<SymptomImage>,
}

async fn read_chat_submission(mut multipart: Multipart) -> WebResult<ChatSubmission> {
    let mut submission = ChatSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::Form(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "question" => {
                submission.question = field.text().await.map_err(|e| WebError::Form(e.to_string()))?;
            }
            "symptoms" => {
                submission.symptoms = field.text().await.map_err(|e| WebError::Form(e.to_string()))?;
            }
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| WebError::Form(e.to_string()))?;

                // Browsers send an empty part when no file was chosen
                if !data.is_empty() {
                    submission.image = Some(SymptomImage {
                        file_name,
                        content_type,
                        data: data.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(submission)
}

/// Patient AI chat: ask a question or analyze symptoms
pub async fn ai_chat(
    State(state): State<AppState>,
    guarded: GuardedPage,
    multipart: Multipart,
) -> WebResult<Response> {
    let Page::Protected(route) = guarded.page else {
        return not_found();
    };
    let submission = read_chat_submission(multipart).await?;
    let assistant = &state.application.assistant;

    let mut chat = ChatView {
        question: submission.question.clone(),
        ..Default::default()
    };

    let outcome = if submission.symptoms.trim().is_empty() && submission.image.is_none() {
        assistant.ask(&submission.question).await.map(|answer| {
            chat.answer = Some(answer);
        })
    } else {
        assistant
            .analyze_symptoms(&submission.symptoms, submission.image)
            .await
            .map(|analysis| {
                chat.analysis = Some(analysis);
            })
    };

    let status = match outcome {
        Ok(()) => StatusCode::OK,
        Err(ApplicationError::Validation { message, .. }) => {
            chat.error = Some(message);
            StatusCode::UNPROCESSABLE_ENTITY
        }
        Err(e) => {
            warn!("Health assistant request failed: {}", e);
            chat.error = Some(ASSISTANT_UNAVAILABLE.to_string());
            StatusCode::BAD_GATEWAY
        }
    };

    render_protected(route, guarded.user, Some(chat), status)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub loading: bool,
    pub state: SessionState,
    pub user: Option<Identity>,
    pub landing_path: Option<&'static str>,
}

/// Snapshot of the single session
pub async fn session_info(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Json<SessionResponse> {
    let session_state = match &user {
        Some(identity) => SessionState::Authenticated(identity.role),
        None => SessionState::Anonymous,
    };
    debug!("Session queried: {}", session_state);

    Json(SessionResponse {
        authenticated: session_state.is_authenticated(),
        loading: state.session().is_loading(),
        landing_path: session_state.role().map(landing_path),
        state: session_state,
        user,
    })
}
