//! Route definitions for the Hospitix web server
//!
//! Only form targets get explicit routes. Every other GET goes to the page
//! fallback, which consults the role router.

use crate::{auth, handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/session", get(handlers::session_info))
}

/// Login, registration and logout form targets
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/auth/login",
            get(handlers::page).post(auth::handlers::login),
        )
        .route(
            "/auth/signup/patient",
            get(handlers::page).post(auth::handlers::signup_patient),
        )
        .route(
            "/auth/signup/doctor",
            get(handlers::page).post(auth::handlers::signup_staff),
        )
        .route("/auth/logout", post(auth::handlers::logout))
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route(
        handlers::AI_CHAT_PATH,
        get(handlers::page).post(handlers::ai_chat),
    )
}

/// Create all routes combined
pub fn all_routes() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .merge(auth_routes())
        .merge(dashboard_routes())
        .fallback(handlers::page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppState, WebConfig};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use hospitix_applications::{
        session::MemoryStorage, HealthAssistantClient, HospitixApplication, SessionStore,
        DEMO_SECRET,
    };
    use hospitix_core::AssistantConfig;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn test_state() -> AppState {
        let session = SessionStore::new(Arc::new(MemoryStorage::default()));
        session.restore().await;
        let assistant = HealthAssistantClient::new(&AssistantConfig::default()).unwrap();

        AppState::with_application(
            WebConfig::default(),
            HospitixApplication {
                session: Arc::new(session),
                assistant: Arc::new(assistant),
            },
        )
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn location(response: &axum::response::Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_health_check_route() {
        let app = api_routes().with_state(test_state().await);

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_anonymous_dashboard_redirects_to_login() {
        let app = all_routes().with_state(test_state().await);

        let response = app
            .oneshot(get_request("/dashboard/doctor/patients"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/auth/login");
    }

    #[tokio::test]
    async fn test_login_page_renders_for_anonymous() {
        let app = all_routes().with_state(test_state().await);

        let response = app.oneshot(get_request("/auth/login")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("name=\"identifier\""));
    }

    #[tokio::test]
    async fn test_wrong_role_is_redirected_to_unauthorized() {
        let state = test_state().await;
        assert!(state.session().login("patient", DEMO_SECRET).await.unwrap());
        let app = all_routes().with_state(state);

        let response = app
            .oneshot(get_request("/dashboard/doctor/appointments"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/unauthorized");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let app = all_routes().with_state(test_state().await);

        let response = app.oneshot(get_request("/no/such/page")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_login_form_redirects_to_landing_path() {
        let app = all_routes().with_state(test_state().await);

        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("identifier=assistant%40demo.com&password=demo123"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard/assistant");
    }
}
