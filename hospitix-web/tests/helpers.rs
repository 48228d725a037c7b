//! Integration test helpers
//!
//! Spawns the full application on an ephemeral port, backed by in-memory
//! session storage and a stub health assistant.

#![allow(dead_code)]

use axum::{routing::post, Json, Router};
use hospitix_core::StorageBackend;
use hospitix_web::{create_app, AppState, WebConfig};
use serde_json::{json, Value};
use std::sync::LazyLock;
use tokio::net::TcpListener;

// Make sure tracing is only initialized once
static TRACING: LazyLock<()> = LazyLock::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
});

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.api_client
            .post(format!("{}{}", &self.address, path))
            .form(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login(&self, identifier: &str, password: &str) -> reqwest::Response {
        self.post_form(
            "/auth/login",
            &[("identifier", identifier), ("password", password)],
        )
        .await
    }

    pub async fn post_logout(&self) -> reqwest::Response {
        self.post_form("/auth/logout", &[]).await
    }

    pub async fn post_chat_question(&self, question: &str) -> reqwest::Response {
        let form = reqwest::multipart::Form::new().text("question", question.to_string());
        self.api_client
            .post(format!("{}/dashboard/patient/ai-chat-symptoms", &self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_symptoms(&self, symptoms: &str) -> reqwest::Response {
        let form = reqwest::multipart::Form::new().text("symptoms", symptoms.to_string());
        self.api_client
            .post(format!("{}/dashboard/patient/ai-chat-symptoms", &self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_session(&self) -> Value {
        self.get("/api/session")
            .await
            .json()
            .await
            .expect("Session response was not JSON")
    }
}

/// Location header of a redirect response
pub fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Stub of the external health assistant
async fn spawn_assistant() -> String {
    let app = Router::new()
        .route(
            "/ask-healthbot",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "answer": format!("Stub answer to: {}", body["question"].as_str().unwrap_or_default())
                }))
            }),
        )
        .route(
            "/analyze-symptoms",
            post(|| async {
                Json(json!({
                    "severity": "low",
                    "possibleConditions": ["Seasonal allergy"],
                    "recommendations": ["Antihistamines"],
                    "urgency": "No urgent care needed",
                    "disclaimer": "This is not medical advice"
                }))
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind assistant stub");
    let address = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    address
}

pub async fn spawn_app() -> TestApp {
    LazyLock::force(&TRACING);

    let assistant_url = spawn_assistant().await;
    let config = WebConfig {
        port: 0,
        session_storage: Some(StorageBackend::Memory),
        auth_delay_ms: Some(0),
        assistant_url: Some(assistant_url),
        ..Default::default()
    };

    let state = AppState::new(config)
        .await
        .expect("Failed to build application state");
    let app = create_app(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        address,
        port,
        api_client,
    }
}
