//! Patient AI health assistant page

mod helpers;

use helpers::{location, spawn_app};
use reqwest::StatusCode;

#[tokio::test]
async fn patient_gets_an_answer() {
    let app = spawn_app().await;
    app.post_login("patient@demo.com", "demo123").await;

    let response = app.get("/dashboard/patient/ai-chat-symptoms").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.post_chat_question("Can I take paracetamol?").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Stub answer to: Can I take paracetamol?"));
}

#[tokio::test]
async fn patient_gets_a_symptom_analysis() {
    let app = spawn_app().await;
    app.post_login("patient", "demo123").await;

    let response = app.post_symptoms("sneezing and itchy eyes").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Seasonal allergy"));
    assert!(body.contains("Severity: low"));
}

#[tokio::test]
async fn blank_question_shows_an_error() {
    let app = spawn_app().await;
    app.post_login("patient", "demo123").await;

    let response = app.post_chat_question("   ").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().await.unwrap().contains("Please enter a question"));
}

#[tokio::test]
async fn chat_is_guarded_by_role() {
    let app = spawn_app().await;

    let response = app.post_chat_question("hello").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/auth/login");

    app.post_login("doctor", "demo123").await;
    let response = app.post_chat_question("hello").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/unauthorized");
}
