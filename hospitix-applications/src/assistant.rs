//! Health assistant client
//!
//! Typed client for the symptom analysis and health question endpoints used
//! by the patient AI chat page.

use crate::{ApplicationError, ApplicationResult};
use hospitix_core::AssistantConfig;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Largest image accepted alongside a symptom description
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// Structured result of a symptom analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAnalysis {
    pub severity: Severity,
    pub possible_conditions: Vec<String>,
    pub recommendations: Vec<String>,
    pub urgency: String,
    pub disclaimer: String,
}

/// Optional photo attached to a symptom report
#[derive(Debug, Clone)]
pub struct SymptomImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Serialize)]
struct QuestionRequest<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct AnswerResponse {
    answer: String,
}

#[derive(Debug, Clone)]
pub struct HealthAssistantClient {
    client: reqwest::Client,
    base_url: String,
}

impl HealthAssistantClient {
    pub fn new(config: &AssistantConfig) -> ApplicationResult<Self> {
        reqwest::Url::parse(&config.base_url).map_err(|e| {
            ApplicationError::assistant(format!("Invalid base URL {}: {}", config.base_url, e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    /// Ask a free-text health question
    pub async fn ask(&self, question: &str) -> ApplicationResult<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ApplicationError::validation(
                "Please enter a question",
                "question",
            ));
        }

        debug!("Asking health bot ({} chars)", question.len());
        let response = self
            .client
            .post(self.endpoint("ask-healthbot"))
            .json(&QuestionRequest { question })
            .send()
            .await?
            .error_for_status()?;

        let body: AnswerResponse = response.json().await?;
        Ok(body.answer)
    }

    /// Submit a symptom description, optionally with a photo
    pub async fn analyze_symptoms(
        &self,
        symptoms: &str,
        image: Option<SymptomImage>,
    ) -> ApplicationResult<SymptomAnalysis> {
        let symptoms = symptoms.trim();
        if symptoms.is_empty() {
            return Err(ApplicationError::validation(
                "Please describe your symptoms before analyzing",
                "symptoms",
            ));
        }

        let mut form = Form::new().text("symptoms", symptoms.to_string());
        if let Some(image) = image {
            if image.data.len() > MAX_IMAGE_BYTES {
                warn!("Rejected {} byte symptom image", image.data.len());
                return Err(ApplicationError::validation(
                    "Please upload an image smaller than 5MB",
                    "image",
                ));
            }
            let part = Part::bytes(image.data)
                .file_name(image.file_name)
                .mime_str(&image.content_type)?;
            form = form.part("image", part);
        }

        let response = self
            .client
            .post(self.endpoint("analyze-symptoms"))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let analysis: SymptomAnalysis = response.json().await?;
        info!("Symptom analysis returned {:?} severity", analysis.severity);
        Ok(analysis)
    }
}
