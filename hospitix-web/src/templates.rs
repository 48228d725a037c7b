//! Template system for server-side rendering
//!
//! Askama templates for the auth views, the role dashboards and the
//! error pages.

use askama::Template;
use hospitix_applications::routing::NavItem;
use hospitix_applications::{Identity, SymptomAnalysis};

/// Assigned doctors offered on the assistant signup
pub const ASSIGNABLE_DOCTORS: &[&str] = &[
    "Dr. Smith (Cardiology)",
    "Dr. Johnson (Neurology)",
    "Dr. Williams (Orthopedics)",
    "Dr. Brown (Pediatrics)",
];

pub const DEPARTMENTS: &[&str] = &[
    "cardiology",
    "neurology",
    "orthopedics",
    "pediatrics",
    "emergency",
    "radiology",
    "pathology",
];

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub title: String,
    pub identifier: String,
    pub error: Option<String>,
}

/// Chooser between patient and staff registration
#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub title: String,
}

#[derive(Template)]
#[template(path = "patient_signup.html")]
pub struct PatientSignupTemplate {
    pub title: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "staff_signup.html")]
pub struct StaffSignupTemplate {
    pub title: String,
    pub error: Option<String>,
    pub doctors: &'static [&'static str],
    pub departments: &'static [&'static str],
}

/// Any protected page: sidebar plus a placeholder body
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub title: String,
    pub user: Identity,
    pub current_path: String,
    pub nav: &'static [NavItem],
    pub settings_path: &'static str,
    pub chat: Option<ChatView>,
}

/// State of the AI health assistant panel
#[derive(Debug, Default)]
pub struct ChatView {
    pub question: String,
    pub answer: Option<String>,
    pub analysis: Option<SymptomAnalysis>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "unauthorized.html")]
pub struct UnauthorizedTemplate {
    pub title: String,
    /// Where "back to dashboard" points, if someone is logged in
    pub landing_path: Option<&'static str>,
}

/// Error page template
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub error_code: u16,
    pub error_message: String,
}
