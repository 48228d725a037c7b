//! Route table

use hospitix_core::Role;

/// Views reachable without a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthView {
    Login,
    Signup,
    PatientSignup,
    StaffSignup,
}

impl AuthView {
    pub fn path(&self) -> &'static str {
        match self {
            AuthView::Login => "/auth/login",
            AuthView::Signup => "/auth/signup",
            AuthView::PatientSignup => "/auth/signup/patient",
            AuthView::StaffSignup => "/auth/signup/doctor",
        }
    }
}

/// A page that requires a session holding one of `allowed`
#[derive(Debug, PartialEq, Eq)]
pub struct ProtectedRoute {
    pub path: &'static str,
    pub title: &'static str,
    pub allowed: &'static [Role],
}

const PATIENT: &[Role] = &[Role::Patient];
const DOCTOR: &[Role] = &[Role::Doctor];
const ASSISTANT: &[Role] = &[Role::Assistant];
const PATHOLOGY: &[Role] = &[Role::Pathology];

const fn page(path: &'static str, title: &'static str, allowed: &'static [Role]) -> ProtectedRoute {
    ProtectedRoute {
        path,
        title,
        allowed,
    }
}

pub static PROTECTED_ROUTES: &[ProtectedRoute] = &[
    page("/dashboard/patient", "Patient Dashboard", PATIENT),
    page("/dashboard/patient/book-appointment", "Book Appointment", PATIENT),
    page("/dashboard/patient/book-pathology", "Book Pathology", PATIENT),
    page("/dashboard/patient/ai-chat-symptoms", "AI Health Assistant", PATIENT),
    page("/dashboard/patient/reports", "My Reports", PATIENT),
    page("/dashboard/patient/prescriptions", "Prescriptions", PATIENT),
    page("/dashboard/patient/settings", "Settings", PATIENT),
    page("/dashboard/doctor", "Doctor Dashboard", DOCTOR),
    page("/dashboard/doctor/appointments", "Today's Appointments", DOCTOR),
    page("/dashboard/doctor/patients", "Search Patients", DOCTOR),
    page("/dashboard/doctor/new-patient", "New Patient", DOCTOR),
    page("/dashboard/doctor/prescriptions", "Prescriptions", DOCTOR),
    page("/dashboard/doctor/settings", "Settings", DOCTOR),
    page("/dashboard/assistant", "Assistant Dashboard", ASSISTANT),
    page("/dashboard/assistant/appointments", "Manage Appointments", ASSISTANT),
    page("/dashboard/assistant/substitutes", "Medicine Substitutes", ASSISTANT),
    page("/dashboard/assistant/settings", "Settings", ASSISTANT),
    page("/dashboard/pathology", "Pathology Dashboard", PATHOLOGY),
    page("/dashboard/pathology/requests", "Pathology Requests", PATHOLOGY),
    page("/dashboard/pathology/upload", "Upload Reports", PATHOLOGY),
    page("/dashboard/pathology/settings", "Settings", PATHOLOGY),
];

/// What a requested path refers to, before any session is consulted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Root,
    /// `/dashboard`
    DashboardRoot,
    Auth(AuthView),
    Protected(&'static ProtectedRoute),
    Unauthorized,
    NotFound,
}

/// Strip any query or fragment and trailing slashes
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

pub fn resolve(path: &str) -> Route {
    match normalize(path) {
        "/" => Route::Root,
        "/dashboard" => Route::DashboardRoot,
        "/auth/login" => Route::Auth(AuthView::Login),
        "/auth/signup" => Route::Auth(AuthView::Signup),
        "/auth/signup/patient" => Route::Auth(AuthView::PatientSignup),
        "/auth/signup/doctor" => Route::Auth(AuthView::StaffSignup),
        "/unauthorized" => Route::Unauthorized,
        other => PROTECTED_ROUTES
            .iter()
            .find(|route| route.path == other)
            .map(Route::Protected)
            .unwrap_or(Route::NotFound),
    }
}
