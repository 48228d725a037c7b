//! Login and registration forms

use hospitix_applications::RegistrationProfile;
use hospitix_core::{validation_error, HospitixResult, Role};
use serde::Deserialize;

pub const MIN_PASSWORD_LEN: usize = 6;

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_password(password: &str, confirm_password: &str) -> HospitixResult<()> {
    if password != confirm_password {
        return Err(validation_error!("Passwords do not match", "confirm_password"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(validation_error!(
            "Password must be at least 6 characters",
            "password"
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    /// Email, username or phone number
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> HospitixResult<()> {
        if !filled(&self.identifier) || self.password.is_empty() {
            return Err(validation_error!("Please fill in all fields"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientSignupForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub username: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl PatientSignupForm {
    pub fn validate(&self) -> HospitixResult<()> {
        if !filled(&self.email) || !filled(&self.phone) || self.password.is_empty() {
            return Err(validation_error!("Please fill in all required fields"));
        }
        check_password(&self.password, &self.confirm_password)
    }

    pub fn into_profile(self) -> RegistrationProfile {
        RegistrationProfile {
            email: self.email.trim().to_string(),
            phone: optional(Some(self.phone)),
            username: optional(self.username),
            name: optional(self.name),
            ..Default::default()
        }
    }
}

/// Doctor, assistant and pathologist registration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaffSignupForm {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub department: String,
    pub specialization: Option<String>,
    pub license_no: Option<String>,
    pub qualification: Option<String>,
    pub assigned_doctor: Option<String>,
}

impl StaffSignupForm {
    /// Check the form and return the role being registered
    pub fn validate(&self) -> HospitixResult<Role> {
        let required = [
            &self.role,
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.department,
        ];
        if required.iter().any(|value| !filled(value)) || self.password.is_empty() {
            return Err(validation_error!("Please fill in all required fields"));
        }

        let role: Role = self.role.trim().parse()?;
        check_password(&self.password, &self.confirm_password)?;

        let present = |value: &Option<String>| value.as_deref().is_some_and(filled);
        match role {
            Role::Patient => Err(validation_error!(
                "Patients register through the patient signup",
                "role"
            )),
            Role::Assistant if !present(&self.assigned_doctor) => Err(validation_error!(
                "Please select an assigned doctor",
                "assigned_doctor"
            )),
            Role::Doctor | Role::Pathology
                if !present(&self.license_no) || !present(&self.qualification) =>
            {
                Err(validation_error!(
                    "License number and qualification are required"
                ))
            }
            Role::Doctor if !present(&self.specialization) => Err(validation_error!(
                "Please enter a specialization",
                "specialization"
            )),
            role => Ok(role),
        }
    }

    pub fn into_profile(self) -> RegistrationProfile {
        RegistrationProfile {
            email: self.email.trim().to_string(),
            phone: optional(Some(self.phone)),
            first_name: optional(Some(self.first_name)),
            last_name: optional(Some(self.last_name)),
            ..Default::default()
        }
    }
}
