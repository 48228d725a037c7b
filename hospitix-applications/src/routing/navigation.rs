//! Sidebar navigation per role

use hospitix_core::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
}

const fn item(path: &'static str, label: &'static str) -> NavItem {
    NavItem { path, label }
}

const PATIENT_NAV: &[NavItem] = &[
    item("/dashboard/patient", "Dashboard"),
    item("/dashboard/patient/book-appointment", "Book Appointment"),
    item("/dashboard/patient/book-pathology", "Book Pathology"),
    item("/dashboard/patient/ai-chat-symptoms", "AI Health Assistant"),
    item("/dashboard/patient/reports", "My Reports"),
    item("/dashboard/patient/prescriptions", "Prescriptions"),
];

const DOCTOR_NAV: &[NavItem] = &[
    item("/dashboard/doctor", "Dashboard"),
    item("/dashboard/doctor/appointments", "Today's Appointments"),
    item("/dashboard/doctor/patients", "Search Patients"),
    item("/dashboard/doctor/new-patient", "New Patient"),
    item("/dashboard/doctor/prescriptions", "Prescriptions"),
];

const ASSISTANT_NAV: &[NavItem] = &[
    item("/dashboard/assistant", "Dashboard"),
    item("/dashboard/assistant/appointments", "Manage Appointments"),
    item("/dashboard/assistant/substitutes", "Medicine Substitutes"),
];

const PATHOLOGY_NAV: &[NavItem] = &[
    item("/dashboard/pathology", "Dashboard"),
    item("/dashboard/pathology/requests", "Pathology Requests"),
    item("/dashboard/pathology/upload", "Upload Reports"),
];

pub fn navigation_for(role: Role) -> &'static [NavItem] {
    match role {
        Role::Patient => PATIENT_NAV,
        Role::Doctor => DOCTOR_NAV,
        Role::Assistant => ASSISTANT_NAV,
        Role::Pathology => PATHOLOGY_NAV,
    }
}

pub fn settings_path(role: Role) -> &'static str {
    match role {
        Role::Patient => "/dashboard/patient/settings",
        Role::Doctor => "/dashboard/doctor/settings",
        Role::Assistant => "/dashboard/assistant/settings",
        Role::Pathology => "/dashboard/pathology/settings",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{landing_path, navigate, Navigation, Page};

    #[test]
    fn test_every_menu_entry_renders_for_its_role() {
        for role in Role::ALL {
            let targets = navigation_for(role)
                .iter()
                .map(|item| item.path)
                .chain(std::iter::once(settings_path(role)));

            for path in targets {
                assert!(
                    matches!(navigate(Some(role), path), Navigation::Render(Page::Protected(_))),
                    "{} cannot open {}",
                    role,
                    path
                );
            }
        }
    }

    #[test]
    fn test_menu_starts_at_landing_path() {
        for role in Role::ALL {
            assert_eq!(navigation_for(role)[0].path, landing_path(role));
        }
    }
}
