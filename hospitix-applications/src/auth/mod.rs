//! Authentication data: the demo directory and registration profiles

pub mod directory;
pub mod profile;

pub use directory::{DemoDirectory, DEMO_SECRET};
pub use profile::RegistrationProfile;
