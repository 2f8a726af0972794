pub mod controller;
pub mod error;
pub mod form;
pub mod format;
pub mod service;
pub mod settings;

pub use controller::{ControllerState, FormController, StudentMode};
pub use error::{ControllerError, ErrorCategory, ServiceError};
pub use form::{Alert, AlertKind, FeeEntryPage, FeeForm, InputField, PaymentRow};
pub use format::Presentation;
pub use service::{FeeService, HttpFeeService};
pub use settings::{load_settings, ClientSettings};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
