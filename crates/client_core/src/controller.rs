//! Fee entry controller: validates the form, talks to the [`FeeService`] and
//! binds the answer back into the [`FeeEntryPage`].
//!
//! Both actions borrow the controller mutably for the whole request, so a
//! second action cannot start before the first one has been applied.

use shared::{
    domain::{StudentId, StudentIdentity, StudentRecord},
    protocol::PaymentRequest,
};
use tracing::{error, info, warn};

use crate::{
    error::{ControllerError, ServiceError},
    form::{Alert, FeeEntryPage, FeeForm, PaymentRow},
    format::{fixed2, parse_decimal, Presentation},
    service::FeeService,
};

pub const LOOKUP_MISSING_IDENTITY: &str = "Please fill Grade, First Name, and Last Name.";
pub const SUBMIT_MISSING_IDENTITY: &str = "Grade, First Name, and Last Name are required.";
pub const MISSING_PAYMENT: &str = "Please enter a payment amount.";
pub const INVALID_PAYMENT: &str = "Payment amount must be a number.";
pub const MISSING_TOTAL_FEE: &str = "Please enter Total Fee for new student.";
pub const INVALID_TOTAL_FEE: &str = "Total Fee must be a number.";
pub const LOOKUP_FAILED: &str = "An error occurred while looking up the student.";
pub const PAYMENT_FAILED: &str = "An error occurred while recording payment.";
pub const PAYMENT_RECORDED: &str = "Payment recorded successfully.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub current_student_id: Option<StudentId>,
    pub is_existing_student: bool,
}

impl ControllerState {
    fn existing(student_id: StudentId) -> Self {
        Self {
            current_student_id: Some(student_id),
            is_existing_student: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentMode {
    Existing(StudentId),
    New,
}

pub struct FormController<S: FeeService> {
    service: S,
    presentation: Presentation,
    state: ControllerState,
    page: FeeEntryPage,
}

impl<S: FeeService> FormController<S> {
    pub fn new(service: S, presentation: Presentation) -> Self {
        Self {
            service,
            presentation,
            state: ControllerState::default(),
            page: FeeEntryPage::default(),
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn page(&self) -> &FeeEntryPage {
        &self.page
    }

    /// Inputs as the user edits them. Read-only fields reject
    /// [`InputField::enter`](crate::form::InputField::enter).
    pub fn form_mut(&mut self) -> &mut FeeForm {
        &mut self.page.form
    }

    pub fn dismiss_alert(&mut self) {
        self.page.alert = None;
    }

    pub async fn lookup(&mut self) -> Result<StudentMode, ControllerError> {
        self.dismiss_alert();
        let identity = self.identity();
        if !identity.is_complete() {
            return Err(self.fail(ControllerError::validation(LOOKUP_MISSING_IDENTITY)));
        }

        match self.service.lookup_student(&identity).await {
            Ok(Some(record)) => {
                info!(student_id = record.student_id.0, "existing student found");
                let student_id = record.student_id;
                self.populate(&identity, &record);
                Ok(StudentMode::Existing(student_id))
            }
            Ok(None) => {
                info!(grade = %identity.grade, "no record found, switching to new student");
                self.show_new_student(&identity);
                Ok(StudentMode::New)
            }
            Err(err) => Err(self.fail(map_service_error(err, LOOKUP_FAILED))),
        }
    }

    pub async fn submit_payment(&mut self) -> Result<StudentRecord, ControllerError> {
        self.dismiss_alert();
        let identity = self.identity();
        if !identity.is_complete() {
            return Err(self.fail(ControllerError::validation(SUBMIT_MISSING_IDENTITY)));
        }

        let payment_raw = self.page.form.new_payment.trimmed().to_string();
        if payment_raw.is_empty() {
            return Err(self.fail(ControllerError::validation(MISSING_PAYMENT)));
        }
        let Some(payment_amount) = parse_decimal(&payment_raw) else {
            return Err(self.fail(ControllerError::validation(INVALID_PAYMENT)));
        };

        // Existing totals belong to the server; only a new student sends one.
        let total_fees = if self.state.is_existing_student {
            None
        } else {
            let total_raw = self.page.form.total_fee.trimmed().to_string();
            if total_raw.is_empty() {
                return Err(self.fail(ControllerError::validation(MISSING_TOTAL_FEE)));
            }
            match parse_decimal(&total_raw) {
                Some(total) => Some(total),
                None => return Err(self.fail(ControllerError::validation(INVALID_TOTAL_FEE))),
            }
        };

        let request = PaymentRequest {
            identity: identity.clone(),
            payment_amount,
            total_fees,
        };
        match self.service.record_payment(&request).await {
            Ok(record) => {
                info!(
                    student_id = record.student_id.0,
                    remaining_fee = record.remaining_fee,
                    "payment recorded"
                );
                self.populate(&identity, &record);
                self.page.form.new_payment.value.clear();
                self.page.alert = Some(Alert::success(PAYMENT_RECORDED));
                Ok(record)
            }
            Err(err) => Err(self.fail(map_service_error(err, PAYMENT_FAILED))),
        }
    }

    fn identity(&self) -> StudentIdentity {
        let form = &self.page.form;
        StudentIdentity::trimmed(&form.grade.value, &form.fname.value, &form.lname.value)
    }

    fn fail(&mut self, err: ControllerError) -> ControllerError {
        self.page.alert = Some(Alert::danger(err.message()));
        err
    }

    fn populate(&mut self, identity: &StudentIdentity, record: &StudentRecord) {
        self.state = ControllerState::existing(record.student_id);

        let form = &mut self.page.form;
        form.total_fee.value = fixed2(record.total_fees);
        form.fees_paid.value = fixed2(record.fees_paid);
        form.remaining_fee.value = fixed2(record.remaining_fee);
        form.total_fee.read_only = true;

        self.page.header = Some(format!(
            "Student: {} {} (Grade {})",
            identity.fname, identity.lname, identity.grade
        ));
        self.page.payment_rows = record
            .payments
            .iter()
            .enumerate()
            .map(|(idx, payment)| PaymentRow {
                index: idx + 1,
                date: self.presentation.short_date(&payment.date_paid),
                amount: self.presentation.currency(payment.amount_paid),
            })
            .collect();
        self.page.payment_section_visible = true;
    }

    fn show_new_student(&mut self, identity: &StudentIdentity) {
        self.state = ControllerState::default();

        let form = &mut self.page.form;
        form.total_fee.value.clear();
        form.fees_paid.value = fixed2(0.0);
        form.remaining_fee.value.clear();
        form.total_fee.read_only = false;
        form.fees_paid.read_only = true;
        form.remaining_fee.read_only = true;

        self.page.header = Some(format!(
            "New Student: {} {} (Grade {})",
            identity.fname, identity.lname, identity.grade
        ));
        self.page.payment_rows.clear();
        self.page.payment_section_visible = true;
    }
}

fn map_service_error(err: ServiceError, generic: &str) -> ControllerError {
    match err {
        ServiceError::Rejected {
            status,
            message: Some(message),
        } => {
            warn!(status, %message, "request rejected by server");
            ControllerError::application(message)
        }
        ServiceError::Rejected {
            status,
            message: None,
        } => {
            warn!(status, "request rejected without a message");
            ControllerError::application(generic)
        }
        ServiceError::Transport(source) => {
            error!(error = %format!("{source:#}"), "fee service call failed");
            ControllerError::transport(generic)
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
