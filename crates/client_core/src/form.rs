//! Structured model of the fee entry page: inputs, header, payments table,
//! and the alert slot. The controller binds values into it; front ends only
//! read it.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    pub value: String,
    pub read_only: bool,
}

impl InputField {
    fn locked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            read_only: true,
        }
    }

    /// Types `text` into the field as a user would. Read-only fields keep
    /// their value and `false` is returned.
    pub fn enter(&mut self, text: impl Into<String>) -> bool {
        if self.read_only {
            return false;
        }
        self.value = text.into();
        true
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeForm {
    pub grade: InputField,
    pub fname: InputField,
    pub lname: InputField,
    pub total_fee: InputField,
    pub fees_paid: InputField,
    pub remaining_fee: InputField,
    pub new_payment: InputField,
}

impl Default for FeeForm {
    fn default() -> Self {
        Self {
            grade: InputField::default(),
            fname: InputField::default(),
            lname: InputField::default(),
            total_fee: InputField::default(),
            fees_paid: InputField::locked(""),
            remaining_fee: InputField::locked(""),
            new_payment: InputField::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRow {
    /// 1-based position in the history.
    pub index: usize,
    pub date: String,
    pub amount: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Danger,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Danger,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeEntryPage {
    pub form: FeeForm,
    pub header: Option<String>,
    pub payment_rows: Vec<PaymentRow>,
    pub payment_section_visible: bool,
    pub alert: Option<Alert>,
}

fn write_field(f: &mut fmt::Formatter<'_>, label: &str, field: &InputField) -> fmt::Result {
    let marker = if field.read_only { " (read-only)" } else { "" };
    writeln!(f, "  {label:<14} {}{marker}", field.value)
}

impl fmt::Display for FeeEntryPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(alert) = &self.alert {
            let tag = match alert.kind {
                AlertKind::Danger => "error",
                AlertKind::Success => "ok",
            };
            writeln!(f, "[{tag}] {}", alert.message)?;
        }

        write_field(f, "Grade", &self.form.grade)?;
        write_field(f, "First Name", &self.form.fname)?;
        write_field(f, "Last Name", &self.form.lname)?;

        if !self.payment_section_visible {
            return Ok(());
        }

        if let Some(header) = &self.header {
            writeln!(f, "{header}")?;
        }
        write_field(f, "Total Fee", &self.form.total_fee)?;
        write_field(f, "Fees Paid", &self.form.fees_paid)?;
        write_field(f, "Remaining Fee", &self.form.remaining_fee)?;
        write_field(f, "New Payment", &self.form.new_payment)?;

        if self.payment_rows.is_empty() {
            return writeln!(f, "  (no payments recorded)");
        }
        writeln!(f, "  {:<4} {:<12} Amount", "#", "Date")?;
        for row in &self.payment_rows {
            writeln!(f, "  {:<4} {:<12} {}", row.index, row.date, row.amount)?;
        }
        Ok(())
    }
}
