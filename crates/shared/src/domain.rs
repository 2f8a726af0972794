use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(StudentId);

/// Identity triple the office uses to find a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentIdentity {
    pub grade: String,
    pub fname: String,
    pub lname: String,
}

impl StudentIdentity {
    /// Builds an identity from raw input, trimming every part.
    pub fn trimmed(grade: &str, fname: &str, lname: &str) -> Self {
        Self {
            grade: grade.trim().to_string(),
            fname: fname.trim().to_string(),
            lname: lname.trim().to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.grade.is_empty() && !self.fname.is_empty() && !self.lname.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// ISO-8601 date (`2024-01-05`) or timestamp as sent by the server.
    pub date_paid: String,
    pub amount_paid: f64,
}

/// Fee record of an existing student. Payments keep server order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student_id: StudentId,
    pub total_fees: f64,
    pub fees_paid: f64,
    pub remaining_fee: f64,
    #[serde(default)]
    pub payments: Vec<Payment>,
}
