use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

pub const MAX_INITIAL_LEN: usize = 8;

/// A patient, identified by the clinic's own chart number.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: i64,
    pub initial: String,
    pub birthdate: jiff::civil::Date,
    /// Sex as coded by the clinic intake form.
    pub sex: i32,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewPatient {
    pub id: i64,
    pub initial: String,
    pub birthdate: jiff::civil::Date,
    pub sex: i32,
}

/// Parse a `YYYY-MM-DD` birthdate as entered on the intake form.
pub fn parse_birthdate(raw: &str) -> Result<jiff::civil::Date, CoreError> {
    Ok(raw.trim().parse::<jiff::civil::Date>()?)
}

impl NewPatient {
    pub fn validate(&self) -> Result<(), CoreError> {
        let initial = self.initial.trim();
        if initial.is_empty() {
            return Err(CoreError::invalid("initial", "initial is required"));
        }
        if initial.chars().count() > MAX_INITIAL_LEN {
            return Err(CoreError::invalid(
                "initial",
                format!("initial must be at most {MAX_INITIAL_LEN} characters"),
            ));
        }
        Ok(())
    }
}
