//! Client-side field validation for create and update requests.
//!
//! Fields are checked in a fixed order (employee number, first name, last
//! name, SSN) and only when present. The first violation wins.

use thiserror::Error;

use crate::types::{CreateEmployee, UpdateEmployee};

pub const MAX_EMPLOYEE_NO_LEN: usize = 8;
pub const MIN_NAME_LEN: usize = 2;

/// The user-editable fields that validation can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    EmployeeNo,
    FirstName,
    LastName,
    Ssn,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("ID is required")]
    EmployeeNoRequired,
    #[error("ID must be 8 characters or less")]
    EmployeeNoTooLong,
    #[error("First name is required")]
    FirstNameRequired,
    #[error("First name must be at least 2 characters")]
    FirstNameTooShort,
    #[error("Last name is required")]
    LastNameRequired,
    #[error("Last name must be at least 2 characters")]
    LastNameTooShort,
    #[error("SSN is required")]
    SsnRequired,
    #[error("SSN must be in format XXX-XX-XXXX (e.g., 123-45-6789)")]
    SsnFormat,
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::EmployeeNoRequired | ValidationError::EmployeeNoTooLong => {
                Field::EmployeeNo
            }
            ValidationError::FirstNameRequired | ValidationError::FirstNameTooShort => {
                Field::FirstName
            }
            ValidationError::LastNameRequired | ValidationError::LastNameTooShort => {
                Field::LastName
            }
            ValidationError::SsnRequired | ValidationError::SsnFormat => Field::Ssn,
        }
    }
}

/// Borrowed view over the validatable fields; `None` means "not provided".
#[derive(Debug, Clone, Copy, Default)]
struct Fields<'a> {
    employee_no: Option<&'a str>,
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
    ssn: Option<&'a str>,
}

impl CreateEmployee {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(Fields {
            employee_no: Some(&self.employee_no),
            first_name: Some(&self.first_name),
            last_name: Some(&self.last_name),
            ssn: Some(&self.ssn),
        })
    }
}

impl UpdateEmployee {
    /// An update with no fields present always passes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(Fields {
            employee_no: self.employee_no.as_deref(),
            first_name: self.first_name.as_deref(),
            last_name: self.last_name.as_deref(),
            ssn: self.ssn.as_deref(),
        })
    }
}

fn validate(fields: Fields<'_>) -> Result<(), ValidationError> {
    if let Some(employee_no) = fields.employee_no {
        let trimmed = employee_no.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmployeeNoRequired);
        }
        if trimmed.chars().count() > MAX_EMPLOYEE_NO_LEN {
            return Err(ValidationError::EmployeeNoTooLong);
        }
    }

    if let Some(first_name) = fields.first_name {
        check_name(
            first_name,
            ValidationError::FirstNameRequired,
            ValidationError::FirstNameTooShort,
        )?;
    }

    if let Some(last_name) = fields.last_name {
        check_name(
            last_name,
            ValidationError::LastNameRequired,
            ValidationError::LastNameTooShort,
        )?;
    }

    if let Some(ssn) = fields.ssn {
        if ssn.trim().is_empty() {
            return Err(ValidationError::SsnRequired);
        }
        // Pattern applies to the raw value: padded input is rejected.
        if !is_ssn_format(ssn) {
            return Err(ValidationError::SsnFormat);
        }
    }

    Ok(())
}

fn check_name(
    value: &str,
    required: ValidationError,
    too_short: ValidationError,
) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(required);
    }
    if trimmed.chars().count() < MIN_NAME_LEN {
        return Err(too_short);
    }
    Ok(())
}

/// `NNN-NN-NNNN` with ASCII digits.
pub fn is_ssn_format(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 11
        && bytes.iter().enumerate().all(|(i, b)| match i {
            3 | 6 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
