//! Error types for the employee API client.
//!
//! # Design
//! `NotFound` and `DuplicateSsn` get dedicated variants because the
//! view-model surfaces them with their own wording. Every other non-2xx
//! response lands in `Remote` with the raw status. Transport failures keep
//! only the operation that failed; the underlying cause is logged, not
//! carried. The `Display` output of each variant is the user-facing message.

use std::fmt;

use thiserror::Error;

use crate::validation::ValidationError;

/// The data-access operation an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Message shown when the request never produced a response.
    fn network_message(&self) -> &'static str {
        match self {
            Operation::List => "Network error. Please check your connection and CORS settings.",
            Operation::Get => "Network error",
            Operation::Create => "Failed to create employee",
            Operation::Update => "Failed to update employee",
            Operation::Delete => "Failed to delete employee",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Errors produced by `EmployeeClient` and `EmployeeService`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned 404 for the given identifier.
    #[error("Employee with ID {id} not found")]
    NotFound { id: String },

    /// A write was rejected because the SSN is already taken.
    /// `existing_record` is set for updates.
    #[error("{}", duplicate_message(.existing_record))]
    DuplicateSsn { existing_record: bool },

    /// The request failed before any response arrived.
    #[error("{}", Operation::network_message(.0))]
    Network(Operation),

    /// Any other non-2xx response.
    #[error("Error {status}: {status_text}{}", body_suffix(.body))]
    Remote {
        status: u16,
        status_text: String,
        body: Option<String>,
    },

    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A 2xx response body could not be decoded.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

fn duplicate_message(existing_record: &bool) -> &'static str {
    if *existing_record {
        "Another employee with this SSN already exists"
    } else {
        "An employee with this SSN already exists"
    }
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(". {body}"),
        None => String::new(),
    }
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
