//! Translation between the remote record shape and the internal one.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::types::{CreateEmployee, Employee, RemoteEmployee};

/// Remote status value for an active employee.
pub const STATUS_ACTIVE: i64 = 1;
/// Remote status value for an inactive employee.
pub const STATUS_INACTIVE: i64 = 0;

/// Never fails: missing text fields become empty strings and any status
/// other than [`STATUS_ACTIVE`] reads as inactive.
pub fn to_internal(remote: RemoteEmployee) -> Employee {
    Employee {
        id: remote.person_id,
        employee_no: remote.employee_no.unwrap_or_default(),
        ssn: remote.ssn.unwrap_or_default(),
        first_name: remote.first_name.unwrap_or_default(),
        last_name: remote.last_name.unwrap_or_default(),
        is_active: remote.status == Some(STATUS_ACTIVE),
    }
}

/// Builds a write payload.
///
/// `person_id` is the existing identifier when updating; when `None` a fresh
/// one is generated. Server-managed dates are stamped with `now`, the end
/// date is always `null`.
pub fn to_remote(
    fields: &CreateEmployee,
    person_id: Option<&str>,
    updated_by: &str,
    now: DateTime<Utc>,
) -> RemoteEmployee {
    let stamp = timestamp(now);
    RemoteEmployee {
        person_id: person_id.map_or_else(generate_identifier, str::to_string),
        employee_no: Some(fields.employee_no.clone()),
        ssn: Some(fields.ssn.clone()),
        first_name: Some(fields.first_name.clone()),
        last_name: Some(fields.last_name.clone()),
        status: Some(if fields.is_active {
            STATUS_ACTIVE
        } else {
            STATUS_INACTIVE
        }),
        employment_start_date: Some(stamp.clone()),
        employment_end_date: None,
        last_updated_by: Some(updated_by.to_string()),
        last_updated_date: Some(stamp),
    }
}

/// Random UUID v4 in lowercase hyphenated form.
///
/// No collision check against existing records is made.
pub fn generate_identifier() -> String {
    Uuid::new_v4().to_string()
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T09:30:00.000Z`.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
