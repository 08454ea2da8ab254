//! Employee DTOs, internal and remote.
//!
//! # Design
//! The internal shape (`Employee`, camelCase, boolean status) is what the
//! view-model and its consumers see. `RemoteEmployee` mirrors the third-party
//! API's PascalCase layout and is only touched by the codec and the mapper.
//! The mock-server crate defines its own copy of the remote shape; the
//! integration tests catch drift between the two.

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An employee record as held by the view-model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Opaque primary key assigned by the remote system.
    pub id: String,
    /// User-assigned number, shown as "ID".
    pub employee_no: String,
    pub ssn: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
}

/// The complete writable field set of an employee.
///
/// Used as the create payload, and as the merged result of applying an
/// `UpdateEmployee` onto a fetched record before it is written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    pub employee_no: String,
    pub ssn: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
}

/// Partial update. Only the fields present are validated and applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateEmployee {
    pub fn is_empty(&self) -> bool {
        self.employee_no.is_none()
            && self.ssn.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.is_active.is_none()
    }

    /// Provided fields override the values of `current`.
    pub fn merge_onto(&self, current: &Employee) -> CreateEmployee {
        CreateEmployee {
            employee_no: self
                .employee_no
                .clone()
                .unwrap_or_else(|| current.employee_no.clone()),
            ssn: self.ssn.clone().unwrap_or_else(|| current.ssn.clone()),
            first_name: self
                .first_name
                .clone()
                .unwrap_or_else(|| current.first_name.clone()),
            last_name: self
                .last_name
                .clone()
                .unwrap_or_else(|| current.last_name.clone()),
            is_active: self.is_active.unwrap_or(current.is_active),
        }
    }
}

/// An employee in the remote API's wire format.
///
/// Everything except `PersonID` may be missing or `null` on read. On write
/// every field is emitted, including a `null` end date.
///
/// Reads are loose about types: a number or boolean in a text field is kept
/// as its string form, an array or object there reads as missing, and any
/// numeric `Status` is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteEmployee {
    #[serde(rename = "PersonID", deserialize_with = "lenient::id")]
    pub person_id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub employee_no: Option<String>,
    #[serde(rename = "SSN", default, deserialize_with = "lenient::text")]
    pub ssn: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub last_name: Option<String>,
    /// 1 = active, anything else inactive.
    #[serde(default, deserialize_with = "lenient::status")]
    pub status: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub employment_start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub employment_end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub last_updated_by: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub last_updated_date: Option<String>,
}

/// Collection GET body: either a bare array, or an object whose `value`
/// array may be missing or `null` (both read as empty).
///
/// Records are decoded one at a time so a failure names the offending
/// record and the underlying cause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteCollection(pub Vec<RemoteEmployee>);

impl RemoteCollection {
    pub fn into_records(self) -> Vec<RemoteEmployee> {
        self.0
    }
}

impl<'de> Deserialize<'de> for RemoteCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items: Vec<Value> = match Value::deserialize(deserializer)? {
            Value::Object(mut fields) => match fields.remove("value") {
                None | Some(Value::Null) => Vec::new(),
                Some(value) => serde_json::from_value(value)
                    .map_err(|e| D::Error::custom(format_args!("`value`: {e}")))?,
            },
            other => serde_json::from_value(other).map_err(D::Error::custom)?,
        };
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item)
                    .map_err(|e| D::Error::custom(format_args!("record {index}: {e}")))
            })
            .collect::<Result<Vec<RemoteEmployee>, D::Error>>()
            .map(RemoteCollection)
    }
}

mod lenient {
    use serde::de::{self, Deserialize, Deserializer};
    use serde_json::Value;

    /// A string, or a number rendered as one.
    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(de::Error::custom(format_args!(
                "invalid PersonID {other}, expected a string or number"
            ))),
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        })
    }

    /// Integral numbers, including `1.0`, keep their value. Anything else
    /// reads as missing.
    pub fn status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0)
                    .map(|f| f as i64)
            }),
            _ => None,
        })
    }
}
