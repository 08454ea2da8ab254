//! Stateless HTTP request builder and response parser for the employee API.
//!
//! # Design
//! `EmployeeClient` holds only its `ApiConfig` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. `EmployeeService` drives the round-trip through a
//! `Transport`; the codec itself never does I/O.
//!
//! The remote API addresses a single record as `<base>(<id>)` and accepts
//! identifier-bearing bodies at the collection root for both POST and PUT.

use chrono::Utc;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::mapper;
use crate::types::{CreateEmployee, Employee, RemoteCollection, RemoteEmployee};

pub const HEADER_CUSTOMER_ID: &str = "CustomerID";
pub const HEADER_API_KEY: &str = "APIKey";

/// Synchronous, stateless client for the employee API.
#[derive(Debug, Clone)]
pub struct EmployeeClient {
    config: ApiConfig,
}

impl EmployeeClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn collection_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn resource_url(&self, id: &str) -> String {
        format!("{}({id})", self.config.base_url)
    }

    pub fn build_list_employees(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.collection_url().to_string(), None)
    }

    pub fn build_get_employee(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, self.resource_url(id), None)
    }

    /// Returns the freshly generated identifier alongside the request.
    pub fn build_create_employee(
        &self,
        input: &CreateEmployee,
    ) -> Result<(String, HttpRequest), ApiError> {
        let payload = mapper::to_remote(input, None, &self.config.updated_by, Utc::now());
        let id = payload.person_id.clone();
        let req = self.write_request(HttpMethod::Post, &payload)?;
        Ok((id, req))
    }

    /// `fields` is the complete record after merging the partial update.
    pub fn build_update_employee(
        &self,
        id: &str,
        fields: &CreateEmployee,
    ) -> Result<HttpRequest, ApiError> {
        let payload = mapper::to_remote(fields, Some(id), &self.config.updated_by, Utc::now());
        self.write_request(HttpMethod::Put, &payload)
    }

    pub fn build_delete_employee(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, self.resource_url(id), None)
    }

    pub fn parse_list_employees(&self, response: HttpResponse) -> Result<Vec<Employee>, ApiError> {
        if !response.is_success() {
            return Err(remote_error(&response, true));
        }
        let collection: RemoteCollection = decode(&response.body)?;
        Ok(collection
            .into_records()
            .into_iter()
            .map(mapper::to_internal)
            .collect())
    }

    pub fn parse_get_employee(&self, id: &str, response: HttpResponse) -> Result<Employee, ApiError> {
        check_found(id, &response)?;
        if !response.is_success() {
            return Err(remote_error(&response, true));
        }
        decode::<RemoteEmployee>(&response.body).map(mapper::to_internal)
    }

    pub fn parse_create_employee(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_write(&response, false)?;
        decode::<RemoteEmployee>(&response.body).map(mapper::to_internal)
    }

    pub fn parse_update_employee(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_write(&response, true)?;
        decode::<RemoteEmployee>(&response.body).map(mapper::to_internal)
    }

    pub fn parse_delete_employee(&self, id: &str, response: HttpResponse) -> Result<(), ApiError> {
        check_found(id, &response)?;
        if !response.is_success() {
            return Err(remote_error(&response, false));
        }
        Ok(())
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                (HEADER_CUSTOMER_ID.to_string(), self.config.customer_id.clone()),
                (HEADER_API_KEY.to_string(), self.config.api_key.clone()),
            ],
            body,
        }
    }

    fn write_request(
        &self,
        method: HttpMethod,
        payload: &RemoteEmployee,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(method, self.collection_url().to_string(), Some(body)))
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn check_found(id: &str, response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == 404 {
        return Err(ApiError::NotFound { id: id.to_string() });
    }
    Ok(())
}

/// Map a failed POST/PUT, recognising SSN conflicts.
fn check_write(response: &HttpResponse, existing_record: bool) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if is_conflict(response) {
        return Err(ApiError::DuplicateSsn { existing_record });
    }
    Err(remote_error(response, false))
}

/// 409, or a body that mentions a duplicate or an existing record.
fn is_conflict(response: &HttpResponse) -> bool {
    if response.status == 409 {
        return true;
    }
    let body = response.body.to_ascii_lowercase();
    body.contains("duplicate") || body.contains("exists")
}

fn remote_error(response: &HttpResponse, with_body: bool) -> ApiError {
    ApiError::Remote {
        status: response.status,
        status_text: response.status_text().to_string(),
        body: with_body.then(|| response.body.clone()),
    }
}
