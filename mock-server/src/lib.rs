use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const COLLECTION: &str = "Employees";

/// A stored employee in the remote API's PascalCase layout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeRecord {
    #[serde(rename = "PersonID", default)]
    pub person_id: String,
    #[serde(default)]
    pub employee_no: Option<String>,
    #[serde(rename = "SSN", default)]
    pub ssn: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub employment_start_date: Option<String>,
    #[serde(default)]
    pub employment_end_date: Option<String>,
    #[serde(default)]
    pub last_updated_by: Option<String>,
    #[serde(default)]
    pub last_updated_date: Option<String>,
}

/// Static credentials every request must present.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub customer_id: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(customer_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            api_key: api_key.into(),
        }
    }

    /// `MOCK_CUSTOMER_ID` / `MOCK_API_KEY`, with development defaults.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("MOCK_CUSTOMER_ID").unwrap_or_else(|_| "mock-customer".to_string()),
            std::env::var("MOCK_API_KEY").unwrap_or_else(|_| "mock-key".to_string()),
        )
    }
}

/// Records in insertion order.
pub type Db = Arc<RwLock<Vec<EmployeeRecord>>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    credentials: Arc<Credentials>,
}

pub fn app(credentials: Credentials) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Vec::new())),
        credentials: Arc::new(credentials),
    };
    Router::new()
        .route("/Employees", get(list_employees).post(create_employee).put(update_employee))
        .route("/{resource}", get(get_employee).delete(delete_employee))
        .layer(middleware::from_fn_with_state(state.clone(), require_credentials))
        .with_state(state)
}

pub async fn run(listener: TcpListener, credentials: Credentials) -> Result<(), std::io::Error> {
    axum::serve(listener, app(credentials)).await
}

async fn require_credentials(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let headers = request.headers();
    if !header_matches(headers, "customerid", &state.credentials.customer_id)
        || !header_matches(headers, "apikey", &state.credentials.api_key)
    {
        tracing::warn!(path = %request.uri().path(), "rejected request without valid credentials");
        return (StatusCode::UNAUTHORIZED, "missing or invalid credentials").into_response();
    }
    next.run(request).await
}

fn header_matches(headers: &HeaderMap, name: &str, expected: &str) -> bool {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected)
}

/// `Employees(<id>)` → `<id>`.
fn resource_id(resource: &str) -> Option<&str> {
    resource
        .strip_prefix(COLLECTION)?
        .strip_prefix('(')?
        .strip_suffix(')')
        .filter(|id| !id.is_empty())
}

fn ssn_taken(records: &[EmployeeRecord], ssn: Option<&str>, except: &str) -> bool {
    let Some(ssn) = ssn else {
        return false;
    };
    records
        .iter()
        .any(|r| r.person_id != except && r.ssn.as_deref() == Some(ssn))
}

fn conflict() -> Response {
    (StatusCode::CONFLICT, "duplicate SSN: record exists").into_response()
}

async fn list_employees(State(state): State<AppState>) -> Json<serde_json::Value> {
    let records = state.db.read().await;
    Json(json!({ "value": &*records }))
}

async fn create_employee(
    State(state): State<AppState>,
    Json(mut input): Json<EmployeeRecord>,
) -> Response {
    if input.person_id.is_empty() {
        input.person_id = Uuid::new_v4().to_string();
    }
    let mut records = state.db.write().await;
    if records.iter().any(|r| r.person_id == input.person_id)
        || ssn_taken(&records, input.ssn.as_deref(), &input.person_id)
    {
        return conflict();
    }
    tracing::debug!(person_id = %input.person_id, "employee created");
    records.push(input.clone());
    (StatusCode::CREATED, Json(input)).into_response()
}

async fn update_employee(
    State(state): State<AppState>,
    Json(input): Json<EmployeeRecord>,
) -> Response {
    let mut records = state.db.write().await;
    if ssn_taken(&records, input.ssn.as_deref(), &input.person_id) {
        return conflict();
    }
    match records.iter_mut().find(|r| r.person_id == input.person_id) {
        Some(record) => {
            *record = input.clone();
            Json(input).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_employee(
    State(state): State<AppState>,
    Path(resource): Path<String>,
) -> Result<Json<EmployeeRecord>, StatusCode> {
    let id = resource_id(&resource).ok_or(StatusCode::NOT_FOUND)?;
    let records = state.db.read().await;
    records
        .iter()
        .find(|r| r.person_id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(resource): Path<String>,
) -> StatusCode {
    let Some(id) = resource_id(&resource) else {
        return StatusCode::NOT_FOUND;
    };
    let mut records = state.db.write().await;
    let before = records.len();
    records.retain(|r| r.person_id != id);
    if records.len() == before {
        StatusCode::NOT_FOUND
    } else {
        tracing::debug!(person_id = %id, "employee deleted");
        StatusCode::NO_CONTENT
    }
}
