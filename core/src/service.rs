//! Data-access client: runs the codec through a transport and folds every
//! outcome into an `ApiResponse`.
//!
//! Nothing escapes this layer as a `Result::Err` or a panic; transport
//! failures, non-2xx statuses and undecodable bodies all come back as
//! `ApiResponse::Failure`.

use tracing::{debug, warn};

use crate::client::EmployeeClient;
use crate::config::ApiConfig;
use crate::envelope::ApiResponse;
use crate::error::{ApiError, Operation};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport, TransportError};
use crate::types::{CreateEmployee, Employee, UpdateEmployee};

pub struct EmployeeService<T> {
    client: EmployeeClient,
    transport: T,
}

impl EmployeeService<ReqwestTransport> {
    /// Service over the default `reqwest` transport.
    pub fn from_config(config: ApiConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::new(EmployeeClient::new(config), transport))
    }
}

impl<T: Transport> EmployeeService<T> {
    pub fn new(client: EmployeeClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub async fn list_all(&self) -> ApiResponse<Vec<Employee>> {
        let result = self.list_inner().await;
        if let Ok(employees) = &result {
            debug!(count = employees.len(), "employees listed");
        }
        ApiResponse::from_result(result, "Employees retrieved successfully")
    }

    pub async fn get_by_id(&self, id: &str) -> ApiResponse<Employee> {
        ApiResponse::from_result(self.fetch(id).await, "Employee retrieved successfully")
    }

    pub async fn create(&self, input: &CreateEmployee) -> ApiResponse<Employee> {
        let result = self.create_inner(input).await;
        ApiResponse::from_result(result, "Employee created successfully")
    }

    /// Fetches the current record, merges `input` over it and writes the
    /// whole record back. A missing target short-circuits before the PUT.
    pub async fn update(&self, id: &str, input: &UpdateEmployee) -> ApiResponse<Employee> {
        let result = self.update_inner(id, input).await;
        ApiResponse::from_result(result, "Employee updated successfully")
    }

    pub async fn delete(&self, id: &str) -> ApiResponse<()> {
        match self.delete_inner(id).await {
            Ok(()) => ApiResponse::ok_empty("Employee deleted successfully"),
            Err(error) => ApiResponse::fail(error),
        }
    }

    async fn list_inner(&self) -> Result<Vec<Employee>, ApiError> {
        let response = self.send(Operation::List, self.client.build_list_employees()).await?;
        self.client.parse_list_employees(response)
    }

    async fn fetch(&self, id: &str) -> Result<Employee, ApiError> {
        let response = self.send(Operation::Get, self.client.build_get_employee(id)).await?;
        self.client.parse_get_employee(id, response)
    }

    async fn create_inner(&self, input: &CreateEmployee) -> Result<Employee, ApiError> {
        let (id, request) = self.client.build_create_employee(input)?;
        debug!(%id, "creating employee");
        let response = self.send(Operation::Create, request).await?;
        self.client.parse_create_employee(response)
    }

    async fn update_inner(&self, id: &str, input: &UpdateEmployee) -> Result<Employee, ApiError> {
        let current = self.fetch(id).await.map_err(|e| {
            debug!(%id, error = %e, "update prefetch failed");
            e
        })?;
        let merged = input.merge_onto(&current);
        let request = self.client.build_update_employee(id, &merged)?;
        let response = self.send(Operation::Update, request).await?;
        self.client.parse_update_employee(response)
    }

    async fn delete_inner(&self, id: &str) -> Result<(), ApiError> {
        let response = self.send(Operation::Delete, self.client.build_delete_employee(id)).await?;
        self.client.parse_delete_employee(id, response)
    }

    /// Execute a request, turning a transport failure into `ApiError::Network`.
    async fn send(&self, op: Operation, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(%op, method = request.method.as_str(), path = %request.path, "sending request");
        let response = self.transport.execute(request).await.map_err(|e| {
            warn!(%op, error = %e, "request failed before a response arrived");
            ApiError::Network(op)
        })?;
        if !response.is_success() {
            warn!(%op, status = response.status, "remote returned an error status");
        }
        Ok(response)
    }
}
