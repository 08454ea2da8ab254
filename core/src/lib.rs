//! Employee-record management core: remote API codec, data-access client
//! and view-model.
//!
//! # Overview
//! A presentation layer drives [`EmployeeViewModel`], which validates input,
//! calls [`EmployeeService`] and keeps the in-memory employee list. The
//! service executes requests built by [`EmployeeClient`] through a
//! [`Transport`] and returns every outcome as an [`ApiResponse`].
//!
//! # Design
//! - `EmployeeClient` is stateless and does no I/O: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - The remote API's PascalCase record shape lives only in
//!   [`types::RemoteEmployee`] and [`mapper`].
//! - Credentials come from [`ApiConfig`], never from constants.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod mapper;
pub mod service;
pub mod transport;
pub mod types;
pub mod validation;
pub mod view_model;

pub use client::EmployeeClient;
pub use config::{ApiConfig, ConfigError};
pub use envelope::ApiResponse;
pub use error::{ApiError, Operation};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::EmployeeService;
pub use transport::{ReqwestTransport, Transport, TransportError};
pub use types::{CreateEmployee, Employee, RemoteEmployee, UpdateEmployee};
pub use validation::{Field, ValidationError};
pub use view_model::{Callbacks, EmployeeListener, EmployeeViewModel};
