//! View-model: in-memory employee state plus the CRUD orchestration a
//! presentation layer drives.
//!
//! # Design
//! - State (list, selection, loading flag, last error) is owned here and only
//!   mutated from within the view-model's own sequential call chains.
//! - Writes are validated before any request is made.
//! - After every successful write the list is re-fetched in full; the local
//!   copy is never patched.
//! - The presentation layer observes changes through a single registered
//!   `EmployeeListener`, called synchronously after state is updated.
//!   Listeners must not call back into the view-model.

use tracing::{debug, warn};

use crate::envelope::ApiResponse;
use crate::service::EmployeeService;
use crate::transport::Transport;
use crate::types::{CreateEmployee, Employee, UpdateEmployee};

pub const MSG_CREATED: &str = "Employee created successfully";
pub const MSG_UPDATED: &str = "Employee updated successfully";
pub const MSG_DELETED: &str = "Employee removed successfully";

const FALLBACK_LOAD_ALL: &str = "Failed to load employees";
const FALLBACK_LOAD_ONE: &str = "Failed to load employee";
const FALLBACK_CREATE: &str = "Failed to create employee";
const FALLBACK_UPDATE: &str = "Failed to update employee";
const FALLBACK_DELETE: &str = "Failed to delete employee";

/// Receiver for view-model events. Every method defaults to a no-op.
pub trait EmployeeListener: Send {
    fn employees_changed(&mut self, _employees: &[Employee]) {}
    fn loading_changed(&mut self, _loading: bool) {}
    fn error(&mut self, _message: &str) {}
    fn success(&mut self, _message: &str) {}
}

/// A listener assembled from up to four closures, one per event.
#[derive(Default)]
pub struct Callbacks {
    on_employees_changed: Option<Box<dyn FnMut(&[Employee]) + Send>>,
    on_loading_changed: Option<Box<dyn FnMut(bool) + Send>>,
    on_error: Option<Box<dyn FnMut(&str) + Send>>,
    on_success: Option<Box<dyn FnMut(&str) + Send>>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_employees_changed(mut self, f: impl FnMut(&[Employee]) + Send + 'static) -> Self {
        self.on_employees_changed = Some(Box::new(f));
        self
    }

    pub fn on_loading_changed(mut self, f: impl FnMut(bool) + Send + 'static) -> Self {
        self.on_loading_changed = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn on_success(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }
}

impl EmployeeListener for Callbacks {
    fn employees_changed(&mut self, employees: &[Employee]) {
        if let Some(f) = self.on_employees_changed.as_mut() {
            f(employees);
        }
    }

    fn loading_changed(&mut self, loading: bool) {
        if let Some(f) = self.on_loading_changed.as_mut() {
            f(loading);
        }
    }

    fn error(&mut self, message: &str) {
        if let Some(f) = self.on_error.as_mut() {
            f(message);
        }
    }

    fn success(&mut self, message: &str) {
        if let Some(f) = self.on_success.as_mut() {
            f(message);
        }
    }
}

pub struct EmployeeViewModel<T> {
    service: EmployeeService<T>,
    employees: Vec<Employee>,
    current: Option<Employee>,
    loading: bool,
    error_message: String,
    listener: Option<Box<dyn EmployeeListener>>,
}

impl<T: Transport> EmployeeViewModel<T> {
    pub fn new(service: EmployeeService<T>) -> Self {
        Self {
            service,
            employees: Vec::new(),
            current: None,
            loading: false,
            error_message: String::new(),
            listener: None,
        }
    }

    /// Replaces any previously registered listener.
    pub fn register_listener(&mut self, listener: impl EmployeeListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn current_employee(&self) -> Option<&Employee> {
        self.current.as_ref()
    }

    pub fn set_current_employee(&mut self, employee: Option<Employee>) {
        self.current = employee;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last message passed to the error listener, empty if none yet.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub async fn load_all(&mut self) {
        self.set_loading(true);
        let response = self.service.list_all().await;
        self.set_loading(false);

        match response {
            ApiResponse::Success {
                data: Some(employees),
                ..
            } => {
                debug!(count = employees.len(), "employee list replaced");
                self.employees = employees;
                if let Some(listener) = self.listener.as_mut() {
                    listener.employees_changed(&self.employees);
                }
            }
            other => self.show_error(other.error_message(), FALLBACK_LOAD_ALL),
        }
    }

    /// Selects and returns the fetched record. The list is left untouched.
    pub async fn load_one(&mut self, id: &str) -> Option<Employee> {
        self.set_loading(true);
        let response = self.service.get_by_id(id).await;
        self.set_loading(false);

        match response {
            ApiResponse::Success {
                data: Some(employee),
                ..
            } => {
                self.current = Some(employee.clone());
                Some(employee)
            }
            other => {
                self.show_error(other.error_message(), FALLBACK_LOAD_ONE);
                None
            }
        }
    }

    pub async fn create(&mut self, input: &CreateEmployee) -> bool {
        if let Err(e) = input.validate() {
            warn!(field = ?e.field(), "create rejected by validation");
            self.show_error(Some(e.to_string()), FALLBACK_CREATE);
            return false;
        }

        self.set_loading(true);
        let response = self.service.create(input).await;
        self.set_loading(false);

        self.finish_write(response, MSG_CREATED, FALLBACK_CREATE).await
    }

    pub async fn update(&mut self, id: &str, input: &UpdateEmployee) -> bool {
        if let Err(e) = input.validate() {
            warn!(field = ?e.field(), "update rejected by validation");
            self.show_error(Some(e.to_string()), FALLBACK_UPDATE);
            return false;
        }

        self.set_loading(true);
        let response = self.service.update(id, input).await;
        self.set_loading(false);

        self.finish_write(response, MSG_UPDATED, FALLBACK_UPDATE).await
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        self.set_loading(true);
        let response = self.service.delete(id).await;
        self.set_loading(false);

        self.finish_write(response, MSG_DELETED, FALLBACK_DELETE).await
    }

    /// On success: notify, then reload the whole list.
    async fn finish_write<D>(
        &mut self,
        response: ApiResponse<D>,
        success_message: &str,
        fallback: &str,
    ) -> bool {
        if response.is_success() {
            if let Some(listener) = self.listener.as_mut() {
                listener.success(success_message);
            }
            debug!("write succeeded, reloading employees");
            self.load_all().await;
            true
        } else {
            self.show_error(response.error_message(), fallback);
            false
        }
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        if let Some(listener) = self.listener.as_mut() {
            listener.loading_changed(loading);
        }
    }

    fn show_error(&mut self, message: Option<String>, fallback: &str) {
        self.error_message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        if let Some(listener) = self.listener.as_mut() {
            listener.error(&self.error_message);
        }
    }
}
