//! View-model behavior against a scripted transport.
//!
//! # Design
//! `ScriptedTransport` answers requests from a queue of canned responses and
//! records every request it sees, so tests can assert both the state the
//! view-model ends up in and exactly which HTTP calls were (not) made.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use employee_core::{
    ApiConfig, CreateEmployee, EmployeeClient, EmployeeListener, EmployeeService, EmployeeViewModel,
    HttpMethod, HttpRequest, HttpResponse, Transport, TransportError, UpdateEmployee,
};

const BASE_URL: &str = "http://remote.test/Employees";

#[derive(Clone, Default)]
struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    fn respond(&self, status: u16, body: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    fn fail(&self) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError("connection refused".to_string())));
        self
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted response".to_string())))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Employees(usize),
    Loading(bool),
    Error(String),
    Success(String),
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Event>>>);

impl Recorder {
    fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }
}

impl EmployeeListener for Recorder {
    fn employees_changed(&mut self, employees: &[employee_core::Employee]) {
        self.0.lock().unwrap().push(Event::Employees(employees.len()));
    }

    fn loading_changed(&mut self, loading: bool) {
        self.0.lock().unwrap().push(Event::Loading(loading));
    }

    fn error(&mut self, message: &str) {
        self.0.lock().unwrap().push(Event::Error(message.to_string()));
    }

    fn success(&mut self, message: &str) {
        self.0.lock().unwrap().push(Event::Success(message.to_string()));
    }
}

fn setup() -> (EmployeeViewModel<ScriptedTransport>, ScriptedTransport, Recorder) {
    let transport = ScriptedTransport::default();
    let client = EmployeeClient::new(ApiConfig::new(BASE_URL, "cust", "key"));
    let mut vm = EmployeeViewModel::new(EmployeeService::new(client, transport.clone()));
    let recorder = Recorder::default();
    vm.register_listener(recorder.clone());
    (vm, transport, recorder)
}

fn record(id: &str, employee_no: &str, ssn: &str) -> String {
    format!(
        r#"{{"PersonID":"{id}","EmployeeNo":"{employee_no}","SSN":"{ssn}","FirstName":"Jo","LastName":"Li","Status":1}}"#
    )
}

fn jo_li() -> CreateEmployee {
    CreateEmployee {
        employee_no: "E001".to_string(),
        ssn: "123-45-6789".to_string(),
        first_name: "Jo".to_string(),
        last_name: "Li".to_string(),
        is_active: true,
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_all_with_empty_value_is_success() {
    let (mut vm, transport, recorder) = setup();
    transport.respond(200, r#"{"value":[]}"#);

    vm.load_all().await;

    assert!(vm.employees().is_empty());
    assert!(!vm.is_loading());
    assert_eq!(
        recorder.events(),
        vec![Event::Loading(true), Event::Loading(false), Event::Employees(0)]
    );
}

#[tokio::test]
async fn load_all_replaces_list() {
    let (mut vm, transport, _) = setup();
    transport.respond(200, &format!("[{}]", record("p-1", "E001", "123-45-6789")));
    vm.load_all().await;
    assert_eq!(vm.employees().len(), 1);

    transport.respond(
        200,
        &format!(
            r#"{{"value":[{},{}]}}"#,
            record("p-2", "E002", "222-22-2222"),
            record("p-3", "E003", "333-33-3333")
        ),
    );
    vm.load_all().await;
    let ids: Vec<&str> = vm.employees().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["p-2", "p-3"]);
}

#[tokio::test]
async fn load_all_network_failure_keeps_list_and_reports() {
    let (mut vm, transport, recorder) = setup();
    transport.respond(200, &format!("[{}]", record("p-1", "E001", "123-45-6789")));
    vm.load_all().await;

    transport.fail();
    vm.load_all().await;

    assert_eq!(vm.employees().len(), 1);
    let expected = "Network error. Please check your connection and CORS settings.";
    assert_eq!(vm.error_message(), expected);
    assert_eq!(recorder.events().last(), Some(&Event::Error(expected.to_string())));
}

#[tokio::test]
async fn load_all_remote_error_embeds_status_and_body() {
    let (mut vm, transport, _) = setup();
    transport.respond(500, "database offline");

    vm.load_all().await;

    assert_eq!(vm.error_message(), "Error 500: Internal Server Error. database offline");
}

#[tokio::test]
async fn load_one_selects_without_touching_list() {
    let (mut vm, transport, recorder) = setup();
    transport.respond(200, &record("p-7", "E007", "777-77-7777"));

    let employee = vm.load_one("p-7").await.unwrap();

    assert_eq!(employee.employee_no, "E007");
    assert_eq!(vm.current_employee(), Some(&employee));
    assert!(vm.employees().is_empty());
    assert_eq!(transport.requests()[0].path, "http://remote.test/Employees(p-7)");
    assert_eq!(recorder.events(), vec![Event::Loading(true), Event::Loading(false)]);
}

#[tokio::test]
async fn load_one_not_found_names_identifier() {
    let (mut vm, transport, recorder) = setup();
    transport.respond(404, "");

    assert!(vm.load_one("ghost").await.is_none());
    assert!(vm.current_employee().is_none());
    assert_eq!(
        recorder.events().last(),
        Some(&Event::Error("Employee with ID ghost not found".to_string()))
    );
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_posts_then_reloads() {
    let (mut vm, transport, recorder) = setup();
    transport
        .respond(201, &record("server-id", "E001", "123-45-6789"))
        .respond(200, &format!(r#"{{"value":[{}]}}"#, record("server-id", "E001", "123-45-6789")));

    assert!(vm.create(&jo_li()).await);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, HttpMethod::Post);
    let body: serde_json::Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["Status"], 1);
    assert_eq!(body["EmployeeNo"], "E001");
    assert_eq!(body["PersonID"].as_str().unwrap().len(), 36);
    assert_eq!(requests[1].method, HttpMethod::Get);
    assert_eq!(requests[1].path, BASE_URL);

    assert_eq!(vm.employees().len(), 1);
    assert_eq!(
        recorder.events(),
        vec![
            Event::Loading(true),
            Event::Loading(false),
            Event::Success("Employee created successfully".to_string()),
            Event::Loading(true),
            Event::Loading(false),
            Event::Employees(1),
        ]
    );
}

#[tokio::test]
async fn create_validation_failure_makes_no_request() {
    let (mut vm, transport, recorder) = setup();
    let input = CreateEmployee {
        ssn: "123456789".to_string(),
        ..jo_li()
    };

    assert!(!vm.create(&input).await);

    assert!(transport.requests().is_empty());
    assert_eq!(
        recorder.events(),
        vec![Event::Error(
            "SSN must be in format XXX-XX-XXXX (e.g., 123-45-6789)".to_string()
        )]
    );
}

#[tokio::test]
async fn create_duplicate_ssn_reports_conflict_without_reload() {
    let (mut vm, transport, _) = setup();
    transport.respond(400, "Violation: duplicate SSN");

    assert!(!vm.create(&jo_li()).await);

    assert_eq!(transport.requests().len(), 1);
    assert_eq!(vm.error_message(), "An employee with this SSN already exists");
}

#[tokio::test]
async fn create_network_failure_uses_create_message() {
    let (mut vm, transport, _) = setup();
    transport.fail();

    assert!(!vm.create(&jo_li()).await);
    assert_eq!(vm.error_message(), "Failed to create employee");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_merges_fetched_record_and_puts_to_collection() {
    let (mut vm, transport, recorder) = setup();
    transport
        .respond(200, &record("p-1", "E001", "123-45-6789"))
        .respond(200, &record("p-1", "E001", "123-45-6789"))
        .respond(200, r#"{"value":[]}"#);

    let input = UpdateEmployee {
        last_name: Some("Lee".to_string()),
        is_active: Some(false),
        ..Default::default()
    };
    assert!(vm.update("p-1", &input).await);

    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].path, "http://remote.test/Employees(p-1)");
    assert_eq!(requests[1].method, HttpMethod::Put);
    assert_eq!(requests[1].path, BASE_URL);

    let body: serde_json::Value = serde_json::from_str(requests[1].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["PersonID"], "p-1");
    assert_eq!(body["EmployeeNo"], "E001");
    assert_eq!(body["FirstName"], "Jo");
    assert_eq!(body["LastName"], "Lee");
    assert_eq!(body["Status"], 0);

    assert!(recorder
        .events()
        .contains(&Event::Success("Employee updated successfully".to_string())));
}

#[tokio::test]
async fn update_on_missing_target_makes_no_put() {
    let (mut vm, transport, recorder) = setup();
    transport.respond(404, "");

    let input = UpdateEmployee {
        first_name: Some("Jane".to_string()),
        ..Default::default()
    };
    assert!(!vm.update("gone", &input).await);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(
        recorder.events().last(),
        Some(&Event::Error("Employee with ID gone not found".to_string()))
    );
}

#[tokio::test]
async fn update_prefetch_network_failure_makes_no_put() {
    let (mut vm, transport, recorder) = setup();
    transport.fail();

    let input = UpdateEmployee {
        first_name: Some("Jane".to_string()),
        ..Default::default()
    };
    assert!(!vm.update("p-1", &input).await);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(
        recorder.events().last(),
        Some(&Event::Error("Network error".to_string()))
    );
}

#[tokio::test]
async fn update_prefetch_server_error_makes_no_put() {
    let (mut vm, transport, _) = setup();
    transport.respond(500, "down");

    let input = UpdateEmployee {
        last_name: Some("Lee".to_string()),
        ..Default::default()
    };
    assert!(!vm.update("p-1", &input).await);

    assert_eq!(transport.requests().len(), 1);
    assert_eq!(vm.error_message(), "Error 500: Internal Server Error. down");
}

#[tokio::test]
async fn update_validates_only_present_fields() {
    let (mut vm, transport, _) = setup();
    let input = UpdateEmployee {
        first_name: Some("A".to_string()),
        ..Default::default()
    };

    assert!(!vm.update("p-1", &input).await);
    assert!(transport.requests().is_empty());
    assert_eq!(vm.error_message(), "First name must be at least 2 characters");
}

#[tokio::test]
async fn update_duplicate_ssn_mentions_another_employee() {
    let (mut vm, transport, _) = setup();
    transport
        .respond(200, &record("p-2", "E002", "222-22-2222"))
        .respond(409, "SSN exists");

    let input = UpdateEmployee {
        ssn: Some("111-11-1111".to_string()),
        ..Default::default()
    };
    assert!(!vm.update("p-2", &input).await);
    assert_eq!(vm.error_message(), "Another employee with this SSN already exists");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_reloads_full_list() {
    let (mut vm, transport, recorder) = setup();
    transport.respond(
        200,
        &format!(
            "[{},{}]",
            record("p-1", "E001", "111-11-1111"),
            record("p-2", "E002", "222-22-2222")
        ),
    );
    vm.load_all().await;

    transport
        .respond(204, "")
        .respond(200, &format!("[{}]", record("p-2", "E002", "222-22-2222")));
    assert!(vm.delete("p-1").await);

    let requests = transport.requests();
    assert_eq!(requests[1].method, HttpMethod::Delete);
    assert_eq!(requests[1].path, "http://remote.test/Employees(p-1)");
    assert_eq!(vm.employees().len(), 1);
    assert_eq!(vm.employees()[0].id, "p-2");
    assert!(recorder
        .events()
        .contains(&Event::Success("Employee removed successfully".to_string())));
}

#[tokio::test]
async fn delete_not_found_leaves_state_unchanged() {
    let (mut vm, transport, _) = setup();
    transport.respond(200, &format!("[{}]", record("p-1", "E001", "111-11-1111")));
    vm.load_all().await;

    transport.respond(404, "");
    assert!(!vm.delete("ghost").await);

    assert_eq!(vm.employees().len(), 1);
    assert_eq!(vm.error_message(), "Employee with ID ghost not found");
    assert_eq!(transport.requests().len(), 2);
}

// ---------------------------------------------------------------------------
// Accessors and listener registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn set_current_employee_has_no_side_effects() {
    let (mut vm, transport, recorder) = setup();
    transport.respond(200, &record("p-1", "E001", "111-11-1111"));
    let employee = vm.load_one("p-1").await.unwrap();
    let before = recorder.events().len();

    vm.set_current_employee(None);
    assert!(vm.current_employee().is_none());
    vm.set_current_employee(Some(employee.clone()));
    assert_eq!(vm.current_employee(), Some(&employee));

    assert_eq!(recorder.events().len(), before);
}

#[tokio::test]
async fn registering_a_listener_replaces_the_previous_one() {
    let (mut vm, transport, first) = setup();
    let second = Recorder::default();
    vm.register_listener(second.clone());

    transport.respond(200, "[]");
    vm.load_all().await;

    assert!(first.events().is_empty());
    assert_eq!(second.events().len(), 3);
}

#[tokio::test]
async fn closure_callbacks_receive_events() {
    let (mut vm, transport, _) = setup();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    vm.register_listener(
        employee_core::Callbacks::new().on_employees_changed(move |employees| {
            sink.lock().unwrap().push(employees.len());
        }),
    );

    transport.respond(200, &format!("[{}]", record("p-1", "E001", "111-11-1111")));
    vm.load_all().await;

    assert_eq!(*seen.lock().unwrap(), vec![1]);
}
