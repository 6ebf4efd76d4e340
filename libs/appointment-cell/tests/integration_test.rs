use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::{
    next_appointment, partition, AppointmentService, AppointmentStatus, CreateAppointmentRequest,
    UpdateAppointmentRequest,
};
use shared_backend::BackendClient;
use shared_utils::test_utils::{MockBackendResponses, TestConfig, TestUser};

async fn create_backend(server: &MockServer, token: &str) -> BackendClient {
    let backend =
        BackendClient::new(&TestConfig::for_server(&server.uri()).to_app_config()).unwrap();
    backend.set_token(token).await;
    backend
}

fn start_time() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2026-01-10T10:30:00+00:00").unwrap()
}

#[tokio::test]
async fn test_list_and_agenda_helpers() {
    let mock_server = MockServer::start().await;
    let user = TestUser::default();

    Mock::given(method("GET"))
        .and(path("/appointments"))
        .and(header("Authorization", "Bearer patient-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockBackendResponses::appointment_response(&user.id, "scheduled", 48),
            MockBackendResponses::appointment_response(&user.id, "confirmed", 24),
            MockBackendResponses::appointment_response(&user.id, "completed", -72),
        ])))
        .mount(&mock_server)
        .await;

    let service = AppointmentService::new(&create_backend(&mock_server, "patient-token").await);
    let appointments = service.list().await.unwrap();

    assert_eq!(appointments.len(), 3);

    let agenda = partition(&appointments);
    assert_eq!(agenda.upcoming.len(), 2);
    assert_eq!(agenda.past.len(), 1);

    let next = next_appointment(&appointments, Utc::now()).unwrap();
    assert_eq!(next.known_status(), Some(AppointmentStatus::Confirmed));
}

#[tokio::test]
async fn test_patient_books_with_doctor_id() {
    let mock_server = MockServer::start().await;
    let user = TestUser::default();
    let doctor_id = Uuid::new_v4();
    let start = start_time();

    let mut booked = MockBackendResponses::appointment_response(&user.id, "scheduled", 24);
    booked["doctor_id"] = json!(doctor_id.to_string());

    Mock::given(method("POST"))
        .and(path("/appointments"))
        .and(body_json(json!({
            "doctor_id": doctor_id.to_string(),
            "start_time": serde_json::to_value(start).unwrap(),
            "reason": "Chest pain follow-up"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(booked))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = AppointmentService::new(&create_backend(&mock_server, "patient-token").await);
    let request =
        CreateAppointmentRequest::with_doctor(doctor_id, start).with_reason("Chest pain follow-up");

    let appointment = service.create(&request).await.unwrap();

    assert_eq!(appointment.doctor_id, doctor_id);
    assert_eq!(appointment.status, "scheduled");
}

#[tokio::test]
async fn test_doctor_books_for_patient() {
    let mock_server = MockServer::start().await;
    let patient = TestUser::patient("patient@example.com");
    let start = start_time();
    let end = start + Duration::minutes(30);

    Mock::given(method("POST"))
        .and(path("/appointments"))
        .and(body_json(json!({
            "patient_id": patient.id.to_string(),
            "start_time": serde_json::to_value(start).unwrap(),
            "end_time": serde_json::to_value(end).unwrap(),
            "notes": "Bring previous ECG"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(MockBackendResponses::appointment_response(&patient.id, "scheduled", 24)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = AppointmentService::new(&create_backend(&mock_server, "doctor-token").await);
    let request = CreateAppointmentRequest::for_patient(patient.id, start)
        .ending_at(end)
        .with_notes("Bring previous ECG");

    let appointment = service.create(&request).await.unwrap();
    assert_eq!(appointment.patient_id, patient.id);
}

#[tokio::test]
async fn test_update_status_and_cancel() {
    let mock_server = MockServer::start().await;
    let user = TestUser::default();
    let appointment_id = Uuid::new_v4();

    let mut confirmed = MockBackendResponses::appointment_response(&user.id, "confirmed", 24);
    confirmed["id"] = json!(appointment_id.to_string());
    let mut cancelled = confirmed.clone();
    cancelled["status"] = json!("cancelled");

    Mock::given(method("PATCH"))
        .and(path(format!("/appointments/{}", appointment_id)))
        .and(body_json(json!({ "status": "confirmed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(confirmed))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("/appointments/{}", appointment_id)))
        .and(body_json(json!({ "status": "cancelled" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(cancelled))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = AppointmentService::new(&create_backend(&mock_server, "doctor-token").await);

    let updated = service.update_status(appointment_id, "confirmed").await.unwrap();
    assert_eq!(updated.status, "confirmed");

    let cancelled = service.cancel(appointment_id).await.unwrap();
    assert_eq!(cancelled.known_status(), Some(AppointmentStatus::Cancelled));
}

#[tokio::test]
async fn test_reschedule_sends_times_only() {
    let mock_server = MockServer::start().await;
    let user = TestUser::default();
    let appointment_id = Uuid::new_v4();
    let new_start = start_time() + Duration::days(2);

    Mock::given(method("PATCH"))
        .and(path(format!("/appointments/{}", appointment_id)))
        .and(body_json(json!({ "start_time": serde_json::to_value(new_start).unwrap() })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockBackendResponses::appointment_response(&user.id, "scheduled", 48)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = AppointmentService::new(&create_backend(&mock_server, "patient-token").await);
    let request = UpdateAppointmentRequest {
        start_time: Some(new_start),
        ..UpdateAppointmentRequest::default()
    };

    assert!(service.update(appointment_id, &request).await.is_ok());
}

#[tokio::test]
async fn test_forbidden_update_is_reported() {
    let mock_server = MockServer::start().await;
    let appointment_id = Uuid::new_v4();

    Mock::given(method("PATCH"))
        .and(path(format!("/appointments/{}", appointment_id)))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "error": "Forbidden" })))
        .mount(&mock_server)
        .await;

    let service = AppointmentService::new(&create_backend(&mock_server, "patient-token").await);
    let err = service.cancel(appointment_id).await.unwrap_err();

    assert_eq!(err.to_string(), "Forbidden");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(403));
}
