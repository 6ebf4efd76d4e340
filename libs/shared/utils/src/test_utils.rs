use std::time::Duration;
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::{Role, User};

pub struct TestConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub retry_max_attempts: u32,
    pub retry_base_delay: Duration,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            request_timeout: Duration::from_secs(5),
            retry_max_attempts: 1,
            retry_base_delay: Duration::from_millis(10),
        }
    }
}

impl TestConfig {
    /// Config aimed at a mock server, with retries disabled.
    pub fn for_server(uri: &str) -> Self {
        Self {
            api_base_url: uri.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig::new(self.api_base_url.clone())
            .with_timeout(self.request_timeout)
            .with_retry(self.retry_max_attempts, self.retry_base_delay)
    }
}

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub name: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self::patient("test@example.com")
    }
}

impl TestUser {
    pub fn new(email: &str, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            role,
            name: "Test User".to_string(),
        }
    }

    pub fn doctor(email: &str) -> Self {
        Self::new(email, Role::Doctor)
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, Role::Patient)
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
            name: Some(self.name.clone()),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id.to_string(),
            "email": self.email,
            "role": self.role.to_string(),
            "name": self.name
        })
    }
}

/// JSON bodies shaped like the companion backend's responses.
pub struct MockBackendResponses;

impl MockBackendResponses {
    pub fn auth_response(user: &TestUser, token: &str) -> Value {
        json!({
            "token": token,
            "user": user.to_json()
        })
    }

    pub fn medication_response(patient_id: &Uuid, name: &str, dosage: &str) -> Value {
        json!({
            "id": Uuid::new_v4().to_string(),
            "patient_id": patient_id.to_string(),
            "prescribed_by": null,
            "name": name,
            "dosage": dosage,
            "frequency": "Once daily",
            "route": "oral",
            "start_date": "2026-01-01",
            "end_date": null,
            "instructions": "Take after food",
            "is_active": true,
            "created_at": "2026-01-01T08:00:00.000000"
        })
    }

    /// An event scheduled `offset_minutes` from now.
    pub fn medication_event_response(name: &str, status: &str, offset_minutes: i64) -> Value {
        let scheduled = Utc::now() + ChronoDuration::minutes(offset_minutes);
        let taken_time = (status == "taken").then(|| scheduled.to_rfc3339());
        json!({
            "id": Uuid::new_v4().to_string(),
            "medication_id": Uuid::new_v4().to_string(),
            "name": name,
            "dosage": "10 mg",
            "scheduled_time": scheduled.to_rfc3339(),
            "taken_time": taken_time,
            "status": status,
            "notes": null
        })
    }

    /// An appointment starting `offset_hours` from now.
    pub fn appointment_response(patient_id: &Uuid, status: &str, offset_hours: i64) -> Value {
        let start = Utc::now() + ChronoDuration::hours(offset_hours);
        json!({
            "id": Uuid::new_v4().to_string(),
            "patient_id": patient_id.to_string(),
            "doctor_id": Uuid::new_v4().to_string(),
            "start_time": start.to_rfc3339(),
            "end_time": (start + ChronoDuration::minutes(30)).to_rfc3339(),
            "status": status,
            "reason": "Follow-up",
            "notes": null,
            "created_at": null
        })
    }

    pub fn report_response(patient_id: &Uuid, report_type: &str) -> Value {
        json!({
            "id": Uuid::new_v4().to_string(),
            "patient_id": patient_id.to_string(),
            "uploaded_by": patient_id.to_string(),
            "type": report_type,
            "file_url": "https://files.example.com/reports/cbc.pdf",
            "date": "2026-01-05",
            "notes": "Routine blood work",
            "created_at": "2026-01-05T09:15:00.000000"
        })
    }

    pub fn profile_response(user: &TestUser) -> Value {
        json!({
            "id": user.id.to_string(),
            "full_name": user.name,
            "date_of_birth": "1980-04-12",
            "gender": "female",
            "phone": "+353 1 555 0100",
            "address": null,
            "blood_group": null,
            "conditions": "Type 2 diabetes",
            "allergies": null
        })
    }
}
