use chrono::{DateTime, Utc};
use dotenv::dotenv;
use tracing::{debug, info};

use appointment_cell::AppointmentService;
use auth_cell::AuthService;
use health_profile_cell::ProfileService;
use medication_cell::{MedicationEventService, MedicationService};
use nurse_cell::NurseService;
use report_cell::ReportService;
use shared_backend::BackendClient;
use shared_config::AppConfig;
use shared_models::ApiResult;

use crate::overview::HomeOverview;

/// Every backend resource behind one shared session.
///
/// Logging in through `auth()` authorizes all the other services, since they
/// hold clones of the same [`BackendClient`].
pub struct CompanionClient {
    backend: BackendClient,
    auth: AuthService,
    medications: MedicationService,
    medication_events: MedicationEventService,
    appointments: AppointmentService,
    reports: ReportService,
    profile: ProfileService,
    nurse: NurseService,
}

impl CompanionClient {
    pub fn new(config: &AppConfig) -> ApiResult<Self> {
        let backend = BackendClient::new(config)?;
        Ok(Self::with_backend(backend))
    }

    /// Loads `.env` if present, then reads the `VIORA_*` variables.
    pub fn from_env() -> ApiResult<Self> {
        dotenv().ok();
        let config = AppConfig::from_env();
        info!("Companion client targeting {}", config.api_base_url);
        Self::new(&config)
    }

    pub fn with_backend(backend: BackendClient) -> Self {
        Self {
            auth: AuthService::new(&backend),
            medications: MedicationService::new(&backend),
            medication_events: MedicationEventService::new(&backend),
            appointments: AppointmentService::new(&backend),
            reports: ReportService::new(&backend),
            profile: ProfileService::new(&backend),
            nurse: NurseService::new(&backend),
            backend,
        }
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn medications(&self) -> &MedicationService {
        &self.medications
    }

    pub fn medication_events(&self) -> &MedicationEventService {
        &self.medication_events
    }

    pub fn appointments(&self) -> &AppointmentService {
        &self.appointments
    }

    pub fn reports(&self) -> &ReportService {
        &self.reports
    }

    pub fn profile(&self) -> &ProfileService {
        &self.profile
    }

    pub fn nurse(&self) -> &NurseService {
        &self.nurse
    }

    /// Fetches profile, appointments and today's doses concurrently.
    /// The first failure aborts the whole overview.
    pub async fn home_overview(&self, now: DateTime<Utc>) -> ApiResult<HomeOverview> {
        debug!("Loading home overview");

        let (profile, appointments, events) = tokio::try_join!(
            self.profile.get(),
            self.appointments.list(),
            self.medication_events.today(),
        )?;

        Ok(HomeOverview::build(profile, &appointments, &events, now))
    }
}
