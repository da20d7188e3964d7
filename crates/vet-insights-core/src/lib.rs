//! Vet-Insights Core Library
//!
//! Local-first veterinary record store with derived health analytics.
//!
//! # Architecture
//!
//! ```text
//!   Animals ─┐
//!   Visits  ─┼──► SQLite store ──► Snapshot (one consistent read)
//!   Vaccines ┘                          │
//!                 ┌─────────────────────┼─────────────────────┐
//!                 │                     │                     │
//!                 ▼                     ▼                     ▼
//!          Productivity            Welfare               AMR risk
//!          (cow, buffalo)          (dog, cat)            (all species)
//!                 │                     │                     │
//!                 └──────────► Dashboard / Report ◄───────────┘
//! ```
//!
//! # Core Principle
//!
//! **Derived metrics are never stored.** Every request recomputes them from a
//! fresh snapshot, so the calculators stay pure and repeatable.
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer
//! - [`models`]: Domain types (Animal, VisitRecord, Vaccination, metrics)
//! - [`analytics`]: Productivity, welfare and AMR calculators
//! - [`export`]: Health report export (JSON, CSV)
//! - [`config`]: Analytics configuration
//! - [`logging`]: `tracing` subscriber setup

pub mod analytics;
pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use analytics::{
    AmrRiskClassifier, AnalyticsService, DashboardSummary, ProductivityCalculator, RecordSource,
    Snapshot, WelfareScorer,
};
pub use config::AnalyticsConfig;
pub use db::Database;
pub use export::{HealthReport, ReportExporter};
pub use models::{
    AmrRisk, Animal, HealthTrend, ProductivityMetric, RiskLevel, Species, Vaccination,
    VaccinationReminder, VaccinationStatus, VisitRecord, WelfareScore,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum VetInsightsError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for VetInsightsError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => VetInsightsError::NotFound(what),
            db::DbError::Constraint(msg) => VetInsightsError::InvalidInput(msg),
            other => VetInsightsError::DatabaseError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for VetInsightsError {
    fn from(e: serde_json::Error) -> Self {
        VetInsightsError::SerializationError(e.to_string())
    }
}

impl From<config::ConfigError> for VetInsightsError {
    fn from(e: config::ConfigError) -> Self {
        VetInsightsError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for VetInsightsError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        VetInsightsError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<VetInsightsCore>, VetInsightsError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(VetInsightsCore::new(db, AnalyticsConfig::default())))
}

/// Open a database and apply a JSON analytics configuration.
#[uniffi::export]
pub fn open_database_with_config(
    path: String,
    config_json: String,
) -> Result<Arc<VetInsightsCore>, VetInsightsError> {
    let config = AnalyticsConfig::from_json(&config_json)?;
    let db = Database::open(&path)?;
    Ok(Arc::new(VetInsightsCore::new(db, config)))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<VetInsightsCore>, VetInsightsError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(VetInsightsCore::new(db, AnalyticsConfig::default())))
}

/// Install the default log subscriber (honours `RUST_LOG`).
#[uniffi::export]
pub fn init_logging() {
    logging::init();
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct VetInsightsCore {
    db: Arc<Mutex<Database>>,
    config: AnalyticsConfig,
}

impl VetInsightsCore {
    fn new(db: Database, config: AnalyticsConfig) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            config,
        }
    }

    /// Copy all records out under the lock; analytics then run unlocked.
    fn snapshot(&self) -> Result<Snapshot, VetInsightsError> {
        let db = self.db.lock()?;
        Ok(Snapshot::capture(&*db)?)
    }
}

#[uniffi::export]
impl VetInsightsCore {
    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Register a new animal.
    pub fn register_animal(
        &self,
        name: String,
        species: String,
        owner_name: Option<String>,
    ) -> Result<FfiAnimal, VetInsightsError> {
        let db = self.db.lock()?;
        let mut animal = Animal::new(name, species);
        animal.owner_name = owner_name;
        db.insert_animal(&animal)?;
        Ok(animal.into())
    }

    /// List all animals.
    pub fn list_animals(&self) -> Result<Vec<FfiAnimal>, VetInsightsError> {
        let db = self.db.lock()?;
        let animals = db.list_animals()?;
        Ok(animals.into_iter().map(|a| a.into()).collect())
    }

    /// Record a medical visit.
    pub fn record_visit(&self, visit: FfiVisit) -> Result<String, VetInsightsError> {
        require_timestamp("visit date", &visit.visit_date)?;
        let db = self.db.lock()?;
        let record: VisitRecord = visit.into();
        db.insert_visit(&record)?;
        Ok(record.id)
    }

    /// Record a vaccination.
    pub fn record_vaccination(
        &self,
        vaccination: FfiVaccination,
    ) -> Result<String, VetInsightsError> {
        require_timestamp("vaccination date", &vaccination.date_given)?;
        if let Some(due) = &vaccination.next_due_date {
            require_timestamp("next due date", due)?;
        }
        let db = self.db.lock()?;
        let record: Vaccination = vaccination.into();
        db.insert_vaccination(&record)?;
        Ok(record.id)
    }

    // =========================================================================
    // Analytics Operations
    // =========================================================================

    /// Productivity metrics for dairy animals.
    pub fn productivity_metrics(
        &self,
        timeframe_days: Option<u32>,
        species: Option<String>,
    ) -> Result<Vec<FfiProductivityMetric>, VetInsightsError> {
        let snapshot = self.snapshot()?;
        let service = AnalyticsService::with_config(&snapshot, self.config.clone());
        let species = species.as_deref().map(Species::parse);
        let timeframe = timeframe_days.unwrap_or(self.config.default_timeframe_days);
        let metrics = service.productivity_for(
            &snapshot,
            chrono::Utc::now(),
            timeframe,
            species.as_ref(),
        );
        Ok(metrics.into_iter().map(|m| m.into()).collect())
    }

    /// Welfare scores for companion animals.
    pub fn welfare_scores(
        &self,
        species: Option<String>,
    ) -> Result<Vec<FfiWelfareScore>, VetInsightsError> {
        let snapshot = self.snapshot()?;
        let service = AnalyticsService::with_config(&snapshot, self.config.clone());
        let species = species.as_deref().map(Species::parse);
        let scores = service.welfare_for(&snapshot, chrono::Utc::now(), species.as_ref());
        Ok(scores.into_iter().map(|s| s.into()).collect())
    }

    /// Antimicrobial-resistance risk for every animal.
    pub fn amr_risks(&self, species: Option<String>) -> Result<Vec<FfiAmrRisk>, VetInsightsError> {
        let snapshot = self.snapshot()?;
        let service = AnalyticsService::with_config(&snapshot, self.config.clone());
        let species = species.as_deref().map(Species::parse);
        let risks = service.amr_for(&snapshot, species.as_ref());
        Ok(risks.into_iter().map(|r| r.into()).collect())
    }

    /// Boosters due within the window (configured default when omitted).
    pub fn vaccination_reminders(
        &self,
        within_days: Option<u32>,
    ) -> Result<Vec<FfiVaccinationReminder>, VetInsightsError> {
        let snapshot = self.snapshot()?;
        let service = AnalyticsService::with_config(&snapshot, self.config.clone());
        let window = within_days.unwrap_or(self.config.reminder_window_days);
        let reminders = service.reminders_for(&snapshot, chrono::Utc::now(), window);
        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export the full health report as JSON.
    pub fn export_health_report_json(
        &self,
        timeframe_days: Option<u32>,
        species: Option<String>,
    ) -> Result<String, VetInsightsError> {
        let snapshot = self.snapshot()?;
        let exporter = ReportExporter::with_config(&snapshot, self.config.clone());
        let species = species.as_deref().map(Species::parse);
        let timeframe = timeframe_days.unwrap_or(self.config.default_timeframe_days);
        let report = exporter.export(timeframe, species.as_ref())?;
        Ok(report.to_json()?)
    }
}

/// Reject date text the calculators would silently treat as a non-match.
fn require_timestamp(field: &str, value: &str) -> Result<(), VetInsightsError> {
    match models::parse_timestamp(value) {
        Some(_) => Ok(()),
        None => Err(VetInsightsError::InvalidInput(format!(
            "unparseable {}: {}",
            field, value
        ))),
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe animal.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnimal {
    pub id: String,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub owner_name: Option<String>,
    pub owner_phone: Option<String>,
}

impl From<Animal> for FfiAnimal {
    fn from(animal: Animal) -> Self {
        Self {
            id: animal.id,
            name: animal.name,
            species: animal.species,
            breed: animal.breed,
            owner_name: animal.owner_name,
            owner_phone: animal.owner_phone,
        }
    }
}

/// FFI-safe visit input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVisit {
    pub animal_id: String,
    pub visit_date: String,
    pub diagnosis: String,
    pub treatment: String,
    pub medications: Option<String>,
    pub veterinarian: Option<String>,
    pub notes: Option<String>,
}

impl From<FfiVisit> for VisitRecord {
    fn from(visit: FfiVisit) -> Self {
        let mut record =
            VisitRecord::new(visit.animal_id, visit.visit_date, visit.diagnosis, visit.treatment);
        record.medications = visit.medications;
        record.veterinarian = visit.veterinarian;
        record.notes = visit.notes;
        record
    }
}

/// FFI-safe vaccination input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVaccination {
    pub animal_id: String,
    pub vaccine_name: String,
    pub date_given: String,
    pub next_due_date: Option<String>,
    pub batch_number: Option<String>,
    pub administered_by: Option<String>,
}

impl From<FfiVaccination> for Vaccination {
    fn from(vacc: FfiVaccination) -> Self {
        let mut record = Vaccination::new(vacc.animal_id, vacc.vaccine_name, vacc.date_given);
        record.next_due_date = vacc.next_due_date;
        record.batch_number = vacc.batch_number;
        record.administered_by = vacc.administered_by;
        record
    }
}

/// FFI-safe productivity metric.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProductivityMetric {
    pub animal_id: String,
    pub animal_name: String,
    pub species: String,
    pub baseline_productivity: f64,
    pub current_productivity: f64,
    pub loss_percentage: f64,
    pub estimated_loss: f64,
    pub illness_days: u32,
}

impl From<ProductivityMetric> for FfiProductivityMetric {
    fn from(m: ProductivityMetric) -> Self {
        Self {
            animal_id: m.animal_id,
            animal_name: m.animal_name,
            species: m.species,
            baseline_productivity: m.baseline_productivity,
            current_productivity: m.current_productivity,
            loss_percentage: m.loss_percentage,
            estimated_loss: m.estimated_loss,
            illness_days: m.illness_days,
        }
    }
}

/// FFI-safe welfare score.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiWelfareScore {
    pub animal_id: String,
    pub animal_name: String,
    pub species: String,
    pub score: u8,
    pub vaccination_status: String,
    pub health_trend: String,
    pub days_since_last_visit: Option<i64>,
}

impl From<WelfareScore> for FfiWelfareScore {
    fn from(w: WelfareScore) -> Self {
        Self {
            animal_id: w.animal_id,
            animal_name: w.animal_name,
            species: w.species,
            score: w.score,
            vaccination_status: w.vaccination_status.as_str().to_string(),
            health_trend: w.health_trend.as_str().to_string(),
            days_since_last_visit: w.days_since_last_visit,
        }
    }
}

/// FFI-safe AMR risk.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAmrRisk {
    pub animal_id: String,
    pub animal_name: String,
    pub species: String,
    pub risk_level: String,
    pub antibiotic_treatments: u32,
    pub repeated_treatments: u32,
    pub risk_factors: Vec<String>,
}

impl From<AmrRisk> for FfiAmrRisk {
    fn from(r: AmrRisk) -> Self {
        Self {
            animal_id: r.animal_id,
            animal_name: r.animal_name,
            species: r.species,
            risk_level: r.risk_level.as_str().to_string(),
            antibiotic_treatments: r.antibiotic_treatments,
            repeated_treatments: r.repeated_treatments,
            risk_factors: r.risk_factors,
        }
    }
}

/// FFI-safe vaccination reminder.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVaccinationReminder {
    pub animal_id: String,
    pub animal_name: String,
    pub vaccine_name: String,
    pub next_due_date: String,
    pub days_until_due: i64,
    pub overdue: bool,
}

impl From<VaccinationReminder> for FfiVaccinationReminder {
    fn from(r: VaccinationReminder) -> Self {
        Self {
            animal_id: r.animal_id,
            animal_name: r.animal_name,
            vaccine_name: r.vaccine_name,
            next_due_date: r.next_due_date,
            days_until_due: r.days_until_due,
            overdue: r.overdue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(animal_id: &str, date: &str, diagnosis: &str, treatment: &str) -> FfiVisit {
        FfiVisit {
            animal_id: animal_id.to_string(),
            visit_date: date.to_string(),
            diagnosis: diagnosis.to_string(),
            treatment: treatment.to_string(),
            medications: None,
            veterinarian: None,
            notes: None,
        }
    }

    #[test]
    fn test_ffi_round_trip() {
        let core = open_database_in_memory().unwrap();
        let cow = core
            .register_animal("Gori".into(), "cow".into(), Some("Aslam".into()))
            .unwrap();
        let recent = (chrono::Utc::now() - chrono::Duration::days(5)).to_rfc3339();
        core.record_visit(visit(&cow.id, &recent, "Mastitis", "Penicillin"))
            .unwrap();

        assert_eq!(core.list_animals().unwrap().len(), 1);

        let metrics = core.productivity_metrics(None, None).unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].illness_days, 7);

        let risks = core.amr_risks(Some("COW".into())).unwrap();
        assert_eq!(risks[0].risk_level, "low");
        assert_eq!(risks[0].risk_factors, vec!["Chronic mastitis history".to_string()]);

        assert!(core.welfare_scores(None).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_unparseable_visit_date() {
        let core = open_database_in_memory().unwrap();
        let dog = core.register_animal("Moti".into(), "dog".into(), None).unwrap();

        let result = core.record_visit(visit(&dog.id, "next week", "Checkup", ""));
        assert!(matches!(result, Err(VetInsightsError::InvalidInput(_))));
    }

    fn rabies_shot(animal_id: &str, date_given: &str, next_due: Option<&str>) -> FfiVaccination {
        FfiVaccination {
            animal_id: animal_id.to_string(),
            vaccine_name: "Rabies".into(),
            date_given: date_given.to_string(),
            next_due_date: next_due.map(|d| d.to_string()),
            batch_number: None,
            administered_by: None,
        }
    }

    #[test]
    fn test_rejects_unparseable_vaccination_date() {
        let core = open_database_in_memory().unwrap();
        let dog = core.register_animal("Moti".into(), "dog".into(), None).unwrap();

        let result = core.record_vaccination(rabies_shot(&dog.id, "last spring", None));
        assert!(matches!(result, Err(VetInsightsError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_unparseable_next_due_date() {
        let core = open_database_in_memory().unwrap();
        let dog = core.register_animal("Moti".into(), "dog".into(), None).unwrap();

        let result =
            core.record_vaccination(rabies_shot(&dog.id, "2024-01-01", Some("next month")));
        assert!(matches!(result, Err(VetInsightsError::InvalidInput(_))));

        // Nothing stored, so no reminder can go missing
        let snapshot = core.snapshot().unwrap();
        assert!(snapshot.vaccinations.is_empty());

        core.record_vaccination(rabies_shot(&dog.id, "2024-01-01", Some("2025-01-01")))
            .unwrap();
        assert_eq!(core.vaccination_reminders(Some(3650)).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_animal_is_not_found() {
        let core = open_database_in_memory().unwrap();
        let result = core.record_visit(visit("ghost", "2024-01-01", "Checkup", ""));
        assert!(matches!(result, Err(VetInsightsError::NotFound(_))));
    }

    #[test]
    fn test_empty_name_is_invalid_input() {
        let core = open_database_in_memory().unwrap();
        let result = core.register_animal("".into(), "cat".into(), None);
        assert!(matches!(result, Err(VetInsightsError::InvalidInput(_))));
    }

    #[test]
    fn test_welfare_and_reminders() {
        let core = open_database_in_memory().unwrap();
        let dog = core.register_animal("Moti".into(), "dog".into(), None).unwrap();
        let given = (chrono::Utc::now() - chrono::Duration::days(360)).to_rfc3339();
        let due = (chrono::Utc::now() + chrono::Duration::days(5)).to_rfc3339();
        core.record_vaccination(FfiVaccination {
            animal_id: dog.id.clone(),
            vaccine_name: "Rabies".into(),
            date_given: given,
            next_due_date: Some(due),
            batch_number: None,
            administered_by: None,
        })
        .unwrap();

        let scores = core.welfare_scores(Some("dog".into())).unwrap();
        assert_eq!(scores[0].vaccination_status, "up-to-date");
        assert_eq!(scores[0].score, 70);

        let reminders = core.vaccination_reminders(None).unwrap();
        assert_eq!(reminders.len(), 1);
        assert!(!reminders[0].overdue);
    }

    #[test]
    fn test_export_json() {
        init_logging();
        let core = open_database_in_memory().unwrap();
        core.register_animal("Billi".into(), "cat".into(), None).unwrap();

        let json = core.export_health_report_json(Some(30), None).unwrap();
        assert!(json.contains("\"timeframe_days\": 30"));
        assert!(json.contains("Billi"));
    }

    #[test]
    fn test_config_json_rejected() {
        let result = open_database_with_config(
            ":memory:".into(),
            r#"{"milk_price_per_liter": -1}"#.into(),
        );
        assert!(matches!(result, Err(VetInsightsError::InvalidInput(_))));
    }
}
