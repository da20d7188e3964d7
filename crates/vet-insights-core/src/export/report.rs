//! Health report export for the presentation layer and offline sharing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::{AnalyticsService, DashboardSummary, RecordSource};
use crate::config::AnalyticsConfig;
use crate::db::DbResult;
use crate::models::{AmrRisk, ProductivityMetric, Species, VaccinationReminder, WelfareScore};

/// All derived metrics computed from one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Export metadata
    pub metadata: ReportMetadata,
    /// Headline numbers
    pub summary: DashboardSummary,
    /// Dairy productivity
    pub productivity: Vec<ProductivityMetric>,
    /// Companion welfare
    pub welfare: Vec<WelfareScore>,
    /// Antimicrobial-resistance risk
    pub amr_risks: Vec<AmrRisk>,
    /// Boosters due within the configured window
    pub vaccination_reminders: Vec<VaccinationReminder>,
}

/// Health report metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Export format version
    pub format_version: String,
    /// Generation timestamp
    pub generated_at: String,
    /// Productivity window in days
    pub timeframe_days: u32,
    /// Species filter applied to the metric lists, if any
    pub species_filter: Option<String>,
    /// Exporting system identifier
    pub system_id: Option<String>,
}

impl HealthReport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Productivity section as CSV.
    pub fn productivity_csv(&self) -> String {
        let mut csv = String::new();
        csv.push_str("animal_id,animal_name,species,baseline_l_per_day,current_l_per_day,loss_percentage,estimated_loss,illness_days\n");

        for m in &self.productivity {
            csv.push_str(&format!(
                "{},{},{},{:.2},{:.2},{:.2},{:.2},{}\n",
                escape_csv(&m.animal_id),
                escape_csv(&m.animal_name),
                escape_csv(&m.species),
                m.baseline_productivity,
                m.current_productivity,
                m.loss_percentage,
                m.estimated_loss,
                m.illness_days,
            ));
        }

        csv
    }

    /// Welfare section as CSV.
    pub fn welfare_csv(&self) -> String {
        let mut csv = String::new();
        csv.push_str("animal_id,animal_name,species,score,vaccination_status,health_trend,days_since_last_visit\n");

        for w in &self.welfare {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                escape_csv(&w.animal_id),
                escape_csv(&w.animal_name),
                escape_csv(&w.species),
                w.score,
                w.vaccination_status.as_str(),
                w.health_trend.as_str(),
                w.days_since_last_visit
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
            ));
        }

        csv
    }

    /// AMR section as CSV. Risk factors are joined with `; `.
    pub fn amr_csv(&self) -> String {
        let mut csv = String::new();
        csv.push_str("animal_id,animal_name,species,risk_level,antibiotic_treatments,repeated_treatments,risk_factors\n");

        for r in &self.amr_risks {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                escape_csv(&r.animal_id),
                escape_csv(&r.animal_name),
                escape_csv(&r.species),
                r.risk_level.as_str(),
                r.antibiotic_treatments,
                r.repeated_treatments,
                escape_csv(&r.risk_factors.join("; ")),
            ));
        }

        csv
    }
}

/// Health report exporter.
pub struct ReportExporter<'a, S: RecordSource + ?Sized> {
    service: AnalyticsService<'a, S>,
    system_id: Option<String>,
}

impl<'a, S: RecordSource + ?Sized> ReportExporter<'a, S> {
    /// Create a new exporter with the default configuration.
    pub fn new(source: &'a S) -> Self {
        Self {
            service: AnalyticsService::new(source),
            system_id: None,
        }
    }

    /// Create a new exporter with an explicit configuration.
    pub fn with_config(source: &'a S, config: AnalyticsConfig) -> Self {
        Self {
            service: AnalyticsService::with_config(source, config),
            system_id: None,
        }
    }

    /// Set the system identifier for exports.
    pub fn with_system_id(mut self, system_id: String) -> Self {
        self.system_id = Some(system_id);
        self
    }

    /// Build a report as of now.
    pub fn export(&self, timeframe_days: u32, species: Option<&Species>) -> DbResult<HealthReport> {
        self.export_at(Utc::now(), timeframe_days, species)
    }

    /// Build a report as of `now` from a single snapshot.
    ///
    /// The species filter narrows the metric lists; the summary always
    /// covers every animal.
    pub fn export_at(
        &self,
        now: DateTime<Utc>,
        timeframe_days: u32,
        species: Option<&Species>,
    ) -> DbResult<HealthReport> {
        let snapshot = self.service.snapshot()?;
        let reminder_window = self.service.config().reminder_window_days;

        let report = HealthReport {
            metadata: ReportMetadata {
                format_version: "1.0".to_string(),
                generated_at: now.to_rfc3339(),
                timeframe_days,
                species_filter: species.map(|s| s.to_string()),
                system_id: self.system_id.clone(),
            },
            summary: self.service.summary_for(&snapshot, now, timeframe_days),
            productivity: self
                .service
                .productivity_for(&snapshot, now, timeframe_days, species),
            welfare: self.service.welfare_for(&snapshot, now, species),
            amr_risks: self.service.amr_for(&snapshot, species),
            vaccination_reminders: self.service.reminders_for(&snapshot, now, reminder_window),
        };

        tracing::info!(
            productivity = report.productivity.len(),
            welfare = report.welfare.len(),
            amr = report.amr_risks.len(),
            "exported health report"
        );
        Ok(report)
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
