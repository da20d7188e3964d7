//! Caller-facing analytics operations over a record source.

use chrono::{DateTime, Utc};

use super::{
    upcoming_vaccinations, AmrRiskClassifier, DashboardSummary, ProductivityCalculator, RecordSource,
    Snapshot, WelfareScorer,
};
use crate::config::AnalyticsConfig;
use crate::db::DbResult;
use crate::models::{AmrRisk, ProductivityMetric, Species, VaccinationReminder, WelfareScore};

/// Runs the calculators against fresh snapshots of a [`RecordSource`].
///
/// Every `get_*` call captures its own snapshot, so one call never mixes
/// records from two reads. The `*_for` methods work on a snapshot the
/// caller already holds.
pub struct AnalyticsService<'a, S: RecordSource + ?Sized> {
    source: &'a S,
    config: AnalyticsConfig,
    productivity: ProductivityCalculator,
    welfare: WelfareScorer,
    amr: AmrRiskClassifier,
}

impl<'a, S: RecordSource + ?Sized> AnalyticsService<'a, S> {
    /// Create a service with the default configuration.
    pub fn new(source: &'a S) -> Self {
        Self::with_config(source, AnalyticsConfig::default())
    }

    /// Create a service with an explicit configuration.
    pub fn with_config(source: &'a S, config: AnalyticsConfig) -> Self {
        Self {
            source,
            productivity: ProductivityCalculator::new(&config),
            welfare: WelfareScorer::new(),
            amr: AmrRiskClassifier::new(),
            config,
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Capture a consistent copy of all records.
    pub fn snapshot(&self) -> DbResult<Snapshot> {
        Snapshot::capture(self.source)
    }

    // =========================================================================
    // Productivity
    // =========================================================================

    pub fn get_productivity_metrics(
        &self,
        timeframe_days: u32,
        species: Option<&Species>,
    ) -> DbResult<Vec<ProductivityMetric>> {
        self.get_productivity_metrics_at(Utc::now(), timeframe_days, species)
    }

    pub fn get_productivity_metrics_at(
        &self,
        now: DateTime<Utc>,
        timeframe_days: u32,
        species: Option<&Species>,
    ) -> DbResult<Vec<ProductivityMetric>> {
        let snapshot = self.snapshot()?;
        Ok(self.productivity_for(&snapshot, now, timeframe_days, species))
    }

    pub fn productivity_for(
        &self,
        snapshot: &Snapshot,
        now: DateTime<Utc>,
        timeframe_days: u32,
        species: Option<&Species>,
    ) -> Vec<ProductivityMetric> {
        let mut metrics =
            self.productivity
                .compute(&snapshot.animals, &snapshot.visits, timeframe_days, now);
        metrics.retain(|m| matches_species(&m.species, species));
        tracing::debug!(
            timeframe_days,
            species = species.map(Species::as_str),
            count = metrics.len(),
            "computed productivity metrics"
        );
        metrics
    }

    // =========================================================================
    // Welfare
    // =========================================================================

    pub fn get_welfare_scores(&self, species: Option<&Species>) -> DbResult<Vec<WelfareScore>> {
        self.get_welfare_scores_at(Utc::now(), species)
    }

    pub fn get_welfare_scores_at(
        &self,
        now: DateTime<Utc>,
        species: Option<&Species>,
    ) -> DbResult<Vec<WelfareScore>> {
        let snapshot = self.snapshot()?;
        Ok(self.welfare_for(&snapshot, now, species))
    }

    pub fn welfare_for(
        &self,
        snapshot: &Snapshot,
        now: DateTime<Utc>,
        species: Option<&Species>,
    ) -> Vec<WelfareScore> {
        let mut scores = self.welfare.compute(
            &snapshot.animals,
            &snapshot.visits,
            &snapshot.vaccinations,
            now,
        );
        scores.retain(|s| matches_species(&s.species, species));
        tracing::debug!(
            species = species.map(Species::as_str),
            count = scores.len(),
            "computed welfare scores"
        );
        scores
    }

    // =========================================================================
    // Antimicrobial resistance
    // =========================================================================

    pub fn get_amr_risks(&self, species: Option<&Species>) -> DbResult<Vec<AmrRisk>> {
        let snapshot = self.snapshot()?;
        Ok(self.amr_for(&snapshot, species))
    }

    pub fn amr_for(&self, snapshot: &Snapshot, species: Option<&Species>) -> Vec<AmrRisk> {
        let mut risks = self.amr.compute(&snapshot.animals, &snapshot.visits);
        risks.retain(|r| matches_species(&r.species, species));

        let elevated = risks
            .iter()
            .filter(|r| r.risk_level >= crate::models::RiskLevel::High)
            .count();
        if elevated > 0 {
            tracing::info!(elevated, "animals at high or critical AMR risk");
        }
        risks
    }

    // =========================================================================
    // Vaccination schedule
    // =========================================================================

    pub fn get_vaccination_reminders(&self, within_days: u32) -> DbResult<Vec<VaccinationReminder>> {
        self.get_vaccination_reminders_at(Utc::now(), within_days)
    }

    pub fn get_vaccination_reminders_at(
        &self,
        now: DateTime<Utc>,
        within_days: u32,
    ) -> DbResult<Vec<VaccinationReminder>> {
        let snapshot = self.snapshot()?;
        Ok(self.reminders_for(&snapshot, now, within_days))
    }

    pub fn reminders_for(
        &self,
        snapshot: &Snapshot,
        now: DateTime<Utc>,
        within_days: u32,
    ) -> Vec<VaccinationReminder> {
        upcoming_vaccinations(&snapshot.animals, &snapshot.vaccinations, now, within_days)
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    pub fn get_dashboard_summary(&self, timeframe_days: u32) -> DbResult<DashboardSummary> {
        self.get_dashboard_summary_at(Utc::now(), timeframe_days)
    }

    pub fn get_dashboard_summary_at(
        &self,
        now: DateTime<Utc>,
        timeframe_days: u32,
    ) -> DbResult<DashboardSummary> {
        let snapshot = self.snapshot()?;
        Ok(self.summary_for(&snapshot, now, timeframe_days))
    }

    pub fn summary_for(
        &self,
        snapshot: &Snapshot,
        now: DateTime<Utc>,
        timeframe_days: u32,
    ) -> DashboardSummary {
        DashboardSummary::from_metrics(
            &snapshot.animals,
            &self.productivity_for(snapshot, now, timeframe_days, None),
            &self.welfare_for(snapshot, now, None),
            &self.amr_for(snapshot, None),
            &self.reminders_for(snapshot, now, self.config.reminder_window_days),
        )
    }
}

fn matches_species(species: &str, filter: Option<&Species>) -> bool {
    filter.map_or(true, |wanted| Species::parse(species) == *wanted)
}
