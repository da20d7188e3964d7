//! End-to-end analytics tests against a SQLite store.

use chrono::{DateTime, Duration, Utc};

use vet_insights_core::analytics::{AnalyticsService, RecordSource, Snapshot};
use vet_insights_core::db::Database;
use vet_insights_core::models::{Animal, RiskLevel, Species, Vaccination, VisitRecord};

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn days_ago(days: i64) -> String {
    (now() - Duration::days(days)).to_rfc3339()
}

fn add_animal(db: &Database, name: &str, species: &str) -> anyhow::Result<Animal> {
    let animal = Animal::new(name.into(), species.into());
    db.insert_animal(&animal)?;
    Ok(animal)
}

fn add_visit(
    db: &Database,
    animal: &Animal,
    days: i64,
    diagnosis: &str,
    treatment: &str,
) -> anyhow::Result<()> {
    db.insert_visit(&VisitRecord::new(
        animal.id.clone(),
        days_ago(days),
        diagnosis.into(),
        treatment.into(),
    ))?;
    Ok(())
}

#[test]
fn test_empty_store_yields_empty_results() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let service = AnalyticsService::new(&db);

    assert!(service.get_productivity_metrics_at(now(), 90, None)?.is_empty());
    assert!(service.get_welfare_scores_at(now(), None)?.is_empty());
    assert!(service.get_amr_risks(None)?.is_empty());
    assert!(service.get_vaccination_reminders_at(now(), 30)?.is_empty());

    let summary = service.get_dashboard_summary_at(now(), 90)?;
    assert_eq!(summary.total_animals, 0);
    assert_eq!(summary.average_welfare_score, None);
    Ok(())
}

#[test]
fn test_dog_without_history_scores_forty() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    add_animal(&db, "Moti", "Dog")?;

    let scores = AnalyticsService::new(&db).get_welfare_scores_at(now(), None)?;
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].score, 40);
    assert_eq!(scores[0].vaccination_status.as_str(), "none");
    assert_eq!(scores[0].health_trend.as_str(), "stable");
    Ok(())
}

#[test]
fn test_cow_with_recent_mastitis() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let cow = add_animal(&db, "Gori", "cow")?;
    add_visit(&db, &cow, 10, "Mastitis", "")?;

    let metrics = AnalyticsService::new(&db).get_productivity_metrics_at(now(), 90, None)?;
    assert_eq!(metrics.len(), 1);

    let m = &metrics[0];
    assert_eq!(m.illness_days, 7);
    assert!((m.baseline_productivity - 15.0).abs() < 1e-9);
    assert!((m.current_productivity - 3.0).abs() < 1e-9);
    assert!((m.loss_percentage - 80.0).abs() < 1e-9);
    assert!((m.estimated_loss - 10_080.0).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_old_visits_fall_outside_timeframe() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let buffalo = add_animal(&db, "Rani", "buffalo")?;
    add_visit(&db, &buffalo, 45, "Fever", "")?;

    let service = AnalyticsService::new(&db);
    assert_eq!(service.get_productivity_metrics_at(now(), 90, None)?[0].illness_days, 3);
    assert_eq!(service.get_productivity_metrics_at(now(), 30, None)?[0].illness_days, 0);
    Ok(())
}

#[test]
fn test_antibiotic_bands() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let five = add_animal(&db, "Five", "goat")?;
    let eight = add_animal(&db, "Eight", "goat")?;

    // 100 days apart, so none are repeats
    for i in 0..5 {
        add_visit(&db, &five, i * 100, "Infection", "Antibiotic course")?;
    }
    for i in 0..8 {
        add_visit(&db, &eight, i * 100, "Infection", "Amoxicillin")?;
    }

    let risks = AnalyticsService::new(&db).get_amr_risks(None)?;
    let five_risk = risks.iter().find(|r| r.animal_name == "Five").unwrap();
    let eight_risk = risks.iter().find(|r| r.animal_name == "Eight").unwrap();

    assert_eq!(five_risk.antibiotic_treatments, 5);
    assert_eq!(five_risk.repeated_treatments, 0);
    assert_eq!(five_risk.risk_level, RiskLevel::High);
    assert_eq!(five_risk.risk_factors, vec!["Frequent antibiotic use".to_string()]);

    assert_eq!(eight_risk.antibiotic_treatments, 8);
    assert_eq!(eight_risk.risk_level, RiskLevel::Critical);
    Ok(())
}

#[test]
fn test_medications_field_counts_as_antibiotic() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let cat = add_animal(&db, "Billi", "cat")?;
    db.insert_visit(
        &VisitRecord::new(cat.id.clone(), days_ago(5), "Abscess".into(), "Drained".into())
            .with_medications("penicillin 5ml"),
    )?;

    let risks = AnalyticsService::new(&db).get_amr_risks(None)?;
    assert_eq!(risks[0].antibiotic_treatments, 1);
    assert_eq!(risks[0].risk_level, RiskLevel::Low);
    Ok(())
}

#[test]
fn test_species_filter_is_case_insensitive() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    add_animal(&db, "Gori", "COW")?;
    add_animal(&db, "Rani", "Buffalo")?;

    let service = AnalyticsService::new(&db);
    let cows = service.get_productivity_metrics_at(now(), 90, Some(&Species::parse("cow")))?;
    assert_eq!(cows.len(), 1);
    assert_eq!(cows[0].species, "cow");
    Ok(())
}

#[test]
fn test_repeated_calls_are_identical() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let cow = add_animal(&db, "Gori", "cow")?;
    let dog = add_animal(&db, "Moti", "dog")?;
    add_visit(&db, &cow, 3, "Fever", "Penicillin")?;
    add_visit(&db, &dog, 20, "Recovered", "")?;
    add_visit(&db, &dog, 40, "Fever", "Amoxicillin")?;

    let service = AnalyticsService::new(&db);
    let first = serde_json::to_string(&service.get_dashboard_summary_at(now(), 90)?)?;
    let second = serde_json::to_string(&service.get_dashboard_summary_at(now(), 90)?)?;
    assert_eq!(first, second);

    let welfare_a = serde_json::to_string(&service.get_welfare_scores_at(now(), None)?)?;
    let welfare_b = serde_json::to_string(&service.get_welfare_scores_at(now(), None)?)?;
    assert_eq!(welfare_a, welfare_b);
    Ok(())
}

#[test]
fn test_concurrent_reads_of_one_snapshot() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let cow = add_animal(&db, "Gori", "cow")?;
    let dog = add_animal(&db, "Moti", "dog")?;
    add_visit(&db, &cow, 3, "Mastitis", "Penicillin")?;
    add_visit(&db, &cow, 10, "Mastitis", "Penicillin")?;
    db.insert_vaccination(&Vaccination::new(dog.id.clone(), "Rabies".into(), days_ago(30)))?;

    let snapshot = Snapshot::capture(&db)?;
    let expected = serde_json::to_string(
        &AnalyticsService::new(&snapshot).get_dashboard_summary_at(now(), 90)?,
    )?;

    let results: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let service = AnalyticsService::new(&snapshot);
                    let summary = service.get_dashboard_summary_at(now(), 90).unwrap();
                    serde_json::to_string(&summary).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for result in results {
        assert_eq!(result, expected);
    }
    Ok(())
}

#[test]
fn test_snapshot_matches_store() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let dog = add_animal(&db, "Moti", "dog")?;
    add_visit(&db, &dog, 1, "Checkup", "")?;

    let snapshot = Snapshot::capture(&db)?;
    assert_eq!(snapshot.list_animals()?.len(), 1);
    assert_eq!(snapshot.list_visits(Some(&dog.id))?.len(), 1);
    assert!(snapshot.list_visits(Some("other"))?.is_empty());
    Ok(())
}

#[test]
fn test_on_disk_store_survives_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("clinic.db");

    {
        let db = Database::open(&path)?;
        let cow = add_animal(&db, "Gori", "cow")?;
        add_visit(&db, &cow, 2, "Septicaemia", "Antibiotic")?;
    }

    let db = Database::open(&path)?;
    let metrics = AnalyticsService::new(&db).get_productivity_metrics_at(now(), 90, None)?;
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].illness_days, 14);
    Ok(())
}
