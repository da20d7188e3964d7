//! Keyword tables for free-text clinical fields.
//!
//! Diagnosis and treatment text is classified by case-insensitive substring
//! match. There are no structured diagnosis codes; these tables are the
//! whole classification scheme.

use crate::models::VisitRecord;

/// Illness-duration estimate per diagnosis keyword, checked in order.
pub const ILLNESS_DURATIONS: [(&str, u32); 3] = [("mastitis", 7), ("fever", 3), ("septicaemia", 14)];

/// Duration for a diagnosis matching none of [`ILLNESS_DURATIONS`].
pub const DEFAULT_ILLNESS_DAYS: u32 = 2;

/// Treatment/medication keywords that mark an antibiotic course.
pub const ANTIBIOTIC_KEYWORDS: [&str; 3] = ["antibiotic", "penicillin", "amoxicillin"];

/// Diagnosis keywords for a good outcome.
pub const RECOVERY_KEYWORDS: [&str; 2] = ["healthy", "recovered"];

/// Diagnosis keywords for an ongoing illness.
pub const ILLNESS_KEYWORDS: [&str; 2] = ["sick", "infection"];

pub const RABIES_KEYWORD: &str = "rabies";
pub const MASTITIS_KEYWORD: &str = "mastitis";

/// Case-insensitive substring test. Keywords must be lowercase.
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    text.to_lowercase().contains(keyword)
}

/// True when `text` contains any of the lowercase `keywords`.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|keyword| lower.contains(keyword))
}

/// Estimated days of illness for one diagnosis.
pub fn illness_duration_days(diagnosis: &str) -> u32 {
    let lower = diagnosis.to_lowercase();
    ILLNESS_DURATIONS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, days)| *days)
        .unwrap_or(DEFAULT_ILLNESS_DAYS)
}

/// Whether a visit's treatment or medications mention an antibiotic.
pub fn is_antibiotic_treatment(visit: &VisitRecord) -> bool {
    contains_any(&visit.treatment, &ANTIBIOTIC_KEYWORDS)
        || visit
            .medications
            .as_deref()
            .is_some_and(|meds| contains_any(meds, &ANTIBIOTIC_KEYWORDS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illness_durations() {
        assert_eq!(illness_duration_days("Acute Mastitis"), 7);
        assert_eq!(illness_duration_days("milk FEVER"), 3);
        assert_eq!(illness_duration_days("Haemorrhagic Septicaemia"), 14);
        assert_eq!(illness_duration_days("Lameness"), DEFAULT_ILLNESS_DAYS);
        assert_eq!(illness_duration_days(""), DEFAULT_ILLNESS_DAYS);
    }

    #[test]
    fn test_first_matching_keyword_wins() {
        // fever is checked before septicaemia
        assert_eq!(illness_duration_days("Septicaemia with fever"), 3);
        assert_eq!(illness_duration_days("Mastitis and fever"), 7);
    }

    #[test]
    fn test_antibiotic_in_treatment_or_medications() {
        let mut visit = VisitRecord::new(
            "a1".into(),
            "2024-01-01".into(),
            "Mastitis".into(),
            "Intramammary ANTIBIOTIC tube".into(),
        );
        assert!(is_antibiotic_treatment(&visit));

        visit.treatment = "Supportive care".into();
        assert!(!is_antibiotic_treatment(&visit));

        visit.medications = Some("Amoxicillin 500mg".into());
        assert!(is_antibiotic_treatment(&visit));

        visit.medications = Some("Meloxicam".into());
        assert!(!is_antibiotic_treatment(&visit));
    }

    #[test]
    fn test_contains_any() {
        assert!(contains_any("Recovered fully", &RECOVERY_KEYWORDS));
        assert!(contains_any("Skin Infection", &ILLNESS_KEYWORDS));
        assert!(!contains_any("Routine checkup", &ILLNESS_KEYWORDS));
        assert!(contains_keyword("Anti-RABIES booster", RABIES_KEYWORD));
    }
}
