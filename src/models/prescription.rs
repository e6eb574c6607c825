use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::DocumentError;

use super::template::TemplateData;

/// One medication entry. Every field is optional; absent fields render the
/// fixed placeholders so the table columns never collapse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedicationLine {
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
}

impl MedicationLine {
    pub fn as_row(&self) -> Vec<String> {
        let guidance = || config::MEDICATION_GUIDANCE.to_string();
        vec![
            self.name
                .clone()
                .unwrap_or_else(|| config::UNSPECIFIED_MEDICATION.into()),
            self.dosage.clone().unwrap_or_else(guidance),
            self.frequency.clone().unwrap_or_else(guidance),
            self.duration.clone().unwrap_or_else(guidance),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionData {
    #[serde(flatten)]
    pub template: TemplateData,
    #[serde(default)]
    pub medications: Vec<MedicationLine>,
    pub notes: Option<String>,
}

impl PrescriptionData {
    pub fn validate(&self) -> Result<(), DocumentError> {
        self.template.validate()
    }

    /// Table rows for the medication grid. An empty prescription yields a
    /// single placeholder row, never a zero-row table.
    pub fn medication_rows(&self) -> Vec<Vec<String>> {
        if self.medications.is_empty() {
            return vec![vec![
                config::EMPTY_PRESCRIPTION_ROW.into(),
                "-".into(),
                "-".into(),
                "-".into(),
            ]];
        }
        self.medications.iter().map(MedicationLine::as_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prescription_yields_one_placeholder_row() {
        let data = PrescriptionData {
            template: TemplateData::new("Ana", "1", "30 anos"),
            medications: vec![],
            notes: None,
        };
        let rows = data.medication_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], config::EMPTY_PRESCRIPTION_ROW);
    }

    #[test]
    fn absent_medication_fields_use_placeholders() {
        let line = MedicationLine {
            name: Some("Dipirona 500mg".into()),
            ..Default::default()
        };
        let row = line.as_row();
        assert_eq!(row[0], "Dipirona 500mg");
        assert_eq!(row[1], config::MEDICATION_GUIDANCE);
        assert_eq!(row[2], config::MEDICATION_GUIDANCE);
        assert_eq!(row[3], config::MEDICATION_GUIDANCE);
    }

    #[test]
    fn medication_list_type_is_enforced_on_deserialize() {
        // A non-sequence payload for `medications` is a type error, caught
        // before any composition begins.
        let err = serde_json::from_str::<PrescriptionData>(
            r#"{"patient_name":"Ana","patient_id":"1","patient_age":"30 anos","medications":"nope"}"#,
        );
        assert!(err.is_err());
    }
}
