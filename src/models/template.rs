use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::DocumentError;

/// Fields shared by every document kind.
///
/// Clinic identity, clinician and date default to the values in [`config`]
/// when the caller omits them; patient fields are always caller-supplied and
/// validated before any drawing happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateData {
    pub patient_name: String,
    pub patient_id: String,
    /// Display string, e.g. "34 anos".
    pub patient_age: String,
    #[serde(default = "default_doctor_name")]
    pub doctor_name: String,
    #[serde(default = "default_doctor_crm")]
    pub doctor_crm: String,
    #[serde(default = "default_clinic_name")]
    pub clinic_name: String,
    #[serde(default = "default_clinic_address")]
    pub clinic_address: String,
    #[serde(default = "default_clinic_phone")]
    pub clinic_phone: String,
    /// Display date, e.g. "15/01/2024". Defaults to today.
    #[serde(default = "default_date")]
    pub date: String,
}

fn default_doctor_name() -> String {
    config::DEFAULT_DOCTOR_NAME.into()
}

fn default_doctor_crm() -> String {
    config::DEFAULT_DOCTOR_CRM.into()
}

fn default_clinic_name() -> String {
    config::CLINIC_NAME.into()
}

fn default_clinic_address() -> String {
    config::CLINIC_ADDRESS.into()
}

fn default_clinic_phone() -> String {
    config::CLINIC_PHONE.into()
}

fn default_date() -> String {
    Local::now().format("%d/%m/%Y").to_string()
}

impl TemplateData {
    /// Minimal constructor: required patient fields, everything else from
    /// the clinic defaults.
    pub fn new(
        patient_name: impl Into<String>,
        patient_id: impl Into<String>,
        patient_age: impl Into<String>,
    ) -> Self {
        Self {
            patient_name: patient_name.into(),
            patient_id: patient_id.into(),
            patient_age: patient_age.into(),
            doctor_name: default_doctor_name(),
            doctor_crm: default_doctor_crm(),
            clinic_name: default_clinic_name(),
            clinic_address: default_clinic_address(),
            clinic_phone: default_clinic_phone(),
            date: default_date(),
        }
    }

    /// City for the footer location line, derived from the clinic address:
    /// last comma-separated segment, minus the "- UF" state suffix.
    pub fn clinic_city(&self) -> String {
        self.clinic_address
            .rsplit(',')
            .next()
            .and_then(|segment| segment.split(" - ").next())
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| config::CLINIC_CITY.into())
    }

    /// Required-field check. Runs before any drawing so a caller never
    /// receives a partially drawn document.
    pub fn validate(&self) -> Result<(), DocumentError> {
        for (field, value) in [
            ("patient_name", &self.patient_name),
            ("patient_id", &self.patient_id),
            ("patient_age", &self.patient_age),
        ] {
            if value.trim().is_empty() {
                return Err(DocumentError::MissingField { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_clinic_defaults() {
        let t = TemplateData::new("Maria Souza", "123.456.789-00", "34 anos");
        assert_eq!(t.clinic_name, config::CLINIC_NAME);
        assert_eq!(t.doctor_crm, config::DEFAULT_DOCTOR_CRM);
        assert!(!t.date.is_empty());
    }

    #[test]
    fn blank_patient_name_is_rejected() {
        let t = TemplateData::new("   ", "123", "34 anos");
        let err = t.validate().unwrap_err();
        assert!(err.to_string().contains("patient_name"));
    }

    #[test]
    fn clinic_city_comes_from_the_address() {
        let mut t = TemplateData::new("Ana", "1", "30 anos");
        assert_eq!(t.clinic_city(), "São Paulo");

        t.clinic_address = "Rua Nova, 42, Campinas - SP".into();
        assert_eq!(t.clinic_city(), "Campinas");

        t.clinic_address = "  ".into();
        assert_eq!(t.clinic_city(), config::CLINIC_CITY);
    }

    #[test]
    fn deserialization_fills_omitted_fields() {
        let t: TemplateData = serde_json::from_str(
            r#"{"patient_name":"João","patient_id":"9","patient_age":"40 anos"}"#,
        )
        .unwrap();
        assert_eq!(t.doctor_name, config::DEFAULT_DOCTOR_NAME);
        t.validate().unwrap();
    }
}
