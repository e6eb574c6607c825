use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::DocumentError;

use super::template::TemplateData;

/// Vital-sign readings, all optional display strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VitalSigns {
    pub pressure: Option<String>,
    pub temperature: Option<String>,
    pub weight: Option<String>,
    pub heart_rate: Option<String>,
    pub saturation: Option<String>,
    pub height: Option<String>,
}

impl VitalSigns {
    pub fn any_present(&self) -> bool {
        [
            &self.pressure,
            &self.temperature,
            &self.weight,
            &self.heart_rate,
            &self.saturation,
            &self.height,
        ]
        .iter()
        .any(|v| v.is_some())
    }

    /// One-line summary. Absent readings still appear, as the placeholder.
    pub fn summary(&self) -> String {
        let ni = |v: &Option<String>| v.clone().unwrap_or_else(|| config::NOT_INFORMED.into());
        format!(
            "PA: {} | Temp: {} | Peso: {} | FC: {} | SpO2: {} | Altura: {}",
            ni(&self.pressure),
            ni(&self.temperature),
            ni(&self.weight),
            ni(&self.heart_rate),
            ni(&self.saturation),
            ni(&self.height),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    #[serde(flatten)]
    pub template: TemplateData,
    pub chief_complaint: Option<String>,
    pub history: Option<String>,
    pub physical_exam: Option<String>,
    pub assessment: Option<String>,
    pub plan: Option<String>,
    #[serde(default)]
    pub vitals: VitalSigns,
}

impl ReportData {
    pub fn validate(&self) -> Result<(), DocumentError> {
        self.template.validate()
    }

    /// The five clinical sections in their fixed render order. Every section
    /// is always rendered; absent content becomes the placeholder.
    pub fn sections(&self) -> [(&'static str, String); 5] {
        let ni = |v: &Option<String>| v.clone().unwrap_or_else(|| config::NOT_INFORMED.into());
        [
            ("QUEIXA PRINCIPAL", ni(&self.chief_complaint)),
            ("HISTÓRIA DA DOENÇA ATUAL", ni(&self.history)),
            ("EXAME FÍSICO", ni(&self.physical_exam)),
            ("AVALIAÇÃO", ni(&self.assessment)),
            ("CONDUTA", ni(&self.plan)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_vitals_are_not_summarized() {
        assert!(!VitalSigns::default().any_present());
    }

    #[test]
    fn partial_vitals_keep_placeholders_in_summary() {
        let vitals = VitalSigns {
            pressure: Some("120x80 mmHg".into()),
            ..Default::default()
        };
        assert!(vitals.any_present());
        let summary = vitals.summary();
        assert!(summary.contains("120x80 mmHg"));
        assert!(summary.contains(config::NOT_INFORMED));
    }

    #[test]
    fn sections_render_in_fixed_order_with_placeholders() {
        let data = ReportData {
            template: TemplateData::new("Ana", "1", "30 anos"),
            chief_complaint: Some("cefaleia".into()),
            history: None,
            physical_exam: None,
            assessment: None,
            plan: None,
            vitals: VitalSigns::default(),
        };
        let sections = data.sections();
        assert_eq!(sections[0].0, "QUEIXA PRINCIPAL");
        assert_eq!(sections[0].1, "cefaleia");
        assert_eq!(sections[4].0, "CONDUTA");
        assert_eq!(sections[1].1, config::NOT_INFORMED);
    }
}
