use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::DocumentError;

use super::template::TemplateData;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamGuideData {
    #[serde(flatten)]
    pub template: TemplateData,
    /// Exam type and description are always rendered, placeholder when absent.
    pub exam_type: Option<String>,
    pub description: Option<String>,
    /// The remaining fields are rendered only when present.
    pub preparation: Option<String>,
    pub fasting: Option<bool>,
    pub instructions: Option<String>,
}

impl ExamGuideData {
    pub fn validate(&self) -> Result<(), DocumentError> {
        self.template.validate()
    }

    pub fn exam_type_display(&self) -> String {
        self.exam_type
            .clone()
            .unwrap_or_else(|| config::NOT_INFORMED.into())
    }

    pub fn description_display(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| config::NOT_INFORMED.into())
    }

    pub fn fasting_display(&self) -> Option<&'static str> {
        self.fasting.map(|f| if f { "Sim" } else { "Não" })
    }
}
