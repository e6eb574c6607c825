use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::DocumentError;

use super::template::TemplateData;

/// Certificate subtype. Selects which sentence template is generated.
/// Unknown inputs map to [`CertificateKind::Unspecified`], which produces the
/// generic reason sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CertificateKind {
    GeneralMedical,
    SickLeave,
    Fitness,
    Attendance,
    Accompaniment,
    #[default]
    #[serde(other)]
    Unspecified,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateData {
    #[serde(flatten)]
    pub template: TemplateData,
    #[serde(default)]
    pub kind: CertificateKind,
    pub reason: Option<String>,
    /// Sick-leave length, e.g. "3 (três) dias".
    pub duration: Option<String>,
    /// Attendance/accompaniment time range, e.g. "08h00 às 11h30".
    pub period: Option<String>,
    /// Fitness restrictions.
    pub restrictions: Option<String>,
}

impl CertificateData {
    pub fn validate(&self) -> Result<(), DocumentError> {
        self.template.validate()
    }

    /// The certificate paragraph, fully interpolated. Deterministic per
    /// subtype; absent fields fall back to the standard placeholder.
    pub fn body_text(&self) -> String {
        let t = &self.template;
        let ni = || config::NOT_INFORMED.to_string();
        let reason = self.reason.clone().unwrap_or_else(ni);
        match self.kind {
            CertificateKind::GeneralMedical => format!(
                "Atesto, para os devidos fins, que o(a) paciente {}, {}, portador(a) do \
                 documento {}, esteve sob meus cuidados profissionais nesta data, por motivo \
                 de {}.",
                t.patient_name, t.patient_age, t.patient_id, reason
            ),
            CertificateKind::SickLeave => format!(
                "Atesto, para os devidos fins, que o(a) paciente {}, {}, portador(a) do \
                 documento {}, necessita de afastamento de suas atividades laborais pelo \
                 período de {}, por motivo de {}.",
                t.patient_name,
                t.patient_age,
                t.patient_id,
                self.duration.clone().unwrap_or_else(ni),
                reason
            ),
            CertificateKind::Fitness => format!(
                "Atesto, para os devidos fins, que o(a) paciente {}, {}, portador(a) do \
                 documento {}, encontra-se apto(a) para a prática de atividades físicas. \
                 Restrições: {}.",
                t.patient_name,
                t.patient_age,
                t.patient_id,
                self.restrictions.clone().unwrap_or_else(ni)
            ),
            CertificateKind::Attendance => format!(
                "Declaro, para os devidos fins, que o(a) paciente {}, {}, portador(a) do \
                 documento {}, compareceu a esta unidade de saúde nesta data, no período \
                 de {}.",
                t.patient_name,
                t.patient_age,
                t.patient_id,
                self.period.clone().unwrap_or_else(ni)
            ),
            CertificateKind::Accompaniment => format!(
                "Declaro, para os devidos fins, que {}, {}, portador(a) do documento {}, \
                 compareceu a esta unidade de saúde nesta data na condição de acompanhante \
                 de paciente, no período de {}.",
                t.patient_name,
                t.patient_age,
                t.patient_id,
                self.period.clone().unwrap_or_else(ni)
            ),
            CertificateKind::Unspecified => format!(
                "Atesto que o(a) paciente {}, {}, documento {}, foi atendido(a) nesta data. \
                 Motivo: {}.",
                t.patient_name, t.patient_age, t.patient_id, reason
            ),
        }
    }
}
