use serde::{Deserialize, Serialize};

/// The five document kinds the composer knows how to lay out.
///
/// `Other` exists so callers routing free-form kind strings still get a
/// complete document with the generic title instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Prescription,
    Certificate,
    Report,
    ExamGuide,
    Receipt,
    #[serde(other)]
    Other,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prescription => "receita",
            Self::Certificate => "atestado",
            Self::Report => "relatorio",
            Self::ExamGuide => "guia_exame",
            Self::Receipt => "recibo",
            Self::Other => "documento",
        }
    }

    /// Uppercase page title drawn under the logo slot.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Prescription => "RECEITUÁRIO MÉDICO",
            Self::Certificate => "ATESTADO MÉDICO",
            Self::Report => "RELATÓRIO MÉDICO",
            Self::ExamGuide => "SOLICITAÇÃO DE EXAMES",
            Self::Receipt => "RECIBO DE PAGAMENTO",
            Self::Other => "DOCUMENTO MÉDICO",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
