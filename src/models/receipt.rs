use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::DocumentError;

use super::template::TemplateData;

/// One billed service. All numeric values are caller-computed; the composer
/// renders them verbatim and never recomputes totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceLine {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptData {
    #[serde(flatten)]
    pub template: TemplateData,
    #[serde(default)]
    pub services: Vec<ServiceLine>,
    pub total_amount: f64,
    pub payment_method: Option<String>,
}

/// "R$ 150.00" style currency display, two decimal places.
pub fn format_currency(value: f64) -> String {
    format!("R$ {value:.2}")
}

impl ReceiptData {
    pub fn validate(&self) -> Result<(), DocumentError> {
        self.template.validate()
    }

    pub fn service_rows(&self) -> Vec<Vec<String>> {
        self.services
            .iter()
            .map(|s| {
                vec![
                    s.description.clone(),
                    s.quantity.to_string(),
                    format_currency(s.unit_price),
                    format_currency(s.total),
                ]
            })
            .collect()
    }

    pub fn payment_method_display(&self) -> String {
        self.payment_method
            .clone()
            .unwrap_or_else(|| config::NOT_INFORMED.into())
    }
}
