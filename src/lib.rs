//! Prontivus document composer.
//!
//! Composes clinic documents (prescriptions, certificates, clinical reports,
//! exam guides, payment receipts) into single-page A4 PDFs: shared header
//! with a fetch-and-embed clinic logo that degrades to a text mark, patient
//! and clinician blocks, a kind-specific body, and a signed footer band.
//! Output sinks save, print or preview the same composed document.
//!
//! ```no_run
//! use prontivus_docs::{Composer, models::{PrescriptionData, TemplateData}};
//!
//! # async fn demo() -> Result<(), prontivus_docs::DocumentError> {
//! let composer = Composer::new();
//! let data = PrescriptionData {
//!     template: TemplateData::new("Maria Souza", "123.456.789-00", "34 anos"),
//!     medications: vec![],
//!     notes: None,
//! };
//! let doc = composer.prescription(&data).await?;
//! prontivus_docs::output::download(doc, "receita", None)?;
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod compose;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod output;
pub mod table;

pub use compose::{ComposedDocument, Composer, ComposerOptions};
pub use error::DocumentError;
pub use models::DocumentKind;
pub use table::TableEngine;

use tracing_subscriber::EnvFilter;

/// Installs the default tracing subscriber. Safe to call more than once.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}
