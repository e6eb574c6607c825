//! Document composition.
//!
//! One async entry point per document kind. Each call validates the record,
//! resolves the (cached) logo, then draws the shared page skeleton around the
//! kind-specific body. The composed document stays unserialized until an
//! output sink consumes it.

mod certificate;
mod exam_guide;
mod prescription;
mod receipt;
mod report;

use std::io::{BufWriter, Write as _};

use image::DynamicImage;
use printpdf::{BuiltinFont, Mm, PdfDocument, PdfDocumentReference};
use tokio::sync::OnceCell;

use crate::assets::{self, Logo};
use crate::error::DocumentError;
use crate::layout::{
    draw_clinician_block, draw_footer, draw_header, draw_patient_block, DrawOp, Fonts, Sheet,
    PAGE_HEIGHT, PAGE_WIDTH,
};
use crate::models::{
    CertificateData, DocumentKind, ExamGuideData, PrescriptionData, ReceiptData, ReportData,
    TemplateData,
};
use crate::table::TableEngine;

#[derive(Debug, Clone, Default)]
pub struct ComposerOptions {
    pub table_engine: TableEngine,
}

/// A finished, not-yet-serialized document.
pub struct ComposedDocument {
    doc: PdfDocumentReference,
    kind: DocumentKind,
    title: String,
    ops: Vec<DrawOp>,
}

impl std::fmt::Debug for ComposedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposedDocument")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("ops", &self.ops)
            .finish_non_exhaustive()
    }
}

impl ComposedDocument {
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The draw-op log, in draw order. Positions are top-left mm.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Serializes to PDF bytes. Kind-independent; all sinks go through here.
    pub fn into_bytes(self) -> Result<Vec<u8>, DocumentError> {
        let kind = self.kind;
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| DocumentError::render(kind, e))?;
        buf.flush().map_err(|e| DocumentError::render(kind, e))?;
        buf.into_inner()
            .map_err(|e| DocumentError::render(kind, e))
    }
}

/// Stateless apart from the cached logo fetch; cheap to share across calls.
pub struct Composer {
    client: reqwest::Client,
    logo: OnceCell<Option<Logo>>,
    options: ComposerOptions,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    pub fn new() -> Self {
        Self::with_options(ComposerOptions::default())
    }

    pub fn with_options(options: ComposerOptions) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            logo: OnceCell::new(),
            options,
        }
    }

    /// The logo is static per process: one fetch per composer, failures
    /// included, then served from cache.
    async fn logo(&self) -> Option<DynamicImage> {
        self.logo
            .get_or_init(|| async { assets::load_logo(&self.client).await })
            .await
            .as_ref()
            .and_then(Logo::to_image)
    }

    pub async fn prescription(
        &self,
        data: &PrescriptionData,
    ) -> Result<ComposedDocument, DocumentError> {
        data.validate()?;
        let logo = self.logo().await;
        let engine = self.options.table_engine;
        compose(DocumentKind::Prescription, &data.template, logo.as_ref(), |sheet| {
            prescription::body(sheet, data, engine)
        })
    }

    pub async fn certificate(
        &self,
        data: &CertificateData,
    ) -> Result<ComposedDocument, DocumentError> {
        data.validate()?;
        let logo = self.logo().await;
        compose(DocumentKind::Certificate, &data.template, logo.as_ref(), |sheet| {
            certificate::body(sheet, data)
        })
    }

    pub async fn report(&self, data: &ReportData) -> Result<ComposedDocument, DocumentError> {
        data.validate()?;
        let logo = self.logo().await;
        compose(DocumentKind::Report, &data.template, logo.as_ref(), |sheet| {
            report::body(sheet, data)
        })
    }

    pub async fn exam_guide(
        &self,
        data: &ExamGuideData,
    ) -> Result<ComposedDocument, DocumentError> {
        data.validate()?;
        let logo = self.logo().await;
        compose(DocumentKind::ExamGuide, &data.template, logo.as_ref(), |sheet| {
            exam_guide::body(sheet, data)
        })
    }

    pub async fn receipt(&self, data: &ReceiptData) -> Result<ComposedDocument, DocumentError> {
        data.validate()?;
        let logo = self.logo().await;
        let engine = self.options.table_engine;
        compose(DocumentKind::Receipt, &data.template, logo.as_ref(), |sheet| {
            receipt::body(sheet, data, engine)
        })
    }
}

/// Shared page skeleton: header, patient block, clinician block, body,
/// footer. Runs only after validation has passed.
fn compose(
    kind: DocumentKind,
    template: &TemplateData,
    logo: Option<&DynamicImage>,
    body: impl FnOnce(&mut Sheet),
) -> Result<ComposedDocument, DocumentError> {
    let title = kind.title();
    let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| DocumentError::render(kind, e))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| DocumentError::render(kind, e))?;

    let mut sheet = Sheet::new(layer, Fonts { regular, bold });
    draw_header(&mut sheet, logo, title, template);
    draw_patient_block(&mut sheet, template);
    draw_clinician_block(&mut sheet, template);
    body(&mut sheet);
    draw_footer(&mut sheet, template);

    tracing::debug!(kind = %kind, ops = sheet.ops().len(), "document composed");
    Ok(ComposedDocument {
        doc,
        kind,
        title: title.to_string(),
        ops: sheet.into_ops(),
    })
}

/// Test support: a bare sheet on a throwaway page. The document reference is
/// returned so fonts stay valid for the sheet's lifetime.
#[cfg(test)]
pub(crate) fn test_sheet() -> (PdfDocumentReference, Sheet) {
    let (doc, page, layer) = PdfDocument::new("test", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).unwrap();
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).unwrap();
    let sheet = Sheet::new(layer, Fonts { regular, bold });
    (doc, sheet)
}

/// Test support: a minimal composed prescription, no logo.
#[cfg(test)]
pub(crate) fn test_document() -> ComposedDocument {
    let data = PrescriptionData {
        template: TemplateData::new("Ana Teste", "111.222.333-44", "30 anos"),
        medications: vec![],
        notes: None,
    };
    compose(DocumentKind::Prescription, &data.template, None, |sheet| {
        prescription::body(sheet, &data, TableEngine::Grid)
    })
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::models::{CertificateKind, MedicationLine, ServiceLine, VitalSigns};

    fn template() -> TemplateData {
        TemplateData::new("Maria Souza", "123.456.789-00", "34 anos")
    }

    fn texts(doc: &ComposedDocument) -> Vec<(String, f32, f32)> {
        doc.ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, x, y, .. } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    fn has_text(doc: &ComposedDocument, needle: &str) -> bool {
        texts(doc).iter().any(|(t, _, _)| t.contains(needle))
    }

    // Property 1: minimal records compose and placeholders are rendered.

    #[test]
    fn minimal_prescription_renders_placeholder_row() {
        let data = PrescriptionData {
            template: template(),
            medications: vec![],
            notes: None,
        };
        let doc = compose(DocumentKind::Prescription, &data.template, None, |s| {
            prescription::body(s, &data, TableEngine::Grid)
        })
        .unwrap();
        assert!(has_text(&doc, config::EMPTY_PRESCRIPTION_ROW));
    }

    #[test]
    fn minimal_certificate_renders_placeholder_reason() {
        let data = CertificateData {
            template: template(),
            kind: CertificateKind::Unspecified,
            reason: None,
            duration: None,
            period: None,
            restrictions: None,
        };
        let doc = compose(DocumentKind::Certificate, &data.template, None, |s| {
            certificate::body(s, &data)
        })
        .unwrap();
        assert!(has_text(&doc, config::NOT_INFORMED));
    }

    #[test]
    fn minimal_report_renders_all_five_sections_with_placeholders() {
        let data = ReportData {
            template: template(),
            chief_complaint: None,
            history: None,
            physical_exam: None,
            assessment: None,
            plan: None,
            vitals: VitalSigns::default(),
        };
        let doc = compose(DocumentKind::Report, &data.template, None, |s| {
            report::body(s, &data)
        })
        .unwrap();
        for heading in [
            "QUEIXA PRINCIPAL",
            "HISTÓRIA DA DOENÇA ATUAL",
            "EXAME FÍSICO",
            "AVALIAÇÃO",
            "CONDUTA",
        ] {
            assert!(has_text(&doc, heading), "missing {heading}");
        }
        let placeholder_count = texts(&doc)
            .iter()
            .filter(|(t, _, _)| t == config::NOT_INFORMED)
            .count();
        assert!(placeholder_count >= 5);
        // Empty vitals: no summary line.
        assert!(!has_text(&doc, "PA:"));
    }

    #[test]
    fn minimal_exam_guide_renders_placeholders_and_skips_optionals() {
        let data = ExamGuideData {
            template: template(),
            exam_type: None,
            description: None,
            preparation: None,
            fasting: None,
            instructions: None,
        };
        let doc = compose(DocumentKind::ExamGuide, &data.template, None, |s| {
            exam_guide::body(s, &data)
        })
        .unwrap();
        assert!(has_text(&doc, config::NOT_INFORMED));
        assert!(!has_text(&doc, "Jejum"));
    }

    #[test]
    fn minimal_receipt_renders_payment_placeholder() {
        let data = ReceiptData {
            template: template(),
            services: vec![],
            total_amount: 0.0,
            payment_method: None,
        };
        let doc = compose(DocumentKind::Receipt, &data.template, None, |s| {
            receipt::body(s, &data, TableEngine::Grid)
        })
        .unwrap();
        assert!(has_text(&doc, config::NOT_INFORMED));
        assert!(has_text(&doc, "R$ 0.00"));
    }

    // Property 2: logo availability never changes non-logo layout.

    #[test]
    fn layout_is_identical_with_and_without_logo() {
        let logo = image::DynamicImage::ImageRgb8(image::RgbImage::new(4, 2));
        let data = PrescriptionData {
            template: template(),
            medications: vec![MedicationLine {
                name: Some("Dipirona".into()),
                ..Default::default()
            }],
            notes: Some("Tomar com água.".into()),
        };

        let with_logo = compose(DocumentKind::Prescription, &data.template, Some(&logo), |s| {
            prescription::body(s, &data, TableEngine::Grid)
        })
        .unwrap();
        let without = compose(DocumentKind::Prescription, &data.template, None, |s| {
            prescription::body(s, &data, TableEngine::Grid)
        })
        .unwrap();

        // The logo branch adds an image op, the fallback adds two text ops;
        // everything else must match exactly, including positions.
        let fallback_labels = ["PRONTIVUS", "HORIZONTAL"];
        let a: Vec<_> = texts(&with_logo)
            .into_iter()
            .filter(|(t, _, _)| !fallback_labels.contains(&t.as_str()))
            .collect();
        let b: Vec<_> = texts(&without)
            .into_iter()
            .filter(|(t, _, _)| !fallback_labels.contains(&t.as_str()))
            .collect();
        assert_eq!(a, b);

        assert!(with_logo
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Image { .. })));
        assert!(!without
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Image { .. })));
    }

    #[test]
    fn caller_supplied_clinic_identity_is_rendered() {
        let mut t = template();
        t.clinic_name = "Clínica Bela Vista".into();
        t.clinic_address = "Rua Nova, 42, Campinas - SP".into();
        t.clinic_phone = "(19) 4000-0000".into();

        let data = CertificateData {
            template: t,
            kind: CertificateKind::GeneralMedical,
            reason: Some("consulta de rotina".into()),
            duration: None,
            period: None,
            restrictions: None,
        };
        let doc = compose(DocumentKind::Certificate, &data.template, None, |s| {
            certificate::body(s, &data)
        })
        .unwrap();

        assert!(has_text(&doc, "Clínica Bela Vista"));
        assert!(has_text(&doc, "Rua Nova, 42"));
        assert!(has_text(&doc, "(19) 4000-0000"));
        // Footer location line carries the address-derived city.
        assert!(has_text(&doc, "Campinas,"));
    }

    // Property 5: receipt total is the caller's figure, never recomputed.

    #[test]
    fn receipt_total_is_rendered_verbatim() {
        let data = ReceiptData {
            template: template(),
            services: vec![
                ServiceLine {
                    description: "Consulta".into(),
                    quantity: 1,
                    unit_price: 300.0,
                    total: 300.0,
                },
                ServiceLine {
                    description: "ECG".into(),
                    quantity: 1,
                    unit_price: 400.0,
                    total: 400.0,
                },
            ],
            // Inconsistent with the 700.00 line sum on purpose.
            total_amount: 999.0,
            payment_method: Some("PIX".into()),
        };
        let doc = compose(DocumentKind::Receipt, &data.template, None, |s| {
            receipt::body(s, &data, TableEngine::Grid)
        })
        .unwrap();
        assert!(has_text(&doc, "R$ 999.00"));
        assert!(!has_text(&doc, "R$ 700.00"));
        assert!(has_text(&doc, "PIX"));
    }

    // Property 7: validation fires before any drawing.

    #[tokio::test]
    async fn blank_patient_name_fails_before_drawing() {
        let composer = Composer::new();
        let data = PrescriptionData {
            template: TemplateData::new("", "1", "30 anos"),
            medications: vec![],
            notes: None,
        };
        let err = composer.prescription(&data).await.unwrap_err();
        assert!(matches!(
            err,
            DocumentError::MissingField {
                field: "patient_name"
            }
        ));
        // Validation short-circuits ahead of logo resolution, which itself
        // precedes page creation: the untouched logo cache proves the call
        // died before a single draw op could exist. The Err return carries
        // no document, so there is no op log at all on this path.
        assert!(!composer.logo.initialized());

        let blank_id = CertificateData {
            template: TemplateData::new("Ana", "  ", "30 anos"),
            kind: CertificateKind::Unspecified,
            reason: None,
            duration: None,
            period: None,
            restrictions: None,
        };
        let err = composer.certificate(&blank_id).await.unwrap_err();
        assert!(matches!(
            err,
            DocumentError::MissingField { field: "patient_id" }
        ));
        assert!(!composer.logo.initialized());
    }

    #[test]
    fn serialization_produces_a_pdf() {
        let bytes = test_document().into_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn table_engine_choice_does_not_shift_notes_noticeably() {
        let data = PrescriptionData {
            template: template(),
            medications: vec![MedicationLine::default(), MedicationLine::default()],
            notes: Some("Retornar em 7 dias.".into()),
        };
        let note_y = |engine: TableEngine| {
            let doc = compose(DocumentKind::Prescription, &data.template, None, |s| {
                prescription::body(s, &data, engine)
            })
            .unwrap();
            texts(&doc)
                .into_iter()
                .find(|(t, _, _)| t.contains("Retornar"))
                .map(|(_, _, y)| y)
                .unwrap()
        };
        let grid = note_y(TableEngine::Grid);
        let manual = note_y(TableEngine::Manual);
        assert!((grid - manual).abs() <= 8.0, "grid={grid} manual={manual}");
    }
}
