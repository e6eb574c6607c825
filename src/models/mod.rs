pub mod certificate;
pub mod enums;
pub mod exam_guide;
pub mod prescription;
pub mod receipt;
pub mod report;
pub mod template;

pub use certificate::{CertificateData, CertificateKind};
pub use enums::DocumentKind;
pub use exam_guide::ExamGuideData;
pub use prescription::{MedicationLine, PrescriptionData};
pub use receipt::{ReceiptData, ServiceLine};
pub use report::{ReportData, VitalSigns};
pub use template::TemplateData;
