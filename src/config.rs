use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Prontivus";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Clinic identity applied when the caller omits it.
pub const CLINIC_NAME: &str = "Prontivus";
pub const CLINIC_ADDRESS: &str = "Av. Paulista, 1000 - Bela Vista, São Paulo - SP";
pub const CLINIC_PHONE: &str = "(11) 3000-0000";
pub const CLINIC_CITY: &str = "São Paulo";

/// Clinician placeholder used when no clinician is supplied.
pub const DEFAULT_DOCTOR_NAME: &str = "Médico(a) Responsável";
pub const DEFAULT_DOCTOR_CRM: &str = "CRM/SP 000000";

/// Placeholder strings. Absent optional fields always render one of these,
/// never blank space.
pub const NOT_INFORMED: &str = "Não informado";
pub const MEDICATION_GUIDANCE: &str = "Conforme orientação médica";
pub const UNSPECIFIED_MEDICATION: &str = "Medicamento não especificado";
pub const EMPTY_PRESCRIPTION_ROW: &str = "Nenhum medicamento prescrito";

/// Caption printed centered at the very bottom of every document.
pub const BRANDING_CAPTION: &str = "Prontivus - Gestão Inteligente de Clínicas";

/// Where the clinic logo lives. The path is fixed; the env var exists for
/// deployments that serve assets from another host.
pub fn logo_url() -> String {
    std::env::var("PRONTIVUS_LOGO_URL").unwrap_or_else(|_| {
        "https://app.prontivus.com.br/assets/logo-prontivus-horizontal.png".into()
    })
}

/// Default directory for downloaded documents.
/// Falls back to ~/Prontivus when the platform has no download dir.
pub fn exports_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| {
        let home = dirs::home_dir().expect("Cannot determine home directory");
        home.join(APP_NAME)
    })
}

pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME").replace('-', "_"))
}
