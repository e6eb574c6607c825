//! Output sinks: save to disk, native print, preview.
//!
//! All three consume the same [`ComposedDocument`]; serialization is not
//! kind-specific. Print and preview stage the bytes in a temp file, hand it
//! to the platform, and remove it after a linger delay long enough for the
//! consumer to have opened it. A failed removal is a leak, logged as a
//! defect, never an error.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use chrono::{Local, NaiveDate};

use crate::compose::ComposedDocument;
use crate::config;
use crate::error::DocumentError;

const PRINT_LINGER: Duration = Duration::from_secs(60);
const PREVIEW_LINGER: Duration = Duration::from_secs(30);

/// `{base_name}_{YYYY-MM-DD}.pdf`
pub fn filename_for(base_name: &str, date: NaiveDate) -> String {
    format!("{}_{}.pdf", base_name, date.format("%Y-%m-%d"))
}

/// Writes the document into `dir` (default: the user's download directory)
/// under a timestamped name and returns the path.
pub fn download(
    doc: ComposedDocument,
    base_name: &str,
    dir: Option<&Path>,
) -> Result<PathBuf, DocumentError> {
    let dir = dir
        .map(Path::to_path_buf)
        .unwrap_or_else(config::exports_dir);
    std::fs::create_dir_all(&dir)?;

    let path = dir.join(filename_for(base_name, Local::now().date_naive()));
    std::fs::write(&path, doc.into_bytes()?)?;
    tracing::info!(path = %path.display(), "document saved");
    Ok(path)
}

/// Stages the document and triggers the platform print path.
pub async fn print(doc: ComposedDocument) -> Result<(), DocumentError> {
    let kind = doc.kind();
    let path = stage(doc, kind.as_str())?;
    spawn_print(&path)?;
    tracing::info!(path = %path.display(), "print dispatched");
    schedule_cleanup(path, PRINT_LINGER);
    Ok(())
}

/// Stages the document under a title-derived name and opens the platform
/// viewer. Returns the staged path.
pub async fn preview(doc: ComposedDocument, title: &str) -> Result<PathBuf, DocumentError> {
    let path = stage(doc, &sanitize(title))?;
    spawn_viewer(&path)?;
    tracing::info!(path = %path.display(), "preview opened");
    schedule_cleanup(path.clone(), PREVIEW_LINGER);
    Ok(path)
}

fn stage(doc: ComposedDocument, label: &str) -> Result<PathBuf, DocumentError> {
    let bytes = doc.into_bytes()?;
    let mut file = tempfile::Builder::new()
        .prefix(&format!("{label}_"))
        .suffix(".pdf")
        .tempfile()?;
    file.write_all(&bytes)?;
    let (_, path) = file.keep().map_err(|e| DocumentError::Io(e.error))?;
    Ok(path)
}

fn schedule_cleanup(path: PathBuf, linger: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(linger).await;
        if let Err(err) = tokio::fs::remove_file(&path).await {
            tracing::warn!(path = %path.display(), error = %err, "staged document not removed");
        }
    });
}

/// Keeps the staged filename filesystem-safe.
fn sanitize(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if cleaned.trim_matches('_').is_empty() {
        "documento".into()
    } else {
        cleaned
    }
}

#[cfg(unix)]
fn spawn_print(path: &Path) -> std::io::Result<()> {
    Command::new("lp").arg(path).spawn()?;
    Ok(())
}

#[cfg(windows)]
fn spawn_print(path: &Path) -> std::io::Result<()> {
    Command::new("powershell")
        .args(["-NoProfile", "-Command", "Start-Process", "-Verb", "Print"])
        .arg(path)
        .spawn()?;
    Ok(())
}

#[cfg(target_os = "macos")]
fn spawn_viewer(path: &Path) -> std::io::Result<()> {
    Command::new("open").arg(path).spawn()?;
    Ok(())
}

#[cfg(all(unix, not(target_os = "macos")))]
fn spawn_viewer(path: &Path) -> std::io::Result<()> {
    Command::new("xdg-open").arg(path).spawn()?;
    Ok(())
}

#[cfg(windows)]
fn spawn_viewer(path: &Path) -> std::io::Result<()> {
    Command::new("cmd").args(["/C", "start", ""]).arg(path).spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::test_document;

    #[test]
    fn filename_uses_iso_date_stamp() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(filename_for("receita", date), "receita_2024-01-15.pdf");
    }

    #[test]
    fn download_writes_a_timestamped_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = download(test_document(), "receita", Some(dir.path())).unwrap();

        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("receita_"));
        assert!(name.ends_with(".pdf"));
        // receita_YYYY-MM-DD.pdf
        assert_eq!(name.len(), "receita_2024-01-15.pdf".len());

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn sanitize_keeps_names_filesystem_safe() {
        assert_eq!(sanitize("Receita Médica"), "Receita_Médica");
        assert_eq!(sanitize("///"), "documento");
    }
}
