use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};
use std::process::Command;
use tokio::task;

/// Resolves the office binary the way the shell would: a path is taken as
/// is, a bare name is searched on `PATH`.
pub fn locate_office_binary(soffice_bin: &str) -> Option<PathBuf> {
    let candidate = Path::new(soffice_bin);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(soffice_bin))
        .find(|path| path.is_file())
}

/// Converts a DOCX file to PDF next to it with a headless LibreOffice binary.
pub async fn convert_docx_to_pdf(soffice_bin: &str, docx_path: &Path) -> Result<PathBuf> {
    let output_dir = docx_path
        .parent()
        .ok_or_else(|| anyhow!("Invalid DOCX path: missing parent directory"))?;

    let soffice_owned = soffice_bin.to_string();
    let docx_path_owned = docx_path.to_path_buf();
    let output_dir_owned = output_dir.to_path_buf();

    let command_result = task::spawn_blocking(move || {
        Command::new(&soffice_owned)
            .args([
                "--headless",
                "--convert-to",
                "pdf:writer_pdf_Export",
                "--outdir",
                &output_dir_owned.to_string_lossy(),
                &docx_path_owned.to_string_lossy(),
            ])
            .output()
    })
    .await
    .context("LibreOffice conversion task failed")?;

    let output =
        command_result.with_context(|| format!("Failed to execute {soffice_bin} command"))?;

    if !output.status.success() {
        return Err(anyhow!(
            "LibreOffice conversion failed with status {:?}: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let pdf_filename = format!(
        "{}.pdf",
        docx_path
            .file_stem()
            .ok_or_else(|| anyhow!("Invalid DOCX filename"))?
            .to_string_lossy()
    );

    let pdf_path = output_dir.join(pdf_filename);

    if !pdf_path.exists() {
        return Err(anyhow!(
            "PDF file was not created at expected path: {}",
            pdf_path.display()
        ));
    }

    Ok(pdf_path)
}
