//! Reading files from disk into attachments.

use std::path::Path;

use synapse_ai::Attachment;
use synapse_common::SynapseError;

/// Read a file and encode it, guessing the media type from the extension.
pub fn load_attachment(path: &Path) -> Result<Attachment, SynapseError> {
    let bytes = std::fs::read(path).map_err(|e| {
        SynapseError::Attachment(format!("failed to read {}: {e}", path.display()))
    })?;
    if bytes.is_empty() {
        return Err(SynapseError::Attachment(format!(
            "{} is empty",
            path.display()
        )));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_guess::from_path(path).first_or_octet_stream();

    tracing::debug!(%name, mime = %mime_type, size = bytes.len(), "attachment loaded");
    Ok(Attachment::from_bytes(name, mime_type.essence_str(), &bytes))
}

pub fn load_all(paths: &[impl AsRef<Path>]) -> Result<Vec<Attachment>, SynapseError> {
    paths.iter().map(|p| load_attachment(p.as_ref())).collect()
}
