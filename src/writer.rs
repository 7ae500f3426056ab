use std::path::Path;

use tracing::debug;

use crate::error::LicenseError;
use crate::models::WriteOutcome;
use crate::prompt::Prompter;

/// Write `content` to `path`, asking before replacing an existing file unless
/// `force` is set.
///
/// Declining is reported as [`WriteOutcome::Cancelled`], not as an error. The
/// write is not atomic: a failure part-way leaves whatever made it to disk.
pub fn write_license_file(
    path: &Path,
    content: &str,
    prompter: &mut dyn Prompter,
    force: bool,
) -> Result<WriteOutcome, LicenseError> {
    if path.exists() && !force && !prompter.confirm_overwrite(path)? {
        debug!(path = %path.display(), "overwrite declined");
        return Ok(WriteOutcome::Cancelled);
    }

    std::fs::write(path, content.as_bytes()).map_err(|source| LicenseError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(WriteOutcome::Written(path.to_path_buf()))
}
