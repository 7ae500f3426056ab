use std::path::Path;

use tracing::info;

use crate::error::LicenseError;
use crate::models::Outcome;
use crate::prompt::Prompter;
use crate::registry::github::GithubLicenses;
use crate::writer::write_license_file;

/// Name of the file written at the workspace root.
pub const LICENSE_FILE_NAME: &str = "LICENSE";

#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Use this license key instead of asking.
    pub license: Option<String>,
    /// Replace an existing file without asking.
    pub force: bool,
}

/// Fetch the catalogue, let the user choose, fetch the text and write
/// `<workspace>/LICENSE`.
///
/// Nothing is written unless every earlier step succeeded.
pub async fn add_license(
    api: &GithubLicenses<'_>,
    prompter: &mut dyn Prompter,
    workspace: Option<&Path>,
    options: &AddOptions,
) -> Result<Outcome, LicenseError> {
    let root = match workspace {
        Some(root) if root.is_dir() => root,
        _ => return Err(LicenseError::NoWorkspace),
    };

    prompter.begin_fetch("Fetching license list...");
    let licenses = api.list_licenses().await;
    prompter.end_fetch();
    let licenses = licenses?;

    let chosen = match &options.license {
        Some(key) => licenses
            .iter()
            .find(|l| l.key.eq_ignore_ascii_case(key))
            .ok_or_else(|| LicenseError::UnknownLicense(key.clone()))?,
        None => match prompter.pick_license(&licenses)? {
            Some(index) => licenses
                .get(index)
                .ok_or_else(|| LicenseError::UnknownLicense(index.to_string()))?,
            None => return Ok(Outcome::NothingSelected),
        },
    };
    info!(license = %chosen, "license selected");

    prompter.begin_fetch(&format!("Fetching {}...", chosen.name));
    let content = api.license_content(&chosen.key).await;
    prompter.end_fetch();
    let content = content?;

    let path = root.join(LICENSE_FILE_NAME);
    Ok(write_license_file(&path, &content, prompter, options.force)?.into())
}
