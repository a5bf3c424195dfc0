//! Helpers for running fixture tests inside a `figment::Jail`.
//!
//! The jail provides a scratch working directory and a sandboxed
//! environment. [`with_jail`] hands the closure's output back as an
//! `anyhow::Result`, and [`write_fixture`] returns the absolute UTF-8 path
//! of a document written into the jail.

use anyhow::{Result, anyhow};
use camino::Utf8PathBuf;

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        jail.clear_env();
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Write `contents` to `name` inside the jail and return its absolute path.
///
/// # Errors
///
/// Returns an error if the file cannot be written or the jail directory is
/// not valid UTF-8.
pub fn write_fixture(
    jail: &mut figment::Jail,
    name: &str,
    contents: &str,
) -> figment::error::Result<Utf8PathBuf> {
    jail.create_file(name, contents)
        .map_err(|err| figment_error(&err))?;
    let directory = Utf8PathBuf::from_path_buf(jail.directory().to_path_buf())
        .map_err(|path| figment::Error::from(format!("jail path {} is not UTF-8", path.display())))?;
    Ok(directory.join(name))
}

/// Converts any displayable error into a [`figment::Error`], for use inside
/// jail closures.
pub fn figment_error<E: ToString + ?Sized>(err: &E) -> figment::Error {
    figment::Error::from(err.to_string())
}
