//! Plain-JSON file persistence shared by profiles and settings.
//!
//! Files are small, so every save rewrites the whole document.

use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::VaultError;

/// Read `{data_dir}/{file}`, falling back to [`Default`] when the file is
/// missing or is not valid JSON for `T`.
pub(crate) fn load_or_default<T>(data_dir: &Path, file: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let path = data_dir.join(file);
    match fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable JSON file");
            T::default()
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => T::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Falling back to defaults");
            T::default()
        }
    }
}

/// Write `value` to `{data_dir}/{file}` atomically.
///
/// Writes to `.{file}.tmp` first, then renames over the target so a crash
/// never leaves a half-written document behind. Owner-only on Unix.
pub(crate) fn save_atomic<T>(data_dir: &Path, file: &str, value: &T) -> Result<(), VaultError>
where
    T: Serialize,
{
    let path = data_dir.join(file);
    let tmp = data_dir.join(format!(".{file}.tmp"));

    let json = serde_json::to_string_pretty(value)?;
    fs::write(&tmp, json)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
    }

    fs::rename(&tmp, &path)?;
    Ok(())
}
