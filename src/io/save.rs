//! Instance saving

use std::path::Path;

use super::format::ConfigFormat;
use crate::error::{Error, Result};
use crate::instance::Hyperparams;

/// Write `params` to `path`, in the format named by its extension
pub fn save(params: &Hyperparams, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let data = match ConfigFormat::from_path(path)? {
        ConfigFormat::Json => params.to_json()?,
        ConfigFormat::Yaml => params.to_yaml()?,
    };
    std::fs::write(path, data).map_err(|e| Error::io(path, e))?;
    tracing::debug!(schema = params.schema().name(), path = %path.display(), "saved hyperparams");
    Ok(())
}
