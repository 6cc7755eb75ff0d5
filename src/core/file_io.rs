use serde::de::DeserializeOwned;

use crate::core::error::KernelResult;

/// Read a JSON parameter file into `T`.
pub fn load_params<T: DeserializeOwned>(path: impl AsRef<std::path::Path>) -> KernelResult<T> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let params = serde_json::from_str(&contents)?;
    log::debug!("loaded parameters from {}", path.display());
    Ok(params)
}
