pub mod file;
pub mod stdin;
pub mod tables;

use serde::de::DeserializeOwned;

/// Typed input from `--input`, else from piped stdin. `None` means the
/// command should build its input from flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(Some(serde_json::from_value(data)?)),
        None => Ok(None),
    }
}
