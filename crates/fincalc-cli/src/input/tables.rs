use fincalc_core::tables::RateTables;
use log::info;

use super::file;

/// Rate tables from `--tables`, or the built-in FY2024-25 set.
///
/// `.yaml` / `.yml` files are read as YAML, anything else as JSON. The loaded
/// tables are validated before any calculator sees them.
pub fn load_tables(path: Option<&str>) -> Result<RateTables, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(RateTables::default());
    };

    let canonical = file::resolve_path(path)?;
    let contents = file::read_to_string(&canonical)?;
    let is_yaml = canonical
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    let tables: RateTables = if is_yaml {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    tables.validate()?;

    info!("using rate tables {} from {}", tables.version, canonical.display());
    Ok(tables)
}
