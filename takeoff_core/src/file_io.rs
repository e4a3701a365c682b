//! # File I/O Module
//!
//! Reading room data and writing takeoff artifacts:
//! - **Atomic writes**: write to `.tmp`, fsync, rename, so an interrupted run
//!   never leaves a half-written SVG, PDF or report behind
//! - **Room input**: JSON [`RoomsData`] files in place of the demo fixture
//! - **Reports**: JSON [`TakeoffReport`] with schema version validation
//!
//! ## Example
//!
//! ```rust,no_run
//! use takeoff_core::file_io::{load_rooms, save_report};
//! use takeoff_core::calculator::process_takeoff;
//! use takeoff_core::config::TakeoffConfig;
//! use takeoff_core::report::TakeoffReport;
//! use std::path::Path;
//!
//! let data = load_rooms(Path::new("rooms.json"))?;
//! let results = process_takeoff(&data, &TakeoffConfig::default());
//! save_report(&TakeoffReport::new(&data, results), Path::new("output/takeoff.json"))?;
//! # Ok::<(), takeoff_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::errors::{CalcError, CalcResult};
use crate::report::{TakeoffReport, SCHEMA_VERSION};
use crate::rooms::RoomsData;

/// Temp file used while writing `path`: `plan.svg` -> `plan.svg.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> CalcResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                CalcError::file_error("create directory", parent.display().to_string(), e.to_string())
            })?;
        }
    }
    Ok(())
}

/// Write bytes to a file with atomic write semantics.
///
/// 1. Write to `<path>.tmp`
/// 2. Sync to disk (fsync)
/// 3. Rename over `path` (atomic on most filesystems)
///
/// Parent directories are created as needed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    ensure_parent_dir(path)?;
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn read_to_string(path: &Path) -> CalcResult<String> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Load rooms from a JSON file.
///
/// A room missing a required field fails the whole file with
/// [`CalcError::MissingField`].
pub fn load_rooms(path: &Path) -> CalcResult<RoomsData> {
    let contents = read_to_string(path)?;
    let data = RoomsData::from_json(&contents)?;
    tracing::debug!(path = %path.display(), rooms = data.rooms.len(), "Loaded rooms");
    Ok(data)
}

/// Save a takeoff report as pretty-printed JSON.
pub fn save_report(report: &TakeoffReport, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(report).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    write_atomic(path, json.as_bytes())?;
    tracing::info!(path = %path.display(), "Saved takeoff report");
    Ok(())
}

/// Load a takeoff report.
///
/// # Returns
///
/// * `Ok(TakeoffReport)` - Successfully loaded report
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_report(path: &Path) -> CalcResult<TakeoffReport> {
    let contents = read_to_string(path)?;

    let report: TakeoffReport =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&report.meta.version)?;

    Ok(report)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions a newer minor may carry breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::process_takeoff;
    use crate::config::TakeoffConfig;
    use crate::extraction::mock_room_extraction;

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(tmp_path_for(Path::new("/out/plan.svg")), Path::new("/out/plan.svg.tmp"));
        assert_eq!(tmp_path_for(Path::new("report")), Path::new("report.tmp"));
    }

    #[test]
    fn test_write_atomic_creates_dirs_and_leaves_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("plan.svg");

        write_atomic(&path, b"<svg/>").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
        assert!(!tmp_path_for(&path).exists());
    }

    #[test]
    fn test_report_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("takeoff.json");

        let data = mock_room_extraction("plans.pdf");
        let report = TakeoffReport::new(&data, process_takeoff(&data, &TakeoffConfig::default()));
        save_report(&report, &path).unwrap();

        let loaded = load_report(&path).unwrap();
        assert_eq!(loaded.results, report.results);
        assert_eq!(loaded.summary, report.summary);
        assert_eq!(loaded.meta.floor.as_deref(), Some("2nd Floor"));
    }

    #[test]
    fn test_load_rooms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rooms.json");
        fs::write(
            &path,
            r#"{"project": "Clinic", "rooms": [
                {"id": "101", "name": "Exam 1", "length": 10, "width": 9, "height": 8, "doors": 1}
            ]}"#,
        )
        .unwrap();

        let data = load_rooms(&path).unwrap();
        assert_eq!(data.project.as_deref(), Some("Clinic"));
        assert_eq!(data.rooms.len(), 1);
        assert_eq!(data.rooms[0].doors, 1);
    }

    #[test]
    fn test_load_rooms_missing_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rooms.json");
        fs::write(&path, r#"{"rooms": [{"id": "101", "name": "Exam 1", "length": 10, "width": 9}]}"#).unwrap();

        assert_eq!(load_rooms(&path).unwrap_err(), CalcError::missing_field("height"));
    }

    #[test]
    fn test_load_rooms_missing_file() {
        let err = load_rooms(Path::new("/nonexistent/rooms.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("draft").is_err());
    }
}
