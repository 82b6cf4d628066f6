//! # Study Store
//!
//! Persists the full study list as one `.pac` file containing JSON, with
//! safety features for shared network drives:
//! - **Atomic saves**: write to .tmp, fsync, rename to prevent corruption
//! - **File locking**: prevent concurrent edits of the same dossier file
//! - **Version validation**: ensure schema compatibility before reading
//!
//! A missing store file is not an error: the trade starts with an empty
//! dossier list on first launch.
//!
//! Text reports are separate artifacts written next to the store via
//! [`write_report`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use pac_core::store::{load_studies, save_studies, FileLock};
//! use std::path::Path;
//!
//! let path = Path::new("etudes.pac");
//! let lock = FileLock::acquire(path, "artisan@aquatherm.fr")?;
//!
//! let mut studies = load_studies(path)?;
//! studies.retain(|s| !s.client_name.is_empty());
//! save_studies(&studies, path)?;
//!
//! drop(lock);
//! # Ok::<(), pac_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::study::Study;

/// Schema version of the `.pac` file format
pub const SCHEMA_VERSION: &str = "0.1.0";

/// On-disk envelope around the study list
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreFile {
    /// Schema version, checked on load
    version: String,
    /// When this file was last written
    saved: DateTime<Utc>,
    studies: Vec<Study>,
}

/// Lock file metadata stored in .pac.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

/// Get the hostname of the current machine
fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// File lock guard that releases the lock when dropped.
///
/// Uses both:
/// 1. OS-level file locking (via fs2) for process safety
/// 2. .lock file with metadata for user visibility
pub struct FileLock {
    /// Path to the main store file
    store_path: PathBuf,
    /// Path to the lock file
    lock_path: PathBuf,
    /// The underlying file handle (keeps OS lock)
    _lock_file: File,
    /// Lock metadata
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a store file.
    ///
    /// Returns `Err(CalcError::FileLocked)` when another live process
    /// holds the lock; a stale lock (dead pid or older than 24 hours) is
    /// taken over silently.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if lock_path.exists() {
            if let Ok(existing) = read_lock_info(&lock_path) {
                if !is_lock_stale(&existing) {
                    return Err(CalcError::file_locked(
                        path.display().to_string(),
                        format!("{} ({})", existing.user_id, existing.machine),
                        existing.locked_at.to_rfc3339(),
                    ));
                }
                // Stale lock, take it over
            }
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| {
                CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string())
            })?;

        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        let lock_json =
            serde_json::to_string_pretty(&info).map_err(|e| CalcError::SerializationError {
                reason: e.to_string(),
            })?;

        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;

        lock_file.sync_all().map_err(|e| {
            CalcError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

        Ok(FileLock {
            store_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check if a store file is locked without acquiring the lock.
    ///
    /// Returns `Some(LockInfo)` if locked, `None` if available.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if lock_path.exists() {
            if let Ok(info) = read_lock_info(&lock_path) {
                if !is_lock_stale(&info) {
                    return Some(info);
                }
            }
        }
        None
    }

    /// Get the path to the store file
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
        // OS lock is released when _lock_file is dropped
    }
}

/// Get the lock file path for a store file
fn lock_path_for(store_path: &Path) -> PathBuf {
    let mut lock_path = store_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

/// Read lock info from a lock file
fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let mut file = File::open(lock_path).map_err(|e| {
        CalcError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}

/// Check if a lock is stale (the process that created it is no longer running)
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
            #[cfg(windows)]
            {
                use std::process::Command;
                let output = Command::new("tasklist")
                    .args(["/FI", &format!("PID eq {}", info.pid), "/NH"])
                    .output();
                if let Ok(output) = output {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    if stdout.contains("No tasks") || !stdout.contains(&info.pid.to_string()) {
                        return true;
                    }
                }
            }
            #[cfg(unix)]
            {
                if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                    return true;
                }
            }
        }
    }

    // Locks older than 24 hours are considered abandoned
    let age = Utc::now() - info.locked_at;
    if age.num_hours() > 24 {
        return true;
    }

    false
}

/// Save the full study list with atomic write semantics.
///
/// The save process:
/// 1. Serialize the versioned envelope to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp to .pac (atomic on most filesystems)
///
/// This prevents corruption if the process is interrupted during write.
pub fn save_studies(studies: &[Study], path: &Path) -> CalcResult<()> {
    let envelope = StoreFile {
        version: SCHEMA_VERSION.to_string(),
        saved: Utc::now(),
        studies: studies.to_vec(),
    };

    let json =
        serde_json::to_string_pretty(&envelope).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;

    let tmp_path = path.with_extension("pac.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error(
            "create temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error(
            "write temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error(
            "sync temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load the full study list.
///
/// A missing file yields an empty list. Corrupt JSON or an incompatible
/// schema version is an error; the caller decides whether to surface it
/// or start fresh.
pub fn load_studies(path: &Path) -> CalcResult<Vec<Study>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let envelope: StoreFile =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&envelope.version)?;

    Ok(envelope.studies)
}

/// Load the study list, returning whether it's read-only due to a lock.
///
/// # Returns
///
/// * `Ok((studies, None))` - Loaded successfully, no lock
/// * `Ok((studies, Some(LockInfo)))` - Loaded, but another user has the lock
/// * `Err(_)` - Failed to load
pub fn load_studies_with_lock_check(path: &Path) -> CalcResult<(Vec<Study>, Option<LockInfo>)> {
    let studies = load_studies(path)?;
    let lock_info = FileLock::check(path);
    Ok((studies, lock_info))
}

/// Write a text report next to the store.
///
/// Reports are plain UTF-8 artifacts named by the study (see
/// [`Study::report_file_name`]); an existing file with the same name is
/// overwritten. Returns the full path of the written file.
pub fn write_report(dir: &Path, file_name: &str, content: &str) -> CalcResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        CalcError::file_error("create dir", dir.display().to_string(), e.to_string())
    })?;

    let path = dir.join(file_name);
    let mut file = File::create(&path).map_err(|e| {
        CalcError::file_error("create report", path.display().to_string(), e.to_string())
    })?;

    file.write_all(content.as_bytes()).map_err(|e| {
        CalcError::file_error("write report", path.display().to_string(), e.to_string())
    })?;

    file.sync_all().map_err(|e| {
        CalcError::file_error("sync report", path.display().to_string(), e.to_string())
    })?;

    Ok(path)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // For 0.x versions a newer minor is a breaking change
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 {
        if file_parts[1] > current_parts[1] {
            return Err(CalcError::VersionMismatch {
                file_version: file_version.to_string(),
                expected_version: SCHEMA_VERSION.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::air_to_water::AirToWaterInput;
    use crate::study::{Status, Study};
    use chrono::TimeZone;
    use std::env::temp_dir;

    fn temp_store_path(name: &str) -> PathBuf {
        temp_dir().join(format!("pacalc_test_{}.pac", name))
    }

    fn sample_study() -> Study {
        let created = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
        let input = AirToWaterInput {
            surface_m2: 120.0,
            ..Default::default()
        };
        Study::new_air_to_water_at("M. Martin", "4 rue Pasteur, Tours", input, created)
    }

    #[test]
    fn test_lock_path_generation() {
        let store_path = Path::new("/path/to/etudes.pac");
        let lock_path = lock_path_for(store_path);
        assert_eq!(lock_path, Path::new("/path/to/etudes.pac.lock"));
    }

    #[test]
    fn test_lock_info_creation() {
        let info = LockInfo::new("artisan@aquatherm.fr");
        assert_eq!(info.user_id, "artisan@aquatherm.fr");
        assert!(info.pid > 0);
    }

    #[test]
    fn test_missing_file_is_empty_list() {
        let path = temp_store_path("missing");
        let _ = fs::remove_file(&path);
        let studies = load_studies(&path).unwrap();
        assert!(studies.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_store_path("roundtrip");

        let studies = vec![sample_study()];
        save_studies(&studies, &path).unwrap();

        let loaded = load_studies(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], studies[0]);
        assert_eq!(loaded[0].status, Status::Computed);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_store_path("atomic");
        let tmp_path = path.with_extension("pac.tmp");

        save_studies(&[sample_study()], &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let path = temp_store_path("lock_test");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "artisan@aquatherm.fr").unwrap();
        assert_eq!(lock.info.user_id, "artisan@aquatherm.fr");

        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_load_with_lock_check() {
        let path = temp_store_path("lock_check");
        save_studies(&[sample_study()], &path).unwrap();

        let (loaded, lock_info) = load_studies_with_lock_check(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(lock_info.is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_write_report_returns_path() {
        let dir = temp_dir().join("pacalc_test_reports");
        let study = sample_study();
        let path = write_report(&dir, &study.report_file_name(), "RAPPORT\n").unwrap();

        assert!(path.exists());
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "RAPPORT\n");

        let _ = fs::remove_file(&path);
        let _ = fs::remove_dir(&dir);
    }
}
