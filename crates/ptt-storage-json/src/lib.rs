use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};
use ptt_core::{CoreError, StateStorage};
use ptt_domain::LedgerState;
use tracing::debug;

const DOCUMENT_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S%3f";
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_RETENTION: usize = 5;

/// Filesystem-backed key-value storage: one JSON file per key, plus
/// timestamped backups of each slot.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    data_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackupInfo {
    pub key: String,
    /// File name of the backup, used to select it for restore.
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub size_bytes: u64,
    pub path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(data_dir: PathBuf, backups_dir: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(data_dir, backups_dir, DEFAULT_RETENTION)
    }

    pub fn with_retention(
        data_dir: PathBuf,
        backups_dir: PathBuf,
        retention: usize,
    ) -> Result<Self, CoreError> {
        fs::create_dir_all(&data_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            data_dir,
            backups_dir,
            retention: retention.max(1),
        })
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", canonical_name(key), DOCUMENT_EXTENSION))
    }

    /// Copies the current contents of `key` into a new backup file.
    pub fn backup(&self, key: &str, note: Option<&str>) -> Result<BackupInfo, CoreError> {
        let source = self.slot_path(key);
        if !source.exists() {
            return Err(CoreError::Storage(format!(
                "nothing stored under `{}` to back up",
                key
            )));
        }
        let dir = self.backup_dir(key);
        fs::create_dir_all(&dir)?;
        let stamp = self.next_backup_stamp(key)?;
        let mut stem = format!(
            "{}_{}",
            canonical_name(key),
            stamp.format(BACKUP_TIMESTAMP_FORMAT)
        );
        if let Some(label) = sanitize_backup_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        let file_name = format!("{}.{}", stem, DOCUMENT_EXTENSION);
        let path = dir.join(&file_name);
        if path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` already exists",
                file_name
            )));
        }
        let tmp = tmp_path(&path);
        fs::copy(&source, &tmp)?;
        fs::rename(&tmp, &path)?;
        let size_bytes = fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
        debug!(key, backup = %file_name, "backup written");
        self.prune_backups(key)?;
        Ok(BackupInfo {
            key: canonical_name(key),
            id: file_name,
            created_at: parse_backup_timestamp(&stem),
            size_bytes,
            path,
        })
    }

    /// Backups of `key`, newest first.
    pub fn list_backups(&self, key: &str) -> Result<Vec<BackupInfo>, CoreError> {
        let dir = self.backup_dir(key);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let slug = canonical_name(key);
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            let (Some(file_name), Some(stem)) = (
                path.file_name().and_then(|name| name.to_str()),
                path.file_stem().and_then(|stem| stem.to_str()),
            ) else {
                continue;
            };
            entries.push(BackupInfo {
                key: slug.clone(),
                id: file_name.to_string(),
                created_at: parse_backup_timestamp(stem),
                size_bytes: fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0),
                path: path.clone(),
            });
        }
        entries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(entries)
    }

    /// Replaces the slot for `key` with the named backup. The backup must
    /// hold a readable ledger document; the restored state is returned.
    pub fn restore(&self, key: &str, backup_id: &str) -> Result<LedgerState, CoreError> {
        let backup = self
            .list_backups(key)?
            .into_iter()
            .find(|info| info.id == backup_id)
            .ok_or_else(|| CoreError::Storage(format!("backup `{}` not found", backup_id)))?;
        let raw = fs::read_to_string(&backup.path)?;
        let state: LedgerState = serde_json::from_str(&raw)?;
        self.set(key, &raw)?;
        debug!(key, backup = %backup.id, "backup restored");
        Ok(state)
    }

    /// Millisecond stamp for a new backup of `key`, strictly later than the
    /// newest existing one so ids never collide and listing order holds.
    fn next_backup_stamp(&self, key: &str) -> Result<DateTime<Utc>, CoreError> {
        let now = Utc::now();
        let now = now
            .with_nanosecond(now.nanosecond() / 1_000_000 * 1_000_000)
            .unwrap_or(now);
        let newest = self
            .list_backups(key)?
            .into_iter()
            .filter_map(|info| info.created_at)
            .max();
        Ok(match newest {
            Some(newest) if newest >= now => newest + Duration::milliseconds(1),
            _ => now,
        })
    }

    fn backup_dir(&self, key: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(key))
    }

    fn prune_backups(&self, key: &str) -> Result<(), CoreError> {
        for stale in self.list_backups(key)?.into_iter().skip(self.retention) {
            debug!(key, backup = %stale.id, "pruning backup");
            let _ = fs::remove_file(stale.path);
        }
        Ok(())
    }
}

impl StateStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.slot_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "slot".into()
    } else {
        sanitized
    }
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !sanitized.is_empty() && !last_dash {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Finds the `YYYYmmdd_HHMMSSmmm` pair inside a backup stem. Older stems
/// without milliseconds (`HHMMSS`) are still read. Slots and notes never
/// contain an eight-digit segment followed by a six- or nine-digit one.
fn parse_backup_timestamp(stem: &str) -> Option<DateTime<Utc>> {
    let segments: Vec<&str> = stem.split('_').collect();
    segments.windows(2).find_map(|pair| {
        let (date, time) = (pair[0], pair[1]);
        if !is_digits(date, 8) || !(is_digits(time, 6) || is_digits(time, 9)) {
            return None;
        }
        let (clock, millis) = time.split_at(6);
        let naive =
            NaiveDateTime::parse_from_str(&format!("{}{}", date, clock), "%Y%m%d%H%M%S").ok()?;
        let millis: i64 = if millis.is_empty() { 0 } else { millis.parse().ok()? };
        Some(DateTime::from_naive_utc_and_offset(naive, Utc) + Duration::milliseconds(millis))
    })
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
