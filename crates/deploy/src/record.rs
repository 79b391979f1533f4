//! Durable deployment records.
//!
//! One pretty-printed JSON document per successful deployment, named
//! `deployment-<network>-<epochMillis>.json`.

use std::path::{Path, PathBuf};

use alloy_core::primitives::Address;
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::NetworkDescriptor;

/// Prefix shared by every record file name.
pub const RECORD_FILE_PREFIX: &str = "deployment-";

/// Outcome of one successful deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub network: String,
    pub chain_id: String,
    pub contract_address: String,
    pub deployer: String,
    /// ISO-8601 UTC, millisecond precision.
    pub timestamp: String,
    /// Empty when the chain has no explorer.
    pub explorer_url: String,
}

impl DeploymentRecord {
    pub fn new(
        network: &NetworkDescriptor,
        contract_address: Address,
        deployer: Address,
        timestamp: DateTime<Utc>,
        explorer_url: Option<String>,
    ) -> Self {
        Self {
            network: network.name.clone(),
            chain_id: network.chain_id.to_string(),
            contract_address: contract_address.to_string(),
            deployer: deployer.to_string(),
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            explorer_url: explorer_url.unwrap_or_default(),
        }
    }
}

/// File name of the record written for `network` at `epoch_millis`.
pub fn record_file_name(network: &str, epoch_millis: i64) -> String {
    format!("{RECORD_FILE_PREFIX}{network}-{epoch_millis}.json")
}

/// Split a record file name into its network name and epoch milliseconds.
pub fn parse_record_file_name(file_name: &str) -> Option<(&str, i64)> {
    let stem = file_name
        .strip_prefix(RECORD_FILE_PREFIX)?
        .strip_suffix(".json")?;
    let (network, millis) = stem.rsplit_once('-')?;
    if network.is_empty() {
        return None;
    }
    Some((network, millis.parse().ok()?))
}

/// A record read back from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub path: PathBuf,
    pub written_at_millis: i64,
    pub record: DeploymentRecord,
}

/// Directory the records are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, network: &str, epoch_millis: i64) -> PathBuf {
        self.dir.join(record_file_name(network, epoch_millis))
    }

    /// Write a record, naming the file after `written_at`.
    ///
    /// The document goes to a temporary file first and is renamed into place, so a
    /// failed write never leaves a partial record behind. An existing file with the
    /// same name is replaced.
    pub fn persist(&self, record: &DeploymentRecord, written_at: DateTime<Utc>) -> Result<PathBuf> {
        let path = self.path_for(&record.network, written_at.timestamp_millis());

        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).with_context(|| {
                format!("Failed to create record directory {}", self.dir.display())
            })?;
        }

        let json =
            serde_json::to_string_pretty(record).context("Failed to serialize deployment record")?;

        let tmp_path = path.with_extension("json.tmp");
        if let Err(err) = std::fs::write(&tmp_path, json) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(err)
                .with_context(|| format!("Failed to write deployment record {}", path.display()));
        }

        if let Err(err) = std::fs::rename(&tmp_path, &path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(err)
                .with_context(|| format!("Failed to move deployment record to {}", path.display()));
        }

        tracing::debug!(path = %path.display(), "Deployment record written");

        Ok(path)
    }

    /// Load a single record file.
    pub fn load(path: &Path) -> Result<DeploymentRecord> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read deployment record {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse deployment record {}", path.display()))
    }

    /// All records in the directory, oldest first.
    ///
    /// Files that look like records but cannot be parsed are skipped with a warning. A
    /// missing directory holds no records.
    pub fn list(&self) -> Result<Vec<StoredRecord>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read record directory {}", self.dir.display()))?;

        let mut records = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to read entry in {}", self.dir.display()))?
                .path();

            let Some(written_at_millis) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(parse_record_file_name)
                .map(|(_, millis)| millis)
            else {
                continue;
            };

            match Self::load(&path) {
                Ok(record) => records.push(StoredRecord {
                    path,
                    written_at_millis,
                    record,
                }),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "Skipping unreadable deployment record");
                }
            }
        }

        records.sort_by(|a, b| {
            a.written_at_millis
                .cmp(&b.written_at_millis)
                .then_with(|| a.path.cmp(&b.path))
        });

        Ok(records)
    }
}
