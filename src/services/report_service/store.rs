use crate::models::AuditResult;
use crate::utils::file_utils::{create_json, report_file_name, report_timestamp};
use futures::StreamExt;
use log::{debug, warn};
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio_stream::wrappers::ReadDirStream;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

const MAX_NAME_ATTEMPTS: u32 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed report {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persists audit results as `<dir>/lighthouse-report-<epoch-ms>.json` and
/// keeps a bounded in-memory history of this session's results.
#[derive(Debug)]
pub struct ReportStore {
    dir: PathBuf,
    capacity: usize,
    history: VecDeque<AuditResult>,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        ReportStore {
            dir: dir.into(),
            capacity,
            history: VecDeque::with_capacity(capacity),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, timestamp: i64) -> PathBuf {
        self.dir.join(report_file_name(timestamp))
    }

    /// Records `result` in the session history and writes it to disk,
    /// creating the report directory if needed. An existing report file is
    /// never replaced: on a name clash the timestamp of `result` is moved
    /// forward one millisecond at a time until a free name is found.
    pub async fn save(&mut self, result: &mut AuditResult) -> Result<PathBuf, StoreError> {
        let written = self.write_new(result).await;
        self.remember(result.clone());

        let path = written?;
        debug!("saved report {}", path.display());
        Ok(path)
    }

    async fn write_new(&self, result: &mut AuditResult) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;
        for _ in 0..MAX_NAME_ATTEMPTS {
            let path = self.path_for(result.timestamp);
            match create_json(&path, result).await {
                Ok(()) => return Ok(path),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!("{} exists, trying the next timestamp", path.display());
                    result.timestamp = result.timestamp.saturating_add(1);
                }
                Err(source) => return Err(StoreError::Io { path, source }),
            }
        }
        Err(StoreError::Io {
            path: self.dir.clone(),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "no free report file name"),
        })
    }

    fn remember(&mut self, result: AuditResult) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(result);
    }

    /// Up to `limit` results of this session, newest first.
    pub fn history(&self, limit: usize) -> Vec<&AuditResult> {
        self.history.iter().rev().take(limit).collect()
    }

    pub async fn load(path: &Path) -> Result<AuditResult, StoreError> {
        let bytes = fs::read(path).await.map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Every report file in the directory, oldest first. Unreadable files
    /// are skipped. A missing directory holds no reports.
    pub async fn scan(&self) -> Result<Vec<(PathBuf, AuditResult)>, StoreError> {
        let dir_stream = match fs::read_dir(&self.dir).await {
            Ok(d) => d,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut stream = ReadDirStream::new(dir_stream);
        let mut reports = Vec::new();

        while let Some(entry) = stream.next().await {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            let Some(timestamp) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(report_timestamp)
            else {
                continue;
            };

            match Self::load(&path).await {
                Ok(report) => reports.push((timestamp, path, report)),
                Err(e) => warn!("skipping {}", e),
            }
        }

        reports.sort_by_key(|(timestamp, _, _)| *timestamp);
        Ok(reports
            .into_iter()
            .map(|(_, path, report)| (path, report))
            .collect())
    }

    /// Most recent stored report for `url` older than `before`.
    pub async fn latest_for(
        &self,
        url: &str,
        before: i64,
    ) -> Result<Option<AuditResult>, StoreError> {
        Ok(self
            .scan()
            .await?
            .into_iter()
            .map(|(_, report)| report)
            .filter(|r| r.url == url && r.timestamp < before)
            .last())
    }
}
