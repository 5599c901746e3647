//! Append-only heartbeat log
//!
//! Each line is `[heartbeat] <ISO-8601 UTC>`. The writer appends one whole
//! line per tick; readers never hold the file open between requests.

use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncSeekExt, AsyncWriteExt, BufReader};
use tracing::debug;
use crate::{
    config::LIVENESS_SCAN_CHUNK_BYTES,
    errors::{ProbeError, ProbeResult},
    types::{HeartbeatRecord, HeartbeatSummary},
    utils::iso_millis,
};

pub const HEARTBEAT_MARKER: &str = "[heartbeat]";

pub fn format_heartbeat_line(at: DateTime<Utc>) -> String {
    format!("{} {}\n", HEARTBEAT_MARKER, iso_millis(&at))
}

pub fn is_heartbeat_line(line: &str) -> bool {
    line.contains(HEARTBEAT_MARKER)
}

/// Parse the timestamp following the marker on a heartbeat line.
pub fn parse_heartbeat_line(line: &str) -> anyhow::Result<HeartbeatRecord> {
    let (_, rest) = line
        .split_once(HEARTBEAT_MARKER)
        .ok_or_else(|| anyhow!("not a heartbeat line: {:?}", line))?;
    let raw = rest.trim();
    let timestamp = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("invalid heartbeat timestamp {:?}", raw))?
        .with_timezone(&Utc);
    Ok(HeartbeatRecord { timestamp })
}

#[derive(Debug, Clone)]
pub struct HeartbeatLog {
    path: PathBuf,
    scan_chunk_bytes: u64,
}

impl HeartbeatLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scan_chunk_bytes: LIVENESS_SCAN_CHUNK_BYTES,
        }
    }

    /// Override the backwards-scan window (mainly to exercise chunk seams).
    pub fn with_scan_chunk_bytes(mut self, bytes: u64) -> Self {
        self.scan_chunk_bytes = bytes.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the log and its parent directories if absent.
    pub async fn ensure_exists(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        Ok(())
    }

    /// Append one heartbeat line with a single write.
    pub async fn append(&self, at: DateTime<Utc>) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format_heartbeat_line(at).as_bytes()).await?;
        file.flush().await
    }

    /// Most recent heartbeat, scanning backwards from the end of the file in
    /// fixed-size chunks.
    ///
    /// Returns `MissingArtifact` when the log does not exist and `Ok(None)`
    /// when it holds no heartbeat line.
    pub async fn latest(&self) -> ProbeResult<Option<HeartbeatRecord>> {
        let mut file = match File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ProbeError::missing("Heartbeat log not found", &self.path));
            }
            Err(e) => return Err(ProbeError::fault("Failed to open heartbeat log", e)),
        };

        let len = file
            .metadata()
            .await
            .map_err(|e| ProbeError::fault("Failed to stat heartbeat log", e))?
            .len();

        let mut end = len;
        // Head of the window just scanned; it continues the last line of the
        // window before it.
        let mut carry: Vec<u8> = Vec::new();

        while end > 0 {
            let start = end.saturating_sub(self.scan_chunk_bytes);
            let mut window = vec![0u8; (end - start) as usize];
            file.seek(SeekFrom::Start(start))
                .await
                .map_err(|e| ProbeError::fault("Failed to seek heartbeat log", e))?;
            file.read_exact(&mut window)
                .await
                .map_err(|e| ProbeError::fault("Failed to read heartbeat log", e))?;
            window.extend_from_slice(&carry);

            let (head, complete) = if start == 0 {
                (Vec::new(), window.as_slice())
            } else {
                match window.iter().position(|b| *b == b'\n') {
                    Some(idx) => (window[..idx].to_vec(), &window[idx + 1..]),
                    None => {
                        carry = window;
                        end = start;
                        continue;
                    }
                }
            };

            let text = String::from_utf8_lossy(complete);
            if let Some(line) = text.lines().rev().find(|line| is_heartbeat_line(line)) {
                return parse_heartbeat_line(line)
                    .map(Some)
                    .map_err(|e| ProbeError::fault("Failed to parse heartbeat", e));
            }

            debug!(start, end, "No heartbeat in scan window, moving back");
            carry = head;
            end = start;
        }

        Ok(None)
    }

    /// Count every heartbeat line and keep the last one, streaming the file.
    /// A missing log is an empty summary.
    pub async fn summarize(&self) -> anyhow::Result<HeartbeatSummary> {
        let file = match File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HeartbeatSummary::default()),
            Err(e) => return Err(e).context("Failed to open heartbeat log"),
        };

        // Decoded lossily per line, as `latest` does.
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        let mut count = 0u64;
        let mut last_line: Option<String> = None;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .context("Failed to read heartbeat log")?;
            if read == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if is_heartbeat_line(&line) {
                count += 1;
                last_line = Some(line.trim_end().to_string());
            }
        }

        let last = last_line.as_deref().map(parse_heartbeat_line).transpose()?;
        Ok(HeartbeatSummary { count, last })
    }
}
