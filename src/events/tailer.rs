//! Follow an append-only log file
//!
//! The client creates Zone.log lazily and keeps appending to it, so the
//! tailer waits for the file to appear and polls at end of file. Lines are
//! handed out whole; a trailing fragment without a newline stays buffered
//! until the rest of it is written.

use crate::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

pub struct LogTailer {
    path: PathBuf,
    poll_interval: Duration,
    reader: Option<BufReader<File>>,
    partial: String,
}

impl LogTailer {
    pub fn new(path: impl Into<PathBuf>, poll_interval: Duration) -> Self {
        LogTailer {
            path: path.into(),
            poll_interval,
            reader: None,
            partial: String::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait until the file exists, then open it
    async fn reader(&mut self) -> Result<&mut BufReader<File>> {
        let reader = match self.reader.take() {
            Some(reader) => reader,
            None => {
                while !tokio::fs::try_exists(&self.path).await? {
                    tokio::time::sleep(self.poll_interval).await;
                }
                BufReader::new(File::open(&self.path).await?)
            }
        };
        Ok(self.reader.insert(reader))
    }

    /// Next complete line, or `None` when nothing more is written yet
    pub async fn try_next_line(&mut self) -> Result<Option<String>> {
        let mut chunk = String::new();
        let read = self.reader().await?.read_line(&mut chunk).await?;
        if read == 0 {
            return Ok(None);
        }

        self.partial.push_str(&chunk);
        if !self.partial.ends_with('\n') {
            return Ok(None);
        }

        let mut line = std::mem::take(&mut self.partial);
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Next complete line, sleeping at end of file until one arrives
    pub async fn next_line(&mut self) -> Result<String> {
        loop {
            if let Some(line) = self.try_next_line().await? {
                return Ok(line);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Everything currently in the file, then the unterminated tail if any
    pub async fn drain(&mut self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        while let Some(line) = self.try_next_line().await? {
            lines.push(line);
        }
        if !self.partial.is_empty() {
            lines.push(std::mem::take(&mut self.partial));
        }
        Ok(lines)
    }
}
