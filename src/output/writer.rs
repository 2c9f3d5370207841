//! Message writers

use super::message::SingerMessage;
use crate::error::Result;
use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, Stdout};

/// Destination for Singer messages
#[async_trait]
pub trait MessageWriter: Send {
    /// Write one message
    async fn write(&mut self, message: &SingerMessage) -> Result<()>;
}

/// Writes messages to stdout, one JSON document per line
pub struct StdoutWriter {
    stdout: Stdout,
}

impl StdoutWriter {
    /// Create a writer on the process stdout
    pub fn new() -> Self {
        Self {
            stdout: tokio::io::stdout(),
        }
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StdoutWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdoutWriter").finish_non_exhaustive()
    }
}

#[async_trait]
impl MessageWriter for StdoutWriter {
    async fn write(&mut self, message: &SingerMessage) -> Result<()> {
        let mut line = message.to_line()?;
        line.push('\n');
        self.stdout.write_all(line.as_bytes()).await?;
        self.stdout.flush().await?;
        Ok(())
    }
}

/// Collects messages in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    /// Messages in the order they were written
    pub messages: Vec<SingerMessage>,
}

impl MemoryWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Records written for a stream
    pub fn records(&self, stream: &str) -> Vec<&serde_json::Value> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                SingerMessage::Record {
                    stream: s, record, ..
                } if s == stream => Some(record),
                _ => None,
            })
            .collect()
    }

    /// Streams that received a SCHEMA message, in order
    pub fn schema_streams(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.is_schema())
            .filter_map(SingerMessage::stream)
            .collect()
    }

    /// The most recent STATE message value
    pub fn last_state(&self) -> Option<&crate::state::State> {
        self.messages.iter().rev().find_map(|m| match m {
            SingerMessage::State { value } => Some(value),
            _ => None,
        })
    }
}

#[async_trait]
impl MessageWriter for MemoryWriter {
    async fn write(&mut self, message: &SingerMessage) -> Result<()> {
        self.messages.push(message.clone());
        Ok(())
    }
}
