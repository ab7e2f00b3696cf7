//! Submission sink
//!
//! Where submitted notes go once the editor is done with them.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::mention::Submission;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write submission: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait SubmissionSink {
    fn deliver(&mut self, submission: &Submission) -> Result<(), SinkError>;
}

impl SubmissionSink for Vec<Submission> {
    fn deliver(&mut self, submission: &Submission) -> Result<(), SinkError> {
        self.push(submission.clone());
        Ok(())
    }
}

/// Appends one JSON object per submission
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<File> {
    /// Open `path` for appending, creating parent directories
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SinkError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> SubmissionSink for JsonLinesSink<W> {
    fn deliver(&mut self, submission: &Submission) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, submission)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
