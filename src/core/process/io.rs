// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output capture for processes.
//!
//! ```text
//! run_child()
//!   join!(read stdout, read stderr, wait)
//!   forward lines to trace log
//!   --> ProcessOutput { exit_code, stdout, stderr }
//! ```
//!
//! Streams are read to completion as raw bytes and decoded lossily, so
//! carriage-return progress output (`git push`) survives unchanged.

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tracing::trace;

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::error::{AcpResult, ProcessError};

/// Reads a stream to its end. A missing stream yields no bytes.
async fn read_stream<R>(stream: Option<R>) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::new();
    if let Some(mut stream) = stream {
        stream.read_to_end(&mut buffer).await?;
    }
    Ok(buffer)
}

impl ProcessBuilder {
    /// Converts captured bytes according to the stream flags.
    fn finish_stream(&self, bytes: &[u8], flags: StreamFlags, name: &str, stream: &str) -> String {
        let text = String::from_utf8_lossy(bytes);

        if flags.contains(StreamFlags::FORWARD_TO_LOG) {
            for line in text.lines().filter(|l| !l.trim().is_empty()) {
                trace!(process = %name, %stream, line = %self.for_log(line), "output");
            }
        }

        if flags.contains(StreamFlags::KEEP_IN_STRING) {
            text.into_owned()
        } else {
            String::new()
        }
    }

    /// Runs the child process, capturing its output and waiting for completion.
    pub(super) async fn run_child(&self, name: &str, child: &mut Child) -> AcpResult<ProcessOutput> {
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let (stdout, stderr, status) =
            tokio::join!(read_stream(stdout), read_stream(stderr), child.wait());
        let (stdout, stderr, status) = (
            self.read_result(stdout)?,
            self.read_result(stderr)?,
            self.read_result(status)?,
        );

        Ok(ProcessOutput::new(
            status.code().unwrap_or(-1),
            self.finish_stream(&stdout, self.stdout_config(), name, "stdout"),
            self.finish_stream(&stderr, self.stderr_config(), name, "stderr"),
        ))
    }

    fn read_result<T>(&self, result: std::io::Result<T>) -> Result<T, ProcessError> {
        result.map_err(|e| ProcessError::OutputError {
            command: self.command_string(),
            message: e.to_string(),
        })
    }
}
