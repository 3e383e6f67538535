//! Subprocess supervision with a hard deadline
//!
//! Output is captured into anonymous temp files rather than pipes, so a
//! chatty child can never block on a full pipe while we poll it, and
//! grandchildren holding the handles do not keep us waiting after a kill.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Output of a process that exited on its own
#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// How a supervised process ended
#[derive(Debug)]
pub enum Supervised {
    Finished(Captured),
    /// Killed at the deadline
    TimedOut,
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to start process: {0}")]
    Spawn(#[source] io::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Run `command` to completion, killing it once `timeout` has elapsed
pub fn run_with_timeout(command: &mut Command, timeout: Duration) -> Result<Supervised, ProcessError> {
    let mut stdout = tempfile::tempfile()?;
    let mut stderr = tempfile::tempfile()?;

    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout.try_clone()?))
        .stderr(Stdio::from(stderr.try_clone()?))
        .spawn()
        .map_err(ProcessError::Spawn)?;

    // A timeout too large to represent is no deadline at all.
    let deadline = Instant::now().checked_add(timeout);
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            // The child may exit between try_wait and kill; either way reap it.
            let _ = child.kill();
            let _ = child.wait();
            return Ok(Supervised::TimedOut);
        }
        thread::sleep(POLL_INTERVAL);
    };

    Ok(Supervised::Finished(Captured {
        status,
        stdout: read_back(&mut stdout)?,
        stderr: read_back(&mut stderr)?,
    }))
}

fn read_back(file: &mut File) -> io::Result<String> {
    file.seek(SeekFrom::Start(0))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
