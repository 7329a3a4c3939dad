use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dirhook::errors::{DirhookError, Result};
use dirhook::exec::CommandRunner;

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRun {
    pub command: Vec<String>,
    pub file_path: Option<PathBuf>,
}

/// A fake runner that:
/// - records every command it is asked to run, with its file path
/// - optionally sleeps to simulate work
/// - optionally fails every run
/// - tracks how many runs were in flight at once
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    runs: Arc<Mutex<Vec<RecordedRun>>>,
    delay: Option<Duration>,
    fail: bool,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn runs(&self) -> Vec<RecordedRun> {
        self.runs.lock().unwrap().clone()
    }

    /// File paths of the recorded runs, in completion order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.runs()
            .into_iter()
            .filter_map(|r| r.file_path)
            .collect()
    }

    pub fn run_count(&self) -> usize {
        self.runs.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl CommandRunner for RecordingRunner {
    fn run<'a>(
        &'a self,
        command: &'a [String],
        file_path: Option<&'a Path>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            if command.is_empty() {
                return Ok(());
            }

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            self.runs.lock().unwrap().push(RecordedRun {
                command: command.to_vec(),
                file_path: file_path.map(Path::to_path_buf),
            });
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail {
                Err(DirhookError::CommandFailed(format!(
                    "fake failure for {:?}",
                    command
                )))
            } else {
                Ok(())
            }
        })
    }
}
