use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;
use crate::types::{Candidate, CandidateVersion};

/// How a download ended when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    Completed,
    Cancelled,
}

/// A single in-flight archive download.
///
/// `run` consumes the task, streams raw percent values (1..=99 while bytes
/// are moving; 0 or 100 once the archive lands and extraction begins) into
/// `progress`, and observes `cancel` cooperatively at its own yield points.
/// A confirmed cancellation resolves to [`DownloadOutcome::Cancelled`]
/// rather than an error.
#[async_trait]
pub trait DownloadTask: Send {
    async fn run(
        self: Box<Self>,
        progress: mpsc::Sender<u8>,
        cancel: CancellationToken,
    ) -> Result<DownloadOutcome, ClientError>;
}

/// The external collaborator wrapping the candidate index, the local
/// installation directory, and the global-version switch.
///
/// Listing calls are read-only; `install` is idempotent when the version is
/// already installed. All calls may take observable wall-clock time.
#[async_trait]
pub trait SdkClient: Send + Sync {
    async fn candidates(&self) -> Result<Vec<Candidate>, ClientError>;

    async fn versions(&self, candidate_id: &str) -> Result<Vec<CandidateVersion>, ClientError>;

    async fn installed_count(&self, candidate_id: &str) -> Result<usize, ClientError>;

    /// The version currently set as the candidate's global default, if any.
    async fn active_version(&self, candidate_id: &str) -> Result<Option<String>, ClientError>;

    fn download(&self, candidate_id: &str, version_id: &str) -> Box<dyn DownloadTask>;

    async fn install(&self, candidate_id: &str, version_id: &str) -> Result<(), ClientError>;

    async fn uninstall(&self, candidate_id: &str, version_id: &str) -> Result<(), ClientError>;

    async fn activate(&self, candidate_id: &str, version_id: &str) -> Result<(), ClientError>;
}
