use std::pin::pin;
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;
use sdkdeck_backend::{CandidateVersion, DownloadOutcome, SdkClient};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::CoreError;
use crate::observable::Observable;

/// Where an install currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallPhase {
    #[default]
    Idle,
    Checking,
    Downloading {
        percent: u8,
    },
    Extracting,
    Installing,
    Done,
}

impl InstallPhase {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Checking => "Checking...",
            Self::Downloading { .. } => "Downloading...",
            Self::Extracting => "Extracting...",
            Self::Installing => "Installing...",
            Self::Done => "Done",
        }
    }
}

/// The shell command that makes a version the current one in an existing
/// terminal session.
#[must_use]
pub fn use_command(candidate_id: &str, version_id: &str) -> String {
    format!("sdk use {candidate_id} {version_id}")
}

/// Runs install, uninstall, and use against the client, one operation at a
/// time.
///
/// Exclusivity is a `try_lock` on an async mutex: a second operation while
/// one is in flight fails fast with [`CoreError::Busy`] instead of queueing.
/// Progress is published through observables; `cancel` signals the download
/// of the in-flight install, if there is one, through a token scoped to that
/// download.
#[derive(Clone)]
pub struct InstallPipeline {
    client: Arc<dyn SdkClient>,
    gate: Arc<tokio::sync::Mutex<()>>,
    cancel_token: Arc<Mutex<Option<CancellationToken>>>,
    phase: Observable<InstallPhase>,
    percent: Observable<u8>,
    downloading: Observable<bool>,
    installing: Observable<bool>,
}

impl InstallPipeline {
    #[must_use]
    pub fn new(client: Arc<dyn SdkClient>) -> Self {
        Self {
            client,
            gate: Arc::new(tokio::sync::Mutex::new(())),
            cancel_token: Arc::new(Mutex::new(None)),
            phase: Observable::new(InstallPhase::default()),
            percent: Observable::new(0),
            downloading: Observable::new(false),
            installing: Observable::new(false),
        }
    }

    #[must_use]
    pub fn phase(&self) -> &Observable<InstallPhase> {
        &self.phase
    }

    /// Raw download percent, 0 when no download is running.
    #[must_use]
    pub fn percent(&self) -> &Observable<u8> {
        &self.percent
    }

    /// True only while bytes are moving; false again during extraction.
    #[must_use]
    pub fn downloading(&self) -> &Observable<bool> {
        &self.downloading
    }

    /// True for the whole install, from the first check to cleanup.
    #[must_use]
    pub fn installing(&self) -> &Observable<bool> {
        &self.installing
    }

    /// Downloads (unless the archive is already cached) and installs the
    /// version.
    ///
    /// # Errors
    ///
    /// [`CoreError::Busy`] when another operation is in flight,
    /// [`CoreError::Cancelled`] when the download was cancelled, and
    /// [`CoreError::OperationFailed`] when the client fails.
    pub async fn install(
        &self,
        candidate_id: &str,
        version: &CandidateVersion,
    ) -> Result<(), CoreError> {
        let _guard = self.try_acquire()?;
        self.install_locked(candidate_id, version).await
    }

    /// Uninstalls an installed version.
    ///
    /// # Errors
    ///
    /// [`CoreError::Busy`] or [`CoreError::OperationFailed`].
    pub async fn uninstall(&self, candidate_id: &str, version_id: &str) -> Result<(), CoreError> {
        let _guard = self.try_acquire()?;
        debug!("uninstalling {candidate_id} {version_id}");
        self.client
            .uninstall(candidate_id, version_id)
            .await
            .map_err(|source| CoreError::operation_failed("uninstall", source))
    }

    /// Makes the version the candidate's global default, installing it first
    /// when it is not installed yet.
    ///
    /// # Errors
    ///
    /// [`CoreError::Busy`], [`CoreError::Cancelled`], or
    /// [`CoreError::OperationFailed`].
    pub async fn use_version(
        &self,
        candidate_id: &str,
        version: &CandidateVersion,
    ) -> Result<(), CoreError> {
        let _guard = self.try_acquire()?;
        if !version.installed {
            self.install_locked(candidate_id, version).await?;
        }
        debug!("switching {candidate_id} to {}", version.identifier);
        self.client
            .activate(candidate_id, &version.identifier)
            .await
            .map_err(|source| CoreError::operation_failed("use", source))
    }

    /// Returns the session-local use command for the version, installing it
    /// first when it is not installed yet.
    ///
    /// # Errors
    ///
    /// [`CoreError::Busy`], [`CoreError::Cancelled`], or
    /// [`CoreError::OperationFailed`].
    pub async fn prepare_use_command(
        &self,
        candidate_id: &str,
        version: &CandidateVersion,
    ) -> Result<String, CoreError> {
        let _guard = self.try_acquire()?;
        if !version.installed {
            self.install_locked(candidate_id, version).await?;
        }
        Ok(use_command(candidate_id, &version.identifier))
    }

    /// Cancels the in-flight install's download. A no-op outside the
    /// download and extraction phases; installs past that point run to
    /// completion.
    pub fn cancel(&self) {
        if !matches!(
            self.phase.get(),
            InstallPhase::Downloading { .. } | InstallPhase::Extracting
        ) {
            return;
        }
        let slot = self
            .cancel_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = slot.as_ref() {
            debug!("cancelling in-flight download");
            token.cancel();
        }
    }

    fn try_acquire(&self) -> Result<tokio::sync::MutexGuard<'_, ()>, CoreError> {
        self.gate.try_lock().map_err(|_| CoreError::Busy)
    }

    async fn install_locked(
        &self,
        candidate_id: &str,
        version: &CandidateVersion,
    ) -> Result<(), CoreError> {
        self.installing.set(true);
        let result = self.run_install(candidate_id, version).await;
        self.reset();
        result
    }

    async fn run_install(
        &self,
        candidate_id: &str,
        version: &CandidateVersion,
    ) -> Result<(), CoreError> {
        debug!("installing {candidate_id} {}", version.identifier);
        self.phase.set(InstallPhase::Checking);
        if version.downloaded {
            // Archive already cached locally; report completion directly.
            self.percent.set(100);
        } else {
            self.download(candidate_id, &version.identifier).await?;
        }

        self.phase.set(InstallPhase::Installing);
        self.client
            .install(candidate_id, &version.identifier)
            .await
            .map_err(|source| CoreError::operation_failed("install", source))?;
        self.phase.set(InstallPhase::Done);
        Ok(())
    }

    async fn download(&self, candidate_id: &str, version_id: &str) -> Result<(), CoreError> {
        let (progress, mut events) = mpsc::channel(32);
        let token = CancellationToken::new();
        {
            let mut slot = self
                .cancel_token
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *slot = Some(token.clone());
        }

        let task = self.client.download(candidate_id, version_id);
        let mut run = pin!(task.run(progress, token));
        let outcome = loop {
            tokio::select! {
                Some(percent) = events.recv() => self.apply_percent(percent),
                result = &mut run => break result,
            }
        };
        // Events the task sent shortly before finishing.
        while let Ok(percent) = events.try_recv() {
            self.apply_percent(percent);
        }
        {
            let mut slot = self
                .cancel_token
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *slot = None;
        }

        match outcome {
            Ok(DownloadOutcome::Completed) => Ok(()),
            Ok(DownloadOutcome::Cancelled) => Err(CoreError::cancelled("download")),
            Err(source) => Err(CoreError::operation_failed("download", source)),
        }
    }

    // Percent values outside 1..=99 mean the archive landed and the client
    // is unpacking it, with no byte-level progress to show.
    fn apply_percent(&self, percent: u8) {
        if (1..=99).contains(&percent) {
            self.downloading.set(true);
            self.percent.set(percent);
            self.phase.set(InstallPhase::Downloading { percent });
        } else {
            self.downloading.set(false);
            self.phase.set(InstallPhase::Extracting);
        }
    }

    fn reset(&self) {
        self.downloading.set(false);
        self.installing.set(false);
        self.percent.set(0);
        self.phase.set(InstallPhase::Idle);
        let mut slot = self
            .cancel_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }
}
