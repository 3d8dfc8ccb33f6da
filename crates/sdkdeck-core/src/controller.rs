use std::sync::Arc;

use log::debug;
use sdkdeck_backend::SdkClient;

use crate::candidates::CandidateRegistry;
use crate::entries::{CandidateEntry, VersionEntry};
use crate::error::CoreError;
use crate::pipeline::InstallPipeline;
use crate::versions::VersionRegistry;

/// Owns the candidate and version registries and the install pipeline, and
/// keeps them coherent: every change to the candidate selection reloads the
/// version pane, and every mutating operation re-reads the client state it
/// invalidated.
pub struct LifecycleController {
    client: Arc<dyn SdkClient>,
    candidates: CandidateRegistry,
    versions: VersionRegistry,
    pipeline: InstallPipeline,
}

impl LifecycleController {
    #[must_use]
    pub fn new(client: Arc<dyn SdkClient>) -> Self {
        Self {
            pipeline: InstallPipeline::new(Arc::clone(&client)),
            client,
            candidates: CandidateRegistry::new(),
            versions: VersionRegistry::new(),
        }
    }

    #[must_use]
    pub fn candidates(&self) -> &CandidateRegistry {
        &self.candidates
    }

    #[must_use]
    pub fn versions(&self) -> &VersionRegistry {
        &self.versions
    }

    #[must_use]
    pub fn pipeline(&self) -> &InstallPipeline {
        &self.pipeline
    }

    /// Re-reads the full candidate list with install counts, then reloads
    /// the version pane for whichever candidate ends up selected.
    ///
    /// # Errors
    ///
    /// [`CoreError::SourceUnavailable`] when any listing call fails.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        let candidates = self
            .client
            .candidates()
            .await
            .map_err(CoreError::source_unavailable)?;

        let mut entries = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let installed = self
                .client
                .installed_count(&candidate.id)
                .await
                .map_err(CoreError::source_unavailable)?;
            entries.push(CandidateEntry::new(candidate, installed));
        }
        self.candidates.replace(entries);
        self.reload_versions().await
    }

    /// # Errors
    ///
    /// [`CoreError::SourceUnavailable`] when the version listing fails.
    pub async fn move_candidate_selection(&mut self, offset: isize) -> Result<(), CoreError> {
        self.candidates.move_selection(offset);
        self.reload_versions().await
    }

    /// # Errors
    ///
    /// [`CoreError::SourceUnavailable`] when the version listing fails.
    pub async fn set_candidate_text(&mut self, text: Option<&str>) -> Result<(), CoreError> {
        self.candidates.set_text(text);
        self.reload_versions().await
    }

    /// # Errors
    ///
    /// [`CoreError::SourceUnavailable`] when the version listing fails.
    pub async fn set_candidate_installed_only(
        &mut self,
        installed_only: bool,
    ) -> Result<(), CoreError> {
        self.candidates.set_installed_only(installed_only);
        self.reload_versions().await
    }

    pub fn move_version_selection(&mut self, offset: isize) {
        self.versions.move_selection(offset);
    }

    pub fn set_version_text(&mut self, text: Option<&str>) {
        self.versions.set_text(text);
    }

    pub fn set_version_installed_only(&mut self, installed_only: bool) {
        self.versions.set_installed_only(installed_only);
    }

    pub fn set_version_downloaded_only(&mut self, downloaded_only: bool) {
        self.versions.set_downloaded_only(downloaded_only);
    }

    pub fn set_version_used_only(&mut self, used_only: bool) {
        self.versions.set_used_only(used_only);
    }

    /// Installs the selected version, then refreshes everything the install
    /// changed (install counts and version flags). A missing selection is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Pipeline errors, or [`CoreError::SourceUnavailable`] from the
    /// follow-up refresh.
    pub async fn install_selected(&mut self) -> Result<(), CoreError> {
        let Some(entry) = self.versions.selected() else {
            debug!("install requested without a selected version");
            return Ok(());
        };
        self.pipeline
            .install(&entry.candidate_id, &entry.version)
            .await?;
        self.refresh().await
    }

    /// Uninstalls the selected version, then refreshes. A missing selection
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// Pipeline errors, or [`CoreError::SourceUnavailable`] from the
    /// follow-up refresh.
    pub async fn uninstall_selected(&mut self) -> Result<(), CoreError> {
        let Some(entry) = self.versions.selected() else {
            debug!("uninstall requested without a selected version");
            return Ok(());
        };
        self.pipeline
            .uninstall(&entry.candidate_id, &entry.version.identifier)
            .await?;
        self.refresh().await
    }

    /// Makes the selected version the global default (installing it first
    /// when needed), then reloads the version pane. A missing selection is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Pipeline errors, or [`CoreError::SourceUnavailable`] from the
    /// follow-up reload.
    pub async fn use_selected(&mut self) -> Result<(), CoreError> {
        let Some(entry) = self.versions.selected() else {
            debug!("use requested without a selected version");
            return Ok(());
        };
        self.pipeline
            .use_version(&entry.candidate_id, &entry.version)
            .await?;
        self.reload_versions().await
    }

    /// Returns the session-local use command for the selected version,
    /// installing it first when needed. `None` when nothing is selected.
    ///
    /// # Errors
    ///
    /// Pipeline errors, or [`CoreError::SourceUnavailable`] from the
    /// follow-up reload.
    pub async fn use_command_for_selected(&mut self) -> Result<Option<String>, CoreError> {
        let Some(entry) = self.versions.selected() else {
            return Ok(None);
        };
        let installed_before = entry.version.installed;
        let command = self
            .pipeline
            .prepare_use_command(&entry.candidate_id, &entry.version)
            .await?;
        if !installed_before {
            self.refresh().await?;
        }
        Ok(Some(command))
    }

    pub fn cancel(&self) {
        self.pipeline.cancel();
    }

    async fn reload_versions(&mut self) -> Result<(), CoreError> {
        let Some(selected) = self.candidates.selected() else {
            self.versions.clear();
            return Ok(());
        };
        let candidate_id = selected.candidate.id;

        let active = self
            .client
            .active_version(&candidate_id)
            .await
            .map_err(CoreError::source_unavailable)?;
        let versions = self
            .client
            .versions(&candidate_id)
            .await
            .map_err(CoreError::source_unavailable)?;

        let entries = versions
            .into_iter()
            .map(|version| VersionEntry::new(candidate_id.clone(), version, active.as_deref()))
            .collect();
        self.versions.repopulate(entries);
        Ok(())
    }
}
