use sdkdeck_backend::{Candidate, CandidateVersion, VersionInfo};

/// A candidate row: the listed candidate plus its local install count.
///
/// Equality is the candidate id alone. The count changes across refreshes
/// and must not break selection identity.
#[derive(Debug, Clone)]
pub struct CandidateEntry {
    pub candidate: Candidate,
    pub installed: usize,
}

impl CandidateEntry {
    #[must_use]
    pub fn new(candidate: Candidate, installed: usize) -> Self {
        Self {
            candidate,
            installed,
        }
    }
}

impl PartialEq for CandidateEntry {
    fn eq(&self, other: &Self) -> bool {
        self.candidate.id == other.candidate.id
    }
}

impl Eq for CandidateEntry {}

/// A version row for the selected candidate.
///
/// `active` marks the candidate's current global default, independent of
/// whether the version is installed locally. Equality is the
/// (candidate id, version identifier) pair.
#[derive(Debug, Clone)]
pub struct VersionEntry {
    pub candidate_id: String,
    pub version: CandidateVersion,
    pub order: VersionInfo,
    pub active: bool,
}

impl VersionEntry {
    #[must_use]
    pub fn new(candidate_id: String, version: CandidateVersion, active_id: Option<&str>) -> Self {
        let order = VersionInfo::parse(&version.version);
        let active = active_id == Some(version.identifier.as_str());
        Self {
            candidate_id,
            version,
            order,
            active,
        }
    }
}

impl PartialEq for VersionEntry {
    fn eq(&self, other: &Self) -> bool {
        self.candidate_id == other.candidate_id
            && self.version.identifier == other.version.identifier
    }
}

impl Eq for VersionEntry {}
