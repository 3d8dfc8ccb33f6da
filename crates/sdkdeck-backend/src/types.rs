use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// An installable SDK product, as published by the candidate index.
///
/// Identity is the candidate id; `name` and `description` are display
/// metadata and excluded from equality so refreshed listings compare
/// equal to the entries they replace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Candidate {}

impl Hash for Candidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A vendor/version build of a candidate.
///
/// `downloaded` means the archive is already cached locally, so an install
/// needs no network fetch. `installed` and `downloaded` are independent:
/// an archive may be kept around after uninstalling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateVersion {
    pub identifier: String,
    pub version: String,
    #[serde(default)]
    pub vendor: Option<String>,
    pub installed: bool,
    pub downloaded: bool,
}
