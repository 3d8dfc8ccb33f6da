//! Domain types and the external collaborator contract for sdkdeck.
//!
//! The UI-independent model crate (`sdkdeck-core`) consumes everything here:
//! - Candidate and version wire types.
//! - Total ordering over arbitrary version strings.
//! - The [`SdkClient`] trait abstracting the candidate index, local
//!   installation inspection, downloads, and global-version switching.

mod error;
mod traits;
mod types;
mod version;

pub use error::ClientError;
pub use traits::{DownloadOutcome, DownloadTask, SdkClient};
pub use types::{Candidate, CandidateVersion};
pub use version::{SemanticVersion, VersionInfo};
