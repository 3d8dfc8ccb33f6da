//! Reactive model for an SDK manager browser.
//!
//! Two cascading panes (candidates, then the selected candidate's versions)
//! built from observable filtered collections, plus a single-flight install
//! pipeline with cancellable downloads. Everything talks to the outside
//! world through the `SdkClient` trait from `sdkdeck-backend`, so the whole
//! model runs against mocks in tests.

pub mod logging;

mod candidates;
mod collection;
mod controller;
mod entries;
mod error;
mod observable;
mod pipeline;
mod settings;
mod versions;

pub use candidates::{CandidateFilter, CandidateRegistry};
pub use collection::{FilteredCollection, SelectionCursor};
pub use controller::LifecycleController;
pub use entries::{CandidateEntry, VersionEntry};
pub use error::CoreError;
pub use observable::{Observable, Subscription};
pub use pipeline::{InstallPhase, InstallPipeline, use_command};
pub use settings::Settings;
pub use versions::{VersionFilter, VersionRegistry};
