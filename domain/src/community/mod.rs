//! Community entities: members, startups, posts, messages.
//!
//! The store that owns and persists these lives in the application layer;
//! this module only defines the data.

pub mod log;
pub mod profile;
pub mod snapshot;
pub mod social;

pub use log::{FounderLogEntry, ProblemSolverSession};
pub use profile::{NewUser, ProfileUpdate, StartupMetrics, StartupProfile, User};
pub use snapshot::{CommunitySnapshot, SNAPSHOT_VERSION, avatar_url};
pub use social::{ChatMessage, Comment, Post};
