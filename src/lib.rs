pub mod artifact;
pub mod cli;
pub mod doc;
pub mod error;
pub mod format;
pub mod path;
pub mod registry;
pub mod trace;
pub mod types;

pub use doc::{ArtifactEntry, DocRoot};
pub use path::TraitPath;
pub use registry::{Handoff, ImplementorRegistry, ImplementorSink};
pub use types::{CrateName, Implementor, ImplementorTable};
