pub mod cli;
pub mod error;
pub mod forge;
pub mod git;
pub mod pipeline;
pub mod tracker;
pub mod version;

pub use error::{ReleaserError, Result};
pub use pipeline::{PipelineParams, ReleasePipeline, ReleaseSummary};
