//! Chat services: model registry, backend seam, and streaming relay.

pub mod backend;
pub mod registry;
pub mod relay;

pub use backend::ChatBackend;
pub use registry::{ModelEntry, ModelRegistry};
pub use relay::ChatRelay;
