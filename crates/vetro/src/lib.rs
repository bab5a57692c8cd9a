mod bundler;
mod graph;
mod module_loader;
mod stages;
mod types;
mod utils;

pub use crate::bundler::Bundler;
pub use crate::graph::ChunkGraph;
pub use crate::types::bundle_output::BundleOutput;
pub use crate::utils::normalize_options::normalize_options;
pub use vetro_common::*;
pub use vetro_plugin::{Plugin, PluginDriver};
