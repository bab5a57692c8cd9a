pub mod bundle_output;

use std::sync::Arc;

use vetro_common::NormalizedBundlerOptions;
use vetro_plugin::PluginDriver;
use vetro_resolver::Resolver;

pub type SharedOptions = Arc<NormalizedBundlerOptions>;
pub type SharedResolver = Arc<Resolver>;
pub type SharedPluginDriver = Arc<PluginDriver>;
