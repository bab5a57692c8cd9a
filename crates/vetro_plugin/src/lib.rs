mod plugin_driver;

pub use crate::plugin_driver::PluginDriver;

use std::borrow::Cow;
use std::fmt::Debug;

use vetro_common::{ModuleId, ModuleType};
use vetro_error::BuildResult;

/// Extension seam for resolution and per-module content transformation.
///
/// Hooks return `None` to pass; the driver falls through to the next plugin
/// and finally to the built-in behavior. Anything implementing this trait can
/// participate, there is no registration beyond handing it to the bundler or
/// dev server.
pub trait Plugin: Send + Sync + Debug {
  fn name(&self) -> Cow<'static, str>;

  /// Claim a specifier before the path resolver sees it. Returning a path
  /// short-circuits resolution.
  fn resolve_id(&self, _specifier: &str, _importer: Option<&str>) -> Option<String> {
    None
  }

  /// Rewrite a module's content. Runs in registration order; each plugin sees
  /// the previous plugin's output.
  fn transform(
    &self,
    _id: &ModuleId,
    _module_type: &ModuleType,
    _code: &str,
  ) -> BuildResult<Option<String>> {
    Ok(None)
  }
}
