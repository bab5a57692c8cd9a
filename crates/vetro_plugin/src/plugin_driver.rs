use std::sync::Arc;

use vetro_common::{ModuleId, ModuleType};
use vetro_error::BuildResult;

use crate::Plugin;

/// Runs the registered plugins in order for each hook.
#[derive(Debug, Default)]
pub struct PluginDriver {
  plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginDriver {
  pub fn new(plugins: Vec<Arc<dyn Plugin>>) -> Self {
    Self { plugins }
  }

  /// First plugin to claim the specifier wins.
  pub fn resolve_id(&self, specifier: &str, importer: Option<&str>) -> Option<String> {
    self.plugins.iter().find_map(|plugin| plugin.resolve_id(specifier, importer))
  }

  /// Chains transforms; each plugin sees the output of the previous one.
  pub fn transform(
    &self,
    id: &ModuleId,
    module_type: &ModuleType,
    code: String,
  ) -> BuildResult<String> {
    let mut code = code;
    for plugin in &self.plugins {
      if let Some(transformed) = plugin.transform(id, module_type, &code)? {
        code = transformed;
      }
    }
    Ok(code)
  }
}

#[cfg(test)]
mod tests {
  use std::borrow::Cow;
  use std::sync::Arc;

  use vetro_common::{ModuleId, ModuleType};
  use vetro_error::BuildResult;

  use super::PluginDriver;
  use crate::Plugin;

  #[derive(Debug)]
  struct Banner(&'static str);

  impl Plugin for Banner {
    fn name(&self) -> Cow<'static, str> {
      Cow::Borrowed("banner")
    }

    fn transform(
      &self,
      _id: &ModuleId,
      _module_type: &ModuleType,
      code: &str,
    ) -> BuildResult<Option<String>> {
      Ok(Some(format!("{}\n{code}", self.0)))
    }
  }

  #[test]
  fn transforms_chain_in_registration_order() {
    let driver = PluginDriver::new(vec![Arc::new(Banner("// a")), Arc::new(Banner("// b"))]);
    let id = ModuleId::new("/p/src/main.js");
    let out = driver.transform(&id, &ModuleType::Js, "let x = 1;".to_string()).unwrap();
    assert_eq!(out, "// b\n// a\nlet x = 1;");
  }

  #[test]
  fn resolve_id_first_claim_wins() {
    #[derive(Debug)]
    struct Claim;
    impl Plugin for Claim {
      fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("claim")
      }
      fn resolve_id(&self, specifier: &str, _importer: Option<&str>) -> Option<String> {
        (specifier == "virtual:config").then(|| "/virtual/config.js".to_string())
      }
    }

    let driver = PluginDriver::new(vec![Arc::new(Claim)]);
    assert_eq!(driver.resolve_id("virtual:config", None), Some("/virtual/config.js".to_string()));
    assert_eq!(driver.resolve_id("./real", None), None);
  }
}
