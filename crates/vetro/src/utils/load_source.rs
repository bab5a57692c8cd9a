use std::path::Path;

use vetro_common::{ModuleType, ResolvedId, StrOrBytes};
use vetro_error::BundleError;
use vetro_fs::FileSystem;

pub fn load_source(
  fs: &dyn FileSystem,
  resolved_id: &ResolvedId,
) -> Result<(StrOrBytes, ModuleType), BundleError> {
  let module_id = resolved_id.module_id();
  let path = module_id.path();
  let module_type = module_type_from_path(path);

  let content = match module_type {
    ModuleType::Asset => fs.read(path).map(StrOrBytes::Bytes),
    _ => fs.read_to_string(path).map(StrOrBytes::Str),
  }
  .map_err(|source| BundleError::InternalReadFailure { path: path.to_path_buf(), source })?;

  Ok((content, module_type))
}

/// ref: https://github.com/evanw/esbuild/blob/9c13ae1f06dfa909eb4a53882e3b7e4216a503fe/internal/bundler/bundler.go#L1161-L1183
fn module_type_from_path(path: &Path) -> ModuleType {
  let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
    return ModuleType::Js;
  };

  ModuleType::from_known_extension(&ext.to_ascii_lowercase()).unwrap_or(ModuleType::Asset)
}

#[cfg(test)]
mod tests {
  use super::module_type_from_path;
  use std::path::Path;
  use vetro_common::ModuleType;

  #[test]
  fn extension_drives_the_module_type() {
    assert_eq!(module_type_from_path(Path::new("/p/a.js")), ModuleType::Js);
    assert_eq!(module_type_from_path(Path::new("/p/a.mts")), ModuleType::Ts);
    assert_eq!(module_type_from_path(Path::new("/p/a.json")), ModuleType::Json);
    assert_eq!(module_type_from_path(Path::new("/p/logo.svg")), ModuleType::Asset);
    assert_eq!(module_type_from_path(Path::new("/p/extensionless")), ModuleType::Js);
  }
}
