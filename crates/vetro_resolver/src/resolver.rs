use std::fmt::Debug;
use std::path::{Path, PathBuf};

use arcstr::ArcStr;
use sugar_path::SugarPath;

use vetro_common::AliasItem;
use vetro_fs::{FileSystem, OsFileSystem};

use crate::error::ResolveError;
use crate::package_resolver::{NpmPackageResolver, PackageResolver};

/// Extensions probed when a specifier omits one, in priority order.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".ts", ".jsx", ".tsx", ".mjs", ".json", ".css"];

/// Resolves raw import specifiers to canonical absolute module identities.
///
/// Resolution is deterministic and side-effect-free: the same specifier seen
/// from the same importer always produces the same id or the same failure.
#[derive(Debug)]
pub struct Resolver<T: FileSystem + Default = OsFileSystem> {
  cwd: PathBuf,
  /// Longest `find` first, so the longest prefix wins.
  alias: Vec<AliasItem>,
  /// Absolute, normalized. Resolved paths must land under one of these.
  allowed_roots: Vec<PathBuf>,
  package_resolver: Box<dyn PackageResolver>,
  fs: T,
}

#[derive(Debug)]
pub struct ResolveReturn {
  /// Canonical module id, `?query` included.
  pub id: ArcStr,
  /// The filesystem path portion of the id.
  pub path: PathBuf,
}

impl<T: FileSystem + Default> Resolver<T> {
  pub fn new(cwd: PathBuf, mut alias: Vec<AliasItem>, allowed_roots: Vec<PathBuf>, fs: T) -> Self {
    alias.sort_by(|a, b| b.find.len().cmp(&a.find.len()));

    let mut allowed_roots = allowed_roots
      .into_iter()
      .map(|root| root.absolutize_with(&cwd))
      .collect::<Vec<_>>();
    // The project root itself is always readable.
    if !allowed_roots.iter().any(|root| *root == cwd) {
      allowed_roots.push(cwd.clone());
    }

    let package_resolver = Box::new(NpmPackageResolver::new(DEFAULT_EXTENSIONS));

    Self { cwd, alias, allowed_roots, package_resolver, fs }
  }

  /// Swap in a different bare-specifier collaborator.
  pub fn with_package_resolver(mut self, package_resolver: Box<dyn PackageResolver>) -> Self {
    self.package_resolver = package_resolver;
    self
  }

  pub fn cwd(&self) -> &Path {
    &self.cwd
  }

  /// Whether `path` falls under one of the allow-listed roots. Checked on
  /// every resolution, before any existence probing.
  pub fn is_path_allowed(&self, path: &Path) -> bool {
    let normalized = path.normalize();
    self.allowed_roots.iter().any(|root| normalized.starts_with(root))
  }

  pub fn resolve(
    &self,
    importer: Option<&Path>,
    specifier: &str,
  ) -> Result<ResolveReturn, ResolveError> {
    let (raw_path, query) = split_query(specifier);
    let substituted = self.substitute_alias(raw_path);

    let importer_dir = importer
      .and_then(Path::parent)
      .map_or_else(|| self.cwd.clone(), Path::to_path_buf);

    let candidate = if Path::new(substituted.as_ref()).is_absolute() {
      Path::new(substituted.as_ref()).normalize()
    } else if is_relative_specifier(&substituted) {
      Path::new(substituted.as_ref()).absolutize_with(&importer_dir)
    } else {
      // Bare specifier. Delegated; a failure here is terminal.
      self.package_resolver.resolve_bare(&substituted, &importer_dir)?
    };

    // The boundary is enforced regardless of whether the file exists, so a
    // denied path cannot be probed for existence.
    if !self.is_path_allowed(&candidate) {
      return Err(ResolveError::AccessDenied { path: candidate });
    }

    let path = self
      .probe(&candidate)
      .ok_or_else(|| ResolveError::NotFound { specifier: specifier.to_string() })?;

    let mut id = path.to_string_lossy().into_owned();
    if let Some(query) = query {
      id.push('?');
      id.push_str(query);
    }

    Ok(ResolveReturn { id: id.into(), path })
  }

  fn substitute_alias<'s>(&self, specifier: &'s str) -> std::borrow::Cow<'s, str> {
    for rule in &self.alias {
      if let Some(rest) = specifier.strip_prefix(&rule.find) {
        // `@/x` matches alias `@`, `@scope/x` must not.
        if rest.is_empty() || rest.starts_with('/') {
          return std::borrow::Cow::Owned(format!("{}{rest}", rule.replacement));
        }
      }
    }
    std::borrow::Cow::Borrowed(specifier)
  }

  /// Extension and directory-index probing for extensionless specifiers.
  fn probe(&self, candidate: &Path) -> Option<PathBuf> {
    if self.fs.is_file(candidate) {
      return Some(candidate.to_path_buf());
    }

    let candidate_str = candidate.to_string_lossy();
    for ext in DEFAULT_EXTENSIONS {
      let with_ext = PathBuf::from(format!("{candidate_str}{ext}"));
      if self.fs.is_file(&with_ext) {
        return Some(with_ext);
      }
    }

    if self.fs.is_dir(candidate) {
      for ext in DEFAULT_EXTENSIONS {
        let index = candidate.join(format!("index{ext}"));
        if self.fs.is_file(&index) {
          return Some(index);
        }
      }
    }

    None
  }
}

fn split_query(specifier: &str) -> (&str, Option<&str>) {
  match specifier.split_once('?') {
    Some((path, query)) => (path, Some(query)),
    None => (specifier, None),
  }
}

fn is_relative_specifier(specifier: &str) -> bool {
  specifier == "." || specifier == ".."
    || specifier.starts_with("./")
    || specifier.starts_with("../")
}

#[cfg(test)]
mod tests {
  use std::path::{Path, PathBuf};

  use vetro_common::AliasItem;
  use vetro_fs::OsFileSystem;

  use super::Resolver;
  use crate::ResolveError;

  fn fixture() -> (tempfile::TempDir, Resolver) {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().join("project");
    std::fs::create_dir_all(root.join("src/utils")).unwrap();
    std::fs::write(root.join("src/main.js"), "export {}\n").unwrap();
    std::fs::write(root.join("src/utils/foo.js"), "export {}\n").unwrap();
    std::fs::write(root.join("src/utils/index.js"), "export {}\n").unwrap();

    let resolver = Resolver::new(
      root.clone(),
      vec![AliasItem::new("@", root.join("src").to_string_lossy())],
      vec![],
      OsFileSystem,
    );
    (dir, resolver)
  }

  #[test]
  fn alias_prefix_substitution() {
    let (_dir, resolver) = fixture();
    let ret = resolver.resolve(None, "@/utils/foo").expect("resolved");
    assert!(ret.path.ends_with(Path::new("src/utils/foo.js")));
  }

  #[test]
  fn longest_alias_prefix_wins() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().join("project");
    std::fs::create_dir_all(root.join("src/assets")).unwrap();
    std::fs::create_dir_all(root.join("static")).unwrap();
    std::fs::write(root.join("static/logo.js"), "").unwrap();
    std::fs::write(root.join("src/assets/logo.js"), "").unwrap();

    let resolver = Resolver::new(
      root.clone(),
      vec![
        AliasItem::new("@", root.join("src").to_string_lossy()),
        AliasItem::new("@/assets", root.join("static").to_string_lossy()),
      ],
      vec![],
      OsFileSystem,
    );

    let ret = resolver.resolve(None, "@/assets/logo").expect("resolved");
    assert!(ret.path.ends_with(Path::new("static/logo.js")), "got {:?}", ret.path);
  }

  #[test]
  fn relative_resolution_against_importer() {
    let (_dir, resolver) = fixture();
    let importer = resolver.cwd().join("src/main.js");
    let ret = resolver.resolve(Some(&importer), "./utils/foo").expect("resolved");
    assert!(ret.path.ends_with(Path::new("src/utils/foo.js")));
  }

  #[test]
  fn directory_import_resolves_index() {
    let (_dir, resolver) = fixture();
    let importer = resolver.cwd().join("src/main.js");
    let ret = resolver.resolve(Some(&importer), "./utils").expect("resolved");
    assert!(ret.path.ends_with(Path::new("src/utils/index.js")));
  }

  #[test]
  fn query_survives_resolution() {
    let (_dir, resolver) = fixture();
    let ret = resolver.resolve(None, "@/main?raw").expect("resolved");
    assert!(ret.id.ends_with("main.js?raw"), "got {}", ret.id);
    assert!(ret.path.ends_with(Path::new("src/main.js")));
  }

  #[test]
  fn escaping_the_roots_is_denied_even_for_missing_files() {
    let (_dir, resolver) = fixture();
    let importer = resolver.cwd().join("src/main.js");
    let err = resolver.resolve(Some(&importer), "../../../no/such/file").unwrap_err();
    assert!(matches!(err, ResolveError::AccessDenied { .. }), "got {err:?}");
  }

  #[test]
  fn parent_allowance_admits_paths_above_the_root() {
    let dir = tempfile::tempdir().expect("tempdir");
    let workspace = dir.path().join("workspace");
    let root = workspace.join("app");
    std::fs::create_dir_all(root.join("src")).unwrap();
    std::fs::create_dir_all(workspace.join("shared")).unwrap();
    std::fs::write(workspace.join("shared/util.js"), "export {}\n").unwrap();
    std::fs::write(root.join("src/main.js"), "").unwrap();

    let resolver =
      Resolver::new(root.clone(), vec![], vec![PathBuf::from("..")], OsFileSystem);

    let importer = root.join("src/main.js");
    let ret = resolver.resolve(Some(&importer), "../../shared/util.js").expect("resolved");
    assert!(ret.path.ends_with(Path::new("shared/util.js")));
  }

  #[test]
  fn bare_specifiers_go_through_the_package_resolver() {
    #[derive(Debug)]
    struct Pinned(PathBuf);

    impl crate::PackageResolver for Pinned {
      fn resolve_bare(&self, specifier: &str, _importer_dir: &Path) -> Result<PathBuf, ResolveError> {
        if specifier == "vue" {
          Ok(self.0.clone())
        } else {
          Err(ResolveError::Package {
            specifier: specifier.to_string(),
            reason: "not pinned".to_string(),
          })
        }
      }
    }

    let (_dir, resolver) = fixture();
    let pinned = resolver.cwd().join("src/utils/foo.js");
    let resolver = resolver.with_package_resolver(Box::new(Pinned(pinned)));

    let importer = resolver.cwd().join("src/main.js");
    let ret = resolver.resolve(Some(&importer), "vue").expect("resolved");
    assert!(ret.path.ends_with(Path::new("src/utils/foo.js")));

    let err = resolver.resolve(Some(&importer), "axios").unwrap_err();
    assert!(matches!(err, ResolveError::Package { .. }), "got {err:?}");
  }

  #[test]
  fn missing_relative_file_is_not_found() {
    let (_dir, resolver) = fixture();
    let importer = resolver.cwd().join("src/main.js");
    let err = resolver.resolve(Some(&importer), "./nope").unwrap_err();
    assert!(matches!(err, ResolveError::NotFound { .. }), "got {err:?}");
  }
}
