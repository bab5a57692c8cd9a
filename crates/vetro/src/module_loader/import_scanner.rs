use std::sync::LazyLock;

use regex::Regex;

use vetro_common::{ImportKind, RawImportRecord};

// `import d from './x'`, `import { a } from './x'`, `import './x'`,
// `export * from './x'`, `export { a } from './x'`.
static STATIC_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?m)^[ \t]*(?:import|export)\s+(?:[\w*\s{},$]+from\s+)?["']([^"'\n]+)["']"#)
    .expect("valid static import pattern")
});

// `import('./x')`
static DYNAMIC_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"import\s*\(\s*["']([^"'\n]+)["']\s*\)"#).expect("valid dynamic import pattern")
});

/// Pulls raw dependency specifiers out of a module source, in source order.
///
/// This is a lightweight scanner standing in for a real parser: it recognizes
/// the ES import/export statement forms and dynamic `import()` calls.
pub fn scan_imports(source: &str) -> Vec<RawImportRecord> {
  let mut found: Vec<(usize, RawImportRecord)> = Vec::new();

  for captures in STATIC_IMPORT_RE.captures_iter(source) {
    let matched = captures.get(1).expect("specifier group");
    found.push((
      matched.start(),
      RawImportRecord::new(matched.as_str().into(), ImportKind::Import),
    ));
  }

  for captures in DYNAMIC_IMPORT_RE.captures_iter(source) {
    let matched = captures.get(1).expect("specifier group");
    found.push((
      matched.start(),
      RawImportRecord::new(matched.as_str().into(), ImportKind::DynamicImport),
    ));
  }

  found.sort_by_key(|(start, _)| *start);
  found.into_iter().map(|(_, record)| record).collect()
}
