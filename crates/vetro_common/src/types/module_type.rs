#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleType {
  Js,
  Jsx,
  Ts,
  Tsx,
  Json,
  Css,
  Text,
  Asset,
}

impl ModuleType {
  /// Whether the import scanner should look for ES import specifiers.
  pub fn is_scannable(&self) -> bool {
    matches!(self, Self::Js | Self::Jsx | Self::Ts | Self::Tsx)
  }

  pub fn from_known_extension(ext: &str) -> Option<Self> {
    match ext {
      "js" | "mjs" | "cjs" => Some(Self::Js),
      "jsx" => Some(Self::Jsx),
      "ts" | "mts" | "cts" => Some(Self::Ts),
      "tsx" => Some(Self::Tsx),
      "json" => Some(Self::Json),
      "css" => Some(Self::Css),
      "txt" => Some(Self::Text),
      _ => None,
    }
  }
}
