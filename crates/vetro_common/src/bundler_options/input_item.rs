use std::borrow::Cow;

use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(from = "InputItemRepr")]
pub struct InputItem {
  pub name: Option<String>,
  pub import: String,
}

/// Accepts either a bare specifier string or `{ name, import }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum InputItemRepr {
  Import(String),
  Full { name: Option<String>, import: String },
}

impl From<InputItemRepr> for InputItem {
  fn from(repr: InputItemRepr) -> Self {
    match repr {
      InputItemRepr::Import(import) => Self { name: None, import },
      InputItemRepr::Full { name, import } => Self { name, import },
    }
  }
}

impl From<&str> for InputItem {
  fn from(value: &str) -> Self {
    Self { name: None, import: value.to_string() }
  }
}

impl From<String> for InputItem {
  fn from(value: String) -> Self {
    Self { name: None, import: value }
  }
}

impl From<Cow<'_, str>> for InputItem {
  fn from(value: Cow<'_, str>) -> Self {
    Self { name: None, import: value.to_string() }
  }
}
