/// Output filename patterns like `[name].js` or `[name]-[hash].js`.
#[derive(Debug, Clone, Copy)]
pub struct FilenameTemplate<'a> {
  template: &'a str,
}

impl<'a> FilenameTemplate<'a> {
  pub fn new(template: &'a str) -> Self {
    Self { template }
  }

  pub fn has_hash_pattern(&self) -> bool {
    self.template.contains("[hash]")
  }

  pub fn render(&self, name: &str, hash: Option<&str>) -> String {
    let mut rendered = self.template.replace("[name]", name);
    if let Some(hash) = hash {
      rendered = rendered.replace("[hash]", hash);
    }
    rendered
  }
}

#[cfg(test)]
mod tests {
  use super::FilenameTemplate;

  #[test]
  fn render_placeholders() {
    let template = FilenameTemplate::new("[name]-[hash].js");
    assert!(template.has_hash_pattern());
    assert_eq!(template.render("vendor", Some("abcd1234")), "vendor-abcd1234.js");

    let template = FilenameTemplate::new("[name].js");
    assert!(!template.has_hash_pattern());
    assert_eq!(template.render("main", None), "main.js");
  }
}
