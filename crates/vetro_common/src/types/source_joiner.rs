use super::source::Source;

/// Concatenates module sources into a chunk body with a newline between each
/// part, sized up front.
#[derive(Default)]
pub struct SourceJoiner<'source> {
  inner: Vec<Box<dyn Source + Send + 'source>>,
}

impl<'source> SourceJoiner<'source> {
  pub fn append_source<T: Source + Send + 'source>(&mut self, source: T) {
    self.inner.push(Box::new(source));
  }

  pub fn join(&self) -> String {
    if self.inner.is_empty() {
      return String::new();
    }

    let size_hint =
      self.inner.iter().map(|source| source.content().len()).sum::<usize>() + self.inner.len() - 1;
    let mut ret_source = String::with_capacity(size_hint);

    for (index, source) in self.inner.iter().enumerate() {
      ret_source.push_str(source.content());
      if index < self.inner.len() - 1 {
        ret_source.push('\n');
      }
    }

    ret_source
  }
}

#[cfg(test)]
mod tests {
  use super::SourceJoiner;

  #[test]
  fn joins_with_single_newline() {
    let mut joiner = SourceJoiner::default();
    joiner.append_source("const a = 1;");
    joiner.append_source("const b = 2;".to_string());
    assert_eq!(joiner.join(), "const a = 1;\nconst b = 2;");
  }

  #[test]
  fn empty_join_is_empty() {
    let joiner = SourceJoiner::default();
    assert_eq!(joiner.join(), "");
  }
}
