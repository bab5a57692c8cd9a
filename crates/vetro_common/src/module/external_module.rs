use arcstr::ArcStr;
use oxc_index::IndexVec;

use crate::{ImportRecordIdx, ModuleIdx, ResolvedImportRecord};

/// A module left outside the bundle, e.g. an http or data url import.
#[derive(Debug)]
pub struct ExternalModule {
  pub idx: ModuleIdx,
  pub name: ArcStr,
  pub exec_order: u32,
  pub import_records: IndexVec<ImportRecordIdx, ResolvedImportRecord>,
}

impl ExternalModule {
  pub fn new(idx: ModuleIdx, name: ArcStr) -> Self {
    Self { idx, name, exec_order: u32::MAX, import_records: IndexVec::default() }
  }
}
