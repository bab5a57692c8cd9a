use arcstr::ArcStr;
use oxc_index::IndexVec;

use crate::{ImportRecordIdx, ModuleId, ModuleIdx, ModuleType, RawImportRecord,
  ResolvedImportRecord};

#[derive(Debug)]
pub struct NormalModule {
  pub idx: ModuleIdx,
  pub exec_order: u32,
  pub is_user_defined_entry: bool,
  pub id: ModuleId,
  /// Calculated from `id` to be stable across machine and os.
  pub stable_id: String,
  /// Short display name used when naming shared chunks.
  pub repr_name: String,
  pub module_type: ModuleType,
  /// Content after the plugin transform pipeline ran over the raw source.
  pub source: ArcStr,
  /// Specifiers exactly as written, in source order.
  pub raw_import_records: IndexVec<ImportRecordIdx, RawImportRecord>,
  /// Same order as `raw_import_records`, pointing into the module table.
  pub import_records: IndexVec<ImportRecordIdx, ResolvedImportRecord>,
}
