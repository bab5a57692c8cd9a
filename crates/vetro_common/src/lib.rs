mod bundler_options;
mod chunk;
mod module;
mod module_loader;
mod types;

pub use bundler_options::{
  alias_item::AliasItem, filename_template::FilenameTemplate, input_item::InputItem,
  normalized_bundler_options::NormalizedBundlerOptions, server_options::ServerOptions,
  BundlerOptions,
};

pub use crate::{
  chunk::Chunk,
  module::{external_module::ExternalModule, normal_module::NormalModule, Module},
  module_loader::{task_result::ModuleTaskResult, ModuleLoaderMsg},
  types::{
    chunk_kind::ChunkKind,
    entry_point::{EntryPoint, EntryPointKind},
    import_kind::ImportKind,
    import_record::{ImportRecord, RawImportRecord, ResolvedImportRecord},
    module_id::ModuleId,
    module_table::{IndexModules, ModuleTable},
    module_type::ModuleType,
    output_asset::{OutputAsset, OutputAssetKind},
    raw_idx::{AssetIdx, ChunkIdx, ImportRecordIdx, ModuleIdx},
    resolved_id::ResolvedId,
    source::Source,
    source_joiner::SourceJoiner,
    str_or_bytes::StrOrBytes,
  },
};
