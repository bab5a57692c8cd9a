pub mod bitset;
pub mod indexmap;
pub mod mime;
pub mod path_ext;
pub mod sanitize_file_name;
pub mod xxhash;
