mod file_store;
mod filename_hasher;
mod memory_store;
mod path_validator;
mod question_record;

pub use file_store::{DiskStore, FileListing, FileStore, WalkFailure};
pub use filename_hasher::{
    FilenameHasher, HASH_PREFIX_LEN, Normalized, canonical_extension, hash_base_name,
    is_normalized_base, normalize, split_leaf,
};
pub use memory_store::MemoryStore;
pub use path_validator::validate_directory_exists;
pub use question_record::{MEDIA_FIELD, QuestionRecord, parse_records, serialize_records};
