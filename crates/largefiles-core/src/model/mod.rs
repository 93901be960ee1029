/// Data model — discovered file records and size formatting helpers.
pub mod file_record;
pub mod size;

pub use file_record::FileRecord;
