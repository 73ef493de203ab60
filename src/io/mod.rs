pub mod file_io;

pub use file_io::{BACKUP_SUFFIX, FileError, from_file, to_file};
