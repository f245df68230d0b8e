/// Filesystem layout helpers for the notes database.
pub mod fs;
