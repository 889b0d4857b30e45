//! Growable big-endian writer and cursor-based reader for the DNS wire
//! format, including the length-prefixed label encoding for domain names.
mod reader;
mod writer;

pub use reader::WireReader;
pub use writer::WireWriter;
