mod record_type;
mod resource;

pub use record_type::{RecordClass, RecordType};
pub use resource::ResourceRecord;
