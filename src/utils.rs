mod align_or_copy;
pub use align_or_copy::align_or_copy;

mod append_suffix;
pub use append_suffix::append_suffix;

mod format_bytes;
pub use format_bytes::format_bytes;

mod link_or_copy;
pub use link_or_copy::{PassThrough, link_or_copy};

mod verify_file_existence;
pub use verify_file_existence::{verify_file_absence, verify_file_existence};
