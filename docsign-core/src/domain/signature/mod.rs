pub mod payload;
pub mod set;
pub mod status;

pub use payload::{signature_storage_key, ImageFormat, SignatureImage};
pub use set::{SignatureEntry, SignatureSet, SignatureSnapshot};
pub use status::{SignatureStatus, COMPLETE_MESSAGE, LOADING_MESSAGE, YOUR_TURN_MESSAGE};
