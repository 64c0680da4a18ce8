pub mod enforcement;
pub mod table;
pub mod types;

pub use enforcement::{evaluate_can_sign, evaluate_status, is_fully_signed};
pub use table::requirements;
pub use types::*;
