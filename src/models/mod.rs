pub mod common;
pub mod deliveries;
pub mod notifications;

pub use common::{ApiResponse, ErrorCode};
