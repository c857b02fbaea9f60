pub mod error;

pub use error::{error_status, handle_domain_error, json_error_handler};
