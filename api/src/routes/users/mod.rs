//! User query route handlers

pub mod is_admin;

pub use is_admin::is_admin;
