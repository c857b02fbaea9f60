//! HTTP binding for the SSO token lifecycle service

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;
