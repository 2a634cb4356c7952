//! Email backend implementations
//!
//! - **SMTP**: Send emails via SMTP server (production)
//! - **Console**: Print emails to console (development)

pub mod console;
pub mod smtp;
