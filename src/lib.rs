//! Startup configuration and data-source registry validation.
//!
//! Build an [`env::Env`], hand it to [`config::load`], and either get back an
//! immutable [`config::SystemConfiguration`] or an error listing everything
//! that needs fixing. The binary entry point is src/main.rs.

pub mod config;
pub mod env;
pub mod error;
pub mod logger;
