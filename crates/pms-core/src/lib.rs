//! Core hotel PMS client library (session, storage, auth gateway, config).

pub mod auth;
pub mod config;
pub mod logging;
pub mod session;
pub mod storage;
