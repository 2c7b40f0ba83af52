//! CLI library components for the bloodwork engine.

#![allow(missing_docs)]

pub mod logging;
pub mod request;
pub mod summary;
