//! Concurrent URL latency prober.
//!
//! One probe task runs per configured URL; a single collector stores the
//! results and drives a renderer that either rewrites each target's
//! terminal row in place or prints an ordered report at the end.
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod http_probe;
pub mod logger;
pub mod render;
