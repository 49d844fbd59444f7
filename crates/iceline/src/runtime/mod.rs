//! Runtime module — boot sequence and the CLI read loop.

pub mod boot;
pub mod run;
