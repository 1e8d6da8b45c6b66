//! # tionc
//!
//! Composition root of the tion configuration compiler.
//!
//! ## Responsibilities
//! - Load the tool configuration (`tionc.toml` + env overrides)
//! - Bind every supported platform × transport pair to a concrete
//!   `VPort` / `ProtocolApi` instantiation of the pipeline
//! - Compile whole documents against a fresh in-memory host
//! - Shape the results into a serialisable report
//!
//! ## Dependency rule
//! This is the only crate that depends on every adapter.

pub mod config;
pub mod dispatch;
pub mod report;
