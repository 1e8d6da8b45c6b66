//! # tion-domain
//!
//! Pure domain model for the Tion configuration compiler.
//!
//! ## Responsibilities
//! - Foundational types: identifiers, durations, icons, enumerated choices
//! - Define **Presets** (named operating profiles: mode, fan speed, temperature)
//! - Define **Entity descriptors** (switches, sensors, numbers, selects attached to a breezer)
//! - Define the **validated configuration** every compilation stage consumes
//! - Define the error types reported by validation and assembly
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! Collaborators (transports, protocol APIs, host registries) are expressed
//! as traits in the `app` crate (ports).

pub mod choice;
pub mod error;
pub mod id;
pub mod time;

pub mod config;
pub mod entity;
pub mod icon;
pub mod platform;
pub mod preset;
