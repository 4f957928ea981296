#![doc = "m2-mirror-core: core logic library for m2-mirror."]

//! This crate contains the scanning, coordinate resolution and mirroring
//! pipeline for m2-mirror. HTTP transport is not included here; the CLI
//! crate plugs a real client into the [`contract::Uploader`] seam.
//!
//! # Usage
//! Add this as a dependency for all shared scan, filter and sync code.

pub mod config;
pub mod contract;
pub mod coords;
pub mod scan;
pub mod synchronise;
