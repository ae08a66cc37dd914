//! # gatekeep-ingest
//!
//! The validated boundary between the backend's identity payload and the
//! GATEKEEP core.
//!
//! This crate provides [`engine::IdentityValidator`], which implements the
//! [`gatekeep_core::traits::PayloadParser`] trait. Raw JSON is checked in two
//! phases before a `PermissionSnapshot` is built:
//!
//! 1. **Structural**: JSON Schema validation via the `jsonschema` crate.
//! 2. **Semantic**: value rules (no empty codes or names) plus any custom
//!    checks registered by the host application.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use gatekeep_ingest::engine::IdentityValidator;
//!
//! let validator = IdentityValidator::new()?;
//! let snapshot = validator.parse(&raw_json)?;
//! ```

pub mod engine;

pub use engine::{IdentityValidator, IDENTITY_SCHEMA};
