//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`Error`] covers the failure modes of shader program
//! generation:
//! - Missing shader templates or chunks
//! - Template syntax and rendering errors
//!
//! Shader patching by a material's pre-compile hook never fails on its own;
//! a missing injection point is logged and compilation continues.
//!
//! # Usage
//!
//! ```rust,ignore
//! use myth_two_sided::errors::Result;
//!
//! fn compile() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for shader program generation.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Template Errors
    // ========================================================================
    /// No embedded shader template or chunk exists under this name.
    #[error("Shader template not found: {0}")]
    TemplateNotFound(String),

    /// An embedded shader file is not valid UTF-8.
    #[error("Shader template is not valid UTF-8: {0}")]
    TemplateEncoding(String),

    /// Template syntax or rendering failure.
    #[error("Shader template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
