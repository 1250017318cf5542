//! patterngen - declarative, pattern-driven source code generation
//!
//! A language definition describes construct templates (function, class,
//! method, ...) and named patterns that modify them. A construct request picks
//! a kind, supplies field values and lists patterns; the engine composes the
//! patterns, renders the template and returns the assembled text.
//!
//! ```
//! use patterngen::{ConstructRequest, GenerationOrchestrator};
//!
//! let request = ConstructRequest::new("function", "fetch")
//!     .with_params("url: str")
//!     .with_return_type("str")
//!     .with_docstring("Fetch a URL.")
//!     .with_body("return url")
//!     .with_pattern("async_function");
//!
//! let output = GenerationOrchestrator::default()
//!     .generate("python", &request)
//!     .unwrap();
//! assert!(output.text.starts_with("import asyncio\n\nasync def fetch"));
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod definitions;
pub mod error;
pub mod generation;

pub use config::Config;
pub use definitions::{LanguageDefinition, PatternRegistry};
pub use error::{GenerationError, Result};
pub use generation::{ConstructRequest, GenerationOrchestrator, MethodRequest, RenderedOutput};
