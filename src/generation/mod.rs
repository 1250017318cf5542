//! Generation pipeline: request validation, pattern composition, template
//! rendering, import deduplication and output assembly.

pub mod assembler;
pub mod compositor;
pub mod context;
pub mod imports;
pub mod orchestrator;
pub mod renderer;
pub mod request;
pub mod template;
pub mod types;
pub mod utils;

pub use assembler::assemble;
pub use compositor::{CompositeEffect, compose};
pub use context::RenderContext;
pub use imports::ImportSet;
pub use orchestrator::{GenerationOrchestrator, generate_from_definition};
pub use renderer::{placeholders, render};
pub use request::{ConstructRequest, MethodRequest, RESERVED_FIELDS};
pub use template::CaseFilter;
pub use types::RenderedOutput;
