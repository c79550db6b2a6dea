pub mod assemble;
pub mod completeness;
pub mod convert;
pub mod error;
pub mod io;
pub mod links;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod parse;
pub mod pipeline;

pub use error::{Result, ToolError, ValidationErrors};
