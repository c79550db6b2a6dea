//! Core library for the atlas-tools command line application.
//!
//! The library turns a set of related source tables (categories, continents,
//! countries, points and the organization-scoped metrics, progress and
//! comparison tables) into the validated data configuration consumed by the
//! map front end. Source readers and the artifact writer live under
//! [`atlas::tools::io`], entity types inside [`atlas::tools::model`], the
//! validation and merge stages in [`atlas::tools::parse`],
//! [`atlas::tools::links`], [`atlas::tools::merge`] and
//! [`atlas::tools::completeness`], and the orchestration under
//! [`atlas::tools::pipeline`] and [`atlas::tools::convert`].

pub mod atlas;

pub use atlas::tools::{
    Result, ToolError, ValidationErrors, assemble, completeness, convert, error, io, links,
    merge, model, normalize, parse, pipeline,
};
