//! Pipeline module.
//!
//! This module wires detection, coercion, column profiling and quality
//! summarizing into a single profiling run.

mod builder;

pub use builder::{ProfilingPipeline, ProfilingPipelineBuilder};
