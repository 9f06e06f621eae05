//! Report generation module.
//!
//! A [`ProfileResult`](crate::ProfileResult) can be rendered as JSON for
//! stdout (`--json` CLI flag) or written to a file next to other outputs
//! (`--emit-report` CLI flag).
//!
//! # Example
//!
//! ```rust,ignore
//! use dq_profiler::reporting::ReportGenerator;
//!
//! let generator = ReportGenerator::new(PathBuf::from("output"));
//! let path = generator.write_report_to_file(&result, "orders")?;
//! // output/orders_profile.json
//! ```

mod generator;

pub use generator::ReportGenerator;
