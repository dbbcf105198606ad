//! Staged pipeline orchestration
//!
//! Both pipelines follow the shape of the scripts they replace: download,
//! extract, patch, process, register/export. Stages are individually
//! toggleable so a partially completed run can resume from disk, and
//! per-evaluation processing fans out over a rayon pool sized by the
//! configuration. Individual evaluation failures are collected rather than
//! aborting the fan-out; missing inputs abort immediately.

pub mod chain;
pub mod library;

pub use chain::ChainPipeline;
pub use library::LibraryPipeline;
