//! Harvest pipeline orchestration for unitdex.
//!
//! Ties together crawling, title extraction, and table parsing into the
//! end-to-end [`pipeline::harvest`] workflow and the fixed-root
//! [`pipeline::load`] entry point.

pub mod pipeline;

pub use pipeline::{
    ProgressReporter, ROOT_DOCUMENT, SilentProgress, harvest, load,
};
