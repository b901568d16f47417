//! Page analysis: signal aggregation, technology detection, and the
//! acquire → navigate → extract → aggregate pipeline.

pub mod aggregate;
pub mod pipeline;
pub mod signatures;
pub mod types;

pub use {
    aggregate::aggregate,
    pipeline::Analyzer,
    signatures::{SIGNATURES, TechnologySignature, probe_globals},
    types::{AnalysisLimits, AnalysisResult, ColorEntry},
};
