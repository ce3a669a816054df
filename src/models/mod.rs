pub mod document;
pub mod loaders;

pub use document::{
    sanitize_segment, ClassificationResult, CompleteClassification, InputDocument,
    ProcessingOutcome, TargetLocation,
};
pub use loaders::discover_documents;
