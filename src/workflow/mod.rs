pub mod classify_flow;
pub mod document_ctx;

pub use classify_flow::ClassifyFlow;
pub use document_ctx::DocumentCtx;
