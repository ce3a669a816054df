pub mod file_relocator;
pub mod label_parser;
pub mod llm_service;
pub mod mock_inference;
pub mod progress;

pub use file_relocator::relocate;
pub use label_parser::parse_labels;
pub use llm_service::{DocumentInference, LlmService, EXTRACTION_PROMPT};
pub use mock_inference::ScriptedInference;
pub use progress::{
    ChannelReporter, MultiReporter, ProgressEvent, ProgressReporter, RecordingReporter,
    StatusLogWriter,
};
