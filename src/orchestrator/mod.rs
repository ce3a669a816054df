//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! app::App (前端，后台启动批次)
//!     ↓
//! batch_processor (处理 Vec<InputDocument>，负责归档)
//!     ↓
//! workflow::ClassifyFlow (处理单个文件的分类)
//!     ↓
//! services (能力层：推理 / 解析 / 归档 / 进度)
//! ```
//!
//! 编排层只做调度、归档和统计，不关心模型怎么调用。

pub mod batch_processor;

pub use batch_processor::{BatchOrganizer, BatchSummary, DocumentReport};
