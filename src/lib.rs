//! # PDF Sorter
//!
//! 调用远端大模型识别 PDF 的“工程名称”和“文件类型”，并按
//! `<输出目录>/<工程名称>/<文件类型>.pdf` 重新归档
//!
//! ## 架构设计
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个文件
//! - `LlmService` - 上传文件 + 模型回答（`DocumentInference` 的实现）
//! - `parse_labels` - 从模型回答中解析标签
//! - `relocate` - 建目录、复制、删除源文件
//! - `ProgressReporter` - 向前端报告状态
//!
//! ### ② 流程层（Workflow）
//! - `workflow/` - 定义"一个文件"的分类流程
//! - `DocumentCtx` - 上下文封装（序号 + 文件名）
//! - `ClassifyFlow` - 流程编排（推理 → 解析 → 完整性检查）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量处理器，顺序处理、归档并统计
//!
//! ### ④ 前端（App）
//! - `app` - 控制台交互，后台启动批次，通过 channel 接收状态

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppResult, BatchError, ClassifyError, ConfigError};
pub use models::{ClassificationResult, CompleteClassification, InputDocument, ProcessingOutcome};
pub use orchestrator::{BatchOrganizer, BatchSummary};
pub use services::{parse_labels, DocumentInference, LlmService, ProgressReporter};
pub use workflow::{ClassifyFlow, DocumentCtx};
