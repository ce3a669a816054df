//! 批量文件处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **扫描**：批次开始时对输入目录做一次快照，中途新增的文件不处理
//! 2. **逐个处理**：严格顺序执行，一个文件完整结束（上传 → 推理 → 解析 → 归档）后再处理下一个
//! 3. **归档**：分类成功才建目录、复制、删除源文件；失败时源文件保持不动
//! 4. **报告**：每个文件前后各报告一次状态，全部结束后发出完成通知并回到空闲状态
//!
//! 单个文件的任何失败都只影响它自己，不会中断批次，也不会回滚已经归档的文件。

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{BatchError, ClassifyError};
use crate::models::{discover_documents, InputDocument, ProcessingOutcome};
use crate::services::{relocate, DocumentInference, ProgressReporter};
use crate::utils::logging::{log_documents_loaded, print_final_stats};
use crate::workflow::{ClassifyFlow, DocumentCtx};

/// 空闲状态文本
pub const STATUS_IDLE: &str = "处理完成，等待下一次操作";
/// 完成通知标题
pub const COMPLETION_TITLE: &str = "完成";
/// 没有文件时的通知标题
pub const NOTICE_TITLE: &str = "提示";
/// 扫描失败时的通知标题
pub const ERROR_TITLE: &str = "错误";

/// 单个文件的处理记录
#[derive(Debug)]
pub struct DocumentReport {
    pub file_name: String,
    pub outcome: ProcessingOutcome,
}

/// 批次统计
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub reports: Vec<DocumentReport>,
}

impl BatchSummary {
    fn record(&mut self, file_name: String, outcome: ProcessingOutcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.reports.push(DocumentReport { file_name, outcome });
    }
}

/// 批量文件处理器
pub struct BatchOrganizer {
    flow: ClassifyFlow,
    input_dir: PathBuf,
    output_dir: PathBuf,
    extension: String,
    output_log_file: String,
}

impl BatchOrganizer {
    /// 创建处理器，推理能力由调用方注入（整个批次复用）
    pub fn new(config: &Config, inference: Arc<dyn DocumentInference>) -> Self {
        Self {
            flow: ClassifyFlow::new(inference),
            input_dir: config.input_dir.clone(),
            output_dir: config.output_dir.clone(),
            extension: config.extension().to_string(),
            output_log_file: config.output_log_file.clone(),
        }
    }

    /// 运行一个完整批次
    ///
    /// 只有扫描输入目录失败时返回错误；单个文件的失败记录在返回的统计里。
    pub async fn run(&self, reporter: &dyn ProgressReporter) -> Result<BatchSummary, BatchError> {
        info!("\n📁 正在扫描待处理的文件: {}", self.input_dir.display());

        let documents = match discover_documents(&self.input_dir, &self.extension).await {
            Ok(documents) => documents,
            Err(e) => {
                error!("❌ {}", e);
                reporter.notify(ERROR_TITLE, &e.to_string());
                return Err(e);
            }
        };

        if documents.is_empty() {
            info!("⚠️ 没有找到待处理的文件");
            reporter.notify(NOTICE_TITLE, &self.no_documents_message());
            return Ok(BatchSummary::default());
        }

        let total = documents.len();
        log_documents_loaded(total, &self.input_dir);

        let mut summary = BatchSummary {
            total,
            ..Default::default()
        };

        for (idx, document) in documents.iter().enumerate() {
            let ctx = DocumentCtx::new(idx + 1, total, &document.file_name);

            reporter.status(&format!("正在处理：{}", document.file_name));

            let outcome = self.process_document(document, &ctx).await;

            match &outcome {
                ProcessingOutcome::Success(target) => {
                    info!("{} ✅ 已归档到 {}", ctx, target.path.display());
                    reporter.status(&format!("✅ 成功处理：{}", document.file_name));
                }
                ProcessingOutcome::Failure(e) => {
                    error!("{} ❌ 处理失败（{}）: {}", ctx, e.kind(), e);
                    reporter.status(&format!("❌ 处理失败：{}", document.file_name));
                }
            }

            summary.record(document.file_name.clone(), outcome);
        }

        reporter.notify(COMPLETION_TITLE, &self.completion_message());
        reporter.status(STATUS_IDLE);

        print_final_stats(&summary, &self.output_log_file);

        Ok(summary)
    }

    /// 处理单个文件：分类 → 计算目标路径 → 归档
    async fn process_document(&self, document: &InputDocument, ctx: &DocumentCtx) -> ProcessingOutcome {
        match self.classify_and_relocate(document, ctx).await {
            Ok(outcome) => outcome,
            Err(e) => ProcessingOutcome::Failure(e),
        }
    }

    async fn classify_and_relocate(
        &self,
        document: &InputDocument,
        ctx: &DocumentCtx,
    ) -> Result<ProcessingOutcome, ClassifyError> {
        let classification = self.flow.run(document, ctx).await?;
        let target = classification.target_location(&self.output_dir, document);

        info!("{} 📦 正在归档到 {}", ctx, target.path.display());
        relocate(&document.path, &target).await?;

        Ok(ProcessingOutcome::Success(target))
    }

    fn no_documents_message(&self) -> String {
        format!("未找到任何 {} 文件", self.extension.to_uppercase())
    }

    fn completion_message(&self) -> String {
        format!("所有 {} 已分类完毕！", self.extension.to_uppercase())
    }
}
