//! 文件分类流程 - 流程层
//!
//! 核心职责：定义“一个文件”的分类流程
//!
//! 流程顺序：
//! 1. 上传 + 模型回答（DocumentInference）
//! 2. 解析标签（parse_labels）
//! 3. 完整性检查
//!
//! 这里不碰文件系统，归档由编排层负责。

use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ClassifyError;
use crate::models::{CompleteClassification, InputDocument};
use crate::services::{parse_labels, DocumentInference};
use crate::workflow::document_ctx::DocumentCtx;

/// 文件分类流程
pub struct ClassifyFlow {
    inference: Arc<dyn DocumentInference>,
}

impl ClassifyFlow {
    pub fn new(inference: Arc<dyn DocumentInference>) -> Self {
        Self { inference }
    }

    /// 对单个文件做一次分类，失败不重试
    pub async fn run(
        &self,
        document: &InputDocument,
        ctx: &DocumentCtx,
    ) -> Result<CompleteClassification, ClassifyError> {
        info!("{} 🤖 正在请求模型分类...", ctx);

        let response = self.inference.infer(&document.path).await.map_err(|e| {
            warn!("{} ⚠️ {}", ctx, e);
            e
        })?;

        let labels = parse_labels(&response);

        let classification = labels.into_complete().map_err(|e| {
            warn!("{} ⚠️ {}", ctx, e);
            e
        })?;

        info!("{} ✓ 分类结果: {}", ctx, classification);

        Ok(classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock_inference::ScriptedInference;
    use std::path::PathBuf;

    fn document(name: &str) -> (InputDocument, DocumentCtx) {
        (
            InputDocument::new(PathBuf::from("input").join(name)),
            DocumentCtx::new(1, 1, name),
        )
    }

    #[tokio::test]
    async fn complete_response_yields_classification() {
        let inference = ScriptedInference::new().respond("a.pdf", "工程名称：滨江大桥工程\n文件类型：施工合同书");
        let flow = ClassifyFlow::new(Arc::new(inference));
        let (doc, ctx) = document("a.pdf");

        let result = flow.run(&doc, &ctx).await;

        let classification = tokio_test::assert_ok!(result);
        assert_eq!(classification, CompleteClassification::new("滨江大桥工程", "施工合同书"));
    }

    #[tokio::test]
    async fn adapter_failure_is_passed_through() {
        let flow = ClassifyFlow::new(Arc::new(ScriptedInference::new().fail_upload("a.pdf")));
        let (doc, ctx) = document("a.pdf");

        let err = tokio_test::assert_err!(flow.run(&doc, &ctx).await);
        assert!(matches!(err, ClassifyError::UploadFailure { .. }));
    }

    #[tokio::test]
    async fn missing_field_is_incomplete_label() {
        let inference = ScriptedInference::new().respond("a.pdf", "工程名称：滨江大桥工程");
        let flow = ClassifyFlow::new(Arc::new(inference));
        let (doc, ctx) = document("a.pdf");

        let err = flow.run(&doc, &ctx).await.unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::IncompleteLabel { project_name: Some(_), file_type: None }
        ));
    }
}
