use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use crate::error::ClassifyError;
use crate::services::llm_service::DocumentInference;

/// 按文件名返回预设回答的推理实现，不访问网络
///
/// 未登记的文件视为模型调用失败。
#[derive(Default)]
pub struct ScriptedInference {
    responses: HashMap<String, Option<String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedInference {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记某个文件的模型回答
    pub fn respond(mut self, file_name: impl Into<String>, text: impl Into<String>) -> Self {
        self.responses.insert(file_name.into(), Some(text.into()));
        self
    }

    /// 登记某个文件上传失败
    pub fn fail_upload(mut self, file_name: impl Into<String>) -> Self {
        self.responses.insert(file_name.into(), None);
        self
    }

    /// 已经被调用过的文件名，按调用顺序
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl DocumentInference for ScriptedInference {
    async fn infer(&self, path: &Path) -> Result<String, ClassifyError> {
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(file_name.clone());
        }

        match self.responses.get(&file_name) {
            Some(Some(text)) => Ok(text.clone()),
            Some(None) => Err(ClassifyError::upload(file_name, "scripted upload failure")),
            None => Err(ClassifyError::inference("scripted", "no scripted response")),
        }
    }
}
