//! LLM 服务 - 业务能力层
//!
//! 只负责“读文件 → 给出原始回答”的能力，不关心解析和归档
//!
//! ## 技术栈
//! - 文件上传走 `reqwest` multipart（`file-extract` 这类 purpose 不在 `async-openai` 的枚举里）
//! - 对话补全使用 `async-openai`，兼容 OpenAI API 的服务（如 DashScope 的 qwen-long）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ClassifyError;
use crate::utils::logging::truncate_text;

/// 固定的提取指令
pub const EXTRACTION_PROMPT: &str = r#"
请根据pdf的文本内容，提取出：
1. 工程名称（如果是会议，请提取会议名称）
2. 文件类型（如xx合同书）

返回格式如下，请勿返回其他内容：
工程名称：xxx工程
文件类型：xxx
"#;

/// 文档推理能力
///
/// 给定文件路径，返回模型的原始文本回答。失败时不重试，由调用方决定如何处理。
#[async_trait]
pub trait DocumentInference: Send + Sync {
    async fn infer(&self, path: &Path) -> Result<String, ClassifyError>;
}

/// 上传接口的返回体，只关心文件 ID
#[derive(Debug, Deserialize)]
struct UploadedFile {
    id: String,
}

/// LLM 服务
///
/// 职责：
/// - 上传文件，拿到远端文件 ID
/// - 以 `fileid://<id>` 作为系统消息发起一次补全
/// - 只处理单个文件，不做重试
pub struct LlmService {
    client: Client<OpenAIConfig>,
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
    model_name: String,
    upload_purpose: String,
}

impl LlmService {
    /// 创建新的 LLM 服务（整个批次复用同一个实例）
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            http: reqwest::Client::new(),
            api_key: config.llm_api_key.clone(),
            api_base_url: config.llm_api_base_url.trim_end_matches('/').to_string(),
            model_name: config.llm_model_name.clone(),
            upload_purpose: config.upload_purpose.clone(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 上传文件，返回远端文件 ID
    pub async fn upload_file(&self, path: &Path) -> Result<String, ClassifyError> {
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        debug!("上传文件: {} (purpose: {})", file_name, self.upload_purpose);

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ClassifyError::upload(&file_name, e))?;

        let form = multipart::Form::new()
            .text("purpose", self.upload_purpose.clone())
            .part("file", multipart::Part::bytes(bytes).file_name(file_name.clone()));

        let response = self
            .http
            .post(format!("{}/files", self.api_base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!("文件上传失败: {}", e);
                ClassifyError::upload(&file_name, e)
            })?;

        let uploaded: UploadedFile = response
            .json()
            .await
            .map_err(|e| ClassifyError::upload(&file_name, format!("无法解析上传结果: {}", e)))?;

        debug!("文件上传成功: {} → {}", file_name, uploaded.id);

        Ok(uploaded.id)
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（去首尾空白）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String, ClassifyError> {
        debug!("调用 LLM API，模型: {}", self.model_name);

        let build_failed = |e: async_openai::error::OpenAIError| {
            ClassifyError::inference(&self.model_name, format!("请求构建失败: {}", e))
        };

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(build_failed)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(build_failed)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .build()
            .map_err(build_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            ClassifyError::inference(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ClassifyError::inference(&self.model_name, "LLM 返回内容为空"))?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl DocumentInference for LlmService {
    async fn infer(&self, path: &Path) -> Result<String, ClassifyError> {
        let file_id = self.upload_file(path).await?;
        let system_message = format!("fileid://{}", file_id);

        let response = self
            .send_to_llm(EXTRACTION_PROMPT, Some(&system_message))
            .await?;

        debug!("模型原始回答: {}", truncate_text(&response, 120));

        Ok(response)
    }
}
