//! 错误类型
//!
//! 单个文件的处理失败统一用 [`ClassifyError`] 表示，由批处理层转换为
//! “跳过并报告”，不会中断整个批次。配置相关错误用 [`ConfigError`] 表示，
//! 扫描输入目录失败用 [`BatchError`] 表示。

use std::path::PathBuf;
use thiserror::Error;

/// 单个文件分类/归档失败
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// 上传文件到远端服务失败
    #[error("文件上传失败 ({file}): {message}")]
    UploadFailure { file: String, message: String },

    /// 调用模型失败或返回内容不可用
    #[error("模型调用失败 (模型: {model}): {message}")]
    InferenceFailure { model: String, message: String },

    /// 模型返回的内容缺少工程名称或文件类型
    #[error("分类信息不完整: 工程名称={project_name:?}, 文件类型={file_type:?}")]
    IncompleteLabel {
        project_name: Option<String>,
        file_type: Option<String>,
    },

    /// 创建目录、复制或删除文件失败
    #[error("文件操作失败 ({}): {source}", path.display())]
    FilesystemFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClassifyError {
    pub fn upload(file: impl Into<String>, message: impl ToString) -> Self {
        ClassifyError::UploadFailure {
            file: file.into(),
            message: message.to_string(),
        }
    }

    pub fn inference(model: impl Into<String>, message: impl ToString) -> Self {
        ClassifyError::InferenceFailure {
            model: model.into(),
            message: message.to_string(),
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ClassifyError::FilesystemFailure {
            path: path.into(),
            source,
        }
    }

    /// 简短的错误类别，用于统计日志
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifyError::UploadFailure { .. } => "上传失败",
            ClassifyError::InferenceFailure { .. } => "模型调用失败",
            ClassifyError::IncompleteLabel { .. } => "分类信息不完整",
            ClassifyError::FilesystemFailure { .. } => "文件操作失败",
        }
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("无法读取配置文件 {path}: {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败 {path}: {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("缺少必填配置项: {field}")]
    MissingValue { field: String },
}

/// 批次级错误：在处理任何文件之前就无法继续
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("输入目录不存在: {}", path.display())]
    InputDirNotFound { path: PathBuf },

    #[error("无法读取输入目录 {}: {source}", path.display())]
    DiscoveryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, ClassifyError>;
