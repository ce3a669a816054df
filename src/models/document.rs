use crate::error::ClassifyError;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// 输入目录中的一个待处理文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDocument {
    pub path: PathBuf,
    pub file_name: String,
}

impl InputDocument {
    pub fn new(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Self { path, file_name }
    }

    /// 原始扩展名（不含点）
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|s| s.to_str())
    }
}

/// 从模型输出中解析出的标签，两个字段各自可能缺失
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    pub project_name: Option<String>,
    pub file_type: Option<String>,
}

impl ClassificationResult {
    pub fn is_complete(&self) -> bool {
        self.project_name.is_some() && self.file_type.is_some()
    }

    /// 转换为完整的分类结果，任一字段缺失时返回 `IncompleteLabel`
    pub fn into_complete(self) -> Result<CompleteClassification, ClassifyError> {
        match (self.project_name, self.file_type) {
            (Some(project_name), Some(file_type)) => Ok(CompleteClassification {
                project_name,
                file_type,
            }),
            (project_name, file_type) => Err(ClassifyError::IncompleteLabel {
                project_name,
                file_type,
            }),
        }
    }
}

/// 工程名称与文件类型都存在的分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteClassification {
    pub project_name: String,
    pub file_type: String,
}

impl CompleteClassification {
    pub fn new(project_name: impl Into<String>, file_type: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            file_type: file_type.into(),
        }
    }

    /// 计算目标路径：`<output_root>/<工程名称>/<文件类型>.<原扩展名>`
    ///
    /// 同名目标不做去重，后处理的文件会覆盖先前的文件。
    pub fn target_location(&self, output_root: &Path, document: &InputDocument) -> TargetLocation {
        let folder = output_root.join(sanitize_segment(&self.project_name));
        let stem = sanitize_segment(&self.file_type);
        let file_name = match document.extension() {
            Some(ext) => format!("{}.{}", stem, ext),
            None => stem,
        };
        TargetLocation {
            path: folder.join(file_name),
            folder,
        }
    }
}

impl fmt::Display for CompleteClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[工程名称#{} 文件类型#{}]", self.project_name, self.file_type)
    }
}

/// 归档目标位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLocation {
    /// 工程目录
    pub folder: PathBuf,
    /// 最终文件路径
    pub path: PathBuf,
}

/// 单个文件的处理结果
#[derive(Debug)]
pub enum ProcessingOutcome {
    Success(TargetLocation),
    Failure(ClassifyError),
}

impl ProcessingOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessingOutcome::Success(_))
    }
}

/// 把标签变成可以安全用作单个路径片段的名字
///
/// 替换路径分隔符和 Windows 保留字符，去掉首尾空白和点，
/// 避免 `..` 之类的值跳出输出目录。
pub fn sanitize_segment(raw: &str) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let re = UNSAFE.get_or_init(|| {
        Regex::new(r#"[\\/:*?"<>|\x00-\x1f]"#).expect("segment pattern is valid")
    });

    let replaced = re.replace_all(raw.trim(), "_");
    let cleaned = replaced.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_location_uses_labels_and_original_extension() {
        let doc = InputDocument::new(PathBuf::from("input/a.pdf"));
        let labels = CompleteClassification::new("滨江大桥工程", "施工合同书");

        let target = labels.target_location(Path::new("output"), &doc);

        assert_eq!(target.folder, PathBuf::from("output/滨江大桥工程"));
        assert_eq!(target.path, PathBuf::from("output/滨江大桥工程/施工合同书.pdf"));
    }

    #[test]
    fn target_location_without_extension() {
        let doc = InputDocument::new(PathBuf::from("input/README"));
        let labels = CompleteClassification::new("工程A", "说明");
        let target = labels.target_location(Path::new("out"), &doc);
        assert_eq!(target.path, PathBuf::from("out/工程A/说明"));
    }

    #[test]
    fn sanitize_replaces_separators_and_dots() {
        assert_eq!(sanitize_segment("一期/二期工程"), "一期_二期工程");
        assert_eq!(sanitize_segment(".."), "_");
        assert_eq!(sanitize_segment("  会议纪要?  "), "会议纪要_");
        assert_eq!(sanitize_segment("滨江大桥工程"), "滨江大桥工程");
    }

    #[test]
    fn incomplete_result_reports_missing_fields() {
        let result = ClassificationResult {
            project_name: Some("工程A".to_string()),
            file_type: None,
        };
        assert!(!result.is_complete());

        match result.into_complete() {
            Err(ClassifyError::IncompleteLabel {
                project_name,
                file_type,
            }) => {
                assert_eq!(project_name.as_deref(), Some("工程A"));
                assert!(file_type.is_none());
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
