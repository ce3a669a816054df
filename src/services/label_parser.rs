//! 标签解析 - 业务能力层
//!
//! 把模型返回的文本解析为 (工程名称, 文件类型)。模型输出只是“大致”按格式来，
//! 所以按行匹配标记词，缺失的字段交给调用方判断。

use crate::models::ClassificationResult;

/// 工程名称标记
pub const PROJECT_NAME_MARKER: &str = "工程名称";
/// 文件类型标记
pub const FILE_TYPE_MARKER: &str = "文件类型";
/// 可识别的键值分隔符，全角冒号为约定格式
const SEPARATORS: [char; 2] = ['：', ':'];

/// 解析模型输出
///
/// - 含 `工程名称` 的行取第一个分隔符之后的内容（去首尾空白）作为工程名称
/// - 含 `文件类型` 的行同理；同一行两个标记都有时按工程名称处理
/// - 其他行忽略；标记行没有分隔符或值为空时该字段保持不变
/// - 同一字段出现多次时以最后一次有效值为准
pub fn parse_labels(text: &str) -> ClassificationResult {
    let mut result = ClassificationResult::default();

    for line in text.trim().lines() {
        let slot = if line.contains(PROJECT_NAME_MARKER) {
            &mut result.project_name
        } else if line.contains(FILE_TYPE_MARKER) {
            &mut result.file_type
        } else {
            continue;
        };

        if let Some(value) = value_after_separator(line) {
            *slot = Some(value);
        }
    }

    result
}

fn value_after_separator(line: &str) -> Option<String> {
    let (_, value) = line.split_once(&SEPARATORS[..])?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
