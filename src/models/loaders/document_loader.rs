use crate::error::BatchError;
use crate::models::document::InputDocument;
use std::path::Path;
use tokio::fs;

/// 扫描输入目录，返回所有指定扩展名的文件
///
/// 结果是调用时刻的快照，按文件名排序；扩展名比较不区分大小写，子目录不递归。
pub async fn discover_documents(
    folder: &Path,
    extension: &str,
) -> Result<Vec<InputDocument>, BatchError> {
    if !folder.exists() {
        return Err(BatchError::InputDirNotFound {
            path: folder.to_path_buf(),
        });
    }

    let discovery_failed = |source| BatchError::DiscoveryFailed {
        path: folder.to_path_buf(),
        source,
    };

    let mut documents = Vec::new();
    let mut entries = fs::read_dir(folder).await.map_err(discovery_failed)?;

    while let Some(entry) = entries.next_entry().await.map_err(discovery_failed)? {
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));

        if !matches || !path.is_file() {
            continue;
        }

        tracing::debug!(
            "发现待处理文件: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        documents.push(InputDocument::new(path));
    }

    documents.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(documents)
}
