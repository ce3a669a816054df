//! 文件归档 - 业务能力层
//!
//! 只负责“把文件放到目标位置”：建目录 → 复制 → 确认后删除源文件

use std::fs::File;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{AppResult, ClassifyError};
use crate::models::TargetLocation;

/// 把源文件移动到目标位置
///
/// 目标目录不存在时逐级创建；复制成功后才删除源文件，复制失败时源文件保持不动。
/// 目标文件已存在时直接覆盖。
pub async fn relocate(source: &Path, target: &TargetLocation) -> AppResult<()> {
    fs::create_dir_all(&target.folder)
        .await
        .map_err(|e| ClassifyError::filesystem(&target.folder, e))?;

    copy_with_metadata(source, &target.path).await?;

    fs::remove_file(source)
        .await
        .map_err(|e| ClassifyError::filesystem(source, e))?;

    debug!("已归档: {} → {}", source.display(), target.path.display());

    Ok(())
}

/// 复制内容和权限，并尽量保留修改时间
async fn copy_with_metadata(source: &Path, target: &Path) -> AppResult<()> {
    fs::copy(source, target)
        .await
        .map_err(|e| ClassifyError::filesystem(target, e))?;

    let modified = fs::metadata(source).await.and_then(|m| m.modified());
    let preserved = modified.and_then(|mtime| {
        File::options()
            .write(true)
            .open(target)
            .and_then(|file| file.set_modified(mtime))
    });

    if let Err(e) = preserved {
        warn!("无法保留修改时间 {}: {}", target.display(), e);
    }

    Ok(())
}
