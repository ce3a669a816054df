//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::orchestrator::BatchSummary;

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先；否则默认 `info`，开启详细日志时为 `debug`。
/// 重复调用不会 panic（测试里可能多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化运行日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\nPDF 分类日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - PDF 分类模式");
    info!("📂 输入目录: {}", config.input_dir.display());
    info!("📂 输出目录: {}", config.output_dir.display());
    info!("🤖 模型: {}", config.llm_model_name);
    info!("{}", "=".repeat(60));
}

/// 记录文件扫描结果
pub fn log_documents_loaded(total: usize, input_dir: &Path) {
    info!("✓ 在 {} 中找到 {} 个待处理的文件", input_dir.display(), total);
    info!("💡 将逐个处理，每个文件完成后再处理下一个\n");
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &BatchSummary, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", summary.succeeded, summary.total);
    info!("❌ 失败: {}", summary.failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
