//! 交互式前端
//!
//! 一个最小的控制台界面：回车开始一个批次，批次在后台任务里运行，
//! 状态通过 channel 送回前台逐行打印，前台始终可以响应输入。

use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::Config;
use crate::error::BatchError;
use crate::orchestrator::{BatchOrganizer, BatchSummary};
use crate::services::{
    ChannelReporter, DocumentInference, LlmService, MultiReporter, ProgressEvent, StatusLogWriter,
};
use crate::utils::logging::{init_log_file, log_startup};

type BatchHandle = JoinHandle<Result<BatchSummary, BatchError>>;

/// 用户输入的指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Quit,
    Unknown,
}

impl Command {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "" | "s" | "start" | "开始" | "开始处理" => Command::Start,
            "q" | "quit" | "exit" | "退出" => Command::Quit,
            _ => Command::Unknown,
        }
    }
}

/// 把进度事件渲染成一行文本
pub fn render_event(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::Status(text) => format!("状态：{}", text),
        ProgressEvent::Notice { title, message } => format!("【{}】{}", title, message),
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    inference: Arc<dyn DocumentInference>,
}

impl App {
    /// 初始化应用：写日志头、创建远端服务客户端（只创建一次）
    pub fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)?;
        log_startup(&config);

        let inference: Arc<dyn DocumentInference> = Arc::new(LlmService::new(&config));
        Ok(Self::with_inference(config, inference))
    }

    /// 使用指定的推理实现创建应用
    pub fn with_inference(config: Config, inference: Arc<dyn DocumentInference>) -> Self {
        Self { config, inference }
    }

    /// 在后台任务中启动一个批次
    pub fn start_batch(&self, reporter: ChannelReporter) -> BatchHandle {
        let organizer = BatchOrganizer::new(&self.config, self.inference.clone());
        let reporter = MultiReporter::new()
            .with(reporter)
            .with(StatusLogWriter::with_path(self.config.output_log_file.clone()));

        tokio::spawn(async move { organizer.run(&reporter).await })
    }

    /// 运行交互循环，直到用户退出或输入结束
    pub async fn run(self) -> Result<()> {
        let (reporter, mut events) = ChannelReporter::channel();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut running: Option<BatchHandle> = None;

        println!("PDF 分类工具");
        println!("回车（或输入“开始”）开始分类，输入 q 退出");
        println!("状态：等待开始");

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(input) = line? else { break };

                    match Command::parse(&input) {
                        Command::Start => {
                            if let Some(handle) = running.take() {
                                if !handle.is_finished() {
                                    println!("⏳ 当前批次尚未完成，请稍候");
                                    running = Some(handle);
                                    continue;
                                }
                                report_finished(handle.await);
                            }
                            info!("▶️ 开始新的批次");
                            running = Some(self.start_batch(reporter.clone()));
                        }
                        Command::Quit => break,
                        Command::Unknown => println!("未知指令：{}（回车开始，q 退出）", input.trim()),
                    }
                }
                Some(event) = events.recv() => println!("{}", render_event(&event)),
            }
        }

        if let Some(handle) = running.take() {
            if !handle.is_finished() {
                println!("⏳ 等待当前批次完成后退出...");
            }
            report_finished(handle.await);
        }
        while let Ok(event) = events.try_recv() {
            println!("{}", render_event(&event));
        }

        Ok(())
    }
}

fn report_finished(result: Result<Result<BatchSummary, BatchError>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(summary)) => info!(
            "批次结束: 成功 {}/{}，失败 {}",
            summary.succeeded, summary.total, summary.failed
        ),
        Ok(Err(e)) => error!("批次未能开始: {}", e),
        Err(e) => error!("批次任务执行失败: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ScriptedInference;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse(""), Command::Start);
        assert_eq!(Command::parse(" 开始 "), Command::Start);
        assert_eq!(Command::parse("Q"), Command::Quit);
        assert_eq!(Command::parse("退出"), Command::Quit);
        assert_eq!(Command::parse("删除全部"), Command::Unknown);
    }

    #[test]
    fn renders_events() {
        assert_eq!(
            render_event(&ProgressEvent::Status("正在处理：a.pdf".to_string())),
            "状态：正在处理：a.pdf"
        );
        assert_eq!(
            render_event(&ProgressEvent::Notice {
                title: "完成".to_string(),
                message: "所有 PDF 已分类完毕！".to_string(),
            }),
            "【完成】所有 PDF 已分类完毕！"
        );
    }

    #[tokio::test]
    async fn background_batch_streams_status_back() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input");
        std::fs::create_dir(&input).unwrap();
        std::fs::write(input.join("a.pdf"), b"data").unwrap();

        let config = Config {
            input_dir: input.clone(),
            output_dir: dir.path().join("output"),
            output_log_file: dir.path().join("output.txt").to_string_lossy().to_string(),
            llm_api_key: "sk-test".to_string(),
            ..Config::default()
        };
        let inference = ScriptedInference::new().respond("a.pdf", "工程名称：工程A\n文件类型：合同");
        let app = App::with_inference(config, Arc::new(inference));

        let (reporter, mut events) = ChannelReporter::channel();
        let summary = app.start_batch(reporter).await.unwrap().unwrap();
        assert_eq!(summary.succeeded, 1);

        let mut received = Vec::new();
        while let Ok(event) = events.try_recv() {
            received.push(render_event(&event));
        }
        assert_eq!(
            received,
            vec![
                "状态：正在处理：a.pdf",
                "状态：✅ 成功处理：a.pdf",
                "【完成】所有 PDF 已分类完毕！",
                "状态：处理完成，等待下一次操作",
            ]
        );

        let log = std::fs::read_to_string(dir.path().join("output.txt")).unwrap();
        assert!(log.contains("✅ 成功处理：a.pdf"));
    }
}
