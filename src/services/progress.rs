//! 进度报告 - 业务能力层
//!
//! 批处理只通过 [`ProgressReporter`] 往外“说话”，不关心界面怎么显示。
//! 所有实现都必须立即返回，不能阻塞批处理。

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// 进度事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// 状态栏文本
    Status(String),
    /// 弹窗式通知（批次完成、没有文件等）
    Notice { title: String, message: String },
}

/// 进度报告接口
pub trait ProgressReporter: Send + Sync {
    /// 更新状态文本
    fn status(&self, text: &str);

    /// 弹出通知
    fn notify(&self, title: &str, message: &str);
}

impl<R: ProgressReporter + ?Sized> ProgressReporter for Arc<R> {
    fn status(&self, text: &str) {
        (**self).status(text)
    }

    fn notify(&self, title: &str, message: &str) {
        (**self).notify(title, message)
    }
}

/// 通过 channel 把事件送回前端
#[derive(Clone)]
pub struct ChannelReporter {
    tx: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelReporter {
    pub fn new(tx: mpsc::UnboundedSender<ProgressEvent>) -> Self {
        Self { tx }
    }

    /// 创建 reporter 以及对应的接收端
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, event: ProgressEvent) {
        // 前端已经退出时事件直接丢弃
        if self.tx.send(event).is_err() {
            debug!("进度接收端已关闭，事件被丢弃");
        }
    }
}

impl ProgressReporter for ChannelReporter {
    fn status(&self, text: &str) {
        self.send(ProgressEvent::Status(text.to_string()));
    }

    fn notify(&self, title: &str, message: &str) {
        self.send(ProgressEvent::Notice {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

/// 把状态追加写入运行日志文件
///
/// 写入失败只记一条警告，不影响批处理。
pub struct StatusLogWriter {
    log_file_path: String,
}

impl StatusLogWriter {
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            log_file_path: path.into(),
        }
    }

    fn append(&self, line: &str) {
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file_path)
            .and_then(|mut file| {
                let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                writeln!(file, "[{}] {}", stamp, line)
            });

        if let Err(e) = result {
            warn!("写入日志文件 {} 失败: {}", self.log_file_path, e);
        }
    }
}

impl ProgressReporter for StatusLogWriter {
    fn status(&self, text: &str) {
        self.append(text);
    }

    fn notify(&self, title: &str, message: &str) {
        self.append(&format!("【{}】{}", title, message));
    }
}

/// 同一事件分发给多个 reporter
#[derive(Default)]
pub struct MultiReporter {
    reporters: Vec<Box<dyn ProgressReporter>>,
}

impl MultiReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reporter: impl ProgressReporter + 'static) -> Self {
        self.reporters.push(Box::new(reporter));
        self
    }
}

impl ProgressReporter for MultiReporter {
    fn status(&self, text: &str) {
        for reporter in &self.reporters {
            reporter.status(text);
        }
    }

    fn notify(&self, title: &str, message: &str) {
        for reporter in &self.reporters {
            reporter.notify(title, message);
        }
    }
}

/// 把事件记在内存里，测试用
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::Status(text) => Some(text),
                ProgressEvent::Notice { .. } => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::Notice { title, message } => Some((title, message)),
                ProgressEvent::Status(_) => None,
            })
            .collect()
    }

    fn push(&self, event: ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl ProgressReporter for RecordingReporter {
    fn status(&self, text: &str) {
        self.push(ProgressEvent::Status(text.to_string()));
    }

    fn notify(&self, title: &str, message: &str) {
        self.push(ProgressEvent::Notice {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channel_reporter_delivers_in_order() {
        let (reporter, mut rx) = ChannelReporter::channel();

        reporter.status("正在处理：a.pdf");
        reporter.notify("完成", "所有 PDF 已分类完毕！");

        assert_eq!(rx.recv().await, Some(ProgressEvent::Status("正在处理：a.pdf".to_string())));
        assert_eq!(
            rx.recv().await,
            Some(ProgressEvent::Notice {
                title: "完成".to_string(),
                message: "所有 PDF 已分类完毕！".to_string(),
            })
        );
    }

    #[test]
    fn channel_reporter_ignores_closed_receiver() {
        let (reporter, rx) = ChannelReporter::channel();
        drop(rx);
        reporter.status("没人听也不会 panic");
    }

    #[test]
    fn status_log_writer_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");
        let writer = StatusLogWriter::with_path(path.to_string_lossy());

        writer.status("✅ 成功处理：a.pdf");
        writer.notify("完成", "所有 PDF 已分类完毕！");

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("✅ 成功处理：a.pdf"));
        assert!(lines[1].ends_with("【完成】所有 PDF 已分类完毕！"));
    }

    #[test]
    fn multi_reporter_fans_out() {
        let first = Arc::new(RecordingReporter::new());
        let second = Arc::new(RecordingReporter::new());
        let multi = MultiReporter::new().with(first.clone()).with(second.clone());

        multi.status("正在处理：a.pdf");

        assert_eq!(first.statuses(), vec!["正在处理：a.pdf"]);
        assert_eq!(second.statuses(), vec!["正在处理：a.pdf"]);
    }
}
