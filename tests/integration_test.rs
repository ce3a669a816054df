use pdf_sorter::orchestrator::batch_processor::{COMPLETION_TITLE, STATUS_IDLE};
use pdf_sorter::services::{ProgressEvent, RecordingReporter, ScriptedInference};
use pdf_sorter::{parse_labels, BatchOrganizer, Config, DocumentInference, LlmService, ProcessingOutcome};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn test_config(root: &Path) -> Config {
    Config {
        input_dir: root.join("input"),
        output_dir: root.join("output"),
        output_log_file: root.join("output.txt").to_string_lossy().to_string(),
        llm_api_key: "sk-test".to_string(),
        ..Config::default()
    }
}

fn write_input(config: &Config, name: &str, content: &[u8]) -> PathBuf {
    std::fs::create_dir_all(&config.input_dir).unwrap();
    let path = config.input_dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_mixed_batch_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let failing = write_input(&config, "a.pdf", b"unreadable scan");
    let contract = write_input(&config, "b.pdf", b"%PDF-1.7 bridge contract");
    let minutes = write_input(&config, "c.pdf", b"%PDF-1.7 meeting minutes");

    let inference = ScriptedInference::new()
        .fail_upload("a.pdf")
        .respond("b.pdf", "工程名称：滨江大桥工程\n文件类型：施工合同书")
        .respond("c.pdf", "以下是结果：\n工程名称： 第三次工程例会 \n文件类型：会议纪要\n");
    let reporter = RecordingReporter::new();

    let summary = BatchOrganizer::new(&config, Arc::new(inference))
        .run(&reporter)
        .await
        .expect("批次应当完成");

    assert_eq!((summary.total, summary.succeeded, summary.failed), (3, 2, 1));

    // 失败的文件留在原处，成功的文件被移走
    assert!(failing.exists());
    assert!(!contract.exists());
    assert!(!minutes.exists());

    let contract_target = config.output_dir.join("滨江大桥工程").join("施工合同书.pdf");
    let minutes_target = config.output_dir.join("第三次工程例会").join("会议纪要.pdf");
    assert_eq!(std::fs::read(&contract_target).unwrap(), b"%PDF-1.7 bridge contract");
    assert_eq!(std::fs::read(&minutes_target).unwrap(), b"%PDF-1.7 meeting minutes");

    match &summary.reports[1].outcome {
        ProcessingOutcome::Success(target) => assert_eq!(target.path, contract_target),
        other => panic!("b.pdf 应当成功: {:?}", other),
    }

    assert_eq!(
        reporter.statuses(),
        vec![
            "正在处理：a.pdf",
            "❌ 处理失败：a.pdf",
            "正在处理：b.pdf",
            "✅ 成功处理：b.pdf",
            "正在处理：c.pdf",
            "✅ 成功处理：c.pdf",
            STATUS_IDLE,
        ]
    );

    let completions = reporter
        .events()
        .into_iter()
        .filter(|e| matches!(e, ProgressEvent::Notice { title, .. } if title == COMPLETION_TITLE))
        .count();
    assert_eq!(completions, 1);
}

#[tokio::test]
async fn test_second_run_only_sees_leftovers() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_input(&config, "a.pdf", b"first attempt fails");

    let first_run = BatchOrganizer::new(&config, Arc::new(ScriptedInference::new()));
    let summary = first_run.run(&RecordingReporter::new()).await.unwrap();
    assert_eq!(summary.failed, 1);

    let retry = ScriptedInference::new().respond("a.pdf", "工程名称：工程A\n文件类型：合同");
    let summary = BatchOrganizer::new(&config, Arc::new(retry))
        .run(&RecordingReporter::new())
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 1);
    assert!(config.output_dir.join("工程A").join("合同.pdf").exists());
}

/// 真实调用远端服务并完成一次完整分类
///
/// 运行方式：
/// ```bash
/// LLM_API_KEY=sk-xxx cargo test test_live_batch -- --ignored --nocapture
/// ```
#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_live_batch() {
    pdf_sorter::utils::logging::init(true);

    let config = Config::from_env();
    config.validate().expect("需要设置 LLM_API_KEY");

    let service = LlmService::new(&config);
    let documents = pdf_sorter::models::discover_documents(&config.input_dir, config.extension())
        .await
        .expect("无法扫描输入目录");

    let Some(first) = documents.first() else {
        println!("输入目录中没有文件，跳过");
        return;
    };

    let response = service.infer(&first.path).await.expect("模型调用失败");
    println!("模型回答:\n{}", response);
    println!("解析结果: {:?}", parse_labels(&response));
}
