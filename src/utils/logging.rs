/// 日志工具模块
///
/// 启动横幅与会话统计的输出
use tracing::info;

use crate::config::Config;
use crate::models::SessionStats;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📮 答案提交地址: {}", config.submission_endpoint);
    match config.request_timeout_secs {
        Some(secs) => info!("⏱️ 请求超时: {} 秒", secs),
        None => info!("⏱️ 请求超时: 使用默认值"),
    }
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &SessionStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 会话统计");
    info!(
        "结束时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!(
        "📷 扫码: 接受 {} / 忽略 {}",
        stats.scans_accepted, stats.scans_ignored
    );
    info!(
        "📄 题目: 成功 {} / 失败 {}",
        stats.questions_loaded, stats.fetch_failures
    );
    info!("✅ 答对: {}", stats.correct);
    info!("❌ 答错: {}", stats.incorrect);
    info!("⚠️ 提交失败: {}", stats.submit_failures);
    info!("{}", "=".repeat(60));
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
