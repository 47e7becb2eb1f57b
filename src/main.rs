// ============================================================================
// DotBuild - 程序入口
// ============================================================================
//
// 文件: src/main.rs
// 职责: 程序入口，初始化诊断日志并运行 CLI
// 边界:
//   - ✅ 模块声明
//   - ✅ tracing 订阅器初始化
//   - ✅ 错误输出与退出码
//   - ❌ 不应包含命令实现
//
// ============================================================================

mod cli;
mod core;
mod i18n;
mod models;
mod ui;
mod utils;

use tracing_subscriber::EnvFilter;

use crate::utils::logger::Logger;

#[tokio::main]
async fn main() {
    // RUST_LOG 控制诊断输出，默认只显示警告
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = cli::run_cli().await {
        Logger::error(format!("{:#}", e));
        std::process::exit(1);
    }
}
