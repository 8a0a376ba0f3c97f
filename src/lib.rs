mod config;
mod error;
mod executor;
mod sites;

pub use config::{load_accounts, Account};
pub use error::{CheckinError, ConfigError};
pub use executor::{check_in, run_all, RunResult};
pub use sites::{
    BinmtAdapter, HifitiAdapter, Outcome, RequestSpec, SiteAdapter, SiteRegistry,
};

use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_log_env() {
    let file = Arc::new(File::create("app.log").expect("Failed to create log file"));
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")), // 日志级别从 RUST_LOG 读取
        )
        .with(
            fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_target(true),
        )
        .with(
            // 文件层：相同格式，输出到 app.log
            fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_writer(file),
        )
        .init();
    dotenvy::dotenv().ok(); // 没有 .env 也无妨
}
