//! FlowTrace 服务器入口
//!
//! 启动 HTTP API 服务器

use anyhow::Context;
use clap::Parser;
use flowtrace::server::{start_server, ServerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flowtrace-server")]
#[command(about = "FlowTrace HTTP API 服务器")]
struct Args {
    /// 监听地址
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// 监听端口
    #[arg(short, long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    tracing::info!("FlowTrace {} - 最大流轨迹服务", flowtrace::VERSION);

    let config = ServerConfig {
        host: args.host,
        port: args.port,
    };

    start_server(config).await.context("服务器异常退出")?;

    Ok(())
}
