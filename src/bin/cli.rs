//! FlowTrace CLI 工具
//!
//! 求解最大流、打印轨迹，以及交互式逐步回放

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use flowtrace::algorithm::{min_cut, EdmondsKarp, FlowOptions};
use flowtrace::cli::{CommandResult, PrintMode, Printer, ReplaySession};
use flowtrace::network::{load_matrix, Preset, RandomNetwork};
use flowtrace::types::{CapacityMatrix, NodeIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flowtrace-cli")]
#[command(about = "FlowTrace 命令行工具")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 求解并打印完整轨迹
    Solve {
        #[command(flatten)]
        network: NetworkArgs,

        /// 以 JSON 输出结果
        #[arg(long)]
        json: bool,

        /// 只打印步骤摘要，不打印残量矩阵
        #[arg(long)]
        summary: bool,
    },

    /// 生成随机网络并求解
    Random {
        /// 节点数
        #[arg(short, long, default_value = "6")]
        nodes: usize,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// 连边概率
        #[arg(long, default_value = "0.4")]
        density: f64,
    },

    /// 交互式逐步回放
    Replay {
        #[command(flatten)]
        network: NetworkArgs,
    },
}

#[derive(Args, Debug)]
struct NetworkArgs {
    /// 内置示例: classic, second
    #[arg(long, conflicts_with = "input")]
    preset: Option<Preset>,

    /// 容量矩阵文件（.json 或 .csv）
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 源点，默认 0
    #[arg(short, long)]
    source: Option<NodeIndex>,

    /// 汇点，默认最后一个节点
    #[arg(short = 't', long)]
    sink: Option<NodeIndex>,

    /// 增广次数上限，默认 2 × n × n
    #[arg(long)]
    max_iterations: Option<usize>,
}

impl NetworkArgs {
    fn load(&self) -> anyhow::Result<(CapacityMatrix, NodeIndex, NodeIndex)> {
        let matrix = match (&self.input, self.preset) {
            (Some(path), _) => load_matrix(path)
                .with_context(|| format!("无法读取容量矩阵: {}", path.display()))?,
            (None, Some(preset)) => preset.matrix(),
            (None, None) => Preset::Classic.matrix(),
        };
        let source = self.source.unwrap_or(0);
        let sink = self.sink.unwrap_or(matrix.node_count() - 1);
        Ok((matrix, source, sink))
    }

    fn options(&self) -> FlowOptions {
        FlowOptions {
            max_iterations: self.max_iterations,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Solve {
            network,
            json,
            summary,
        } => {
            let (capacity, source, sink) = network.load()?;
            let result = EdmondsKarp::new(&capacity)
                .with_options(network.options())
                .max_flow(source, sink)
                .context("最大流计算失败")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }

            let mode = if summary {
                PrintMode::Summary
            } else {
                PrintMode::Full
            };
            let printer = Printer::new(mode);
            println!("容量矩阵 (源点 {}, 汇点 {}):", source, sink);
            println!("{}", printer.format_capacity(&capacity));
            println!("{}", printer.format_trace(&result, &capacity));
            println!("{}", printer.format_summary(&result));
            if let Some(residual) = result.final_residual() {
                println!("最小割:");
                println!("{}", printer.format_min_cut(&min_cut(&capacity, &residual, source)));
            }
        }

        Command::Random {
            nodes,
            seed,
            density,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let capacity = RandomNetwork::new(nodes)
                .with_density(density)
                .generate(&mut rng)?;
            let result = EdmondsKarp::new(&capacity).max_flow(0, nodes - 1)?;

            let printer = Printer::new(PrintMode::Summary);
            println!("{}", printer.format_capacity(&capacity));
            println!("{}", printer.format_summary(&result));
        }

        Command::Replay { network } => {
            let (capacity, source, sink) = network.load()?;
            let result = EdmondsKarp::new(&capacity)
                .with_options(network.options())
                .max_flow(source, sink)
                .context("最大流计算失败")?;
            run_replay(ReplaySession::new(capacity, result, source))?;
        }
    }

    Ok(())
}

fn run_replay(mut session: ReplaySession) -> anyhow::Result<()> {
    println!("输入 'help' 查看命令列表，'quit' 退出\n");
    println!("{}", session.render_current());

    let stdin = io::stdin();
    loop {
        print!("flowtrace> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match session.handle_command(line.trim()) {
            CommandResult::Continue => {}
            CommandResult::Exit => break,
            CommandResult::Message(text) => println!("{}", text),
            CommandResult::Error(text) => println!("错误: {}", text),
            CommandResult::Play(interval) => {
                for frame in session.auto_play_frames() {
                    thread::sleep(interval);
                    println!("{}", frame);
                }
            }
        }
    }

    println!("再见！");
    Ok(())
}
