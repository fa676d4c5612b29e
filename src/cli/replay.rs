//! 交互式回放会话
//!
//! 解析回放命令并维护当前步号

use super::printer::Printer;
use crate::algorithm::{min_cut, step_label, FlowResult, TracePlayer, TraceStep};
use crate::types::{CapacityMatrix, NodeIndex};
use std::time::Duration;

/// 自动播放默认间隔
pub const DEFAULT_PLAY_INTERVAL: Duration = Duration::from_millis(2500);

/// 命令执行结果
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 按间隔自动播放
    Play(Duration),
    /// 错误
    Error(String),
}

/// 回放会话
pub struct ReplaySession {
    capacity: CapacityMatrix,
    result: FlowResult,
    source: NodeIndex,
    cursor: usize,
    printer: Printer,
}

impl ReplaySession {
    pub fn new(capacity: CapacityMatrix, result: FlowResult, source: NodeIndex) -> Self {
        Self {
            capacity,
            result,
            source,
            cursor: 0,
            printer: Printer::default(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 渲染当前步
    pub fn render_current(&self) -> String {
        match self.player().current() {
            Some(step) => self.render_step(self.cursor, step),
            None => "轨迹为空".to_string(),
        }
    }

    fn render_step(&self, index: usize, step: &TraceStep) -> String {
        format!(
            "{}\n{}",
            step_label(index, self.result.trace.len()),
            self.printer.format_step(index, step, &self.capacity)
        )
    }

    /// 处理一行命令
    pub fn handle_command(&mut self, input: &str) -> CommandResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some(cmd) = parts.first() else {
            return CommandResult::Continue;
        };
        let arg = parts.get(1).copied();

        match cmd.to_lowercase().as_str() {
            "quit" | "exit" | "q" => CommandResult::Exit,
            "help" | "h" | "?" => CommandResult::Message(Printer::print_help()),
            "next" | "n" => self.navigate(|p| p.next(), "已经是最后一步"),
            "prev" | "p" => self.navigate(|p| p.previous(), "已经是第一步"),
            "first" | "r" => self.navigate(
                |p| {
                    p.restart();
                    true
                },
                "",
            ),
            "last" | "l" => self.navigate(|p| p.last(), "轨迹为空"),
            "goto" | "g" => match arg.and_then(|a| a.parse::<usize>().ok()) {
                Some(step) if step >= 1 => {
                    self.navigate(|p| p.show(step - 1), "步号超出范围")
                }
                _ => CommandResult::Error("用法: goto <步号>".to_string()),
            },
            "play" => match arg {
                None => CommandResult::Play(DEFAULT_PLAY_INTERVAL),
                Some(ms) => match ms.parse::<u64>() {
                    Ok(ms) => CommandResult::Play(Duration::from_millis(ms)),
                    Err(_) => CommandResult::Error(format!("无效的播放间隔: {}", ms)),
                },
            },
            "summary" | "s" => CommandResult::Message(self.printer.format_summary(&self.result)),
            "cut" => match self.result.final_residual() {
                Some(residual) => CommandResult::Message(
                    self.printer
                        .format_min_cut(&min_cut(&self.capacity, &residual, self.source)),
                ),
                None => CommandResult::Error("轨迹为空".to_string()),
            },
            other => CommandResult::Error(format!("未知命令: {}。输入 'help' 查看帮助。", other)),
        }
    }

    /// 从当前位置播放到结束，返回每一帧的渲染结果
    pub fn auto_play_frames(&mut self) -> Vec<String> {
        let start = self.cursor;
        let mut player = TracePlayer::new(&self.result.trace);
        player.show(start);

        let frames = player
            .auto_play()
            .enumerate()
            .map(|(offset, step)| self.render_step(start + offset + 1, step))
            .collect();

        self.cursor = player.index();
        frames
    }

    fn player(&self) -> TracePlayer<'_> {
        let mut player = TracePlayer::new(&self.result.trace);
        player.show(self.cursor);
        player
    }

    fn navigate<F>(&mut self, action: F, boundary_message: &str) -> CommandResult
    where
        F: FnOnce(&mut TracePlayer<'_>) -> bool,
    {
        let mut player = self.player();
        if action(&mut player) {
            self.cursor = player.index();
            CommandResult::Message(self.render_current())
        } else {
            CommandResult::Error(boundary_message.to_string())
        }
    }
}
