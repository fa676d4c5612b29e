//! 结果打印器
//!
//! 以表格输出容量矩阵、残量快照和轨迹摘要

use crate::algorithm::{FlowResult, MinCut, TraceStep};
use crate::types::CapacityMatrix;
use colored::Colorize;
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Clone, Copy, PartialEq)]
pub enum PrintMode {
    /// 每步打印完整残量矩阵
    Full,
    /// 只打印步骤摘要
    Summary,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Full)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 打印容量矩阵
    pub fn format_capacity(&self, capacity: &CapacityMatrix) -> String {
        let mut table = matrix_table(capacity.node_count());
        for (i, values) in capacity.rows().iter().enumerate() {
            let mut cells = vec![Cell::new(&i.to_string())];
            cells.extend(values.iter().map(|v| Cell::new(&v.to_string())));
            table.add_row(Row::new(cells));
        }
        table.to_string()
    }

    /// 打印单步
    ///
    /// 路径上的边以高亮显示，格式为 `残量/原容量`。
    pub fn format_step(&self, index: usize, step: &TraceStep, capacity: &CapacityMatrix) -> String {
        let title = if step.is_terminal {
            format!("[{}] {}", index + 1, step.description).green().bold()
        } else if step.path.is_empty() {
            format!("[{}] {}", index + 1, step.description).bold()
        } else {
            format!("[{}] {}", index + 1, step.description).yellow().bold()
        };

        let mut output = format!(
            "{}\n本步流量: {}    累计流量: {}\n",
            title, step.flow_added, step.cumulative_flow
        );

        if self.mode == PrintMode::Summary {
            return output;
        }

        let n = step.residual_snapshot.len();
        let mut table = matrix_table(n);
        for (i, values) in step.residual_snapshot.iter().enumerate() {
            let mut cells = vec![Cell::new(&i.to_string())];
            for (j, residual) in values.iter().enumerate() {
                let original = capacity.get(i, j);
                let text = if original > 0 {
                    format!("{}/{}", residual, original)
                } else {
                    residual.to_string()
                };
                let text = if step.uses_edge(i, j) {
                    text.red().bold().to_string()
                } else if original > 0 && *residual == 0 {
                    text.dimmed().to_string()
                } else {
                    text
                };
                cells.push(Cell::new(&text));
            }
            table.add_row(Row::new(cells));
        }

        output.push_str(&table.to_string());
        output
    }

    /// 打印完整轨迹
    pub fn format_trace(&self, result: &FlowResult, capacity: &CapacityMatrix) -> String {
        result
            .trace
            .iter()
            .enumerate()
            .map(|(i, step)| self.format_step(i, step, capacity))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 轨迹摘要表
    pub fn format_summary(&self, result: &FlowResult) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["步", "路径", "本步流量", "累计流量"]);
        for (i, step) in result.trace.iter().enumerate() {
            let path = if step.path.is_empty() {
                "-".to_string()
            } else {
                step.path
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join(" → ")
            };
            table.add_row(row![i + 1, path, step.flow_added, step.cumulative_flow]);
        }
        format!("{}最大流: {}\n", table, result.max_flow.to_string().green().bold())
    }

    /// 打印最小割
    pub fn format_min_cut(&self, cut: &MinCut) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["源侧节点", format!("{:?}", cut.source_side)]);
        table.add_row(row![
            "割边",
            cut.cut_edges
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ]);
        table.add_row(row!["割容量", cut.capacity]);
        table.to_string()
    }

    /// 打印帮助信息
    pub fn print_help() -> String {
        r#"
═══════════════════════════════════════════════════════════════
                   FlowTrace 回放命令帮助
═══════════════════════════════════════════════════════════════

  next, n              下一步
  prev, p              上一步
  first, r             回到第一步
  last, l              跳到最后一步
  goto, g <步号>       跳转到指定步（从 1 开始）
  play [毫秒]          自动播放到最后一步（默认间隔 2500 毫秒）
  summary, s           显示轨迹摘要
  cut                  显示最小割
  help, h, ?           显示帮助
  quit, exit, q        退出

═══════════════════════════════════════════════════════════════
"#
        .to_string()
    }
}

fn matrix_table(n: usize) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    let mut header = vec![Cell::new("")];
    header.extend((0..n).map(|j| Cell::new(&j.to_string())));
    table.set_titles(Row::new(header));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{min_cut, EdmondsKarp};

    fn solved() -> (CapacityMatrix, FlowResult) {
        let capacity = CapacityMatrix::new(vec![vec![0, 7], vec![0, 0]]).unwrap();
        let result = EdmondsKarp::new(&capacity).max_flow(0, 1).unwrap();
        (capacity, result)
    }

    #[test]
    fn test_summary_lists_every_step() {
        colored::control::set_override(false);
        let (_, result) = solved();
        let text = Printer::default().format_summary(&result);
        assert!(text.contains("0→1"));
        assert!(text.contains("最大流: 7"));
    }

    #[test]
    fn test_step_shows_residual_over_capacity() {
        colored::control::set_override(false);
        let (capacity, result) = solved();
        let text = Printer::default().format_step(1, &result.trace[1], &capacity);
        assert!(text.contains("0/7"));
        assert!(text.contains("累计流量: 7"));

        let summary = Printer::new(PrintMode::Summary).format_step(1, &result.trace[1], &capacity);
        assert!(!summary.contains("0/7"));
    }

    #[test]
    fn test_min_cut_table() {
        let (capacity, result) = solved();
        let residual = result.final_residual().unwrap();
        let text = Printer::default().format_min_cut(&min_cut(&capacity, &residual, 0));
        assert!(text.contains("0→1"));
    }
}
