//! 轨迹回放
//!
//! 在一份只读轨迹上前进、后退、跳转和自动播放

use super::trace::TraceStep;

/// 轨迹播放器
#[derive(Debug, Clone)]
pub struct TracePlayer<'a> {
    steps: &'a [TraceStep],
    current: usize,
}

impl<'a> TracePlayer<'a> {
    pub fn new(steps: &'a [TraceStep]) -> Self {
        Self { steps, current: 0 }
    }

    /// 当前步
    pub fn current(&self) -> Option<&'a TraceStep> {
        self.steps.get(self.current)
    }

    /// 当前步号（从 0 开始）
    pub fn index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// 跳转到指定步；越界时保持不动并返回 false
    pub fn show(&mut self, index: usize) -> bool {
        if index >= self.steps.len() {
            return false;
        }
        self.current = index;
        true
    }

    pub fn next(&mut self) -> bool {
        self.show(self.current + 1)
    }

    pub fn previous(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.show(index),
            None => false,
        }
    }

    /// 回到第一步
    pub fn restart(&mut self) {
        self.current = 0;
    }

    /// 跳到最后一步
    pub fn last(&mut self) -> bool {
        match self.steps.len().checked_sub(1) {
            Some(index) => self.show(index),
            None => false,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.current + 1 >= self.steps.len()
    }

    /// 停在终止步上
    pub fn is_complete(&self) -> bool {
        self.is_at_end() && self.current().is_some_and(|step| step.is_terminal)
    }

    /// 形如 `第 2 步，共 5 步`
    pub fn step_info(&self) -> String {
        step_label(self.current, self.steps.len())
    }

    /// 从当前位置自动播放到最后一步
    ///
    /// 依次产出后续各步，同时推进播放位置。
    pub fn auto_play(&mut self) -> AutoPlay<'_, 'a> {
        AutoPlay { player: self }
    }
}

/// 第 index 步（从 0 开始）的显示标签
pub fn step_label(index: usize, len: usize) -> String {
    format!("第 {} 步，共 {} 步", index + 1, len)
}

/// 自动播放迭代器
pub struct AutoPlay<'p, 'a> {
    player: &'p mut TracePlayer<'a>,
}

impl<'p, 'a> Iterator for AutoPlay<'p, 'a> {
    type Item = &'a TraceStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.player.next() {
            self.player.current()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::compute_max_flow;

    fn steps() -> Vec<TraceStep> {
        compute_max_flow(&[vec![0, 7], vec![0, 0]], 0, 1)
            .unwrap()
            .trace
    }

    #[test]
    fn test_navigation_bounds() {
        let steps = steps();
        let mut player = TracePlayer::new(&steps);
        assert_eq!(player.len(), 3);
        assert!(!player.previous());
        assert_eq!(player.index(), 0);
        assert!(player.next());
        assert!(player.next());
        assert!(!player.next());
        assert_eq!(player.index(), 2);
        assert!(player.is_complete());
        assert!(!player.show(10));
        assert_eq!(player.index(), 2);
        player.restart();
        assert_eq!(player.step_info(), "第 1 步，共 3 步");
        assert!(!player.is_complete());
    }

    #[test]
    fn test_auto_play_runs_to_end() {
        let steps = steps();
        let mut player = TracePlayer::new(&steps);
        let played: Vec<i64> = player.auto_play().map(|s| s.flow_added).collect();
        assert_eq!(played, vec![7, 0]);
        assert!(player.is_at_end());
        assert_eq!(player.auto_play().count(), 0);
    }

    #[test]
    fn test_empty_trace() {
        let mut player = TracePlayer::new(&[]);
        assert!(player.is_empty());
        assert!(player.current().is_none());
        assert!(!player.last());
        assert!(!player.is_complete());
    }
}
