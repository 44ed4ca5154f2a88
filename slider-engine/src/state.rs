//! # State 模块
//!
//! 滑块的运行时状态：当前索引、总张数、忙碌标志。
//!
//! ## 设计原则
//!
//! - 状态**显式建模**且可序列化
//! - 唯一的提交点：只有活动 runner 的 Done 转换会写入新索引
//! - 任意时刻至多一个活动 runner；忙碌期间的请求被静默丢弃，不排队

use serde::{Deserialize, Serialize};

/// 滑块状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderState {
    /// 幻灯片总数（构造后不可变，≥ 1）
    total_slides: usize,
    /// 当前幻灯片索引，取值范围 `[0, total_slides)`
    current_index: usize,
    /// 是否有过渡正在进行
    busy: bool,
}

impl SliderState {
    /// 创建滑块状态
    ///
    /// 参数已由配置校验保证合法（`total_slides ≥ 1`、`start` 在范围内）。
    pub fn new(total_slides: usize, start: usize) -> Self {
        debug_assert!(total_slides >= 1);
        debug_assert!(start < total_slides);

        Self {
            total_slides,
            current_index: start,
            busy: false,
        }
    }

    /// 幻灯片总数
    pub fn total_slides(&self) -> usize {
        self.total_slides
    }

    /// 当前幻灯片索引
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 是否有过渡正在进行
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// 下一张的索引（末张环绕到首张）
    pub fn next_index(&self) -> usize {
        (self.current_index + 1) % self.total_slides
    }

    /// 上一张的索引（首张环绕到末张）
    pub fn prev_index(&self) -> usize {
        (self.current_index + self.total_slides - 1) % self.total_slides
    }

    /// 标记过渡开始
    pub(crate) fn begin_transition(&mut self) {
        debug_assert!(!self.busy);
        self.busy = true;
    }

    /// 提交过渡结果：写入新索引并清除忙碌标志
    pub(crate) fn commit(&mut self, target: usize) {
        debug_assert!(target < self.total_slides);
        self.current_index = target;
        self.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_at_end() {
        // totalSlides = 5、currentIndex = 4：next 的目标是 0
        let state = SliderState::new(5, 4);
        assert_eq!(state.next_index(), 0);
    }

    #[test]
    fn test_prev_wraps_at_start() {
        let state = SliderState::new(5, 0);
        assert_eq!(state.prev_index(), 4);
    }

    #[test]
    fn test_full_cycle_returns_to_origin() {
        // 连续 totalSlides 次 next 恰好回到起点
        let mut state = SliderState::new(5, 2);
        for _ in 0..5 {
            let target = state.next_index();
            state.begin_transition();
            state.commit(target);
        }
        assert_eq!(state.current_index(), 2);

        for _ in 0..5 {
            let target = state.prev_index();
            state.begin_transition();
            state.commit(target);
        }
        assert_eq!(state.current_index(), 2);
    }

    #[test]
    fn test_commit_clears_busy() {
        let mut state = SliderState::new(3, 0);
        state.begin_transition();
        assert!(state.is_busy());

        state.commit(1);
        assert!(!state.is_busy());
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn test_single_slide_wraps_to_itself() {
        let state = SliderState::new(1, 0);
        assert_eq!(state.next_index(), 0);
        assert_eq!(state.prev_index(), 0);
    }
}
