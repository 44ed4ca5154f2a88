//! # Tween 模块
//!
//! 单值补间：管理一个 f32 值在 duration 内从 `from` 到 `to` 的变化。
//! 由脚本式淡入淡出（表面不支持样式过渡时的终极降级）驱动。

use super::EasingFunction;

/// 单值补间
///
/// 不持有时钟：由调用方以毫秒增量推进（[`advance`](Tween::advance)）。
/// duration 为 0 时立即完成，当前值即为目标值。
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    /// 起始值
    from: f32,
    /// 目标值
    to: f32,
    /// 时长（毫秒）
    duration_ms: f32,
    /// 缓动函数
    easing: EasingFunction,
    /// 已经过的时间（毫秒）
    elapsed_ms: f32,
}

impl Tween {
    /// 创建补间
    pub fn new(from: f32, to: f32, duration_ms: f32, easing: EasingFunction) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            easing,
            elapsed_ms: 0.0,
        }
    }

    /// 推进 `dt_ms` 毫秒，返回推进后的当前值
    pub fn advance(&mut self, dt_ms: f32) -> f32 {
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.duration_ms);
        self.value()
    }

    /// 当前值
    pub fn value(&self) -> f32 {
        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            self.elapsed_ms / self.duration_ms
        };
        self.from + (self.to - self.from) * self.easing.apply(progress)
    }

    /// 是否已走完全程
    pub fn finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// 剩余时间（毫秒）
    pub fn remaining_ms(&self) -> f32 {
        (self.duration_ms - self.elapsed_ms).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_to_completion() {
        let mut tween = Tween::new(1.0, 0.0, 100.0, EasingFunction::Linear);
        assert_eq!(tween.value(), 1.0);
        assert!(!tween.finished());

        assert_eq!(tween.advance(50.0), 0.5);
        assert!(!tween.finished());

        assert_eq!(tween.advance(50.0), 0.0);
        assert!(tween.finished());
    }

    #[test]
    fn test_overshoot_clamps_to_target() {
        let mut tween = Tween::new(1.0, 0.0, 100.0, EasingFunction::EaseInOut);
        let v = tween.advance(1000.0);
        assert_eq!(v, 0.0);
        assert!(tween.finished());
        assert_eq!(tween.remaining_ms(), 0.0);
    }

    #[test]
    fn test_zero_duration_is_immediately_finished() {
        let tween = Tween::new(1.0, 0.0, 0.0, EasingFunction::Linear);
        assert!(tween.finished());
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut tween = Tween::new(0.0, 1.0, 100.0, EasingFunction::Linear);
        tween.advance(40.0);
        let v = tween.advance(-20.0);
        assert_eq!(v, 0.4);
    }
}
