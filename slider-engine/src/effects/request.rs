//! # Transition Request
//!
//! 过渡请求模型：目标索引 + 方向。
//! 每次 `next`/`prev`/`go_to` 调用构造一个，立即被 runner 消费，
//! 不持久化。

use serde::{Deserialize, Serialize};

/// 过渡方向
///
/// 决定效果的几何朝向（例如 cube 往哪边转、slide 往哪边滑）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// 由当前索引与目标索引推断方向
    ///
    /// 仅在调用方未显式指定方向时使用；`next`/`prev` 的环绕
    /// 过渡（末张 → 首张）会显式传方向，不走推断。
    pub fn infer(current: usize, target: usize) -> Self {
        if target > current {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}

/// 过渡请求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// 目标幻灯片索引
    pub target_index: usize,
    /// 过渡方向
    pub direction: Direction,
}
