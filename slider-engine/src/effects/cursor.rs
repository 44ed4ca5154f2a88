//! # Custom Sequence Cursor
//!
//! custom 效果序列的游标：`next` 前进一位、`prev` 后退一位，
//! 越界时回绕到另一端。在滑块的整个生命周期内持续存在。

use serde::{Deserialize, Serialize};

use crate::effects::request::Direction;

/// custom 序列游标
///
/// 位置用有符号数保存：初始为 -1，首次 `next` 落到 0。
/// 取值时把越界位置回绕进 `[0, len)` 并写回，
/// 因此连续前进/后退都只会越界一步。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomSequenceCursor {
    position: i64,
}

impl CustomSequenceCursor {
    /// 创建游标（位于首元素之前）
    pub fn new() -> Self {
        Self { position: -1 }
    }

    /// 按方向移动一位
    pub fn bump(&mut self, direction: Direction) {
        match direction {
            Direction::Forward => self.position += 1,
            Direction::Backward => self.position -= 1,
        }
    }

    /// 取当前位置（回绕进 `[0, len)` 并写回）
    ///
    /// `len` 必须 ≥ 1（配置校验保证 custom 序列非空）。
    pub fn select(&mut self, len: usize) -> usize {
        debug_assert!(len >= 1);

        if self.position < 0 {
            self.position = len as i64 - 1;
        } else if self.position >= len as i64 {
            self.position = 0;
        }

        self.position as usize
    }
}
