//! # Capability 模块
//!
//! 渲染表面的能力探测。
//!
//! ## 设计原则
//!
//! - 能力在引擎**构造时探测一次**，缓存为不可变记录
//! - 引擎运行期间不允许重新探测（不存在能力热切换）
//! - 探测本身由宿主实现，引擎只消费两个布尔答案

use serde::{Deserialize, Serialize};

/// 能力探测接口
///
/// 由宿主实现，回答渲染表面是否支持某项视觉特性。
/// 引擎只在构造时调用一次，结果缓存在 [`Capabilities`] 中。
pub trait CapabilityOracle {
    /// 是否支持可动画的样式过渡
    fn supports_transitions(&self) -> bool;

    /// 是否支持 3D 几何变换
    fn supports_3d_transforms(&self) -> bool;
}

/// 能力记录
///
/// 构造时通过 [`Capabilities::detect`] 探测一次，之后以只读方式
/// 传入降级解析（resolver）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// 是否支持可动画的样式过渡
    pub transitions: bool,
    /// 是否支持 3D 几何变换
    pub transforms_3d: bool,
}

impl Capabilities {
    /// 通过 oracle 探测能力
    pub fn detect(oracle: &dyn CapabilityOracle) -> Self {
        Self {
            transitions: oracle.supports_transitions(),
            transforms_3d: oracle.supports_3d_transforms(),
        }
    }

    /// 全部支持（现代渲染后端的常见情况）
    pub fn full() -> Self {
        Self {
            transitions: true,
            transforms_3d: true,
        }
    }

    /// 仅支持 2D 过渡，不支持 3D 变换
    pub fn flat() -> Self {
        Self {
            transitions: true,
            transforms_3d: false,
        }
    }

    /// 全部不支持（所有效果退化为脚本式淡入淡出）
    pub fn none() -> Self {
        Self {
            transitions: false,
            transforms_3d: false,
        }
    }
}
