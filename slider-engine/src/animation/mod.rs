//! # Animation 模块
//!
//! 缓动函数与单值补间。
//!
//! ## 核心设计理念
//!
//! 引擎自身不做逐帧渲染：支持样式过渡的表面由宿主按
//! [`EasingFunction`] 声明的时间曲线执行动画。
//! 只有在表面完全不支持过渡时，引擎才用 [`Tween`]
//! 以固定帧间隔驱动脚本式淡入淡出。

mod easing;
mod tween;

pub use easing::EasingFunction;
pub use tween::Tween;
