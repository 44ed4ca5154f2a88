//! # Slider Engine
//!
//! 幻灯片过渡编排引擎的纯逻辑核心。
//!
//! ## 架构概述
//!
//! `slider-engine` 不依赖任何 IO、渲染后端或时钟。
//! 它通过两条通道与宿主层（Host）通信：
//!
//! ```text
//! Host                               Engine
//!   │── next / prev / go_to ──────────►│
//!   │◄── RenderSurface 样式指令 ───────│
//!   │◄── listen / schedule (token) ────│
//!   │                                  │
//!   │── handle_transition_end(token) ─►│
//!   │── handle_timer(token) ──────────►│
//!   │── take_events() ────────────────►│ TransitionStarted / Ended
//! ```
//!
//! 一次过渡的生命周期：宿主请求切换 → 引擎解析效果（含能力降级）
//! → 下发 setup 样式并注册完成监听 → 等待宿主送回完成通知
//! → 统一复位 → 提交新索引并发布结束事件。
//!
//! ## 核心类型
//!
//! - [`SliderEngine`]：引擎入口，持有全部运行时状态
//! - [`SliderConfig`]：构造时消费一次的配置
//! - [`EffectKind`]：固定效果目录
//! - [`RenderSurface`]：宿主实现的视觉表面接口
//! - [`CapabilityOracle`]：宿主实现的能力探测接口
//! - [`SliderEvent`]：引擎发布的过渡事件
//!
//! ## 模块结构
//!
//! - [`engine`]：引擎入口与请求门禁
//! - [`effects`]：效果目录、几何参数、降级解析
//! - [`grid`]：网格分割算法
//! - `runner`（内部）：单次过渡状态机
//! - [`surface`]：引擎与渲染表面的接口
//! - [`animation`]：缓动函数与脚本式补间
//! - [`capability`]：能力探测
//! - [`config`]：配置与校验
//! - [`state`]：滑块状态
//! - [`error`]：错误类型定义

pub mod animation;
pub mod capability;
pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod grid;
pub mod state;
pub mod surface;

mod runner;

// 重导出核心类型
pub use animation::{EasingFunction, Tween};
pub use capability::{Capabilities, CapabilityOracle};
pub use config::{EngineSettings, SliderConfig};
pub use effects::{
    CONCRETE, CubeSpec, CustomSequenceCursor, Direction, EffectKind, GridSpec, ResolvedEffect,
    Translate, TransitionRequest, resolve,
};
pub use engine::{SliderEngine, SliderEvent};
pub use error::{ConfigError, SliderError, SliderResult, TransitionError};
pub use grid::{Corner, GridPartition, Tile, partition};
pub use state::SliderState;
pub use surface::{
    CompletionToken, GridImage, PixelSize, RenderSurface, StyleOp, SurfaceTarget, TimerToken,
    TransformOp,
};
