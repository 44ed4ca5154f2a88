//! # Effects 模块（效果目录与降级解析）
//!
//! 把"请求了什么效果"到"实际执行什么效果"的全部决策收敛到一个单元。
//!
//! ## 核心组件
//!
//! - [`EffectKind`]：效果目录（固定的带标签枚举，配置时解析名称）
//! - [`GridSpec`] / [`CubeSpec`]：效果的几何参数化
//! - [`resolve`]：每次过渡前重新执行的降级解析
//! - [`CustomSequenceCursor`]：custom 序列游标
//! - [`TransitionRequest`] / [`Direction`]：单次过渡请求模型
//!
//! ## 设计原则
//!
//! - **唯一来源**：效果名映射、几何参数表只在 registry 定义
//! - **配置时拒绝**：未知效果名在构造阶段处理，运行时不做字符串分发
//! - **每次重解析**：`random`/`custom` 逐次变化，解析结果不缓存

mod cursor;
mod registry;
mod request;
mod resolver;

pub use cursor::CustomSequenceCursor;
pub use registry::{CONCRETE, CubeSpec, EffectKind, GridSpec, Translate};
pub use request::{Direction, TransitionRequest};
pub use resolver::{ResolvedEffect, resolve};
