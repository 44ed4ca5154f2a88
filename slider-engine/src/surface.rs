//! # Surface 模块
//!
//! 引擎与渲染表面之间的接口。
//!
//! ## 设计说明
//!
//! 引擎不直接操作任何渲染后端：所有视觉副作用都通过
//! [`RenderSurface`] trait 下发给宿主，宿主再把完成通知
//! （过渡结束事件、定时器到期）携带引擎发放的 token 送回来。
//!
//! ```text
//! Engine                         Host (RenderSurface)
//!   │── apply_style / mount_grid ──►│
//!   │── listen_transition_end(token)│
//!   │── schedule_once(delay, token)─►│
//!   │                               │ ...渲染/计时...
//!   │◄── handle_transition_end(token)│
//!   │◄── handle_timer(token) ───────│
//! ```
//!
//! token 由引擎单调分配，宿主原样带回；过期 token 会被静默忽略，
//! 因此迟到的通知不会干扰后续过渡。

use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;
use crate::grid::Tile;

/// 过渡完成监听 token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletionToken(pub u64);

/// 一次性定时器 token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(pub u64);

/// 样式操作的目标元素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurfaceTarget {
    /// 滑块容器（cube 效果整体旋转的对象）
    Slider,
    /// 滑块背景层（承载 perspective）
    Background,
    /// 第 n 张幻灯片
    Slide(usize),
    /// 第 n 张幻灯片的主图
    SlideImage(usize),
    /// 网格覆盖层中的第 n 个分块（按行主序编号）
    GridTile(usize),
}

/// 元素的像素尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

/// 几何变换分量
///
/// 平移单位为像素，旋转单位为度。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransformOp {
    TranslateX(f32),
    TranslateY(f32),
    TranslateZ(f32),
    RotateX(f32),
    RotateY(f32),
    /// 平面旋转（网格效果使用）
    Rotate(f32),
    Scale(f32),
}

/// 样式操作
///
/// 引擎下发给表面的声明式样式指令。表面如何落实
/// （CSS、着色器 uniform、软件合成）由宿主决定。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleOp {
    /// 不透明度 (0.0 - 1.0)
    Opacity(f32),
    /// 层叠顺序
    ZIndex(i32),
    /// 声明后续样式变化按过渡动画执行
    Transition {
        duration_ms: f32,
        easing: EasingFunction,
        delay_ms: f32,
    },
    /// 几何变换（空列表表示恢复恒等变换）
    Transform(Vec<TransformOp>),
    /// 透视距离（像素，3D 效果的观察深度）
    Perspective(f32),
    /// 隐藏背面（3D 旋转时背面不可见）
    BackfaceHidden,
    /// 子元素保持 3D 空间（cube 效果的容器需要）
    Preserve3d,
}

/// 网格覆盖层使用的图像信息
///
/// 每个分块以 `(tile.left, tile.top)` 为背景偏移展示整图的
/// 对应裁剪区域，拼合后与原图完全一致。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridImage {
    /// 图像来源标识（由 [`RenderSurface::image_source`] 返回的值）
    pub source: String,
    /// 图像像素宽度
    pub width: u32,
    /// 图像像素高度
    pub height: u32,
}

/// 渲染表面接口
///
/// 由宿主实现。除两个查询方法外全部是"发出即忘"的指令：
/// 引擎不关心执行细节，只依赖宿主之后送回的 token 通知。
pub trait RenderSurface {
    /// 对目标元素应用一组样式
    fn apply_style(&mut self, target: SurfaceTarget, styles: &[StyleOp]);

    /// 清除目标元素上所有过渡相关样式，恢复基线
    fn clear_styles(&mut self, target: SurfaceTarget);

    /// 查询元素的像素尺寸
    fn pixel_size(&self, target: SurfaceTarget) -> PixelSize;

    /// 查询幻灯片主图的来源标识
    fn image_source(&self, slide: usize) -> String;

    /// 在指定幻灯片上方挂载网格覆盖层
    ///
    /// 分块几何（位置、尺寸、背景偏移）由 `tiles` 给出；
    /// 挂载后分块可通过 [`SurfaceTarget::GridTile`] 单独施加样式。
    fn mount_grid(&mut self, slide: usize, image: &GridImage, tiles: &[Tile]);

    /// 卸载网格覆盖层
    fn unmount_grid(&mut self);

    /// 注册一次性过渡完成监听
    ///
    /// 目标元素的过渡动画结束时，宿主携带 `token` 调用
    /// `SliderEngine::handle_transition_end`。
    fn listen_transition_end(&mut self, target: SurfaceTarget, token: CompletionToken);

    /// 调度一次性定时器
    ///
    /// `delay_ms` 后宿主携带 `token` 调用 `SliderEngine::handle_timer`。
    fn schedule_once(&mut self, delay_ms: f32, token: TimerToken);

    /// 取消尚未到期的定时器
    fn cancel_scheduled(&mut self, token: TimerToken);
}
