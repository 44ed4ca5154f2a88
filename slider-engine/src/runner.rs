//! # Runner 模块
//!
//! 单次过渡的状态机：`Setup → AwaitingCompletion → Done`，
//! 统一复位在进入 Done 前执行。
//!
//! ## 执行模型
//!
//! ```text
//! start()               setup 样式下发，注册完成监听，调度 settle 定时器
//!   │
//! handle_timer(settle)  execute 样式下发（过渡真正开始）
//!   │
//! handle_transition_end / handle_timer(frame|watchdog)
//!   │                   统一复位 + 效果自身复位
//! Done                  引擎提交索引、清除忙碌标志
//! ```
//!
//! 两种互斥的等待策略：
//! - **事件驱动**：表面支持样式过渡时，在指定元素上注册一次性完成监听
//!   （cube 监听滑块容器，网格监听最后一个分块，fade 监听旧幻灯片），
//!   同时武装 watchdog 定时器兜底
//! - **定时器驱动**：脚本式淡入淡出以固定帧间隔推进补间，
//!   走完配置时长即完成，不依赖外部事件
//!
//! 过渡一旦进入 Setup 就必然走到 Done，不支持取消。

use crate::animation::{EasingFunction, Tween};
use crate::effects::{CubeSpec, Direction, EffectKind, GridSpec, ResolvedEffect};
use crate::grid::{self, GridPartition};
use crate::surface::{
    CompletionToken, GridImage, RenderSurface, StyleOp, SurfaceTarget, TimerToken, TransformOp,
};

/// setup 与 execute 之间的静置延迟（毫秒）
///
/// 让初始几何先行生效，防止表面把初始态和终态合并进同一帧。
pub(crate) const SETTLE_DELAY_MS: f32 = 20.0;

/// 脚本式淡入淡出的帧间隔（毫秒）
pub(crate) const SCRIPTED_FRAME_MS: f32 = 16.0;

/// watchdog 在理论完成时刻之后的宽限（毫秒）
const WATCHDOG_GRACE_MS: f32 = 150.0;

/// runner 状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunnerPhase {
    /// setup 样式已下发，等待 settle 定时器触发 execute
    Setup,
    /// execute 已下发，等待完成通知
    AwaitingCompletion,
    /// 已完成（终态，runner 随即被丢弃）
    Done,
}

/// 过渡上下文
///
/// 单次过渡所需的全部只读参数，归 runner 实例独占，
/// 取代在各阶段之间穿线的共享可变状态。
#[derive(Debug, Clone)]
pub(crate) struct TransitionContext {
    /// 出场幻灯片索引
    pub from: usize,
    /// 入场幻灯片索引
    pub to: usize,
    /// 过渡方向
    pub direction: Direction,
    /// 解析后的效果
    pub effect: ResolvedEffect,
    /// 过渡时长（毫秒）
    pub duration_ms: f32,
    /// 透视距离（cube 效果使用）
    pub perspective: f32,
}

/// 本次过渡占用的 token
///
/// 由引擎按过渡一次性分配，迟到的旧 token 通知因此可以被识别并忽略。
#[derive(Debug, Clone, Copy)]
pub(crate) struct RunnerTokens {
    /// settle 定时器
    pub settle: TimerToken,
    /// 脚本式淡化的帧定时器
    pub frame: TimerToken,
    /// watchdog 定时器
    pub watchdog: TimerToken,
    /// 完成监听
    pub completion: CompletionToken,
}

/// runner 向引擎报告的推进结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunnerStatus {
    Running,
    Completed,
}

/// 效果的执行计划（setup 阶段确定，之后只读）
#[derive(Debug, Clone)]
enum EffectPlan {
    /// 交叉淡化：execute 把旧幻灯片透明度过渡到 0
    Fade,
    /// cube 旋转：execute 把滑块容器整体转到新面
    Cube(CubeSpec),
    /// 网格效果：execute 对每个分块施加目标几何
    Grid {
        spec: GridSpec,
        partition: GridPartition,
    },
    /// 脚本式淡化：帧定时器逐步推进补间
    Scripted(Tween),
}

/// 单次过渡的状态机
pub(crate) struct TransitionRunner {
    ctx: TransitionContext,
    tokens: RunnerTokens,
    phase: RunnerPhase,
    plan: EffectPlan,
    /// watchdog 已调度且未触发/未取消
    watchdog_armed: bool,
}

impl TransitionRunner {
    /// 启动过渡：下发基线 z 序与效果 setup，进入等待
    pub(crate) fn start(
        ctx: TransitionContext,
        tokens: RunnerTokens,
        surface: &mut dyn RenderSurface,
    ) -> Self {
        // 基线：旧幻灯片在上层，新幻灯片就位于下层
        surface.apply_style(SurfaceTarget::Slide(ctx.from), &[StyleOp::ZIndex(2)]);
        surface.apply_style(
            SurfaceTarget::Slide(ctx.to),
            &[StyleOp::Opacity(1.0), StyleOp::ZIndex(1)],
        );

        match ctx.effect {
            ResolvedEffect::ScriptedFade => {
                let fade = Tween::new(1.0, 0.0, ctx.duration_ms, EasingFunction::EaseInOut);
                let step = SCRIPTED_FRAME_MS.min(ctx.duration_ms).max(0.0);
                surface.schedule_once(step, tokens.frame);

                Self {
                    ctx,
                    tokens,
                    phase: RunnerPhase::AwaitingCompletion,
                    plan: EffectPlan::Scripted(fade),
                    watchdog_armed: false,
                }
            }
            ResolvedEffect::Animated(kind) => {
                let (plan, listen_target) = Self::setup_animated(kind, &ctx, surface);

                surface.listen_transition_end(listen_target, tokens.completion);
                surface.schedule_once(SETTLE_DELAY_MS, tokens.settle);

                // watchdog 兜底：理论完成时刻 + 宽限
                let max_stagger = match &plan {
                    EffectPlan::Grid { partition, .. } => partition.max_stagger_ms(),
                    _ => 0.0,
                };
                let budget = SETTLE_DELAY_MS + ctx.duration_ms + max_stagger + WATCHDOG_GRACE_MS;
                surface.schedule_once(budget, tokens.watchdog);

                Self {
                    ctx,
                    tokens,
                    phase: RunnerPhase::Setup,
                    plan,
                    watchdog_armed: true,
                }
            }
        }
    }

    /// 过渡上下文（供引擎在 Done 后提交索引）
    pub(crate) fn context(&self) -> &TransitionContext {
        &self.ctx
    }

    /// 处理定时器到期通知
    pub(crate) fn handle_timer(
        &mut self,
        token: TimerToken,
        surface: &mut dyn RenderSurface,
    ) -> RunnerStatus {
        if self.phase == RunnerPhase::Done {
            tracing::trace!(?token, "runner 已完成，忽略迟到的定时器");
            return RunnerStatus::Completed;
        }

        if token == self.tokens.settle && self.phase == RunnerPhase::Setup {
            self.execute(surface);
            self.phase = RunnerPhase::AwaitingCompletion;
            return RunnerStatus::Running;
        }

        if token == self.tokens.frame {
            return self.step_scripted_fade(surface);
        }

        if token == self.tokens.watchdog {
            tracing::warn!(
                from = self.ctx.from,
                to = self.ctx.to,
                "完成事件未到达，watchdog 强制收尾"
            );
            self.watchdog_armed = false;
            self.finish(surface);
            return RunnerStatus::Completed;
        }

        tracing::trace!(?token, "忽略过期定时器 token");
        RunnerStatus::Running
    }

    /// 处理过渡完成事件通知
    pub(crate) fn handle_transition_end(
        &mut self,
        token: CompletionToken,
        surface: &mut dyn RenderSurface,
    ) -> RunnerStatus {
        if token != self.tokens.completion || self.phase == RunnerPhase::Done {
            tracing::trace!(?token, "忽略过期完成 token");
            return match self.phase {
                RunnerPhase::Done => RunnerStatus::Completed,
                _ => RunnerStatus::Running,
            };
        }

        // 事件先于 settle 到达时连 settle 定时器一并作废
        if self.phase == RunnerPhase::Setup {
            surface.cancel_scheduled(self.tokens.settle);
        }

        self.finish(surface);
        RunnerStatus::Completed
    }

    /// 下发效果的 setup 样式，返回执行计划与完成监听目标
    fn setup_animated(
        kind: EffectKind,
        ctx: &TransitionContext,
        surface: &mut dyn RenderSurface,
    ) -> (EffectPlan, SurfaceTarget) {
        match kind {
            EffectKind::Fade => Self::setup_fade(ctx, surface),

            EffectKind::CubeH | EffectKind::CubeV => {
                let size = surface.pixel_size(SurfaceTarget::Slide(ctx.from));
                let half = match kind {
                    EffectKind::CubeH => size.width as f32 / 2.0,
                    _ => size.height as f32 / 2.0,
                };

                match kind.cube_spec(ctx.direction, half) {
                    Some(spec) => Self::setup_cube(spec, ctx, surface),
                    // cube 族必有参数，这里只是防御
                    None => Self::setup_fade(ctx, surface),
                }
            }

            other => match other.grid_spec(ctx.direction) {
                Some(spec) => Self::setup_grid(spec, ctx, surface),
                None => {
                    tracing::warn!(kind = %other, "效果缺少几何参数，按 fade 处理");
                    Self::setup_fade(ctx, surface)
                }
            },
        }
    }

    fn setup_fade(
        ctx: &TransitionContext,
        surface: &mut dyn RenderSurface,
    ) -> (EffectPlan, SurfaceTarget) {
        let outgoing = SurfaceTarget::Slide(ctx.from);
        surface.apply_style(
            outgoing,
            &[StyleOp::Transition {
                duration_ms: ctx.duration_ms,
                easing: EasingFunction::Linear,
                delay_ms: 0.0,
            }],
        );

        (EffectPlan::Fade, outgoing)
    }

    fn setup_cube(
        spec: CubeSpec,
        ctx: &TransitionContext,
        surface: &mut dyn RenderSurface,
    ) -> (EffectPlan, SurfaceTarget) {
        surface.apply_style(
            SurfaceTarget::Background,
            &[StyleOp::Perspective(ctx.perspective)],
        );

        // 旧幻灯片推到立方体正面
        surface.apply_style(
            SurfaceTarget::Slide(ctx.from),
            &[
                StyleOp::Transform(vec![TransformOp::TranslateZ(spec.translate_z)]),
                StyleOp::BackfaceHidden,
            ],
        );

        // 新幻灯片预先摆到相邻面
        surface.apply_style(
            SurfaceTarget::Slide(ctx.to),
            &[
                StyleOp::Opacity(1.0),
                StyleOp::BackfaceHidden,
                StyleOp::Transform(vec![
                    TransformOp::TranslateY(spec.next_translate_y),
                    TransformOp::TranslateX(spec.next_translate_x),
                    TransformOp::RotateY(spec.next_rotate_y),
                    TransformOp::RotateX(spec.next_rotate_x),
                ]),
            ],
        );

        // 容器后撤半边长，保持子元素的 3D 空间
        surface.apply_style(
            SurfaceTarget::Slider,
            &[
                StyleOp::Transform(vec![TransformOp::TranslateZ(-spec.translate_z)]),
                StyleOp::Preserve3d,
            ],
        );

        (EffectPlan::Cube(spec), SurfaceTarget::Slider)
    }

    fn setup_grid(
        spec: GridSpec,
        ctx: &TransitionContext,
        surface: &mut dyn RenderSurface,
    ) -> (EffectPlan, SurfaceTarget) {
        let image_target = SurfaceTarget::SlideImage(ctx.from);
        let size = surface.pixel_size(image_target);
        let source = surface.image_source(ctx.from);

        let partition = grid::partition(
            spec.cols,
            spec.rows,
            size.width,
            size.height,
            ctx.duration_ms,
        );

        let image = GridImage {
            source,
            width: size.width,
            height: size.height,
        };
        surface.mount_grid(ctx.from, &image, &partition.tiles);

        // 每个分块：恒等变换起步，过渡带各自的交错延迟
        for (i, tile) in partition.tiles.iter().enumerate() {
            surface.apply_style(
                SurfaceTarget::GridTile(i),
                &[
                    StyleOp::Transition {
                        duration_ms: ctx.duration_ms,
                        easing: EasingFunction::EaseInOut,
                        delay_ms: tile.stagger_delay_ms,
                    },
                    StyleOp::Transform(Vec::new()),
                ],
            );
        }

        // 网格顶替原图显示
        surface.apply_style(image_target, &[StyleOp::Opacity(0.0)]);

        let listen_target = SurfaceTarget::GridTile(partition.last_tile_index());
        (EffectPlan::Grid { spec, partition }, listen_target)
    }

    /// 下发 execute 样式（过渡真正开始）
    fn execute(&mut self, surface: &mut dyn RenderSurface) {
        match &self.plan {
            EffectPlan::Fade => {
                surface.apply_style(SurfaceTarget::Slide(self.ctx.from), &[StyleOp::Opacity(0.0)]);
            }

            EffectPlan::Cube(spec) => {
                surface.apply_style(
                    SurfaceTarget::Slider,
                    &[
                        StyleOp::Transition {
                            duration_ms: self.ctx.duration_ms,
                            easing: EasingFunction::EaseInOut,
                            delay_ms: 0.0,
                        },
                        StyleOp::Transform(vec![
                            TransformOp::TranslateZ(-spec.translate_z),
                            TransformOp::RotateX(spec.wrap_rotate_x),
                            TransformOp::RotateY(spec.wrap_rotate_y),
                        ]),
                    ],
                );
            }

            EffectPlan::Grid { spec, partition } => {
                let tx = spec.translate_x.resolve(partition.image_width as f32);
                let ty = spec.translate_y.resolve(partition.image_height as f32);

                let styles = [
                    StyleOp::Opacity(spec.opacity),
                    StyleOp::Transform(vec![
                        TransformOp::Rotate(spec.rotate_deg),
                        TransformOp::TranslateX(tx),
                        TransformOp::TranslateY(ty),
                        TransformOp::Scale(spec.scale),
                    ]),
                ];
                for i in 0..partition.tiles.len() {
                    surface.apply_style(SurfaceTarget::GridTile(i), &styles);
                }
            }

            // 脚本式淡化没有 execute 阶段，帧定时器直接驱动
            EffectPlan::Scripted(_) => {}
        }
    }

    /// 推进脚本式淡化一帧
    fn step_scripted_fade(&mut self, surface: &mut dyn RenderSurface) -> RunnerStatus {
        let EffectPlan::Scripted(fade) = &mut self.plan else {
            tracing::trace!("非脚本式过渡收到帧定时器，忽略");
            return RunnerStatus::Running;
        };

        let step = SCRIPTED_FRAME_MS.min(fade.remaining_ms());
        let value = fade.advance(step);
        surface.apply_style(
            SurfaceTarget::Slide(self.ctx.from),
            &[StyleOp::Opacity(value)],
        );

        if fade.finished() {
            self.finish(surface);
            RunnerStatus::Completed
        } else {
            let next = SCRIPTED_FRAME_MS.min(fade.remaining_ms());
            surface.schedule_once(next, self.tokens.frame);
            RunnerStatus::Running
        }
    }

    /// 统一复位并进入 Done
    ///
    /// 清除滑块、背景与两张幻灯片上的全部过渡样式，恢复基线
    /// z 序（旧片退到下层且透明，新片在上层且不透明），
    /// 再执行效果自身的复位步骤。
    fn finish(&mut self, surface: &mut dyn RenderSurface) {
        if self.watchdog_armed {
            surface.cancel_scheduled(self.tokens.watchdog);
            self.watchdog_armed = false;
        }

        surface.clear_styles(SurfaceTarget::Background);
        surface.clear_styles(SurfaceTarget::Slider);
        surface.clear_styles(SurfaceTarget::Slide(self.ctx.from));
        surface.clear_styles(SurfaceTarget::Slide(self.ctx.to));

        surface.apply_style(
            SurfaceTarget::Slide(self.ctx.from),
            &[StyleOp::ZIndex(1), StyleOp::Opacity(0.0)],
        );
        surface.apply_style(
            SurfaceTarget::Slide(self.ctx.to),
            &[StyleOp::ZIndex(2), StyleOp::Opacity(1.0)],
        );

        if let EffectPlan::Grid { .. } = &self.plan {
            surface.apply_style(
                SurfaceTarget::SlideImage(self.ctx.from),
                &[StyleOp::Opacity(1.0)],
            );
            surface.unmount_grid();
        }

        self.phase = RunnerPhase::Done;
    }
}
