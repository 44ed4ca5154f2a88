//! # Engine 模块
//!
//! 滑块过渡引擎的对外入口。
//!
//! ## 执行模型
//!
//! 引擎不持有时钟也不阻塞：`next`/`prev`/`go_to` 立即返回，
//! 视觉副作用经 [`RenderSurface`] 下发，完成靠宿主把表面产生的
//! 通知（携带引擎发放的 token）送回 [`handle_timer`] /
//! [`handle_transition_end`]。过渡结束后宿主从 [`take_events`]
//! 读取 [`SliderEvent`]（自动轮播等外部协作者以此为恢复时机）。
//!
//! ## 并发与顺序保证
//!
//! 单线程协作式：任意时刻至多一个活动过渡；忙碌期间的请求被
//! 静默丢弃而非排队，调用方如有需要应在完成事件后重发。
//! 过渡一旦开始必然走到完成，不支持取消。
//!
//! [`handle_timer`]: SliderEngine::handle_timer
//! [`handle_transition_end`]: SliderEngine::handle_transition_end
//! [`take_events`]: SliderEngine::take_events

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::capability::{Capabilities, CapabilityOracle};
use crate::config::{EngineSettings, SliderConfig};
use crate::effects::{
    CustomSequenceCursor, Direction, EffectKind, TransitionRequest, resolve,
};
use crate::error::{SliderResult, TransitionError};
use crate::runner::{RunnerStatus, RunnerTokens, TransitionContext, TransitionRunner};
use crate::state::SliderState;
use crate::surface::{CompletionToken, RenderSurface, TimerToken};

/// 引擎对外发布的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "event")]
pub enum SliderEvent {
    /// 过渡开始（Setup 进入时发布）
    TransitionStarted { from: usize, to: usize },
    /// 过渡结束（索引已提交、忙碌标志已清除）
    TransitionEnded { from: usize, to: usize },
}

/// 滑块过渡引擎
///
/// # 使用示例
///
/// ```ignore
/// let config = SliderConfig::with_total_slides(5);
/// let mut engine = SliderEngine::new(config, &oracle)?;
///
/// engine.next(&mut surface);
///
/// // 宿主把表面通知送回引擎……
/// engine.handle_transition_end(token, &mut surface);
///
/// for event in engine.take_events() {
///     // TransitionStarted / TransitionEnded
/// }
/// ```
pub struct SliderEngine {
    settings: EngineSettings,
    caps: Capabilities,
    state: SliderState,
    cursor: CustomSequenceCursor,
    rng: StdRng,
    runner: Option<TransitionRunner>,
    events: Vec<SliderEvent>,
    /// token 单调分配计数器
    next_token: u64,
}

impl SliderEngine {
    /// 创建引擎：校验配置，并通过 oracle 探测一次能力
    pub fn new(config: SliderConfig, oracle: &dyn CapabilityOracle) -> SliderResult<Self> {
        Self::with_capabilities(config, Capabilities::detect(oracle))
    }

    /// 以现成的能力记录创建引擎（测试或能力已知的宿主）
    pub fn with_capabilities(config: SliderConfig, caps: Capabilities) -> SliderResult<Self> {
        let settings = config.validate()?;
        let state = SliderState::new(settings.total_slides, settings.start_slide);

        Ok(Self {
            settings,
            caps,
            state,
            cursor: CustomSequenceCursor::new(),
            rng: StdRng::from_entropy(),
            runner: None,
            events: Vec::new(),
            next_token: 1,
        })
    }

    /// 固定 `random` 效果的随机种子（测试用）
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // ========== 查询 ==========

    /// 当前幻灯片索引
    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    /// 幻灯片总数
    pub fn total_slides(&self) -> usize {
        self.state.total_slides()
    }

    /// 是否有过渡正在进行
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// 构造时探测的能力记录
    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    /// 校验后的引擎设置
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// 取走积累的事件
    pub fn take_events(&mut self) -> Vec<SliderEvent> {
        std::mem::take(&mut self.events)
    }

    // ========== 过渡请求 ==========

    /// 切换到下一张（末张环绕到首张）
    pub fn next(&mut self, surface: &mut dyn RenderSurface) {
        if self.settings.transition == EffectKind::Custom {
            self.cursor.bump(Direction::Forward);
        }

        let request = TransitionRequest {
            target_index: self.state.next_index(),
            direction: Direction::Forward,
        };
        self.start_transition(request, surface);
    }

    /// 切换到上一张（首张环绕到末张）
    pub fn prev(&mut self, surface: &mut dyn RenderSurface) {
        if self.settings.transition == EffectKind::Custom {
            self.cursor.bump(Direction::Backward);
        }

        let request = TransitionRequest {
            target_index: self.state.prev_index(),
            direction: Direction::Backward,
        };
        self.start_transition(request, surface);
    }

    /// 切换到指定索引
    ///
    /// 方向未指定时按目标相对当前的位置推断。
    /// 越界索引属于调用方契约违规，fail fast；
    /// 忙碌中或目标即当前索引的请求是静默空操作。
    pub fn go_to(
        &mut self,
        target_index: usize,
        direction: Option<Direction>,
        surface: &mut dyn RenderSurface,
    ) -> SliderResult<()> {
        if target_index >= self.state.total_slides() {
            return Err(TransitionError::TargetOutOfRange {
                target: target_index,
                total: self.state.total_slides(),
            }
            .into());
        }

        let direction =
            direction.unwrap_or_else(|| Direction::infer(self.state.current_index(), target_index));
        self.start_transition(
            TransitionRequest {
                target_index,
                direction,
            },
            surface,
        );
        Ok(())
    }

    fn start_transition(&mut self, request: TransitionRequest, surface: &mut dyn RenderSurface) {
        if self.state.is_busy() {
            tracing::debug!(target = request.target_index, "过渡进行中，丢弃请求");
            return;
        }
        if request.target_index == self.state.current_index() {
            tracing::debug!(target = request.target_index, "目标即当前幻灯片，忽略");
            return;
        }

        // 每次过渡重新解析（random/custom 逐次变化）
        let effect = resolve(
            self.settings.transition,
            self.settings.fallback_3d,
            &self.settings.custom_sequence,
            &mut self.cursor,
            self.caps,
            &mut self.rng,
        );

        let from = self.state.current_index();
        let to = request.target_index;

        self.state.begin_transition();
        self.events.push(SliderEvent::TransitionStarted { from, to });

        let ctx = TransitionContext {
            from,
            to,
            direction: request.direction,
            effect,
            duration_ms: self.settings.transition_duration_ms,
            perspective: self.settings.perspective,
        };
        let tokens = self.allocate_tokens();
        self.runner = Some(TransitionRunner::start(ctx, tokens, surface));
    }

    // ========== 宿主通知 ==========

    /// 定时器到期通知（settle / 帧 / watchdog）
    pub fn handle_timer(&mut self, token: TimerToken, surface: &mut dyn RenderSurface) {
        let Some(runner) = self.runner.as_mut() else {
            tracing::trace!(?token, "无活动过渡，忽略定时器");
            return;
        };

        if runner.handle_timer(token, surface) == RunnerStatus::Completed {
            self.complete_transition();
        }
    }

    /// 过渡完成事件通知
    pub fn handle_transition_end(
        &mut self,
        token: CompletionToken,
        surface: &mut dyn RenderSurface,
    ) {
        let Some(runner) = self.runner.as_mut() else {
            tracing::trace!(?token, "无活动过渡，忽略完成事件");
            return;
        };

        if runner.handle_transition_end(token, surface) == RunnerStatus::Completed {
            self.complete_transition();
        }
    }

    /// 唯一的状态提交点：写入新索引、清除忙碌标志、发布结束事件
    fn complete_transition(&mut self) {
        let Some(runner) = self.runner.take() else {
            return;
        };

        let ctx = runner.context();
        self.state.commit(ctx.to);
        self.events.push(SliderEvent::TransitionEnded {
            from: ctx.from,
            to: ctx.to,
        });
    }

    /// 为一次过渡分配 4 个 token（settle / frame / watchdog / completion）
    fn allocate_tokens(&mut self) -> RunnerTokens {
        let base = self.next_token;
        self.next_token += 4;

        RunnerTokens {
            settle: TimerToken(base),
            frame: TimerToken(base + 1),
            watchdog: TimerToken(base + 2),
            completion: CompletionToken(base + 3),
        }
    }
}

impl std::fmt::Debug for SliderEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderEngine")
            .field("current_index", &self.state.current_index())
            .field("total_slides", &self.state.total_slides())
            .field("busy", &self.state.is_busy())
            .field("transition", &self.settings.transition)
            .finish()
    }
}
