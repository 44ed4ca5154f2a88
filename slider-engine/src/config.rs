//! # Config 模块
//!
//! 滑块配置：构造时消费一次，校验后转为 [`EngineSettings`]，
//! 运行期间不再读取。
//!
//! ## 校验决策
//!
//! - 主效果 / 3D 降级效果名未知 → 拒绝（[`ConfigError::UnknownEffect`]）
//! - 3D 降级效果自身依赖 3D → 拒绝（降级链必须一步收敛）
//! - custom 序列中的未知名称 → 单趟过滤丢弃并告警
//!   （产生新列表，不在迭代中原地修改）
//! - custom 序列过滤后为空 → 拒绝

use serde::{Deserialize, Serialize};

use crate::effects::EffectKind;
use crate::error::ConfigError;

/// 滑块配置
///
/// 字段默认值与经典图片轮播的出厂配置一致。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderConfig {
    /// 幻灯片总数（必填，≥ 1）
    pub total_slides: usize,

    /// 滑块最大宽度（像素，应与图片宽度一致）
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// 主效果名称
    #[serde(default = "default_transition")]
    pub transition: String,

    /// custom 效果序列（仅主效果为 `custom` 时使用）
    #[serde(default)]
    pub custom_transitions: Vec<String>,

    /// 3D 降级效果名称（表面支持过渡但不支持 3D 变换时使用）
    #[serde(default = "default_fallback_3d")]
    pub fallback_3d: String,

    /// 透视距离（像素，cube 效果的观察深度）
    #[serde(default = "default_perspective")]
    pub perspective: f32,

    /// 过渡时长（毫秒）
    #[serde(default = "default_transition_duration_ms")]
    pub transition_duration_ms: f32,

    /// 起始幻灯片索引
    #[serde(default)]
    pub start_slide: usize,
}

fn default_max_width() -> u32 {
    1100
}

fn default_transition() -> String {
    "cubeV".to_string()
}

fn default_fallback_3d() -> String {
    "sliceV".to_string()
}

fn default_perspective() -> f32 {
    1000.0
}

fn default_transition_duration_ms() -> f32 {
    800.0
}

impl SliderConfig {
    /// 创建仅指定幻灯片数量的配置，其余取默认值
    pub fn with_total_slides(total_slides: usize) -> Self {
        Self {
            total_slides,
            max_width: default_max_width(),
            transition: default_transition(),
            custom_transitions: Vec::new(),
            fallback_3d: default_fallback_3d(),
            perspective: default_perspective(),
            transition_duration_ms: default_transition_duration_ms(),
            start_slide: 0,
        }
    }

    /// 校验配置并产出引擎设置
    pub fn validate(&self) -> Result<EngineSettings, ConfigError> {
        if self.total_slides == 0 {
            return Err(ConfigError::NoSlides);
        }

        if self.start_slide >= self.total_slides {
            return Err(ConfigError::StartSlideOutOfRange {
                start: self.start_slide,
                total: self.total_slides,
            });
        }

        let transition =
            EffectKind::parse(&self.transition).ok_or_else(|| ConfigError::UnknownEffect {
                name: self.transition.clone(),
            })?;

        let fallback_3d =
            EffectKind::parse(&self.fallback_3d).ok_or_else(|| ConfigError::UnknownEffect {
                name: self.fallback_3d.clone(),
            })?;

        if fallback_3d.requires_3d() {
            return Err(ConfigError::Fallback3dRequires3d {
                name: self.fallback_3d.clone(),
            });
        }

        // 单趟过滤：未知名称与 random/custom 自引用一并丢弃
        let custom_sequence: Vec<EffectKind> = self
            .custom_transitions
            .iter()
            .filter_map(|name| match EffectKind::parse(name) {
                Some(EffectKind::Random | EffectKind::Custom) | None => {
                    tracing::warn!(name = %name, "custom 序列中的无效效果名已丢弃");
                    None
                }
                kind => kind,
            })
            .collect();

        if transition == EffectKind::Custom && custom_sequence.is_empty() {
            return Err(ConfigError::EmptyCustomSequence);
        }

        Ok(EngineSettings {
            total_slides: self.total_slides,
            max_width: self.max_width,
            transition,
            custom_sequence,
            fallback_3d,
            perspective: self.perspective,
            transition_duration_ms: self.transition_duration_ms.max(0.0),
            start_slide: self.start_slide,
        })
    }
}

/// 校验后的引擎设置
///
/// 效果名已解析为 [`EffectKind`]，custom 序列已过滤。
/// 构造后只读。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub total_slides: usize,
    pub max_width: u32,
    pub transition: EffectKind,
    pub custom_sequence: Vec<EffectKind>,
    pub fallback_3d: EffectKind,
    pub perspective: f32,
    pub transition_duration_ms: f32,
    pub start_slide: usize,
}
