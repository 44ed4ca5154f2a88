//! # Effect Registry
//!
//! 效果目录与几何参数表。
//! 这是所有效果名称、分类、几何参数的**唯一来源**。
//!
//! ## 语义说明
//!
//! - 网格族效果（slice/slide/scale/blockScale/kaleidoscope/fan/blind）
//!   共享同一套参数化：列数、行数、旋转、平移、缩放、目标不透明度
//! - cube 族效果以半边长为参数，给出新旧幻灯片与容器的旋转/平移
//! - `Fade` 无几何参数
//! - `Random` / `Custom` 不是具体效果，由 resolver 在每次过渡前展开

use serde::{Deserialize, Serialize};

use crate::effects::request::Direction;

/// 效果类型
///
/// 固定目录的带标签枚举。效果名在配置时解析
/// （[`EffectKind::parse`]），未知名称在配置阶段被拒绝，
/// 运行时不做字符串分发。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    /// 交叉淡化
    Fade,
    /// 水平立方体旋转（3D）
    CubeH,
    /// 垂直立方体旋转（3D）
    CubeV,
    /// 水平切片（1×8 网格，向左滑出）
    SliceH,
    /// 垂直切片（10×1 网格，向下滑出）
    SliceV,
    /// 水平滑动（整片平移，方向跟随过渡方向）
    SlideH,
    /// 垂直滑动
    SlideV,
    /// 放大淡出
    Scale,
    /// 分块缩小淡出（8×6 网格）
    BlockScale,
    /// 万花筒（10×8 网格原位淡出）
    Kaleidoscope,
    /// 扇形（1×10 网格旋转扫出）
    Fan,
    /// 水平百叶窗（1×8 网格）
    BlindH,
    /// 垂直百叶窗（10×1 网格）
    BlindV,
    /// 每次过渡随机抽取一个具体效果
    Random,
    /// 按用户声明的序列循环取效果
    Custom,
}

/// 可直接执行的具体效果（不含 `Random` / `Custom`）
///
/// `Random` 的抽样空间。
pub const CONCRETE: [EffectKind; 13] = [
    EffectKind::CubeH,
    EffectKind::CubeV,
    EffectKind::Fade,
    EffectKind::SliceH,
    EffectKind::SliceV,
    EffectKind::SlideH,
    EffectKind::SlideV,
    EffectKind::Scale,
    EffectKind::BlockScale,
    EffectKind::Kaleidoscope,
    EffectKind::Fan,
    EffectKind::BlindH,
    EffectKind::BlindV,
];

impl EffectKind {
    /// 按名称解析效果（大小写不敏感）
    ///
    /// 未知名称返回 `None`，由配置校验决定拒绝还是丢弃。
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "fade" => Some(Self::Fade),
            "cubeh" => Some(Self::CubeH),
            "cubev" => Some(Self::CubeV),
            "sliceh" => Some(Self::SliceH),
            "slicev" => Some(Self::SliceV),
            "slideh" => Some(Self::SlideH),
            "slidev" => Some(Self::SlideV),
            "scale" => Some(Self::Scale),
            "blockscale" => Some(Self::BlockScale),
            "kaleidoscope" => Some(Self::Kaleidoscope),
            "fan" => Some(Self::Fan),
            "blindh" => Some(Self::BlindH),
            "blindv" => Some(Self::BlindV),
            "random" => Some(Self::Random),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    /// 效果的规范名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::CubeH => "cubeH",
            Self::CubeV => "cubeV",
            Self::SliceH => "sliceH",
            Self::SliceV => "sliceV",
            Self::SlideH => "slideH",
            Self::SlideV => "slideV",
            Self::Scale => "scale",
            Self::BlockScale => "blockScale",
            Self::Kaleidoscope => "kaleidoscope",
            Self::Fan => "fan",
            Self::BlindH => "blindH",
            Self::BlindV => "blindV",
            Self::Random => "random",
            Self::Custom => "custom",
        }
    }

    /// 是否依赖 3D 几何变换
    pub fn requires_3d(&self) -> bool {
        matches!(self, Self::CubeH | Self::CubeV)
    }

    /// 是否属于网格族效果
    pub fn is_grid(&self) -> bool {
        self.grid_spec(Direction::Forward).is_some()
    }

    /// 是否属于 cube 族效果
    pub fn is_cube(&self) -> bool {
        self.requires_3d()
    }

    /// 网格族效果的几何参数
    ///
    /// 仅 slideH/slideV 的平移方向依赖过渡方向：
    /// 向前为负整幅平移，向后为正整幅平移。
    pub fn grid_spec(&self, direction: Direction) -> Option<GridSpec> {
        use Translate::{FullExtent, NegFullExtent, Px};

        let slide_dir = match direction {
            Direction::Forward => NegFullExtent,
            Direction::Backward => FullExtent,
        };

        let spec = match self {
            Self::SliceH => GridSpec::new(1, 8, 0.0, NegFullExtent, Px(0.0), 1.0, 0.0),
            Self::SliceV => GridSpec::new(10, 1, 0.0, Px(0.0), FullExtent, 1.0, 0.0),
            Self::SlideV => GridSpec::new(1, 1, 0.0, Px(0.0), slide_dir, 1.0, 1.0),
            Self::SlideH => GridSpec::new(1, 1, 0.0, slide_dir, Px(0.0), 1.0, 1.0),
            Self::Scale => GridSpec::new(1, 1, 0.0, Px(0.0), Px(0.0), 1.5, 0.0),
            Self::BlockScale => GridSpec::new(8, 6, 0.0, Px(0.0), Px(0.0), 0.6, 0.0),
            Self::Kaleidoscope => GridSpec::new(10, 8, 0.0, Px(0.0), Px(0.0), 1.0, 0.0),
            Self::Fan => GridSpec::new(1, 10, 45.0, Px(100.0), Px(0.0), 1.0, 0.0),
            Self::BlindV => GridSpec::new(1, 8, 0.0, Px(0.0), Px(0.0), 0.7, 0.0),
            Self::BlindH => GridSpec::new(10, 1, 0.0, Px(0.0), Px(0.0), 0.7, 0.0),
            _ => return None,
        };

        Some(spec)
    }

    /// cube 族效果的几何参数
    ///
    /// `half_dimension` 为旋转轴向上幻灯片边长的一半：
    /// cubeH 取宽度之半，cubeV 取高度之半。
    pub fn cube_spec(&self, direction: Direction, half_dimension: f32) -> Option<CubeSpec> {
        let d = half_dimension;

        let spec = match (self, direction) {
            (Self::CubeH, Direction::Forward) => CubeSpec {
                translate_z: d,
                next_translate_x: d,
                next_translate_y: 0.0,
                next_rotate_x: 0.0,
                next_rotate_y: 90.0,
                wrap_rotate_x: 0.0,
                wrap_rotate_y: -90.0,
            },
            (Self::CubeH, Direction::Backward) => CubeSpec {
                translate_z: d,
                next_translate_x: -d,
                next_translate_y: 0.0,
                next_rotate_x: 0.0,
                next_rotate_y: -90.0,
                wrap_rotate_x: 0.0,
                wrap_rotate_y: 90.0,
            },
            (Self::CubeV, Direction::Forward) => CubeSpec {
                translate_z: d,
                next_translate_x: 0.0,
                next_translate_y: -d,
                next_rotate_x: 90.0,
                next_rotate_y: 0.0,
                wrap_rotate_x: -90.0,
                wrap_rotate_y: 0.0,
            },
            (Self::CubeV, Direction::Backward) => CubeSpec {
                translate_z: d,
                next_translate_x: 0.0,
                next_translate_y: d,
                next_rotate_x: -90.0,
                next_rotate_y: 0.0,
                wrap_rotate_x: 90.0,
                wrap_rotate_y: 0.0,
            },
            _ => return None,
        };

        Some(spec)
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 平移量
///
/// 网格效果的平移可以是具体像素，也可以是"整幅"哨兵，
/// 在运行时按图像的像素尺寸解析。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Translate {
    /// 具体像素值，原样通过
    Px(f32),
    /// 正向整幅（解析为 +图宽 或 +图高）
    FullExtent,
    /// 负向整幅（解析为 −图宽 或 −图高）
    NegFullExtent,
}

impl Translate {
    /// 按该轴向的图像尺寸解析为像素值
    pub fn resolve(self, extent: f32) -> f32 {
        match self {
            Self::Px(px) => px,
            Self::FullExtent => extent,
            Self::NegFullExtent => -extent,
        }
    }
}

/// 网格族效果的几何参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// 列数
    pub cols: u32,
    /// 行数
    pub rows: u32,
    /// 平面旋转（度）
    pub rotate_deg: f32,
    /// 横向平移
    pub translate_x: Translate,
    /// 纵向平移
    pub translate_y: Translate,
    /// 目标缩放
    pub scale: f32,
    /// 目标不透明度
    pub opacity: f32,
}

impl GridSpec {
    fn new(
        cols: u32,
        rows: u32,
        rotate_deg: f32,
        translate_x: Translate,
        translate_y: Translate,
        scale: f32,
        opacity: f32,
    ) -> Self {
        Self {
            cols,
            rows,
            rotate_deg,
            translate_x,
            translate_y,
            scale,
            opacity,
        }
    }
}

/// cube 族效果的几何参数
///
/// 三组数值分别作用于旧幻灯片（translate_z）、新幻灯片
/// （next_*，预先摆到立方体相邻面）和滑块容器（wrap_*，
/// 执行阶段整体旋转到新面）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubeSpec {
    /// 旧幻灯片沿 Z 轴外推的距离（半边长）
    pub translate_z: f32,
    /// 新幻灯片的横向平移
    pub next_translate_x: f32,
    /// 新幻灯片的纵向平移
    pub next_translate_y: f32,
    /// 新幻灯片绕 X 轴的预旋转（度）
    pub next_rotate_x: f32,
    /// 新幻灯片绕 Y 轴的预旋转（度）
    pub next_rotate_y: f32,
    /// 容器绕 X 轴的目标旋转（度）
    pub wrap_rotate_x: f32,
    /// 容器绕 Y 轴的目标旋转（度）
    pub wrap_rotate_y: f32,
}
