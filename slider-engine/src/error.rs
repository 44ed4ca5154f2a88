//! # Error 模块
//!
//! 定义 slider-engine 中使用的错误类型。

use thiserror::Error;

/// 配置错误
///
/// 在引擎构造时校验配置产生，属于致命错误：
/// 配置不合法的引擎不会被创建。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 幻灯片数量为 0
    #[error("幻灯片数量不能为 0")]
    NoSlides,

    /// 起始索引越界
    #[error("起始索引 {start} 超出范围（共 {total} 张幻灯片）")]
    StartSlideOutOfRange { start: usize, total: usize },

    /// 未知的效果名称（主效果或 3D 降级效果）
    #[error("未知的效果名称 '{name}'")]
    UnknownEffect { name: String },

    /// 3D 降级效果本身依赖 3D 变换
    ///
    /// 降级链必须在一步内收敛，不允许继续降级。
    #[error("3D 降级效果 '{name}' 本身依赖 3D 变换")]
    Fallback3dRequires3d { name: String },

    /// custom 序列过滤无效名称后为空
    #[error("custom 效果序列过滤后为空")]
    EmptyCustomSequence,
}

/// 过渡请求错误
///
/// 调用方违反契约时产生（fail fast）。
/// 通过 `next`/`prev` 发起的请求索引总是经过取模归一化，
/// 只有直接调用 `go_to` 才可能触发。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// 目标索引越界
    #[error("目标索引 {target} 超出范围（共 {total} 张幻灯片）")]
    TargetOutOfRange { target: usize, total: usize },
}

/// slider-engine 统一错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SliderError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 过渡请求错误
    #[error("过渡请求错误: {0}")]
    Transition(#[from] TransitionError),
}

/// slider-engine 统一 Result 类型
pub type SliderResult<T> = Result<T, SliderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::UnknownEffect {
            name: "swirl".to_string(),
        };
        assert_eq!(err.to_string(), "未知的效果名称 'swirl'");
    }

    #[test]
    fn test_error_conversion() {
        let err: SliderError = ConfigError::NoSlides.into();
        assert!(matches!(err, SliderError::Config(ConfigError::NoSlides)));

        let err: SliderError = TransitionError::TargetOutOfRange { target: 7, total: 5 }.into();
        assert!(matches!(err, SliderError::Transition(_)));
    }
}
