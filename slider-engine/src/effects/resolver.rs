//! # Effect Resolver
//!
//! 把配置的效果请求解析为本次过渡**实际执行**的效果。
//!
//! 这是降级决策的**唯一入口**，每次过渡都重新执行
//! （`random`/`custom` 每次结果不同，不允许缓存）：
//!
//! 1. `Random` → 从具体效果目录中均匀抽取一个
//! 2. `Custom` → 取 custom 序列游标所指的效果
//! 3. 解析结果依赖 3D 而表面不支持 → 换用用户声明的 3D 降级效果
//! 4. 表面完全不支持样式过渡 → 一律脚本式淡入淡出，无视原请求几何

use rand::Rng;

use crate::capability::Capabilities;
use crate::effects::cursor::CustomSequenceCursor;
use crate::effects::registry::{CONCRETE, EffectKind};

/// 解析后的效果
///
/// 降级链在一步内收敛：配置校验保证 3D 降级效果不再依赖 3D，
/// 因此这里不存在递归降级。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedEffect {
    /// 由表面的过渡动画执行的具体效果
    Animated(EffectKind),
    /// 脚本式淡入淡出（表面不支持样式过渡时的终极降级）
    ScriptedFade,
}

impl ResolvedEffect {
    /// 解析出的具体效果类型（脚本式淡化无类型）
    pub fn kind(&self) -> Option<EffectKind> {
        match self {
            Self::Animated(kind) => Some(*kind),
            Self::ScriptedFade => None,
        }
    }
}

/// 解析本次过渡实际执行的效果
///
/// # 参数
/// - `requested`: 配置的主效果（可能是 `Random`/`Custom`）
/// - `fallback_3d`: 用户声明的 3D 降级效果（已校验不依赖 3D）
/// - `custom_sequence`: 已校验的 custom 序列（`Custom` 时非空）
/// - `cursor`: custom 序列游标
/// - `caps`: 构造时探测的能力记录
/// - `rng`: `Random` 抽样所用随机源（由引擎持有，便于测试注入种子）
pub fn resolve(
    requested: EffectKind,
    fallback_3d: EffectKind,
    custom_sequence: &[EffectKind],
    cursor: &mut CustomSequenceCursor,
    caps: Capabilities,
    rng: &mut impl Rng,
) -> ResolvedEffect {
    let mut kind = match requested {
        EffectKind::Random => CONCRETE[rng.gen_range(0..CONCRETE.len())],
        EffectKind::Custom => {
            if custom_sequence.is_empty() {
                // 配置校验已拒绝空序列，这里只是防御
                tracing::warn!("custom 序列为空，降级为 fade");
                EffectKind::Fade
            } else {
                custom_sequence[cursor.select(custom_sequence.len())]
            }
        }
        concrete => concrete,
    };

    if kind.requires_3d() && !caps.transforms_3d {
        tracing::debug!(requested = %kind, fallback = %fallback_3d, "表面不支持 3D 变换，换用降级效果");
        kind = fallback_3d;
    }

    if !caps.transitions {
        tracing::debug!(requested = %kind, "表面不支持样式过渡，退化为脚本式淡入淡出");
        return ResolvedEffect::ScriptedFade;
    }

    ResolvedEffect::Animated(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn resolve_simple(requested: EffectKind, caps: Capabilities) -> ResolvedEffect {
        let mut cursor = CustomSequenceCursor::new();
        resolve(
            requested,
            EffectKind::SliceV,
            &[],
            &mut cursor,
            caps,
            &mut rng(),
        )
    }

    // ========== 基本解析 ==========

    #[test]
    fn test_concrete_kind_passes_through() {
        for kind in CONCRETE {
            assert_eq!(
                resolve_simple(kind, Capabilities::full()),
                ResolvedEffect::Animated(kind)
            );
        }
    }

    // ========== 3D 降级 ==========

    #[test]
    fn test_cube_without_3d_uses_declared_fallback() {
        let resolved = resolve_simple(EffectKind::CubeH, Capabilities::flat());
        assert_eq!(resolved, ResolvedEffect::Animated(EffectKind::SliceV));

        let resolved = resolve_simple(EffectKind::CubeV, Capabilities::flat());
        assert_eq!(resolved, ResolvedEffect::Animated(EffectKind::SliceV));
    }

    #[test]
    fn test_resolved_effect_never_requires_3d_without_support() {
        // 含 Random：任何请求在 transforms_3d = false 下都不得解析出 3D 效果
        let caps = Capabilities::flat();
        let mut cursor = CustomSequenceCursor::new();
        let mut rng = rng();

        for _ in 0..200 {
            let resolved = resolve(
                EffectKind::Random,
                EffectKind::Fade,
                &[],
                &mut cursor,
                caps,
                &mut rng,
            );
            if let Some(kind) = resolved.kind() {
                assert!(!kind.requires_3d(), "解析出了 3D 效果 {kind}");
            }
        }
    }

    #[test]
    fn test_non_3d_kind_ignores_fallback() {
        let resolved = resolve_simple(EffectKind::Fan, Capabilities::flat());
        assert_eq!(resolved, ResolvedEffect::Animated(EffectKind::Fan));
    }

    // ========== 无过渡支持 ==========

    #[test]
    fn test_no_transitions_always_scripted_fade() {
        for kind in CONCRETE {
            assert_eq!(
                resolve_simple(kind, Capabilities::none()),
                ResolvedEffect::ScriptedFade,
                "{kind}"
            );
        }
        assert_eq!(
            resolve_simple(EffectKind::Random, Capabilities::none()),
            ResolvedEffect::ScriptedFade
        );
    }

    // ========== random ==========

    #[test]
    fn test_random_samples_concrete_catalog() {
        let mut cursor = CustomSequenceCursor::new();
        let mut rng = rng();
        let mut seen = std::collections::HashSet::new();

        for _ in 0..500 {
            let resolved = resolve(
                EffectKind::Random,
                EffectKind::SliceV,
                &[],
                &mut cursor,
                Capabilities::full(),
                &mut rng,
            );
            let kind = resolved.kind().expect("random 在全能力下总是具体效果");
            assert!(CONCRETE.contains(&kind));
            assert!(!matches!(kind, EffectKind::Random | EffectKind::Custom));
            seen.insert(kind.name());
        }

        // 500 次抽样应当覆盖全部 13 个具体效果
        assert_eq!(seen.len(), CONCRETE.len());
    }

    #[test]
    fn test_random_is_deterministic_per_seed() {
        let mut cursor_a = CustomSequenceCursor::new();
        let mut cursor_b = CustomSequenceCursor::new();
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let a = resolve(
                EffectKind::Random,
                EffectKind::SliceV,
                &[],
                &mut cursor_a,
                Capabilities::full(),
                &mut rng_a,
            );
            let b = resolve(
                EffectKind::Random,
                EffectKind::SliceV,
                &[],
                &mut cursor_b,
                Capabilities::full(),
                &mut rng_b,
            );
            assert_eq!(a, b);
        }
    }

    // ========== custom ==========

    #[test]
    fn test_custom_follows_cursor_and_wraps() {
        // 序列 ["fade", "cubeV"]：连续三次 next 解析为 fade, cubeV, fade
        let sequence = [EffectKind::Fade, EffectKind::CubeV];
        let mut cursor = CustomSequenceCursor::new();
        let mut rng = rng();
        let caps = Capabilities::full();

        let mut resolved = Vec::new();
        for _ in 0..3 {
            cursor.bump(crate::effects::request::Direction::Forward);
            resolved.push(resolve(
                EffectKind::Custom,
                EffectKind::SliceV,
                &sequence,
                &mut cursor,
                caps,
                &mut rng,
            ));
        }

        assert_eq!(
            resolved,
            [
                ResolvedEffect::Animated(EffectKind::Fade),
                ResolvedEffect::Animated(EffectKind::CubeV),
                ResolvedEffect::Animated(EffectKind::Fade),
            ]
        );
    }

    #[test]
    fn test_custom_entry_still_subject_to_3d_fallback() {
        let sequence = [EffectKind::CubeV];
        let mut cursor = CustomSequenceCursor::new();
        cursor.bump(crate::effects::request::Direction::Forward);

        let resolved = resolve(
            EffectKind::Custom,
            EffectKind::BlindH,
            &sequence,
            &mut cursor,
            Capabilities::flat(),
            &mut rng(),
        );
        assert_eq!(resolved, ResolvedEffect::Animated(EffectKind::BlindH));
    }
}
