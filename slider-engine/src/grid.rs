//! # Grid 模块
//!
//! 网格分割算法：把幻灯片主图切成若干独立计时的分块，
//! 供网格族效果（slice/blind/fan/kaleidoscope/blockScale 等）使用。
//!
//! ## 不变量
//!
//! - 每行分块宽度之和恰好等于图像宽度，每列分块高度之和恰好等于
//!   图像高度：余数像素按"向上取整块"分给靠前的行列，绝不丢弃
//! - 交错延迟沿对角线递增：左上角分块延迟为 0，右下角最后动画，
//!   且所有延迟严格小于过渡总时长
//!
//! 分割结果在过渡 setup 阶段创建，reset 阶段销毁，从不跨过渡复用。

use serde::{Deserialize, Serialize};

/// 角落标记
///
/// 仅作元数据供宿主使用（例如圆角样式），不参与任何计算。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// 单个分块
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// 像素宽度
    pub width: u32,
    /// 像素高度
    pub height: u32,
    /// 相对图像左上角的纵向位置
    pub top: u32,
    /// 相对图像左上角的横向位置
    pub left: u32,
    /// 背景横向偏移（等于 `left`，用于展示整图对应裁剪）
    pub background_offset_x: u32,
    /// 背景纵向偏移（等于 `top`）
    pub background_offset_y: u32,
    /// 交错延迟（毫秒）
    pub stagger_delay_ms: f32,
    /// 角落标记（非角落分块为 `None`）
    pub corner: Option<Corner>,
}

/// 网格分割结果
///
/// 分块按**行主序**排列，数量为 `cols × rows`。
/// 最后一个分块（右下角）是过渡完成监听的目标。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPartition {
    pub cols: u32,
    pub rows: u32,
    pub image_width: u32,
    pub image_height: u32,
    pub tiles: Vec<Tile>,
}

impl GridPartition {
    /// 按 (row, col) 取分块
    pub fn tile(&self, row: u32, col: u32) -> &Tile {
        &self.tiles[(row * self.cols + col) as usize]
    }

    /// 最后一个分块（右下角）的行主序下标
    pub fn last_tile_index(&self) -> usize {
        self.tiles.len() - 1
    }

    /// 最大交错延迟（毫秒）
    pub fn max_stagger_ms(&self) -> f32 {
        self.tiles
            .last()
            .map(|t| t.stagger_delay_ms)
            .unwrap_or(0.0)
    }
}

/// 把图像分割为 `cols × rows` 的网格
///
/// 列宽以 `floor(width / cols)` 为基准，余数按向上取整的块大小
/// 依次补给靠前的列直到用尽；行高独立地用同一算法。
/// 这保证了精确覆盖：无缝隙、无重叠、无丢弃像素。
///
/// 交错延迟为 `duration_ms / (cols + rows) * (col + row)`，
/// 形成从左上到右下的对角波。
///
/// # 参数
/// - `cols` / `rows`: 列数、行数（≥ 1，由效果目录保证）
/// - `image_width` / `image_height`: 图像像素尺寸
/// - `duration_ms`: 过渡总时长，仅用于计算交错延迟
pub fn partition(
    cols: u32,
    rows: u32,
    image_width: u32,
    image_height: u32,
    duration_ms: f32,
) -> GridPartition {
    debug_assert!(cols >= 1 && rows >= 1);

    let col_widths = split_extent(image_width, cols);
    let row_heights = split_extent(image_height, rows);

    // 每个分块的延迟步长
    let step_ms = duration_ms / (cols + rows) as f32;

    let mut tiles = Vec::with_capacity((cols * rows) as usize);
    let mut top = 0u32;

    for (row, &height) in row_heights.iter().enumerate() {
        let mut left = 0u32;

        for (col, &width) in col_widths.iter().enumerate() {
            tiles.push(Tile {
                width,
                height,
                top,
                left,
                background_offset_x: left,
                background_offset_y: top,
                stagger_delay_ms: step_ms * (col + row) as f32,
                corner: corner_tag(row as u32, col as u32, rows, cols),
            });

            left += width;
        }

        top += height;
    }

    GridPartition {
        cols,
        rows,
        image_width,
        image_height,
        tiles,
    }
}

/// 把 `extent` 个像素分成 `parts` 份
///
/// 基准为向下取整，余数按 `ceil(remainder / parts)` 的块大小
/// 依次补给靠前的份，直到余数用尽。
fn split_extent(extent: u32, parts: u32) -> Vec<u32> {
    let base = extent / parts;
    let mut remainder = extent - base * parts;
    let chunk = remainder.div_ceil(parts);

    (0..parts)
        .map(|_| {
            let add = chunk.min(remainder);
            remainder -= add;
            base + add
        })
        .collect()
}

fn corner_tag(row: u32, col: u32, rows: u32, cols: u32) -> Option<Corner> {
    match (row == 0, row == rows - 1, col == 0, col == cols - 1) {
        (true, _, true, _) => Some(Corner::TopLeft),
        (true, _, _, true) => Some(Corner::TopRight),
        (_, true, true, _) => Some(Corner::BottomLeft),
        (_, true, _, true) => Some(Corner::BottomRight),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 校验精确覆盖不变量：行宽之和 = 图宽，列高之和 = 图高，
    /// 且位置与前序分块的尺寸严格衔接
    fn assert_exact_coverage(p: &GridPartition) {
        for row in 0..p.rows {
            let mut left = 0u32;
            for col in 0..p.cols {
                let tile = p.tile(row, col);
                assert_eq!(tile.left, left, "row {row} col {col} 横向错位");
                assert_eq!(tile.background_offset_x, tile.left);
                assert_eq!(tile.background_offset_y, tile.top);
                left += tile.width;
            }
            assert_eq!(left, p.image_width, "row {row} 宽度和不等于图宽");
        }

        for col in 0..p.cols {
            let mut top = 0u32;
            for row in 0..p.rows {
                let tile = p.tile(row, col);
                assert_eq!(tile.top, top, "row {row} col {col} 纵向错位");
                top += tile.height;
            }
            assert_eq!(top, p.image_height, "col {col} 高度和不等于图高");
        }
    }

    // ========== 覆盖不变量 ==========

    #[test]
    fn test_even_split_exact_coverage() {
        let p = partition(10, 8, 1000, 800, 800.0);
        assert_eq!(p.tiles.len(), 80);
        assert_exact_coverage(&p);

        // 整除情况下所有分块等大
        for tile in &p.tiles {
            assert_eq!(tile.width, 100);
            assert_eq!(tile.height, 100);
        }
    }

    #[test]
    fn test_remainder_goes_to_leading_tiles() {
        // 1003 / 10 = 100 余 3：前 3 列 101，其余 100
        let p = partition(10, 1, 1003, 200, 800.0);
        assert_exact_coverage(&p);

        let widths: Vec<u32> = p.tiles.iter().map(|t| t.width).collect();
        assert_eq!(widths, [101, 101, 101, 100, 100, 100, 100, 100, 100, 100]);
    }

    #[test]
    fn test_large_remainder_ceil_chunks() {
        // 17 / 5 = 3 余 2，chunk = ceil(2/5) = 1：前 2 份 4，其余 3
        assert_eq!(split_extent(17, 5), [4, 4, 3, 3, 3]);
        // 23 / 4 = 5 余 3，chunk = 1：前 3 份 6
        assert_eq!(split_extent(23, 4), [6, 6, 6, 5]);
    }

    #[test]
    fn test_awkward_sizes_exact_coverage() {
        for (cols, rows, w, h) in [
            (7u32, 3u32, 509u32, 217u32),
            (8, 6, 1100, 733),
            (1, 8, 997, 601),
            (10, 8, 13, 9),
            (3, 3, 2, 2),
        ] {
            let p = partition(cols, rows, w, h, 800.0);
            assert_eq!(p.tiles.len(), (cols * rows) as usize);
            assert_exact_coverage(&p);
        }
    }

    // ========== 交错延迟 ==========

    #[test]
    fn test_stagger_diagonal_wave() {
        let duration = 800.0;
        let p = partition(10, 8, 1000, 800, duration);

        // 左上角延迟为 0
        assert_eq!(p.tile(0, 0).stagger_delay_ms, 0.0);

        // 对 col + row 单调非减，且严格小于总时长
        for row in 0..8 {
            for col in 0..10 {
                let tile = p.tile(row, col);
                let expected = duration / 18.0 * (col + row) as f32;
                assert!((tile.stagger_delay_ms - expected).abs() < 1e-3);
                assert!(tile.stagger_delay_ms < duration);
            }
        }

        // 右下角延迟最大
        assert_eq!(
            p.max_stagger_ms(),
            p.tile(7, 9).stagger_delay_ms
        );
    }

    #[test]
    fn test_ten_column_slice_layout() {
        // 10×1、1000×200：10 个 100×200 分块，
        // 延迟步长为 duration / (cols + rows) = d/11
        let duration = 800.0;
        let p = partition(10, 1, 1000, 200, duration);

        assert_eq!(p.tiles.len(), 10);
        for (i, tile) in p.tiles.iter().enumerate() {
            assert_eq!(tile.width, 100);
            assert_eq!(tile.height, 200);
            let expected = duration / 11.0 * i as f32;
            assert!((tile.stagger_delay_ms - expected).abs() < 1e-3);
        }
    }

    // ========== 角落标记 ==========

    #[test]
    fn test_corner_tags() {
        let p = partition(4, 3, 400, 300, 800.0);

        assert_eq!(p.tile(0, 0).corner, Some(Corner::TopLeft));
        assert_eq!(p.tile(0, 3).corner, Some(Corner::TopRight));
        assert_eq!(p.tile(2, 0).corner, Some(Corner::BottomLeft));
        assert_eq!(p.tile(2, 3).corner, Some(Corner::BottomRight));
        assert_eq!(p.tile(1, 1).corner, None);
        assert_eq!(p.tile(0, 1).corner, None);

        // 最后一个分块就是右下角（完成监听目标）
        assert_eq!(
            p.tiles[p.last_tile_index()].corner,
            Some(Corner::BottomRight)
        );
    }

    #[test]
    fn test_single_tile_is_top_left() {
        // 1×1 网格（slideH/slideV/scale 使用）：唯一分块标记为左上角
        let p = partition(1, 1, 640, 480, 800.0);
        assert_eq!(p.tiles.len(), 1);
        assert_eq!(p.tiles[0].corner, Some(Corner::TopLeft));
        assert_eq!(p.tiles[0].width, 640);
        assert_eq!(p.tiles[0].height, 480);
        assert_eq!(p.tiles[0].stagger_delay_ms, 0.0);
    }
}
