// petrovol\crates\pv_surface\src/grid.rs

//! 规则高程网格
//!
//! 插值请求的产物：`x`/`y` 轴坐标数组加按 y 行优先存储的 `z` 值矩阵。
//! 生成后不可变，可视化层直接消费其 x/y/z 数组渲染等值线或三维视图。
//!
//! 无数据单元（如被关注区裁剪的节点）以 NaN 标记。

use serde::{Deserialize, Serialize};

/// 规则高程网格
///
/// `z[j][i]` 对应节点 `(x[i], y[j])`，行优先（按 y）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevationGrid {
    /// X 轴节点坐标（长度 nx）
    pub x: Vec<f64>,
    /// Y 轴节点坐标（长度 ny）
    pub y: Vec<f64>,
    /// 节点值，行优先（ny 行 × nx 列），NaN 为无数据
    pub z: Vec<Vec<f64>>,
}

impl ElevationGrid {
    /// 列数 (nx)
    #[must_use]
    pub fn nx(&self) -> usize {
        self.x.len()
    }

    /// 行数 (ny)
    #[must_use]
    pub fn ny(&self) -> usize {
        self.y.len()
    }

    /// 读取节点值（越界返回 None）
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.z.get(row).and_then(|r| r.get(col)).copied()
    }

    /// X 方向节点间距
    ///
    /// # Panics
    /// 列数少于 2 时为调用方契约违例。
    #[must_use]
    pub fn dx(&self) -> f64 {
        assert!(self.x.len() >= 2, "网格列数不足");
        self.x[1] - self.x[0]
    }

    /// Y 方向节点间距
    ///
    /// # Panics
    /// 行数少于 2 时为调用方契约违例。
    #[must_use]
    pub fn dy(&self) -> f64 {
        assert!(self.y.len() >= 2, "网格行数不足");
        self.y[1] - self.y[0]
    }

    /// 有限值均值（忽略 NaN）
    ///
    /// 无有限值时返回 None。
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for row in &self.z {
            for &v in row {
                if v.is_finite() {
                    sum += v;
                    count += 1;
                }
            }
        }
        if count > 0 {
            Some(sum / count as f64)
        } else {
            None
        }
    }

    /// 有限值数量
    #[must_use]
    pub fn finite_count(&self) -> usize {
        self.z
            .iter()
            .flat_map(|row| row.iter())
            .filter(|v| v.is_finite())
            .count()
    }

    /// 有限值范围 (min, max)
    ///
    /// 无有限值时返回 None。
    #[must_use]
    pub fn range(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut any = false;
        for row in &self.z {
            for &v in row {
                if v.is_finite() {
                    min = min.min(v);
                    max = max.max(v);
                    any = true;
                }
            }
        }
        if any {
            Some((min, max))
        } else {
            None
        }
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> ElevationGrid {
        ElevationGrid {
            x: vec![0.0, 10.0, 20.0],
            y: vec![0.0, 10.0],
            z: vec![vec![1.0, 2.0, 3.0], vec![4.0, f64::NAN, 6.0]],
        }
    }

    #[test]
    fn test_dimensions() {
        let grid = sample_grid();
        assert_eq!(grid.nx(), 3);
        assert_eq!(grid.ny(), 2);
        assert!((grid.dx() - 10.0).abs() < 1e-10);
        assert!((grid.dy() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_value_access() {
        let grid = sample_grid();
        assert!((grid.value(0, 2).unwrap() - 3.0).abs() < 1e-10);
        assert!(grid.value(1, 1).unwrap().is_nan());
        assert!(grid.value(2, 0).is_none());
    }

    #[test]
    fn test_mean_ignores_nan() {
        let grid = sample_grid();
        // (1+2+3+4+6)/5 = 3.2
        assert!((grid.mean().unwrap() - 3.2).abs() < 1e-10);
        assert_eq!(grid.finite_count(), 5);
    }

    #[test]
    fn test_range() {
        let grid = sample_grid();
        let (min, max) = grid.range().unwrap();
        assert!((min - 1.0).abs() < 1e-10);
        assert!((max - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_all_nan() {
        let grid = ElevationGrid {
            x: vec![0.0, 1.0],
            y: vec![0.0],
            z: vec![vec![f64::NAN, f64::NAN]],
        };
        assert!(grid.mean().is_none());
        assert!(grid.range().is_none());
        assert_eq!(grid.finite_count(), 0);
    }
}
