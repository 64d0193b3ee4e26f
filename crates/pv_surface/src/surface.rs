// petrovol\crates\pv_surface\src/surface.rs

//! 散点面与均匀桶索引
//!
//! `SpatialSurface` 持有一个地质面的高程散点云及其边界框，
//! 并在点数超过阈值时构建均匀桶索引以加速邻域查询。
//!
//! # 索引设计
//!
//! 桶索引是按 `(col, row)` 整数索引的二维数组（扁平存储），
//! 每桶目标约 10 个点：`grid_dim = ceil(sqrt(n / 10))`。
//! 桶内仅存点的下标，不复制点数据。
//!
//! 邻域查询扫描查询点所在桶周围的 3×3 桶块；候选点不足 5 个时
//! 回退为全量扫描（稀疏数据安全网），因此邻域查询永不失败。
//!
//! # 示例
//!
//! ```
//! use pv_geo::Point3D;
//! use pv_surface::SpatialSurface;
//!
//! let points = vec![
//!     Point3D::new(0.0, 0.0, -7000.0),
//!     Point3D::new(100.0, 0.0, -7050.0),
//!     Point3D::new(0.0, 100.0, -7100.0),
//! ];
//! let surface = SpatialSurface::new(points).unwrap();
//! assert_eq!(surface.len(), 3);
//! ```

use crate::error::{SurfaceError, SurfaceResult};
use pv_foundation::ensure;
use pv_geo::{BoundingBox, Point2D, Point3D};

/// 构建桶索引的点数阈值
pub const BUCKET_INDEX_THRESHOLD: usize = 50;

/// 每桶目标点数
const TARGET_POINTS_PER_BUCKET: f64 = 10.0;

/// 3×3 桶块候选点数下限，低于此值回退全量扫描
const MIN_NEIGHBOR_CANDIDATES: usize = 5;

// ============================================================================
// 桶索引
// ============================================================================

/// 均匀桶索引
///
/// 二维桶数组按行优先扁平存储，桶键为 `(col, row)` 整数，
/// 避免字符串拼接键带来的逐次分配。
#[derive(Debug, Clone)]
struct BucketIndex {
    /// 每个方向的桶数
    dim: usize,
    /// 索引覆盖的边界框
    bounds: BoundingBox,
    /// 扁平桶数组（row * dim + col），存点下标
    cells: Vec<Vec<u32>>,
}

impl BucketIndex {
    /// 从点集构建索引
    fn build(points: &[Point3D], bounds: BoundingBox) -> Self {
        let n = points.len();
        let dim = ((n as f64 / TARGET_POINTS_PER_BUCKET).sqrt().ceil() as usize).max(1);

        let mut cells = vec![Vec::new(); dim * dim];
        for (i, p) in points.iter().enumerate() {
            let (col, row) = Self::cell_of(&bounds, dim, p.x, p.y);
            cells[row * dim + col].push(i as u32);
        }

        Self { dim, bounds, cells }
    }

    /// 计算坐标所属的桶（夹紧到索引范围内）
    fn cell_of(bounds: &BoundingBox, dim: usize, x: f64, y: f64) -> (usize, usize) {
        let width = bounds.width();
        let height = bounds.height();

        let fx = if width > 0.0 {
            (x - bounds.min_x) / width
        } else {
            0.0
        };
        let fy = if height > 0.0 {
            (y - bounds.min_y) / height
        } else {
            0.0
        };

        let col = ((fx * dim as f64) as isize).clamp(0, dim as isize - 1) as usize;
        let row = ((fy * dim as f64) as isize).clamp(0, dim as isize - 1) as usize;
        (col, row)
    }

    /// 收集查询点周围 3×3 桶块内的候选点下标
    fn candidates_near(&self, x: f64, y: f64) -> Vec<u32> {
        let (col, row) = Self::cell_of(&self.bounds, self.dim, x, y);
        let mut out = Vec::new();

        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                let r = row as isize + dr;
                let c = col as isize + dc;
                if r < 0 || c < 0 || r >= self.dim as isize || c >= self.dim as isize {
                    continue;
                }
                out.extend_from_slice(&self.cells[r as usize * self.dim + c as usize]);
            }
        }
        out
    }
}

// ============================================================================
// 散点面
// ============================================================================

/// 散点面
///
/// 持有一个地质面的高程点云（z 为高程，负值向下）及派生的边界框。
/// 每次计算请求新建，计算完成后由调用方丢弃；引擎不跨调用持有状态。
#[derive(Debug, Clone)]
pub struct SpatialSurface {
    /// 高程点云
    points: Vec<Point3D>,
    /// 平面边界框
    bounds: BoundingBox,
    /// 最小高程
    min_z: f64,
    /// 最大高程
    max_z: f64,
    /// 可选的桶索引（点数超过阈值时构建）
    index: Option<BucketIndex>,
}

impl SpatialSurface {
    /// 从点云创建散点面
    ///
    /// 空点集或含非有限坐标的点集返回错误。
    /// 点数超过 [`BUCKET_INDEX_THRESHOLD`] 时自动构建桶索引。
    pub fn new(points: Vec<Point3D>) -> SurfaceResult<Self> {
        ensure!(!points.is_empty(), SurfaceError::EmptyPointSet);
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(SurfaceError::NonFinitePoint { index });
        }

        let mut bounds = BoundingBox {
            min_x: points[0].x,
            min_y: points[0].y,
            max_x: points[0].x,
            max_y: points[0].y,
        };
        let mut min_z = points[0].z;
        let mut max_z = points[0].z;
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_y = bounds.max_y.max(p.y);
            min_z = min_z.min(p.z);
            max_z = max_z.max(p.z);
        }

        let index = if points.len() > BUCKET_INDEX_THRESHOLD {
            Some(BucketIndex::build(&points, bounds))
        } else {
            None
        };

        tracing::debug!(
            n_points = points.len(),
            indexed = index.is_some(),
            "散点面已构建"
        );

        Ok(Self {
            points,
            bounds,
            min_z,
            max_z,
            index,
        })
    }

    /// 点数量
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 是否为空（构造保证非空，始终为 false）
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 获取点云切片
    #[must_use]
    pub fn points(&self) -> &[Point3D] {
        &self.points
    }

    /// 平面边界框
    #[must_use]
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// 最小高程
    #[must_use]
    pub fn min_z(&self) -> f64 {
        self.min_z
    }

    /// 最大高程
    #[must_use]
    pub fn max_z(&self) -> f64 {
        self.max_z
    }

    /// 是否构建了桶索引
    #[must_use]
    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// 点云高程均值
    #[must_use]
    pub fn mean_z(&self) -> f64 {
        let sum: f64 = self.points.iter().map(|p| p.z).sum();
        sum / self.points.len() as f64
    }

    /// 估算平面投影面积（边界框面积）
    ///
    /// 用于 Hybrid / Surfaces 几何模式下的面积估计。
    #[must_use]
    pub fn footprint_area(&self) -> f64 {
        self.bounds.area()
    }

    /// 最近点的高程（全量扫描）
    #[must_use]
    pub fn nearest_z(&self, x: f64, y: f64) -> f64 {
        let q = Point2D::new(x, y);
        let mut best = &self.points[0];
        let mut best_d = best.xy().distance_squared_to(&q);
        for p in &self.points[1..] {
            let d = p.xy().distance_squared_to(&q);
            if d < best_d {
                best_d = d;
                best = p;
            }
        }
        best.z
    }

    /// 邻域候选点下标
    ///
    /// 有索引时扫描 3×3 桶块；候选不足 [`MIN_NEIGHBOR_CANDIDATES`] 个
    /// 或无索引时返回全部点的下标。
    #[must_use]
    pub fn neighbor_candidates(&self, x: f64, y: f64) -> Vec<u32> {
        if let Some(index) = &self.index {
            let candidates = index.candidates_near(x, y);
            if candidates.len() >= MIN_NEIGHBOR_CANDIDATES {
                return candidates;
            }
        }
        (0..self.points.len() as u32).collect()
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_points(n_side: usize, spacing: f64) -> Vec<Point3D> {
        let mut points = Vec::new();
        for j in 0..n_side {
            for i in 0..n_side {
                points.push(Point3D::new(
                    i as f64 * spacing,
                    j as f64 * spacing,
                    -7000.0 - (i + j) as f64,
                ));
            }
        }
        points
    }

    #[test]
    fn test_empty_points_rejected() {
        assert!(matches!(
            SpatialSurface::new(vec![]),
            Err(SurfaceError::EmptyPointSet)
        ));
    }

    #[test]
    fn test_non_finite_point_rejected() {
        let points = vec![
            Point3D::new(0.0, 0.0, -7000.0),
            Point3D::new(1.0, f64::NAN, -7000.0),
        ];
        assert!(matches!(
            SpatialSurface::new(points),
            Err(SurfaceError::NonFinitePoint { index: 1 })
        ));
    }

    #[test]
    fn test_bounds_and_z_range() {
        let surface = SpatialSurface::new(vec![
            Point3D::new(0.0, 0.0, -7000.0),
            Point3D::new(100.0, 200.0, -7500.0),
        ])
        .unwrap();

        assert!((surface.bounds().max_x - 100.0).abs() < 1e-10);
        assert!((surface.bounds().max_y - 200.0).abs() < 1e-10);
        assert!((surface.min_z() + 7500.0).abs() < 1e-10);
        assert!((surface.max_z() + 7000.0).abs() < 1e-10);
    }

    #[test]
    fn test_index_threshold() {
        // 50 点以内不建索引
        let small = SpatialSurface::new(grid_points(7, 10.0)).unwrap(); // 49 点
        assert!(!small.has_index());

        // 超过 50 点建索引
        let large = SpatialSurface::new(grid_points(10, 10.0)).unwrap(); // 100 点
        assert!(large.has_index());
    }

    #[test]
    fn test_neighbor_candidates_indexed() {
        let surface = SpatialSurface::new(grid_points(20, 10.0)).unwrap(); // 400 点
        assert!(surface.has_index());

        // 内部点的 3×3 桶块应返回远少于全量的候选
        let candidates = surface.neighbor_candidates(100.0, 100.0);
        assert!(candidates.len() >= 5);
        assert!(candidates.len() < 400);
    }

    #[test]
    fn test_neighbor_candidates_sparse_fallback() {
        // 点聚集在角落，远处查询的桶块为空，应回退全量扫描
        let mut points = grid_points(10, 1.0);
        points.push(Point3D::new(10000.0, 10000.0, -8000.0));
        let surface = SpatialSurface::new(points).unwrap();
        assert!(surface.has_index());

        let candidates = surface.neighbor_candidates(5000.0, 5000.0);
        assert_eq!(candidates.len(), surface.len());
    }

    #[test]
    fn test_nearest_z() {
        let surface = SpatialSurface::new(vec![
            Point3D::new(0.0, 0.0, -7000.0),
            Point3D::new(100.0, 0.0, -7200.0),
        ])
        .unwrap();

        assert!((surface.nearest_z(10.0, 0.0) + 7000.0).abs() < 1e-10);
        assert!((surface.nearest_z(90.0, 0.0) + 7200.0).abs() < 1e-10);
    }

    #[test]
    fn test_mean_z_and_footprint() {
        let surface = SpatialSurface::new(vec![
            Point3D::new(0.0, 0.0, -7000.0),
            Point3D::new(100.0, 50.0, -7400.0),
        ])
        .unwrap();

        assert!((surface.mean_z() + 7200.0).abs() < 1e-10);
        assert!((surface.footprint_area() - 5000.0).abs() < 1e-10);
    }
}
