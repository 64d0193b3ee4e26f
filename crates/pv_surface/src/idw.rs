// petrovol\crates\pv_surface\src/idw.rs

//! IDW (Inverse Distance Weighting) 插值
//!
//! 反距离加权插值，在任意平面位置预测高程，并生成规则网格。
//!
//! # 算法原理
//!
//! 权重 $w_i = 1 / d_i^p$，$p$ 为距离指数（默认 2）；
//! 预测值为候选点高程的加权平均。候选点由散点面的
//! 桶索引邻域查询提供（见 `pv_surface::surface`）。
//!
//! # 退化情形
//!
//! - 候选点与查询点距离小于容差：直接返回该点高程（避免除零）
//! - 权重和为零（候选为空）：返回最近点高程
//!
//! # 示例
//!
//! ```
//! use pv_geo::Point3D;
//! use pv_surface::{IdwInterpolator, SpatialSurface};
//!
//! let surface = SpatialSurface::new(vec![
//!     Point3D::new(0.0, 0.0, -7000.0),
//!     Point3D::new(100.0, 0.0, -7100.0),
//!     Point3D::new(0.0, 100.0, -7200.0),
//! ]).unwrap();
//!
//! let idw = IdwInterpolator::new(&surface);
//! // 在已知点处精确还原
//! assert!((idw.predict(0.0, 0.0) + 7000.0).abs() < 1e-10);
//! ```

use crate::error::{SurfaceError, SurfaceResult};
use crate::grid::ElevationGrid;
use crate::surface::SpatialSurface;
use rayon::prelude::*;

/// 网格节点数超过此值时按行并行插值
const PARALLEL_NODE_THRESHOLD: usize = 10_000;

/// IDW 插值配置
#[derive(Debug, Clone, Copy)]
pub struct IdwConfig {
    /// 距离指数 (p)，通常为 1-3，默认 2
    pub power: f64,
    /// 距离容差（小于此值视为在采样点上）
    pub distance_tolerance: f64,
}

impl Default for IdwConfig {
    fn default() -> Self {
        Self {
            power: 2.0,
            distance_tolerance: 1e-10,
        }
    }
}

/// IDW 插值器
///
/// 借用散点面进行插值；面本身保持不可变，同一个面可被多个
/// 插值器并发使用。
#[derive(Debug, Clone)]
pub struct IdwInterpolator<'a> {
    surface: &'a SpatialSurface,
    config: IdwConfig,
}

impl<'a> IdwInterpolator<'a> {
    /// 以默认配置创建插值器
    #[must_use]
    pub fn new(surface: &'a SpatialSurface) -> Self {
        Self {
            surface,
            config: IdwConfig::default(),
        }
    }

    /// 使用指定配置创建
    #[must_use]
    pub fn with_config(surface: &'a SpatialSurface, config: IdwConfig) -> Self {
        Self { surface, config }
    }

    /// 设置距离指数
    #[must_use]
    pub fn with_power(mut self, power: f64) -> Self {
        self.config.power = power;
        self
    }

    /// 获取配置
    #[must_use]
    pub fn config(&self) -> &IdwConfig {
        &self.config
    }

    /// 底层散点面
    #[must_use]
    pub fn surface(&self) -> &SpatialSurface {
        self.surface
    }

    /// 在指定位置预测高程
    ///
    /// 邻域候选不足时自动回退全量扫描（见 `SpatialSurface`），
    /// 因此对任何有限坐标都返回有限值，永不失败。
    #[must_use]
    pub fn predict(&self, x: f64, y: f64) -> f64 {
        let points = self.surface.points();
        let candidates = self.surface.neighbor_candidates(x, y);

        let p = self.config.power;
        let tol = self.config.distance_tolerance;
        let mut weight_sum = 0.0;
        let mut value_sum = 0.0;

        for &idx in &candidates {
            let pt = &points[idx as usize];
            let dx = pt.x - x;
            let dy = pt.y - y;
            let dist = (dx * dx + dy * dy).sqrt();

            // 查询点落在采样点上：精确返回
            if dist < tol {
                return pt.z;
            }

            let weight = 1.0 / dist.powf(p);
            weight_sum += weight;
            value_sum += weight * pt.z;
        }

        if weight_sum > 0.0 {
            value_sum / weight_sum
        } else {
            self.surface.nearest_z(x, y)
        }
    }

    /// 生成规则高程网格
    ///
    /// # 参数
    /// - `nx`: 列数（至少 2）
    /// - `ny`: 行数；省略时按边界框纵横比推导，保持单元近似方形
    ///
    /// # 错误
    /// 列数不足或边界框退化（宽/高为零）时返回错误。
    pub fn generate_grid(&self, nx: usize, ny: Option<usize>) -> SurfaceResult<ElevationGrid> {
        if nx < 2 {
            return Err(SurfaceError::GridTooSmall { nx });
        }

        let bounds = self.surface.bounds();
        let width = bounds.width();
        let height = bounds.height();
        if width <= 0.0 || height <= 0.0 {
            return Err(SurfaceError::DegenerateBounds { width, height });
        }

        let ny = ny.unwrap_or_else(|| {
            let derived = (nx as f64 * height / width).round() as usize;
            derived.max(2)
        });

        let x: Vec<f64> = (0..nx)
            .map(|i| bounds.min_x + width * (i as f64) / ((nx - 1) as f64))
            .collect();
        let y: Vec<f64> = (0..ny)
            .map(|j| bounds.min_y + height * (j as f64) / ((ny - 1) as f64))
            .collect();

        let row_eval = |yv: &f64| -> Vec<f64> { x.iter().map(|&xv| self.predict(xv, *yv)).collect() };

        let z: Vec<Vec<f64>> = if nx * ny >= PARALLEL_NODE_THRESHOLD {
            y.par_iter().map(row_eval).collect()
        } else {
            y.iter().map(row_eval).collect()
        };

        tracing::debug!(nx, ny, n_points = self.surface.len(), "高程网格已生成");

        Ok(ElevationGrid { x, y, z })
    }
}

// ============================================================================
// 测试
// ============================================================================
