// petrovol\crates\pv_geo\src/polygon.rs

//! 多边形运算
//!
//! 提供关注区（AOI）多边形的包含测试、面积计算和圆形逼近。
//!
//! # 算法
//!
//! - 包含测试：射线法（ray casting），沿水平射线统计与各边的交点并翻转
//!   内外标志
//! - 面积：鞋带公式（Shoelace formula）取绝对值
//!
//! # 限制
//!
//! 仅接受简单多边形，不检查自相交。点恰好落在边上时的归属
//! 由浮点舍入决定，属于实现定义行为。
//!
//! # 示例
//!
//! ```
//! use pv_geo::polygon::Polygon;
//! use pv_geo::geometry::Point2D;
//!
//! let square = Polygon::new(vec![
//!     Point2D::new(0.0, 0.0),
//!     Point2D::new(10.0, 0.0),
//!     Point2D::new(10.0, 10.0),
//!     Point2D::new(0.0, 10.0),
//! ]);
//!
//! assert!(square.contains_point(&Point2D::new(5.0, 5.0)));
//! assert!((square.area() - 100.0).abs() < 1e-10);
//! ```

use crate::geometry::{BoundingBox, Point2D};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// 多边形（关注区 AOI）
///
/// 顶点按顺序存储，首尾隐式闭合。有效多边形至少需要 3 个顶点。
/// 引擎从不修改调用方提供的多边形。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// 顶点序列（隐式闭合）
    vertices: Vec<Point2D>,
}

impl Polygon {
    /// 从顶点序列创建多边形
    ///
    /// 不要求闭合（最后一个顶点无需重复第一个顶点）。
    #[must_use]
    pub fn new(vertices: Vec<Point2D>) -> Self {
        Self { vertices }
    }

    /// 生成圆形逼近多边形
    ///
    /// 在圆周上等角度取 `n` 个顶点，用于近似圆形关注区。
    ///
    /// # 参数
    /// - `cx`, `cy`: 圆心坐标
    /// - `radius`: 半径
    /// - `n`: 顶点数（建议 ≥ 16）
    #[must_use]
    pub fn circle(cx: f64, cy: f64, radius: f64, n: usize) -> Self {
        let vertices = (0..n)
            .map(|i| {
                let angle = 2.0 * PI * (i as f64) / (n as f64);
                Point2D::new(cx + radius * angle.cos(), cy + radius * angle.sin())
            })
            .collect();
        Self { vertices }
    }

    /// 获取顶点切片
    #[must_use]
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// 顶点数量
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// 是否为空
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// 是否为有效多边形（至少 3 个顶点）
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// 计算边界框
    ///
    /// 空多边形返回 None。
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.vertices)
    }

    /// 射线法包含测试
    ///
    /// 少于 3 个顶点时恒为 false。点恰好在边上的结果是实现定义的。
    #[must_use]
    pub fn contains_point(&self, point: &Point2D) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = &self.vertices[i];
            let vj = &self.vertices[j];

            // 水平射线与边 (vj, vi) 相交则翻转内外标志
            if (vi.y > point.y) != (vj.y > point.y) {
                let x_cross = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
                if point.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// 鞋带公式计算面积
    ///
    /// 返回绝对值；少于 3 个顶点返回 0。
    #[must_use]
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }

        let mut sum = 0.0;
        let mut j = n - 1;
        for i in 0..n {
            sum += self.vertices[j].cross(&self.vertices[i]);
            j = i;
        }
        (sum / 2.0).abs()
    }
}

// ============================================================================
// 测试
// ============================================================================
