// petrovol\crates\pv_geo\src/geometry.rs

//! 几何类型定义
//!
//! 提供项目统一的几何类型，包括2D点、3D点和2D边界框。
//!
//! # 符号约定
//!
//! 3D点的 z 为高程，采用**负值向下**约定：z = -8000 比 z = -7000 更深。
//! 构造面元组件时不做单位换算，坐标单位由调用方保证一致。

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

// ============================================================================
// Point2D - 2D点
// ============================================================================

/// 2D点 - 用于平面几何（多边形顶点、网格节点）
///
/// # 示例
///
/// ```
/// use pv_geo::geometry::Point2D;
///
/// let p1 = Point2D::new(0.0, 0.0);
/// let p2 = Point2D::new(3.0, 4.0);
/// assert!((p1.distance_to(&p2) - 5.0).abs() < 1e-10);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X坐标
    pub x: f64,
    /// Y坐标
    pub y: f64,
}

impl Point2D {
    /// 零点常量
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// 创建新的2D点
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 扩展为3D点，指定Z坐标
    #[inline]
    #[must_use]
    pub const fn with_z(self, z: f64) -> Point3D {
        Point3D::new(self.x, self.y, z)
    }

    /// 计算到另一个点的欧几里得距离
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// 计算到另一个点的距离的平方
    #[inline]
    #[must_use]
    pub fn distance_squared_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// 点积
    #[inline]
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 叉积（返回标量，即Z分量）
    #[inline]
    #[must_use]
    pub fn cross(&self, other: &Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// 向量长度
    #[inline]
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// 线性插值
    #[inline]
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// 标量乘法
    #[inline]
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// 判断是否为有限数（非NaN、非Inf）
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// 分量最小值
    #[inline]
    #[must_use]
    pub fn min(&self, other: &Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// 分量最大值
    #[inline]
    #[must_use]
    pub fn max(&self, other: &Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Neg for Point2D {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f64> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        self.scale(scalar)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2D> for (f64, f64) {
    fn from(p: Point2D) -> Self {
        (p.x, p.y)
    }
}

// ============================================================================
// Point3D - 3D点（高程点）
// ============================================================================

/// 3D点 - 高程点（z 为高程，负值向下）
///
/// 用于存储地质面的散点高程数据。一旦创建不再修改。
///
/// # 示例
///
/// ```
/// use pv_geo::geometry::Point3D;
///
/// // -8000 比 -7000 更深
/// let deep = Point3D::new(0.0, 0.0, -8000.0);
/// let shallow = Point3D::new(0.0, 0.0, -7000.0);
/// assert!(deep.z < shallow.z);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    /// X坐标
    pub x: f64,
    /// Y坐标
    pub y: f64,
    /// Z坐标（高程，负值向下）
    pub z: f64,
}

impl Point3D {
    /// 零点常量
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// 创建新的3D点
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 投影到XY平面（忽略Z坐标）
    #[inline]
    #[must_use]
    pub const fn xy(&self) -> Point2D {
        Point2D {
            x: self.x,
            y: self.y,
        }
    }

    /// 计算到另一个点的欧几里得距离
    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// 计算到另一个点的平面（XY）距离
    #[inline]
    #[must_use]
    pub fn planar_distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// 判断是否为有限数（非NaN、非Inf）
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Point3D {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Point3D> for [f64; 3] {
    fn from(p: Point3D) -> Self {
        [p.x, p.y, p.z]
    }
}

impl From<(f64, f64, f64)> for Point3D {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

// ============================================================================
// BoundingBox - 2D边界框
// ============================================================================

/// 2D边界框
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// 最小 x
    pub min_x: f64,
    /// 最小 y
    pub min_y: f64,
    /// 最大 x
    pub max_x: f64,
    /// 最大 y
    pub max_y: f64,
}

impl BoundingBox {
    /// 创建新的边界框
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    /// 从点集计算边界框
    ///
    /// 空迭代器返回 None。
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2D>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        Some(bbox)
    }

    /// 检查点是否在边界框内
    #[must_use]
    pub fn contains_point(&self, point: &Point2D) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// 计算宽度
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// 计算高度
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// 计算面积
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// 计算中心点
    #[must_use]
    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// 是否退化（宽或高为零）
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point2d_distance() {
        let p1 = Point2D::new(0.0, 0.0);
        let p2 = Point2D::new(3.0, 4.0);
        assert!((p1.distance_to(&p2) - 5.0).abs() < 1e-10);
        assert!((p1.distance_squared_to(&p2) - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_point2d_cross() {
        let p1 = Point2D::new(1.0, 0.0);
        let p2 = Point2D::new(0.0, 1.0);
        assert!((p1.cross(&p2) - 1.0).abs() < 1e-10);
        assert!((p2.cross(&p1) + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_point2d_lerp() {
        let p1 = Point2D::new(0.0, 0.0);
        let p2 = Point2D::new(10.0, 20.0);
        let mid = p1.lerp(&p2, 0.5);
        assert!((mid.x - 5.0).abs() < 1e-10);
        assert!((mid.y - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_point2d_conversions() {
        let p1: Point2D = (1.0, 2.0).into();
        assert!((p1.x - 1.0).abs() < 1e-10);

        let p2: Point2D = [3.0, 4.0].into();
        assert!((p2.y - 4.0).abs() < 1e-10);

        let arr: [f64; 2] = p2.into();
        assert!((arr[0] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_point3d_sign_convention() {
        // 负值向下：-8000 更深
        let deep = Point3D::new(0.0, 0.0, -8000.0);
        let shallow = Point3D::new(0.0, 0.0, -7000.0);
        assert!(deep.z < shallow.z);
    }

    #[test]
    fn test_point3d_planar_distance() {
        let p1 = Point3D::new(0.0, 0.0, -5000.0);
        let p2 = Point3D::new(3.0, 4.0, -6000.0);
        assert!((p1.planar_distance(&p2) - 5.0).abs() < 1e-10);
        assert!(p1.distance(&p2) > 1000.0);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(bbox.contains_point(&Point2D::new(5.0, 5.0)));
        assert!(!bbox.contains_point(&Point2D::new(15.0, 5.0)));

        assert!((bbox.width() - 10.0).abs() < 1e-10);
        assert!((bbox.height() - 10.0).abs() < 1e-10);
        assert!((bbox.area() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_bounding_box_from_points() {
        let points = vec![
            Point2D::new(1.0, 2.0),
            Point2D::new(-3.0, 4.0),
            Point2D::new(5.0, -1.0),
        ];
        let bbox = BoundingBox::from_points(&points).unwrap();
        assert!((bbox.min_x + 3.0).abs() < 1e-10);
        assert!((bbox.max_x - 5.0).abs() < 1e-10);
        assert!((bbox.min_y + 1.0).abs() < 1e-10);
        assert!((bbox.max_y - 4.0).abs() < 1e-10);

        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_bounding_box_degenerate() {
        let flat = BoundingBox::new(0.0, 5.0, 10.0, 5.0);
        assert!(flat.is_degenerate());

        let normal = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(!normal.is_degenerate());
    }
}
