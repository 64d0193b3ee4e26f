// petrovol\crates\pv_geo\src/lib.rs

//! PetroVol 几何层
//!
//! 提供点、边界框和多边形运算。
//!
//! # 模块
//!
//! - `geometry`: 几何类型 (Point2D, Point3D, BoundingBox)
//! - `polygon`: 多边形运算（射线法包含测试、鞋带公式面积、圆形逼近）
//!
//! # 示例
//!
//! ```
//! use pv_geo::prelude::*;
//!
//! let aoi = Polygon::circle(0.0, 0.0, 1000.0, 32);
//! assert!(aoi.contains_point(&Point2D::new(100.0, 100.0)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod geometry;
pub mod polygon;

/// 预导入模块
pub mod prelude {
    pub use crate::geometry::{BoundingBox, Point2D, Point3D};
    pub use crate::polygon::Polygon;
}

// 重导出常用类型
pub use geometry::{BoundingBox, Point2D, Point3D};
pub use polygon::Polygon;
