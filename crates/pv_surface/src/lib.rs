// petrovol\crates\pv_surface\src/lib.rs

//! PetroVol 面层
//!
//! 散点高程面、均匀桶空间索引、IDW 插值与规则网格生成。
//!
//! # 模块
//!
//! - `surface`: 散点面 `SpatialSurface` 与桶索引
//! - `idw`: 反距离加权插值器与网格生成
//! - `grid`: 规则高程网格 `ElevationGrid`
//! - `registry`: `SurfaceId` 新类型与面注册表
//! - `error`: 面层错误类型
//!
//! # 示例
//!
//! ```
//! use pv_geo::Point3D;
//! use pv_surface::prelude::*;
//!
//! let surface = SpatialSurface::new(vec![
//!     Point3D::new(0.0, 0.0, -7000.0),
//!     Point3D::new(1000.0, 0.0, -7100.0),
//!     Point3D::new(0.0, 1000.0, -7200.0),
//!     Point3D::new(1000.0, 1000.0, -7300.0),
//! ]).unwrap();
//!
//! let grid = IdwInterpolator::new(&surface)
//!     .generate_grid(50, None)
//!     .unwrap();
//! assert_eq!(grid.nx(), 50);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod grid;
pub mod idw;
pub mod registry;
pub mod surface;

/// 预导入模块
pub mod prelude {
    pub use crate::error::{SurfaceError, SurfaceResult};
    pub use crate::grid::ElevationGrid;
    pub use crate::idw::{IdwConfig, IdwInterpolator};
    pub use crate::registry::{SurfaceId, SurfaceRegistry};
    pub use crate::surface::SpatialSurface;
}

// 重导出常用类型
pub use error::{SurfaceError, SurfaceResult};
pub use grid::ElevationGrid;
pub use idw::{IdwConfig, IdwInterpolator};
pub use registry::{SurfaceId, SurfaceRegistry};
pub use surface::{SpatialSurface, BUCKET_INDEX_THRESHOLD};
