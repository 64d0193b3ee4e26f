// petrovol\crates\pv_volumetrics\src/lib.rs

//! PetroVol 体积层
//!
//! 储层输入参数、单位制、流体分带、属性图与确定性体积计算。
//!
//! # 模块
//!
//! - `inputs`: 流体系统、几何模式与储层参数包 `ReservoirInputs`
//! - `units`: 油田制 / 公制单位换算常量
//! - `zonation`: 单元级流体柱厚度计算
//! - `property_maps`: 属性图生成（构造、厚度、储量强度）
//! - `deterministic`: 确定性体积链计算
//! - `error`: 体积层错误类型
//!
//! # 示例
//!
//! ```
//! use pv_surface::SurfaceRegistry;
//! use pv_volumetrics::prelude::*;
//!
//! let inputs = ReservoirInputs::new(FluidSystem::Oil)
//!     .with_geometry(5000.0, 50.0)
//!     .with_petrophysics(1.0, 0.20, 0.30)
//!     .with_fluid_properties(1.2, 0.005);
//!
//! let result = DeterministicVolumeCalculator::new()
//!     .calculate(&inputs, UnitSystem::Field, GeometryMethod::Simple, &SurfaceRegistry::new())
//!     .unwrap();
//! assert!((result.grv - 250_000.0).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::too_many_arguments)]

pub mod deterministic;
pub mod error;
pub mod inputs;
pub mod property_maps;
pub mod units;
pub mod zonation;

/// 预导入模块
pub mod prelude {
    pub use crate::deterministic::{
        DeterministicResult, DeterministicVolumeCalculator, VolumeUnits,
    };
    pub use crate::error::{VolumetricsError, VolumetricsResult};
    pub use crate::inputs::{FluidSystem, GeometryMethod, ReservoirInputs};
    pub use crate::property_maps::{PropertyKind, PropertyMap, PropertyMapGenerator};
    pub use crate::units::UnitSystem;
    pub use crate::zonation::{fluid_columns, FluidColumns};
}

// 重导出常用类型
pub use deterministic::{
    in_place_volumes, DeterministicResult, DeterministicVolumeCalculator, InPlaceVolumes,
    VolumeUnits,
};
pub use error::{VolumetricsError, VolumetricsResult};
pub use inputs::{FluidSystem, GeometryMethod, ReservoirInputs};
pub use property_maps::{PropertyKind, PropertyMap, PropertyMapGenerator, DEFAULT_GRID_COLUMNS};
pub use units::UnitSystem;
pub use zonation::{fluid_columns, FluidColumns};
