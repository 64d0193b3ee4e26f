// petrovol\crates\pv_volumetrics\src/deterministic.rs

//! 确定性体积计算
//!
//! 由标量或面派生的几何输入计算单值体积链：
//!
//! ```text
//! GRV → 净岩体积 (×NTG) → 孔隙体积 (×φ) → HCPV (×(1−Sw))
//!     → STOOIP (×C_oil/Bo) / GIIP (×C_gas/Bg) → 可采储量 (×采收率)
//! ```
//!
//! # 几何模式
//!
//! - `Simple`: 标量面积 × 标量厚度
//! - `Hybrid`: 顶面投影面积 × 标量厚度
//! - `Surfaces`: 顶面投影面积 × |底面平均高程 − 顶面平均高程|
//!
//! 缺少必需面时返回描述性错误；Bo/Bg ≤ 0 同样返回错误，
//! 绝不静默替换为默认常量。

use crate::error::{VolumetricsError, VolumetricsResult};
use crate::inputs::{FluidSystem, GeometryMethod, ReservoirInputs};
use crate::units::UnitSystem;
use pv_foundation::require;
use pv_surface::SurfaceRegistry;
use serde::{Deserialize, Serialize};

/// 结果单位标签
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeUnits {
    /// 岩石体积单位
    pub rock: String,
    /// 油体积单位
    pub oil: String,
    /// 气体积单位
    pub gas: String,
}

impl VolumeUnits {
    /// 由单位制派生
    #[must_use]
    pub fn from_unit_system(unit_system: UnitSystem) -> Self {
        Self {
            rock: unit_system.rock_volume_unit().to_string(),
            oil: unit_system.oil_volume_unit().to_string(),
            gas: unit_system.gas_volume_unit().to_string(),
        }
    }
}

/// 确定性体积计算结果
///
/// 不含油（或气）的流体系统对应字段为 `None`。
/// 失败通过 `Result` 的错误臂表达，结果与错误从不同时存在。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeterministicResult {
    /// 毛岩体积 GRV
    pub grv: f64,
    /// 净岩体积（GRV × NTG）
    pub net_rock_volume: f64,
    /// 孔隙体积（净岩体积 × φ）
    pub pore_volume: f64,
    /// 烃孔隙体积 HCPV（孔隙体积 × (1−Sw)）
    pub hcpv: f64,
    /// 原始石油地质储量 STOOIP
    pub stooip: Option<f64>,
    /// 原始天然气地质储量 GIIP
    pub giip: Option<f64>,
    /// 可采油量
    pub recoverable_oil: Option<f64>,
    /// 可采气量
    pub recoverable_gas: Option<f64>,
    /// 单位标签
    pub units: VolumeUnits,
}

/// 地质储量中间量（体积链共享计算）
///
/// 确定性计算与蒙特卡洛模拟使用同一条链，保证两者一致。
#[derive(Debug, Clone, Copy)]
pub struct InPlaceVolumes {
    /// 净岩体积
    pub net_rock_volume: f64,
    /// 孔隙体积
    pub pore_volume: f64,
    /// 烃孔隙体积
    pub hcpv: f64,
    /// STOOIP（不含油时为 None）
    pub stooip: Option<f64>,
    /// GIIP（不含气时为 None）
    pub giip: Option<f64>,
}

/// 由 GRV 计算地质储量体积链
///
/// 纯算术，不做参数验证；调用方须先验证 Bo/Bg 为正
/// （蒙特卡洛抽样值除外，其非有限结果由统计层过滤）。
#[must_use]
pub fn in_place_volumes(
    grv: f64,
    ntg: f64,
    porosity: f64,
    sw: f64,
    bo: f64,
    bg: f64,
    system: FluidSystem,
    unit_system: UnitSystem,
) -> InPlaceVolumes {
    let net_rock_volume = grv * ntg;
    let pore_volume = net_rock_volume * porosity;
    let hcpv = pore_volume * (1.0 - sw);

    let stooip = system
        .has_oil()
        .then(|| hcpv * unit_system.oil_constant() / bo);
    let giip = system
        .has_gas()
        .then(|| hcpv * unit_system.gas_constant() / bg);

    InPlaceVolumes {
        net_rock_volume,
        pore_volume,
        hcpv,
        stooip,
        giip,
    }
}

/// 确定性体积计算器
///
/// 无状态；每次调用借用输入与面注册表。
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicVolumeCalculator;

impl DeterministicVolumeCalculator {
    /// 创建计算器
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// 执行确定性体积计算
    ///
    /// # 错误
    /// - 参数验证失败（分数越界、Bo/Bg 非正）
    /// - `Hybrid`/`Surfaces` 模式缺少必需的面
    pub fn calculate(
        &self,
        inputs: &ReservoirInputs,
        unit_system: UnitSystem,
        method: GeometryMethod,
        registry: &SurfaceRegistry,
    ) -> VolumetricsResult<DeterministicResult> {
        inputs.validate()?;

        // 几何解析：面积（输入面积单位）与厚度
        let (area, thickness) = match method {
            GeometryMethod::Simple => (inputs.area, inputs.thickness),
            GeometryMethod::Hybrid => {
                let top_id = require!(
                    inputs.top_surface,
                    VolumetricsError::missing_surface("顶面", method.name())
                );
                let top = registry.resolve(top_id)?;
                (
                    unit_system.footprint_to_area(top.footprint_area()),
                    inputs.thickness,
                )
            }
            GeometryMethod::Surfaces => {
                let top_id = require!(
                    inputs.top_surface,
                    VolumetricsError::missing_surface("顶面", method.name())
                );
                let base_id = require!(
                    inputs.base_surface,
                    VolumetricsError::missing_surface("底面", method.name())
                );
                let top = registry.resolve(top_id)?;
                let base = registry.resolve(base_id)?;
                (
                    unit_system.footprint_to_area(top.footprint_area()),
                    (base.mean_z() - top.mean_z()).abs(),
                )
            }
        };

        let grv = area * unit_system.area_scale() * thickness;

        let volumes = in_place_volumes(
            grv,
            inputs.ntg,
            inputs.porosity,
            inputs.sw,
            inputs.bo,
            inputs.bg,
            inputs.fluid_system,
            unit_system,
        );

        tracing::debug!(
            method = method.name(),
            system = inputs.fluid_system.name(),
            grv,
            hcpv = volumes.hcpv,
            "确定性体积计算完成"
        );

        Ok(DeterministicResult {
            grv,
            net_rock_volume: volumes.net_rock_volume,
            pore_volume: volumes.pore_volume,
            hcpv: volumes.hcpv,
            stooip: volumes.stooip,
            giip: volumes.giip,
            recoverable_oil: volumes.stooip.map(|v| v * inputs.oil_recovery),
            recoverable_gas: volumes.giip.map(|v| v * inputs.gas_recovery),
            units: VolumeUnits::from_unit_system(unit_system),
        })
    }
}

// ============================================================================
// 测试
// ============================================================================
