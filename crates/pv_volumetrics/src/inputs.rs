// petrovol\crates\pv_volumetrics\src/inputs.rs

//! 储层输入参数
//!
//! 定义流体系统、几何模式和储层参数包。参数包由调用方持有，
//! 引擎逐次调用时借用；引擎在调用间不保留任何状态。
//!
//! # 符号约定
//!
//! 流体界面深度（`owc` / `goc`）与面高程同号：负值向下，
//! 缺省（`None`）视为无限深。

use crate::error::{VolumetricsError, VolumetricsResult};
use pv_surface::SurfaceId;
use serde::{Deserialize, Serialize};

/// 流体系统
///
/// 穷举匹配替代字符串分支，消除拼写错误一类的缺陷。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluidSystem {
    /// 纯油
    Oil,
    /// 纯气
    Gas,
    /// 油气共存（气顶 + 油环）
    OilAndGas,
}

impl FluidSystem {
    /// 系统名称
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Oil => "oil",
            Self::Gas => "gas",
            Self::OilAndGas => "oil_and_gas",
        }
    }

    /// 是否含油
    #[must_use]
    pub fn has_oil(&self) -> bool {
        matches!(self, Self::Oil | Self::OilAndGas)
    }

    /// 是否含气
    #[must_use]
    pub fn has_gas(&self) -> bool {
        matches!(self, Self::Gas | Self::OilAndGas)
    }
}

/// 几何解析模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryMethod {
    /// 标量面积 × 标量厚度
    Simple,
    /// 顶面投影面积 × 标量厚度
    Hybrid,
    /// 顶面投影面积 × 顶底面平均高程差
    Surfaces,
}

impl GeometryMethod {
    /// 模式名称
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Hybrid => "Hybrid",
            Self::Surfaces => "Surfaces",
        }
    }
}

/// 储层输入参数包
///
/// 几何、岩石物理、流体性质、界面深度与采收率的完整集合。
/// 所有分数参数取 [0, 1]，采收率为分数而非百分比。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservoirInputs {
    /// 流体系统
    pub fluid_system: FluidSystem,

    /// 面积（油田制 acre，公制 km²）— Simple 模式使用
    pub area: f64,
    /// 厚度（油田制 ft，公制 m）— Simple / Hybrid 模式及常厚度底面使用
    pub thickness: f64,
    /// 顶面引用 — Hybrid / Surfaces 模式使用
    pub top_surface: Option<SurfaceId>,
    /// 底面引用 — Surfaces 模式使用
    pub base_surface: Option<SurfaceId>,

    /// 净毛比 NTG ∈ [0, 1]
    pub ntg: f64,
    /// 孔隙度 ∈ [0, 1]
    pub porosity: f64,
    /// 含水饱和度 Sw ∈ [0, 1]
    pub sw: f64,

    /// 油的形成体积系数 Bo（必须为正）
    pub bo: f64,
    /// 气的形成体积系数 Bg（必须为正）
    pub bg: f64,

    /// 油水界面深度（负值向下，None 视为无限深）
    pub owc: Option<f64>,
    /// 气油界面深度（负值向下，None 视为无限深）
    pub goc: Option<f64>,

    /// 油采收率（分数）
    pub oil_recovery: f64,
    /// 气采收率（分数）
    pub gas_recovery: f64,
}

impl Default for ReservoirInputs {
    fn default() -> Self {
        Self {
            fluid_system: FluidSystem::Oil,
            area: 0.0,
            thickness: 0.0,
            top_surface: None,
            base_surface: None,
            ntg: 1.0,
            porosity: 0.2,
            sw: 0.3,
            bo: 1.2,
            bg: 0.005,
            owc: None,
            goc: None,
            oil_recovery: 0.3,
            gas_recovery: 0.7,
        }
    }
}

impl ReservoirInputs {
    /// 以指定流体系统创建，其余取默认值
    #[must_use]
    pub fn new(fluid_system: FluidSystem) -> Self {
        Self {
            fluid_system,
            ..Default::default()
        }
    }

    /// 设置标量几何
    #[must_use]
    pub fn with_geometry(mut self, area: f64, thickness: f64) -> Self {
        self.area = area;
        self.thickness = thickness;
        self
    }

    /// 设置面引用
    #[must_use]
    pub fn with_surfaces(mut self, top: SurfaceId, base: Option<SurfaceId>) -> Self {
        self.top_surface = Some(top);
        self.base_surface = base;
        self
    }

    /// 设置岩石物理参数
    #[must_use]
    pub fn with_petrophysics(mut self, ntg: f64, porosity: f64, sw: f64) -> Self {
        self.ntg = ntg;
        self.porosity = porosity;
        self.sw = sw;
        self
    }

    /// 设置流体性质
    #[must_use]
    pub fn with_fluid_properties(mut self, bo: f64, bg: f64) -> Self {
        self.bo = bo;
        self.bg = bg;
        self
    }

    /// 设置界面深度
    #[must_use]
    pub fn with_contacts(mut self, owc: Option<f64>, goc: Option<f64>) -> Self {
        self.owc = owc;
        self.goc = goc;
        self
    }

    /// 设置采收率（分数）
    #[must_use]
    pub fn with_recovery(mut self, oil: f64, gas: f64) -> Self {
        self.oil_recovery = oil;
        self.gas_recovery = gas;
        self
    }

    /// 验证参数
    ///
    /// 分数参数须在 [0, 1]；相关流体的形成体积系数须为正。
    /// 非法数值返回错误而非静默替换为默认值。
    pub fn validate(&self) -> VolumetricsResult<()> {
        VolumetricsError::check_fraction("ntg", self.ntg)?;
        VolumetricsError::check_fraction("porosity", self.porosity)?;
        VolumetricsError::check_fraction("sw", self.sw)?;
        VolumetricsError::check_fraction("oil_recovery", self.oil_recovery)?;
        VolumetricsError::check_fraction("gas_recovery", self.gas_recovery)?;

        if self.fluid_system.has_oil() {
            VolumetricsError::check_positive("bo", self.bo)?;
        }
        if self.fluid_system.has_gas() {
            VolumetricsError::check_positive("bg", self.bg)?;
        }
        Ok(())
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fluid_system_flags() {
        assert!(FluidSystem::Oil.has_oil());
        assert!(!FluidSystem::Oil.has_gas());
        assert!(FluidSystem::Gas.has_gas());
        assert!(!FluidSystem::Gas.has_oil());
        assert!(FluidSystem::OilAndGas.has_oil());
        assert!(FluidSystem::OilAndGas.has_gas());
    }

    #[test]
    fn test_default_inputs_valid() {
        let inputs = ReservoirInputs::default();
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let inputs = ReservoirInputs::new(FluidSystem::OilAndGas)
            .with_geometry(5000.0, 50.0)
            .with_petrophysics(0.8, 0.22, 0.35)
            .with_fluid_properties(1.3, 0.004)
            .with_contacts(Some(-7500.0), Some(-7200.0));

        assert!((inputs.area - 5000.0).abs() < 1e-10);
        assert!((inputs.ntg - 0.8).abs() < 1e-10);
        assert_eq!(inputs.owc, Some(-7500.0));
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_fractions() {
        let inputs = ReservoirInputs::default().with_petrophysics(1.5, 0.2, 0.3);
        assert!(matches!(
            inputs.validate(),
            Err(VolumetricsError::ParameterOutOfRange { name: "ntg", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_bo() {
        let mut inputs = ReservoirInputs::new(FluidSystem::Oil);
        inputs.bo = 0.0;
        assert!(matches!(
            inputs.validate(),
            Err(VolumetricsError::NonPositiveParameter { name: "bo", .. })
        ));

        // 纯气系统不检查 Bo
        let mut gas = ReservoirInputs::new(FluidSystem::Gas);
        gas.bo = 0.0;
        assert!(gas.validate().is_ok());
    }

    #[test]
    fn test_serde_fluid_system() {
        let json = serde_json::to_string(&FluidSystem::OilAndGas).unwrap();
        assert_eq!(json, "\"oil_and_gas\"");
    }
}
