// petrovol\crates\pv_volumetrics\src/zonation.rs

//! 流体分带计算
//!
//! 给定单元处的顶底面高程、流体界面深度和流体系统，
//! 计算气柱与油柱厚度。
//!
//! # 符号约定
//!
//! 所有高程与深度采用负值向下约定：`top_z > base_z`
//! （构造上更浅的数值更大）。缺省界面视为无限深。
//!
//! # 分带规则
//!
//! - 纯油：油柱从 `top_z` 向下至 `max(base_z, owc)`
//! - 纯气：气柱下限取 `goc`（缺省时退回 `owc`）
//! - 油气共存：气柱 `top_z → max(base_z, goc)`，
//!   油柱 `min(top_z, goc) → max(base_z, owc)`；
//!   构造顶已在气油界面之下时气柱自然塌缩为零
//!
//! 所有厚度钳制为非负。

use crate::inputs::FluidSystem;
use serde::{Deserialize, Serialize};

/// 单元处的流体柱厚度
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FluidColumns {
    /// 气柱厚度（≥ 0）
    pub gas: f64,
    /// 油柱厚度（≥ 0）
    pub oil: f64,
    /// 毛厚度（≥ 0）
    pub gross: f64,
}

impl FluidColumns {
    /// 烃柱总厚度
    #[must_use]
    pub fn hydrocarbon(&self) -> f64 {
        self.gas + self.oil
    }
}

/// 计算单元处的流体柱厚度
///
/// # 参数
/// - `top_z`, `base_z`: 顶底面高程（负值向下）
/// - `owc`, `goc`: 油水 / 气油界面深度，`None` 视为无限深
/// - `system`: 流体系统
#[must_use]
pub fn fluid_columns(
    top_z: f64,
    base_z: f64,
    owc: Option<f64>,
    goc: Option<f64>,
    system: FluidSystem,
) -> FluidColumns {
    // 缺省界面：无限深（负无穷在 max/min 中自然退出）
    let owc = owc.unwrap_or(f64::NEG_INFINITY);
    let goc = goc.unwrap_or(f64::NEG_INFINITY);

    let gross = (top_z - base_z).max(0.0);

    let (gas, oil) = match system {
        FluidSystem::Oil => {
            let oil = (top_z - base_z.max(owc)).max(0.0);
            (0.0, oil)
        }
        FluidSystem::Gas => {
            // 气柱下限优先取 GOC，缺省退回 OWC
            let lower = if goc.is_finite() { goc } else { owc };
            let gas = (top_z - base_z.max(lower)).max(0.0);
            (gas, 0.0)
        }
        FluidSystem::OilAndGas => {
            let gas = (top_z - base_z.max(goc)).max(0.0);
            let oil = (top_z.min(goc) - base_z.max(owc)).max(0.0);
            (gas, oil)
        }
    };

    FluidColumns { gas, oil, gross }
}

// ============================================================================
// 测试
// ============================================================================
