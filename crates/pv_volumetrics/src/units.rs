// petrovol\crates\pv_volumetrics\src/units.rs

//! 单位制与换算常量
//!
//! 油田单位制（field）与公制（metric）下的面积-体积换算常量。
//!
//! # 油田单位制
//!
//! 面积取英亩（acre），厚度取英尺（ft），毛岩体积为英亩-英尺（ac·ft）；
//! 1 ac·ft = 7758 桶（bbl）= 43560 立方英尺（ft³）。
//!
//! # 公制
//!
//! 面积取平方千米（km²），厚度取米（m）；km² 先换算为 m²，
//! 体积直接以 m³ 表示，面积-体积换算常量为 1。

use serde::{Deserialize, Serialize};

/// 每英亩-英尺的桶数（油）
pub const BBL_PER_ACRE_FT: f64 = 7758.0;

/// 每英亩-英尺的立方英尺数（气）
pub const CUFT_PER_ACRE_FT: f64 = 43560.0;

/// 每英亩的平方英尺数
pub const SQFT_PER_ACRE: f64 = 43560.0;

/// 每平方千米的平方米数
pub const M2_PER_KM2: f64 = 1.0e6;

/// 单位制
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// 油田单位制（acre / ft / bbl）
    #[default]
    Field,
    /// 公制（km² / m / m³）
    Metric,
}

impl UnitSystem {
    /// 单位制名称
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Metric => "metric",
        }
    }

    /// 面积预换算系数（输入面积单位 → 体积链面积单位）
    ///
    /// 油田制面积保持英亩（体积为 ac·ft）；公制 km² → m²（体积为 m³）。
    #[must_use]
    pub fn area_scale(&self) -> f64 {
        match self {
            Self::Field => 1.0,
            Self::Metric => M2_PER_KM2,
        }
    }

    /// 油的面积-体积换算常量（ac·ft → bbl；公制为 1）
    #[must_use]
    pub fn oil_constant(&self) -> f64 {
        match self {
            Self::Field => BBL_PER_ACRE_FT,
            Self::Metric => 1.0,
        }
    }

    /// 气的面积-体积换算常量（ac·ft → ft³；公制为 1）
    #[must_use]
    pub fn gas_constant(&self) -> f64 {
        match self {
            Self::Field => CUFT_PER_ACRE_FT,
            Self::Metric => 1.0,
        }
    }

    /// 面投影面积（平面坐标单位的平方）换算为输入面积单位
    ///
    /// 油田制假定平面坐标为英尺，ft² → acre；
    /// 公制假定平面坐标为米，m² → km²。
    #[must_use]
    pub fn footprint_to_area(&self, raw_area: f64) -> f64 {
        match self {
            Self::Field => raw_area / SQFT_PER_ACRE,
            Self::Metric => raw_area / M2_PER_KM2,
        }
    }

    /// 面积单位标签
    #[must_use]
    pub fn area_unit(&self) -> &'static str {
        match self {
            Self::Field => "acre",
            Self::Metric => "km²",
        }
    }

    /// 厚度单位标签
    #[must_use]
    pub fn thickness_unit(&self) -> &'static str {
        match self {
            Self::Field => "ft",
            Self::Metric => "m",
        }
    }

    /// 岩石体积单位标签
    #[must_use]
    pub fn rock_volume_unit(&self) -> &'static str {
        match self {
            Self::Field => "ac·ft",
            Self::Metric => "m³",
        }
    }

    /// 油体积单位标签
    #[must_use]
    pub fn oil_volume_unit(&self) -> &'static str {
        match self {
            Self::Field => "STB",
            Self::Metric => "m³",
        }
    }

    /// 气体积单位标签
    #[must_use]
    pub fn gas_volume_unit(&self) -> &'static str {
        match self {
            Self::Field => "ft³",
            Self::Metric => "m³",
        }
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_constants() {
        let field = UnitSystem::Field;
        assert!((field.oil_constant() - 7758.0).abs() < 1e-10);
        assert!((field.gas_constant() - 43560.0).abs() < 1e-10);
        assert!((field.area_scale() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_metric_constants() {
        let metric = UnitSystem::Metric;
        assert!((metric.oil_constant() - 1.0).abs() < 1e-10);
        assert!((metric.gas_constant() - 1.0).abs() < 1e-10);
        assert!((metric.area_scale() - 1.0e6).abs() < 1e-10);
    }

    #[test]
    fn test_footprint_conversion() {
        // 43560 ft² = 1 acre
        assert!((UnitSystem::Field.footprint_to_area(43560.0) - 1.0).abs() < 1e-10);
        // 1e6 m² = 1 km²
        assert!((UnitSystem::Metric.footprint_to_area(1.0e6) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(UnitSystem::Field.oil_volume_unit(), "STB");
        assert_eq!(UnitSystem::Metric.oil_volume_unit(), "m³");
        assert_eq!(UnitSystem::Field.rock_volume_unit(), "ac·ft");
    }
}
