// petrovol\crates\pv_volumetrics\src/property_maps.rs

//! 属性图生成
//!
//! 在共享网格几何上逐节点计算储层属性：顶面构造、毛厚度、
//! 净产层厚度、HCPV 厚度以及地质储量强度（单位面积体积）。
//!
//! 网格几何由顶面插值器的边界框决定（固定 100 列，行数按
//! 纵横比推导）。底面缺省时按常厚度模型取 `top_z − thickness`。
//! 激活关注区（AOI）时，区外节点的所有属性记为 NaN（无数据），
//! 跳过分带计算。
//!
//! 强度公式（单位面积的地质储量）：
//!
//! ```text
//! stooip_intensity = oil_col × NTG × φ × (1−Sw) × C_oil / Bo
//! giip_intensity   = gas_col × NTG × φ × (1−Sw) × C_gas / Bg
//! ```

use crate::error::{VolumetricsError, VolumetricsResult};
use crate::inputs::ReservoirInputs;
use crate::units::UnitSystem;
use crate::zonation::fluid_columns;
use pv_geo::{Point2D, Polygon};
use pv_surface::{ElevationGrid, IdwInterpolator, SpatialSurface};
use serde::{Deserialize, Serialize};

/// 属性图网格默认列数
pub const DEFAULT_GRID_COLUMNS: usize = 100;

/// 属性类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    /// 顶面构造高程
    TopStructure,
    /// 毛厚度
    GrossThickness,
    /// 净产层厚度（烃柱 × NTG）
    NetPay,
    /// HCPV 厚度（净产层 × φ × (1−Sw)）
    HcpvThickness,
    /// STOOIP 强度（单位面积油储量）
    StooipIntensity,
    /// GIIP 强度（单位面积气储量）
    GiipIntensity,
}

impl PropertyKind {
    /// 属性显示名称
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TopStructure => "顶面构造",
            Self::GrossThickness => "毛厚度",
            Self::NetPay => "净产层厚度",
            Self::HcpvThickness => "HCPV 厚度",
            Self::StooipIntensity => "STOOIP 强度",
            Self::GiipIntensity => "GIIP 强度",
        }
    }

    /// 属性单位标签
    #[must_use]
    pub fn unit(&self, unit_system: UnitSystem) -> &'static str {
        match self {
            Self::TopStructure
            | Self::GrossThickness
            | Self::NetPay
            | Self::HcpvThickness => unit_system.thickness_unit(),
            Self::StooipIntensity => match unit_system {
                UnitSystem::Field => "STB/acre",
                UnitSystem::Metric => "m³/m²",
            },
            Self::GiipIntensity => match unit_system {
                UnitSystem::Field => "ft³/acre",
                UnitSystem::Metric => "m³/m²",
            },
        }
    }

    /// 可视化层使用的默认色标名
    #[must_use]
    pub fn colorscale(&self) -> &'static str {
        match self {
            Self::TopStructure => "Earth",
            Self::GrossThickness | Self::NetPay => "Viridis",
            Self::HcpvThickness => "Plasma",
            Self::StooipIntensity | Self::GiipIntensity => "Hot",
        }
    }
}

/// 属性图
///
/// 每个请求的属性类型各生成一幅，相互独立无交叉引用。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyMap {
    /// 属性类型
    pub kind: PropertyKind,
    /// 显示名称
    pub name: String,
    /// 单位标签
    pub unit: String,
    /// 色标名
    pub colorscale: String,
    /// 属性网格（NaN 为无数据）
    pub grid: ElevationGrid,
}

/// 属性图生成器
#[derive(Debug, Clone, Copy)]
pub struct PropertyMapGenerator {
    /// 网格列数
    pub grid_columns: usize,
}

impl Default for PropertyMapGenerator {
    fn default() -> Self {
        Self {
            grid_columns: DEFAULT_GRID_COLUMNS,
        }
    }
}

impl PropertyMapGenerator {
    /// 以默认网格分辨率创建
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置网格列数
    #[must_use]
    pub fn with_grid_columns(mut self, grid_columns: usize) -> Self {
        self.grid_columns = grid_columns;
        self
    }

    /// 生成属性图集合
    ///
    /// # 参数
    /// - `top`: 顶面散点（必需）
    /// - `base`: 底面散点；缺省按 `top_z − thickness` 常厚度模型
    /// - `inputs`: 储层参数包
    /// - `kinds`: 请求的属性类型
    /// - `unit_system`: 单位制
    /// - `aoi`: 关注区多边形；区外节点记 NaN
    ///
    /// # 错误
    /// - 参数验证失败
    /// - 关注区顶点数少于 3
    /// - 顶面网格生成失败（边界框退化等）
    pub fn generate(
        &self,
        top: &SpatialSurface,
        base: Option<&SpatialSurface>,
        inputs: &ReservoirInputs,
        kinds: &[PropertyKind],
        unit_system: UnitSystem,
        aoi: Option<&Polygon>,
    ) -> VolumetricsResult<Vec<PropertyMap>> {
        inputs.validate()?;

        if let Some(polygon) = aoi {
            if !polygon.is_valid() {
                return Err(VolumetricsError::InvalidAoi {
                    vertices: polygon.len(),
                });
            }
        }

        let top_idw = IdwInterpolator::new(top);
        let top_grid = top_idw.generate_grid(self.grid_columns, None)?;
        let base_idw = base.map(IdwInterpolator::new);

        let ny = top_grid.ny();
        let nx = top_grid.nx();

        // 每种属性一个与顶面网格同形的值矩阵
        let mut values: Vec<Vec<Vec<f64>>> =
            vec![vec![vec![f64::NAN; nx]; ny]; kinds.len()];

        let ntg = inputs.ntg;
        let phi = inputs.porosity;
        let hc_frac = 1.0 - inputs.sw;

        for (j, &yv) in top_grid.y.iter().enumerate() {
            for (i, &xv) in top_grid.x.iter().enumerate() {
                if let Some(polygon) = aoi {
                    if !polygon.contains_point(&Point2D::new(xv, yv)) {
                        continue;
                    }
                }

                let top_z = top_grid.z[j][i];
                let base_z = match &base_idw {
                    Some(idw) => idw.predict(xv, yv),
                    None => top_z - inputs.thickness,
                };

                let cols = fluid_columns(
                    top_z,
                    base_z,
                    inputs.owc,
                    inputs.goc,
                    inputs.fluid_system,
                );

                let net_pay = cols.hydrocarbon() * ntg;
                for (k, kind) in kinds.iter().enumerate() {
                    values[k][j][i] = match kind {
                        PropertyKind::TopStructure => top_z,
                        PropertyKind::GrossThickness => cols.gross,
                        PropertyKind::NetPay => net_pay,
                        PropertyKind::HcpvThickness => net_pay * phi * hc_frac,
                        PropertyKind::StooipIntensity => {
                            cols.oil * ntg * phi * hc_frac * unit_system.oil_constant()
                                / inputs.bo
                        }
                        PropertyKind::GiipIntensity => {
                            cols.gas * ntg * phi * hc_frac * unit_system.gas_constant()
                                / inputs.bg
                        }
                    };
                }
            }
        }

        tracing::debug!(
            nx,
            ny,
            n_maps = kinds.len(),
            clipped = aoi.is_some(),
            "属性图生成完成"
        );

        Ok(kinds
            .iter()
            .zip(values)
            .map(|(&kind, z)| PropertyMap {
                kind,
                name: kind.name().to_string(),
                unit: kind.unit(unit_system).to_string(),
                colorscale: kind.colorscale().to_string(),
                grid: ElevationGrid {
                    x: top_grid.x.clone(),
                    y: top_grid.y.clone(),
                    z,
                },
            })
            .collect())
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::FluidSystem;
    use pv_geo::Point3D;

    fn flat_top() -> SpatialSurface {
        // 倾斜平面 z = -7000 - x/10（x ∈ [0, 1000]）
        SpatialSurface::new(vec![
            Point3D::new(0.0, 0.0, -7000.0),
            Point3D::new(1000.0, 0.0, -7100.0),
            Point3D::new(0.0, 1000.0, -7000.0),
            Point3D::new(1000.0, 1000.0, -7100.0),
        ])
        .unwrap()
    }

    fn oil_inputs() -> ReservoirInputs {
        ReservoirInputs::new(FluidSystem::Oil)
            .with_geometry(0.0, 100.0)
            .with_petrophysics(0.8, 0.20, 0.30)
            .with_fluid_properties(1.2, 0.005)
    }

    #[test]
    fn test_constant_thickness_gross_map() {
        // 无底面：底面 = 顶面 − 厚度，毛厚度处处等于标量厚度
        let maps = PropertyMapGenerator::new()
            .with_grid_columns(10)
            .generate(
                &flat_top(),
                None,
                &oil_inputs(),
                &[PropertyKind::GrossThickness],
                UnitSystem::Field,
                None,
            )
            .unwrap();

        assert_eq!(maps.len(), 1);
        let grid = &maps[0].grid;
        for row in &grid.z {
            for &v in row {
                assert!((v - 100.0).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_net_pay_and_hcpv_chain() {
        let maps = PropertyMapGenerator::new()
            .with_grid_columns(10)
            .generate(
                &flat_top(),
                None,
                &oil_inputs(),
                &[PropertyKind::NetPay, PropertyKind::HcpvThickness],
                UnitSystem::Field,
                None,
            )
            .unwrap();

        // net_pay = 100 × 0.8 = 80；hcpv = 80 × 0.20 × 0.70 = 11.2
        let net = maps[0].grid.value(0, 0).unwrap();
        let hcpv = maps[1].grid.value(0, 0).unwrap();
        assert!((net - 80.0).abs() < 1e-10);
        assert!((hcpv - 11.2).abs() < 1e-10);
    }

    #[test]
    fn test_stooip_intensity_formula() {
        let maps = PropertyMapGenerator::new()
            .with_grid_columns(10)
            .generate(
                &flat_top(),
                None,
                &oil_inputs(),
                &[PropertyKind::StooipIntensity],
                UnitSystem::Field,
                None,
            )
            .unwrap();

        // 100 × 0.8 × 0.20 × 0.70 × 7758 / 1.2 = 72408
        let v = maps[0].grid.value(0, 0).unwrap();
        assert!((v - 72_408.0).abs() < 1e-6, "v = {v}");
        assert_eq!(maps[0].unit, "STB/acre");
    }

    #[test]
    fn test_owc_truncates_intensity() {
        // OWC 在 -7050：x > 500 的深部区油柱被削减
        let inputs = oil_inputs().with_contacts(Some(-7050.0), None);
        let maps = PropertyMapGenerator::new()
            .with_grid_columns(11)
            .generate(
                &flat_top(),
                None,
                &inputs,
                &[PropertyKind::NetPay],
                UnitSystem::Field,
                None,
            )
            .unwrap();

        let grid = &maps[0].grid;
        let shallow = grid.z[0][0]; // x=0, top=-7000, 油柱 50
        let deep = grid.z[0][grid.nx() - 1]; // x=1000, top=-7100, 油柱 0
        assert!(shallow > deep);
        assert!((deep - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_aoi_clips_to_nan() {
        // AOI 仅覆盖左下角四分之一
        let aoi = Polygon::new(vec![
            Point2D::new(-1.0, -1.0),
            Point2D::new(500.0, -1.0),
            Point2D::new(500.0, 500.0),
            Point2D::new(-1.0, 500.0),
        ]);

        let maps = PropertyMapGenerator::new()
            .with_grid_columns(10)
            .generate(
                &flat_top(),
                None,
                &oil_inputs(),
                &[PropertyKind::TopStructure],
                UnitSystem::Field,
                Some(&aoi),
            )
            .unwrap();

        let grid = &maps[0].grid;
        let total = grid.nx() * grid.ny();
        let finite = grid.finite_count();
        assert!(finite > 0);
        assert!(finite < total);
        // 区外节点为 NaN
        assert!(grid.z[grid.ny() - 1][grid.nx() - 1].is_nan());
    }

    #[test]
    fn test_invalid_aoi_rejected() {
        let aoi = Polygon::new(vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)]);
        let result = PropertyMapGenerator::new().generate(
            &flat_top(),
            None,
            &oil_inputs(),
            &[PropertyKind::NetPay],
            UnitSystem::Field,
            Some(&aoi),
        );
        assert!(matches!(
            result,
            Err(VolumetricsError::InvalidAoi { vertices: 2 })
        ));
    }

    #[test]
    fn test_explicit_base_surface() {
        // 底面恒为 -7300：毛厚度 = top_z + 7300
        let base = SpatialSurface::new(vec![
            Point3D::new(0.0, 0.0, -7300.0),
            Point3D::new(1000.0, 0.0, -7300.0),
            Point3D::new(0.0, 1000.0, -7300.0),
            Point3D::new(1000.0, 1000.0, -7300.0),
        ])
        .unwrap();

        let maps = PropertyMapGenerator::new()
            .with_grid_columns(10)
            .generate(
                &flat_top(),
                Some(&base),
                &oil_inputs(),
                &[PropertyKind::GrossThickness],
                UnitSystem::Field,
                None,
            )
            .unwrap();

        // 角节点 x=0：top=-7000，gross=300
        let v = maps[0].grid.value(0, 0).unwrap();
        assert!((v - 300.0).abs() < 1e-10);
    }

    #[test]
    fn test_gas_cap_intensity_maps() {
        // 油气共存：GOC -7040，浅部有气柱
        let inputs = ReservoirInputs::new(FluidSystem::OilAndGas)
            .with_geometry(0.0, 100.0)
            .with_petrophysics(1.0, 0.25, 0.30)
            .with_fluid_properties(1.3, 0.004)
            .with_contacts(Some(-7080.0), Some(-7040.0));

        let maps = PropertyMapGenerator::new()
            .with_grid_columns(11)
            .generate(
                &flat_top(),
                None,
                &inputs,
                &[PropertyKind::StooipIntensity, PropertyKind::GiipIntensity],
                UnitSystem::Field,
                None,
            )
            .unwrap();

        // 浅部 x=0（top=-7000）：气柱 40，油柱 40
        let oil_v = maps[0].grid.value(0, 0).unwrap();
        let gas_v = maps[1].grid.value(0, 0).unwrap();
        assert!(oil_v > 0.0);
        assert!(gas_v > 0.0);
    }
}
