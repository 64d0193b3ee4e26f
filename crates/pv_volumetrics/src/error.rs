// petrovol\crates\pv_volumetrics\src/error.rs

//! 体积层错误类型
//!
//! 包含参数验证、几何模式解析、属性图生成相关的错误。
//! 所有错误可转换为 `pv_foundation::PvError` 向上传播。
//!
//! # 错误分类
//!
//! - **参数错误**：流体分数越界、形成体积系数非正
//! - **几何错误**：缺少必需的面、关注区多边形无效
//! - **面层错误**：网格生成失败（向下聚合）

use pv_foundation::PvError;
use pv_surface::SurfaceError;
use thiserror::Error;

/// 体积层结果类型
pub type VolumetricsResult<T> = Result<T, VolumetricsError>;

/// 体积计算错误
#[derive(Error, Debug)]
pub enum VolumetricsError {
    /// 参数超出范围
    #[error("参数超出范围: {name}={value} (允许范围: [{min}, {max}])")]
    ParameterOutOfRange {
        /// 参数名
        name: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 参数必须为正（如 Bo/Bg）
    ///
    /// 非正的形成体积系数是调用方契约违例，不做静默默认值替换。
    #[error("参数必须为正: {name}={value}")]
    NonPositiveParameter {
        /// 参数名
        name: &'static str,
        /// 实际值
        value: f64,
    },

    /// 缺少必需的面
    #[error("缺少必需的面: {role} (几何模式 {method} 需要)")]
    MissingSurface {
        /// 面的角色（"顶面" / "底面"）
        role: &'static str,
        /// 几何模式名
        method: &'static str,
    },

    /// 关注区多边形无效
    #[error("关注区多边形无效: 顶点数 {vertices} (至少需要 3)")]
    InvalidAoi {
        /// 实际顶点数
        vertices: usize,
    },

    /// 面层错误（向下聚合）
    #[error("面层错误: {0}")]
    Surface(#[from] SurfaceError),
}

impl VolumetricsError {
    /// 创建参数越界错误
    #[inline]
    pub fn parameter_out_of_range(name: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::ParameterOutOfRange {
            name,
            value,
            min,
            max,
        }
    }

    /// 创建非正参数错误
    #[inline]
    pub fn non_positive(name: &'static str, value: f64) -> Self {
        Self::NonPositiveParameter { name, value }
    }

    /// 创建缺少面错误
    #[inline]
    pub fn missing_surface(role: &'static str, method: &'static str) -> Self {
        Self::MissingSurface { role, method }
    }

    /// 验证分数参数在 [0, 1] 内
    #[inline]
    pub fn check_fraction(name: &'static str, value: f64) -> VolumetricsResult<()> {
        if !(0.0..=1.0).contains(&value) {
            Err(Self::parameter_out_of_range(name, value, 0.0, 1.0))
        } else {
            Ok(())
        }
    }

    /// 验证参数为正
    #[inline]
    pub fn check_positive(name: &'static str, value: f64) -> VolumetricsResult<()> {
        if value > 0.0 {
            Ok(())
        } else {
            Err(Self::non_positive(name, value))
        }
    }
}

impl From<VolumetricsError> for PvError {
    fn from(err: VolumetricsError) -> Self {
        match err {
            VolumetricsError::ParameterOutOfRange {
                name,
                value,
                min,
                max,
            } => PvError::out_of_range(name, value, min, max),
            VolumetricsError::NonPositiveParameter { .. } => {
                PvError::invalid_input(err.to_string())
            }
            VolumetricsError::MissingSurface { .. } | VolumetricsError::InvalidAoi { .. } => {
                PvError::invalid_geometry(err.to_string())
            }
            VolumetricsError::Surface(inner) => inner.into(),
        }
    }
}

// ============================================================================
// 测试
// ============================================================================
