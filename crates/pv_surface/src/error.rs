// petrovol\crates\pv_surface\src/error.rs

//! 面层错误类型
//!
//! 包含散点面构建、网格生成、面注册表相关的错误。
//! 所有错误可转换为 `pv_foundation::PvError` 向上传播。

use crate::registry::SurfaceId;
use pv_foundation::PvError;
use thiserror::Error;

/// 面层结果类型
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// 面层错误
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// 空点集
    #[error("空点集: 散点面至少需要一个高程点")]
    EmptyPointSet,

    /// 点坐标含非有限数
    #[error("点坐标含非有限数: 第 {index} 个点")]
    NonFinitePoint {
        /// 非法点的索引
        index: usize,
    },

    /// 边界框退化
    #[error("边界框退化: 宽={width}, 高={height}, 无法生成网格")]
    DegenerateBounds {
        /// 边界框宽度
        width: f64,
        /// 边界框高度
        height: f64,
    },

    /// 网格分辨率不足
    #[error("网格分辨率不足: 列数 {nx} (至少需要 2)")]
    GridTooSmall {
        /// 请求的列数
        nx: usize,
    },

    /// 面未找到
    #[error("面未找到: {id}")]
    SurfaceNotFound {
        /// 未找到的面 ID
        id: SurfaceId,
    },
}

impl From<SurfaceError> for PvError {
    fn from(err: SurfaceError) -> Self {
        match err {
            SurfaceError::EmptyPointSet
            | SurfaceError::NonFinitePoint { .. }
            | SurfaceError::DegenerateBounds { .. }
            | SurfaceError::GridTooSmall { .. } => PvError::invalid_geometry(err.to_string()),
            SurfaceError::SurfaceNotFound { id } => PvError::not_found(format!("面 {id}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SurfaceError::GridTooSmall { nx: 1 };
        assert!(err.to_string().contains("1"));
    }

    #[test]
    fn test_conversion_to_pv_error() {
        let err: PvError = SurfaceError::EmptyPointSet.into();
        assert!(matches!(err, PvError::InvalidGeometry { .. }));

        let err: PvError = SurfaceError::SurfaceNotFound {
            id: SurfaceId::new(),
        }
        .into();
        assert!(matches!(err, PvError::NotFound { .. }));
    }
}
