// petrovol\crates\pv_sim\src/error.rs

//! 模拟层错误类型

use pv_foundation::PvError;
use thiserror::Error;

/// 模拟层结果类型
pub type SimResult<T> = Result<T, SimulationError>;

/// 模拟错误
#[derive(Error, Debug)]
pub enum SimulationError {
    /// 分布参数无效
    #[error("分布参数无效: {parameter} ({reason})")]
    InvalidDistribution {
        /// 出错的参数名
        parameter: &'static str,
        /// 无效原因
        reason: String,
    },

    /// 迭代次数无效
    #[error("迭代次数无效: {iterations} (至少需要 1)")]
    InvalidIterations {
        /// 实际迭代次数
        iterations: usize,
    },
}

impl SimulationError {
    /// 创建分布参数错误
    #[inline]
    pub fn invalid_distribution(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidDistribution {
            parameter,
            reason: reason.into(),
        }
    }
}

impl From<SimulationError> for PvError {
    fn from(err: SimulationError) -> Self {
        PvError::invalid_input(err.to_string())
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SimulationError::invalid_distribution("area", "min > max");
        let msg = err.to_string();
        assert!(msg.contains("area"));
        assert!(msg.contains("min > max"));
    }

    #[test]
    fn test_conversion_to_pv_error() {
        let err: PvError = SimulationError::InvalidIterations { iterations: 0 }.into();
        assert!(matches!(err, PvError::InvalidInput { .. }));

        let err: PvError = SimulationError::invalid_distribution("sw", "min >= max").into();
        assert!(matches!(err, PvError::InvalidInput { .. }));
    }
}
