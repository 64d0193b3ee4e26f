// petrovol\crates\pv_sim\src/lib.rs

//! PetroVol 模拟层
//!
//! 概率分布抽样、蒙特卡洛体积模拟、输出统计与龙卷风敏感性分析。
//!
//! # 模块
//!
//! - `distribution`: 分布定义、抽样与密度预览
//! - `monte_carlo`: 蒙特卡洛模拟器与敏感性分析
//! - `statistics`: 百分位数、直方图、CDF 与相关系数
//! - `cancel`: 跨线程取消令牌
//! - `error`: 模拟层错误类型
//!
//! # 示例
//!
//! ```
//! use pv_sim::prelude::*;
//! use pv_volumetrics::FluidSystem;
//!
//! let inputs = StochasticInputs {
//!     area: Distribution::Triangular { min: 4000.0, mode: 5000.0, max: 6500.0 },
//!     thickness: Distribution::Normal { mean: 50.0, std_dev: 5.0 },
//!     ntg: Distribution::Uniform { min: 0.7, max: 0.9 },
//!     porosity: Distribution::Normal { mean: 0.20, std_dev: 0.02 },
//!     sw: Distribution::Uniform { min: 0.25, max: 0.35 },
//!     bo: Distribution::Constant { value: 1.2 },
//!     bg: Distribution::Constant { value: 0.005 },
//!     oil_recovery: None,
//!     gas_recovery: None,
//! };
//!
//! let sim = MonteCarloSimulator::new(
//!     SimulationConfig::new(5000, FluidSystem::Oil).with_seed(42),
//! );
//! let result = sim.run(&inputs, &CancelToken::new(), None).unwrap();
//!
//! let stats = result.stooip.unwrap();
//! assert!(stats.p90 <= stats.p50 && stats.p50 <= stats.p10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod cancel;
pub mod distribution;
pub mod error;
pub mod monte_carlo;
pub mod statistics;

/// 预导入模块
pub mod prelude {
    pub use crate::cancel::CancelToken;
    pub use crate::distribution::{DensityCurve, Distribution};
    pub use crate::error::{SimResult, SimulationError};
    pub use crate::monte_carlo::{
        MonteCarloSimulator, RawTrials, SensitivityEntry, SimulationConfig,
        SimulationResult, SimulationStatus, StochasticInputs,
    };
    pub use crate::statistics::{CdfPoint, Histogram, OutputStats};
}

// 重导出常用类型
pub use cancel::CancelToken;
pub use distribution::{DensityCurve, Distribution};
pub use error::{SimResult, SimulationError};
pub use monte_carlo::{
    MonteCarloSimulator, RawTrials, SensitivityEntry, SimulationConfig, SimulationResult,
    SimulationStatus, StochasticInputs, CANCEL_CHECK_STRIDE,
};
pub use statistics::{
    pearson_correlation, CdfPoint, Histogram, OutputStats, CDF_POINTS, HISTOGRAM_BINS,
};
