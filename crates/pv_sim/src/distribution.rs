// petrovol\crates\pv_sim\src/distribution.rs

//! 概率分布定义与抽样
//!
//! 蒙特卡洛模拟的输入参数各由一个分布描述。支持常量、均匀、
//! 正态、对数正态与三角分布。
//!
//! # 参数约定
//!
//! 对数正态分布以**输出变量**的目标均值 / 标准差给出，内部
//! 换算为底层正态参数：
//!
//! ```text
//! μ = ln(mean² / √(mean² + sd²))
//! σ = √(ln(1 + sd²/mean²))
//! ```
//!
//! 正态抽样采用 Box–Muller 变换；三角分布采用逆 CDF 法。

use crate::error::{SimResult, SimulationError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// 概率分布
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Distribution {
    /// 常量（退化分布）
    Constant {
        /// 固定值
        value: f64,
    },
    /// 均匀分布 [min, max]
    Uniform {
        /// 下界
        min: f64,
        /// 上界
        max: f64,
    },
    /// 正态分布
    Normal {
        /// 均值
        mean: f64,
        /// 标准差
        std_dev: f64,
    },
    /// 对数正态分布（以输出变量的目标均值 / 标准差参数化）
    Lognormal {
        /// 输出变量目标均值（须为正）
        mean: f64,
        /// 输出变量目标标准差
        std_dev: f64,
    },
    /// 三角分布
    Triangular {
        /// 下界
        min: f64,
        /// 众数
        mode: f64,
        /// 上界
        max: f64,
    },
}

impl Distribution {
    /// 验证分布参数
    ///
    /// 零散布的均匀 / 正态 / 对数正态分布一律拒绝（退化情形应
    /// 使用常量分布），其密度预览会除零。
    pub fn validate(&self, parameter: &'static str) -> SimResult<()> {
        match *self {
            Self::Constant { value } => {
                if !value.is_finite() {
                    return Err(SimulationError::invalid_distribution(
                        parameter,
                        "常量值必须有限",
                    ));
                }
            }
            Self::Uniform { min, max } => {
                if !(min.is_finite() && max.is_finite()) || min >= max {
                    return Err(SimulationError::invalid_distribution(
                        parameter,
                        format!("均匀分布要求 min < max (min={min}, max={max})"),
                    ));
                }
            }
            Self::Normal { mean, std_dev } => {
                if !(mean.is_finite() && std_dev.is_finite()) || std_dev <= 0.0 {
                    return Err(SimulationError::invalid_distribution(
                        parameter,
                        format!("正态分布要求 std_dev > 0 (std_dev={std_dev})"),
                    ));
                }
            }
            Self::Lognormal { mean, std_dev } => {
                if !(mean.is_finite() && std_dev.is_finite()) || mean <= 0.0 || std_dev <= 0.0 {
                    return Err(SimulationError::invalid_distribution(
                        parameter,
                        format!("对数正态分布要求 mean > 0 且 std_dev > 0 (mean={mean}, std_dev={std_dev})"),
                    ));
                }
            }
            Self::Triangular { min, mode, max } => {
                if !(min.is_finite() && mode.is_finite() && max.is_finite())
                    || !(min <= mode && mode <= max)
                    || min >= max
                {
                    return Err(SimulationError::invalid_distribution(
                        parameter,
                        format!("三角分布要求 min <= mode <= max 且 min < max (min={min}, mode={mode}, max={max})"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// 分布均值（解析值）
    #[must_use]
    pub fn mean(&self) -> f64 {
        match *self {
            Self::Constant { value } => value,
            Self::Uniform { min, max } => (min + max) / 2.0,
            Self::Normal { mean, .. } | Self::Lognormal { mean, .. } => mean,
            Self::Triangular { min, mode, max } => (min + mode + max) / 3.0,
        }
    }

    /// 分布标准差（解析值）
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        match *self {
            Self::Constant { .. } => 0.0,
            Self::Uniform { min, max } => (max - min) / 12.0_f64.sqrt(),
            Self::Normal { std_dev, .. } | Self::Lognormal { std_dev, .. } => std_dev,
            Self::Triangular { min, mode, max } => {
                let var = (min * min + mode * mode + max * max
                    - min * mode
                    - min * max
                    - mode * max)
                    / 18.0;
                var.sqrt()
            }
        }
    }

    /// 抽取一个样本
    ///
    /// 要求参数已通过 `validate`；非法参数下的行为未定义
    /// （可能返回 NaN，由统计层过滤）。
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Self::Constant { value } => value,
            Self::Uniform { min, max } => min + rng.gen::<f64>() * (max - min),
            Self::Normal { mean, std_dev } => mean + standard_normal(rng) * std_dev,
            Self::Lognormal { mean, std_dev } => {
                let (mu, sigma) = lognormal_underlying(mean, std_dev);
                (mu + standard_normal(rng) * sigma).exp()
            }
            Self::Triangular { min, mode, max } => {
                let u = rng.gen::<f64>();
                let range = max - min;
                let cut = (mode - min) / range;
                if u < cut {
                    min + (u * range * (mode - min)).sqrt()
                } else {
                    max - ((1.0 - u) * range * (max - mode)).sqrt()
                }
            }
        }
    }

    /// 生成概率密度预览曲线
    ///
    /// 用于分布参数的可视化确认。正态 / 对数正态 / 三角 / 均匀
    /// 使用解析 PDF；常量返回单点脉冲。
    #[must_use]
    pub fn preview_density(&self, n_points: usize) -> DensityCurve {
        let n = n_points.max(2);
        match *self {
            Self::Constant { value } => DensityCurve {
                x: vec![value],
                y: vec![1.0],
            },
            Self::Uniform { min, max } => {
                let h = 1.0 / (max - min);
                let x = linspace(min, max, n);
                let y = vec![h; n];
                DensityCurve { x, y }
            }
            Self::Normal { mean, std_dev } => {
                let x = linspace(mean - 4.0 * std_dev, mean + 4.0 * std_dev, n);
                let y = x
                    .iter()
                    .map(|&v| normal_pdf(v, mean, std_dev))
                    .collect();
                DensityCurve { x, y }
            }
            Self::Lognormal { mean, std_dev } => {
                let (mu, sigma) = lognormal_underlying(mean, std_dev);
                let upper = (mu + 4.0 * sigma).exp();
                let x = linspace(f64::EPSILON, upper, n);
                let y = x
                    .iter()
                    .map(|&v| {
                        let ln_v = v.ln();
                        (-((ln_v - mu) * (ln_v - mu)) / (2.0 * sigma * sigma)).exp()
                            / (v * sigma * (2.0 * PI).sqrt())
                    })
                    .collect();
                DensityCurve { x, y }
            }
            Self::Triangular { min, mode, max } => {
                let range = max - min;
                let x = linspace(min, max, n);
                let y = x
                    .iter()
                    .map(|&v| {
                        // mode 与端点重合时选择非退化的分支
                        if v < mode || mode >= max {
                            2.0 * (v - min) / (range * (mode - min))
                        } else {
                            2.0 * (max - v) / (range * (max - mode))
                        }
                    })
                    .collect();
                DensityCurve { x, y }
            }
        }
    }
}

/// 密度预览曲线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensityCurve {
    /// 横坐标
    pub x: Vec<f64>,
    /// 密度值
    pub y: Vec<f64>,
}

/// 标准正态样本（Box–Muller 变换）
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // u1 ∈ (0, 1]，避免 ln(0)
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// 由目标均值 / 标准差换算底层正态参数 (μ, σ)
fn lognormal_underlying(mean: f64, std_dev: f64) -> (f64, f64) {
    let m2 = mean * mean;
    let s2 = std_dev * std_dev;
    let mu = (m2 / (m2 + s2).sqrt()).ln();
    let sigma = (1.0 + s2 / m2).ln().sqrt();
    (mu, sigma)
}

fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * PI).sqrt())
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / ((n - 1) as f64);
    (0..n).map(|i| start + step * i as f64).collect()
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_constant_sample() {
        let dist = Distribution::Constant { value: 3.5 };
        let mut r = rng();
        for _ in 0..10 {
            assert!((dist.sample(&mut r) - 3.5).abs() < 1e-15);
        }
    }

    #[test]
    fn test_uniform_bounds() {
        let dist = Distribution::Uniform { min: 2.0, max: 5.0 };
        let mut r = rng();
        for _ in 0..1000 {
            let v = dist.sample(&mut r);
            assert!((2.0..=5.0).contains(&v));
        }
    }

    #[test]
    fn test_normal_sample_moments() {
        let dist = Distribution::Normal {
            mean: 10.0,
            std_dev: 2.0,
        };
        let mut r = rng();
        let samples: Vec<f64> = (0..20_000).map(|_| dist.sample(&mut r)).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>()
            / samples.len() as f64;

        assert!((mean - 10.0).abs() < 0.1, "mean = {mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.1, "sd = {}", var.sqrt());
    }

    #[test]
    fn test_lognormal_target_moments() {
        // 目标矩参数化：样本均值 / 标准差应回收目标值
        let dist = Distribution::Lognormal {
            mean: 100.0,
            std_dev: 30.0,
        };
        let mut r = rng();
        let samples: Vec<f64> = (0..50_000).map(|_| dist.sample(&mut r)).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>()
            / samples.len() as f64;

        assert!((mean - 100.0).abs() < 2.0, "mean = {mean}");
        assert!((var.sqrt() - 30.0).abs() < 2.0, "sd = {}", var.sqrt());
        assert!(samples.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_triangular_bounds_and_mean() {
        let dist = Distribution::Triangular {
            min: 0.0,
            mode: 2.0,
            max: 10.0,
        };
        let mut r = rng();
        let samples: Vec<f64> = (0..20_000).map(|_| dist.sample(&mut r)).collect();
        assert!(samples.iter().all(|&v| (0.0..=10.0).contains(&v)));

        // 解析均值 (0+2+10)/3 = 4
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((mean - 4.0).abs() < 0.1, "mean = {mean}");
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert!(Distribution::Uniform { min: 5.0, max: 2.0 }
            .validate("area")
            .is_err());
        assert!(Distribution::Normal {
            mean: 0.0,
            std_dev: -1.0
        }
        .validate("area")
        .is_err());
        assert!(Distribution::Lognormal {
            mean: -1.0,
            std_dev: 1.0
        }
        .validate("area")
        .is_err());
        assert!(Distribution::Triangular {
            min: 0.0,
            mode: 5.0,
            max: 3.0
        }
        .validate("area")
        .is_err());
        assert!(Distribution::Constant { value: f64::NAN }
            .validate("area")
            .is_err());
    }

    #[test]
    fn test_validate_rejects_degenerate_spread() {
        // 零散布应改用常量分布，否则密度预览除零
        assert!(Distribution::Normal {
            mean: 1.2,
            std_dev: 0.0
        }
        .validate("bo")
        .is_err());
        assert!(Distribution::Lognormal {
            mean: 1.2,
            std_dev: 0.0
        }
        .validate("bo")
        .is_err());
        assert!(Distribution::Uniform { min: 1.2, max: 1.2 }
            .validate("bo")
            .is_err());
    }

    #[test]
    fn test_analytic_moments() {
        let uniform = Distribution::Uniform { min: 0.0, max: 12.0 };
        assert!((uniform.mean() - 6.0).abs() < 1e-10);
        assert!((uniform.std_dev() - 12.0 / 12.0_f64.sqrt()).abs() < 1e-10);

        let tri = Distribution::Triangular {
            min: 0.0,
            mode: 3.0,
            max: 6.0,
        };
        assert!((tri.mean() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_preview_density_shapes() {
        let normal = Distribution::Normal {
            mean: 0.0,
            std_dev: 1.0,
        };
        let curve = normal.preview_density(101);
        assert_eq!(curve.x.len(), 101);
        // 峰值在均值处: 1/√(2π) ≈ 0.3989
        let peak = curve.y.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!((peak - 0.3989).abs() < 0.01);

        let constant = Distribution::Constant { value: 7.0 };
        let pulse = constant.preview_density(50);
        assert_eq!(pulse.x, vec![7.0]);
    }

    #[test]
    fn test_serde_tagged_representation() {
        let dist = Distribution::Normal {
            mean: 1.0,
            std_dev: 0.5,
        };
        let json = serde_json::to_string(&dist).unwrap();
        assert!(json.contains("\"type\":\"normal\""));
        let back: Distribution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dist);
    }
}
