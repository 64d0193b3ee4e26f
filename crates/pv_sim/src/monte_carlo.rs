// petrovol\crates\pv_sim\src/monte_carlo.rs

//! 蒙特卡洛体积模拟
//!
//! 对储层参数逐次独立抽样（不建模参数间相关性），复用确定性
//! 体积链计算每次试验的地质储量，汇总为百分位数、直方图、CDF
//! 与龙卷风敏感性分析。
//!
//! # 资源模型
//!
//! 纯 CPU 循环，无 I/O；每次运行持有独立的 RNG 状态，多个模拟
//! 可并发运行互不干扰。长运行通过取消令牌（每 500 次迭代检查）
//! 提前终止，返回部分结果而非损坏结果；进度回调以 0–100 的
//! 百分比通知调用方。
//!
//! # 样本保留
//!
//! 输出数组全量保留用于统计；敏感性分析按固定步长
//! `max(1, iterations / 20000)` 保留参数-输出样本对，
//! 限制超大运行的内存占用。

use crate::cancel::CancelToken;
use crate::distribution::Distribution;
use crate::error::{SimResult, SimulationError};
use crate::statistics::{pearson_correlation, OutputStats};
use pv_volumetrics::{in_place_volumes, FluidSystem, UnitSystem};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// 取消检查间隔（迭代次数）
pub const CANCEL_CHECK_STRIDE: usize = 500;

/// 敏感性样本保留目标数
const SENSITIVITY_SAMPLE_TARGET: usize = 20_000;

/// 随机储层输入
///
/// 每个参数一个分布；采收率分布缺省时不输出可采储量统计。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StochasticInputs {
    /// 面积分布
    pub area: Distribution,
    /// 厚度分布
    pub thickness: Distribution,
    /// 净毛比分布
    pub ntg: Distribution,
    /// 孔隙度分布
    pub porosity: Distribution,
    /// 含水饱和度分布
    pub sw: Distribution,
    /// 油形成体积系数分布
    pub bo: Distribution,
    /// 气形成体积系数分布
    pub bg: Distribution,
    /// 油采收率分布（可选）
    pub oil_recovery: Option<Distribution>,
    /// 气采收率分布（可选）
    pub gas_recovery: Option<Distribution>,
}

impl StochasticInputs {
    /// 验证所有分布参数
    pub fn validate(&self, system: FluidSystem) -> SimResult<()> {
        self.area.validate("area")?;
        self.thickness.validate("thickness")?;
        self.ntg.validate("ntg")?;
        self.porosity.validate("porosity")?;
        self.sw.validate("sw")?;
        if system.has_oil() {
            self.bo.validate("bo")?;
        }
        if system.has_gas() {
            self.bg.validate("bg")?;
        }
        if let Some(dist) = &self.oil_recovery {
            dist.validate("oil_recovery")?;
        }
        if let Some(dist) = &self.gas_recovery {
            dist.validate("gas_recovery")?;
        }
        Ok(())
    }
}

/// 模拟配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 迭代次数（典型 1,000–50,000）
    pub iterations: usize,
    /// 流体系统
    pub fluid_system: FluidSystem,
    /// 单位制
    pub unit_system: UnitSystem,
    /// RNG 种子；缺省时由系统熵初始化（结果不可复现）
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// 创建配置
    #[must_use]
    pub fn new(iterations: usize, fluid_system: FluidSystem) -> Self {
        Self {
            iterations,
            fluid_system,
            unit_system: UnitSystem::default(),
            seed: None,
        }
    }

    /// 设置单位制
    #[must_use]
    pub fn with_unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }

    /// 设置种子（可复现运行）
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 验证配置
    pub fn validate(&self) -> SimResult<()> {
        if self.iterations == 0 {
            return Err(SimulationError::InvalidIterations {
                iterations: self.iterations,
            });
        }
        Ok(())
    }
}

/// 模拟结束状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationStatus {
    /// 全部迭代完成
    Completed,
    /// 被取消（结果为部分试验的统计）
    Cancelled,
}

/// 龙卷风敏感性条目
///
/// `low_value` / `high_value` 为参数围绕其均值 ±2σ 摆动时
/// 主输出的估计区间（线性回归斜率外推）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityEntry {
    /// 参数名
    pub parameter: String,
    /// 与主输出的皮尔逊相关系数 ∈ [-1, 1]
    pub correlation: f64,
    /// 主输出均值（龙卷风基线）
    pub base_value: f64,
    /// 摆动下界
    pub low_value: f64,
    /// 摆动上界
    pub high_value: f64,
}

impl SensitivityEntry {
    /// 摆动幅度（排序键）
    #[must_use]
    pub fn swing(&self) -> f64 {
        self.high_value - self.low_value
    }
}

/// 原始试验样本
///
/// 不含对应流体时数组为空。下游可视化层直接消费。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTrials {
    /// 每次试验的 STOOIP
    pub stooip: Vec<f64>,
    /// 每次试验的 GIIP
    pub giip: Vec<f64>,
}

/// 模拟结果
///
/// 不含油（或气）的流体系统对应统计为 `None`；采收率分布缺省
/// 时可采储量统计为 `None`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// 结束状态
    pub status: SimulationStatus,
    /// 实际完成的迭代数
    pub iterations_completed: usize,
    /// 原始试验样本
    pub raw: RawTrials,
    /// STOOIP 统计
    pub stooip: Option<OutputStats>,
    /// GIIP 统计
    pub giip: Option<OutputStats>,
    /// 可采油量统计
    pub recoverable_oil: Option<OutputStats>,
    /// 可采气量统计
    pub recoverable_gas: Option<OutputStats>,
    /// 敏感性条目（按摆动幅度降序）
    pub sensitivity: Vec<SensitivityEntry>,
}

/// 按固定步长保留的参数样本轨迹
struct ParamTrace {
    name: &'static str,
    samples: Vec<f64>,
}

/// 蒙特卡洛模拟器
///
/// 每次 `run` 持有独立的 RNG，调用间无共享状态。
#[derive(Debug, Clone)]
pub struct MonteCarloSimulator {
    config: SimulationConfig,
}

impl MonteCarloSimulator {
    /// 创建模拟器
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// 配置
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// 运行模拟
    ///
    /// # 参数
    /// - `inputs`: 各参数的分布
    /// - `cancel`: 取消令牌，每 `CANCEL_CHECK_STRIDE` 次迭代检查
    /// - `progress`: 进度回调（0–100 百分比），可为 None
    ///
    /// # 取消语义
    /// 被取消时返回已完成试验的统计，状态为 `Cancelled`；
    /// 不足一次有效试验时各统计为 `None`。
    pub fn run(
        &self,
        inputs: &StochasticInputs,
        cancel: &CancelToken,
        mut progress: Option<&mut dyn FnMut(u8)>,
    ) -> SimResult<SimulationResult> {
        self.config.validate()?;
        let system = self.config.fluid_system;
        inputs.validate(system)?;

        let iterations = self.config.iterations;
        let unit_system = self.config.unit_system;
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // 敏感性分析保留步长
        let retain_stride = (iterations / SENSITIVITY_SAMPLE_TARGET).max(1);
        let retain_cap = iterations / retain_stride + 1;

        let has_oil = system.has_oil();
        let has_gas = system.has_gas();

        let mut stooip_samples = has_oil.then(|| Vec::with_capacity(iterations));
        let mut giip_samples = has_gas.then(|| Vec::with_capacity(iterations));
        let mut rec_oil_samples = (has_oil && inputs.oil_recovery.is_some())
            .then(|| Vec::with_capacity(iterations));
        let mut rec_gas_samples = (has_gas && inputs.gas_recovery.is_some())
            .then(|| Vec::with_capacity(iterations));

        // 参与敏感性分析的参数轨迹
        let mut traces: Vec<ParamTrace> = ["area", "thickness", "ntg", "porosity", "sw"]
            .iter()
            .map(|&name| ParamTrace {
                name,
                samples: Vec::with_capacity(retain_cap),
            })
            .collect();
        if has_oil {
            traces.push(ParamTrace {
                name: "bo",
                samples: Vec::with_capacity(retain_cap),
            });
        }
        if has_gas {
            traces.push(ParamTrace {
                name: "bg",
                samples: Vec::with_capacity(retain_cap),
            });
        }
        let mut primary_retained: Vec<f64> = Vec::with_capacity(retain_cap);

        let mut completed = 0usize;
        let mut status = SimulationStatus::Completed;

        for iter in 0..iterations {
            if iter % CANCEL_CHECK_STRIDE == 0 {
                if cancel.is_cancelled() {
                    status = SimulationStatus::Cancelled;
                    break;
                }
                if let Some(cb) = progress.as_deref_mut() {
                    cb((iter * 100 / iterations) as u8);
                }
            }

            let area = inputs.area.sample(&mut rng);
            let thickness = inputs.thickness.sample(&mut rng);
            let ntg = inputs.ntg.sample(&mut rng);
            let porosity = inputs.porosity.sample(&mut rng);
            let sw = inputs.sw.sample(&mut rng);
            let bo = inputs.bo.sample(&mut rng);
            let bg = inputs.bg.sample(&mut rng);

            let grv = area * thickness * unit_system.area_scale();
            let volumes = in_place_volumes(
                grv, ntg, porosity, sw, bo, bg, system, unit_system,
            );

            if let (Some(samples), Some(v)) = (stooip_samples.as_mut(), volumes.stooip) {
                samples.push(v);
            }
            if let (Some(samples), Some(v)) = (giip_samples.as_mut(), volumes.giip) {
                samples.push(v);
            }
            if let (Some(samples), Some(dist)) =
                (rec_oil_samples.as_mut(), inputs.oil_recovery.as_ref())
            {
                samples.push(volumes.stooip.unwrap_or(f64::NAN) * dist.sample(&mut rng));
            }
            if let (Some(samples), Some(dist)) =
                (rec_gas_samples.as_mut(), inputs.gas_recovery.as_ref())
            {
                samples.push(volumes.giip.unwrap_or(f64::NAN) * dist.sample(&mut rng));
            }

            if iter % retain_stride == 0 {
                let primary = if has_oil {
                    volumes.stooip.unwrap_or(f64::NAN)
                } else {
                    volumes.giip.unwrap_or(f64::NAN)
                };
                primary_retained.push(primary);
                for trace in &mut traces {
                    let v = match trace.name {
                        "area" => area,
                        "thickness" => thickness,
                        "ntg" => ntg,
                        "porosity" => porosity,
                        "sw" => sw,
                        "bo" => bo,
                        _ => bg,
                    };
                    trace.samples.push(v);
                }
            }

            completed = iter + 1;
        }

        if status == SimulationStatus::Completed {
            if let Some(cb) = progress.as_deref_mut() {
                cb(100);
            }
        }

        let sensitivity = compute_sensitivity(&traces, &primary_retained);

        tracing::info!(
            iterations = completed,
            status = ?status,
            system = system.name(),
            "蒙特卡洛模拟结束"
        );

        let stooip = stooip_samples.as_deref().and_then(OutputStats::from_samples);
        let giip = giip_samples.as_deref().and_then(OutputStats::from_samples);
        let recoverable_oil = rec_oil_samples
            .as_deref()
            .and_then(OutputStats::from_samples);
        let recoverable_gas = rec_gas_samples
            .as_deref()
            .and_then(OutputStats::from_samples);

        Ok(SimulationResult {
            status,
            iterations_completed: completed,
            raw: RawTrials {
                stooip: stooip_samples.unwrap_or_default(),
                giip: giip_samples.unwrap_or_default(),
            },
            stooip,
            giip,
            recoverable_oil,
            recoverable_gas,
            sensitivity,
        })
    }
}

/// 龙卷风敏感性：相关系数 + 线性斜率外推的 ±2σ 摆动
fn compute_sensitivity(traces: &[ParamTrace], output: &[f64]) -> Vec<SensitivityEntry> {
    let valid: Vec<usize> = (0..output.len())
        .filter(|&i| output[i].is_finite())
        .collect();
    if valid.len() < 2 {
        return Vec::new();
    }

    let out: Vec<f64> = valid.iter().map(|&i| output[i]).collect();
    let n = out.len() as f64;
    let out_mean = out.iter().sum::<f64>() / n;
    let out_sd =
        (out.iter().map(|v| (v - out_mean) * (v - out_mean)).sum::<f64>() / n).sqrt();

    let mut entries: Vec<SensitivityEntry> = traces
        .iter()
        .map(|trace| {
            let xs: Vec<f64> = valid.iter().map(|&i| trace.samples[i]).collect();
            let x_mean = xs.iter().sum::<f64>() / n;
            let x_sd =
                (xs.iter().map(|v| (v - x_mean) * (v - x_mean)).sum::<f64>() / n).sqrt();

            let correlation = pearson_correlation(&xs, &out);
            // slope = r × σ_out / σ_param；参数 ±2σ 的输出摆动
            let delta = if x_sd > 0.0 {
                let slope = correlation * out_sd / x_sd;
                2.0 * slope * x_sd
            } else {
                0.0
            };

            SensitivityEntry {
                parameter: trace.name.to_string(),
                correlation,
                base_value: out_mean,
                low_value: out_mean - delta.abs(),
                high_value: out_mean + delta.abs(),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.swing()
            .partial_cmp(&a.swing())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

// ============================================================================
// 测试
// ============================================================================
