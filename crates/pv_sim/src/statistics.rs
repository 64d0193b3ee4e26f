// petrovol\crates\pv_sim\src/statistics.rs

//! 模拟输出统计
//!
//! 试验数组的汇总统计：超越概率百分位数、直方图、经验 CDF
//! 与皮尔逊相关系数。
//!
//! # 百分位数约定
//!
//! 采用超越概率约定：P90 是 90% 试验**超过**的值（低值），
//! P10 是 10% 试验超过的值（高值），故 P90 ≤ P50 ≤ P10。
//! 按排序数组下标读取：`P90 = sorted[floor(0.1 × n)]`。

use serde::{Deserialize, Serialize};

/// 直方图固定分箱数
pub const HISTOGRAM_BINS: usize = 20;

/// CDF 曲线采样点数
pub const CDF_POINTS: usize = 100;

/// 等宽直方图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Histogram {
    /// 最小值（首箱左边界）
    pub min: f64,
    /// 最大值（末箱右边界）
    pub max: f64,
    /// 箱宽
    pub bin_width: f64,
    /// 各箱计数（长度 `HISTOGRAM_BINS`）
    pub counts: Vec<usize>,
}

/// 经验 CDF 采样点
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CdfPoint {
    /// 输出值
    pub value: f64,
    /// 累计百分比 (0–100]
    pub percent: f64,
}

/// 输出变量汇总统计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputStats {
    /// 有效（有限）试验数
    pub count: usize,
    /// 均值
    pub mean: f64,
    /// 总体标准差
    pub std_dev: f64,
    /// 最小值
    pub min: f64,
    /// 最大值
    pub max: f64,
    /// P90（超越约定，低值）
    pub p90: f64,
    /// P50（中位数）
    pub p50: f64,
    /// P10（超越约定，高值）
    pub p10: f64,
    /// 直方图
    pub histogram: Histogram,
    /// 经验 CDF 曲线
    pub cdf: Vec<CdfPoint>,
}

impl OutputStats {
    /// 由试验样本计算汇总统计
    ///
    /// 仅统计有限值（NaN / 无穷被过滤）；全部无效时返回 None。
    #[must_use]
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = samples.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_unstable_by(f64::total_cmp);

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let var = sorted.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
        let min = sorted[0];
        let max = sorted[n - 1];

        Some(Self {
            count: n,
            mean,
            std_dev: var.sqrt(),
            min,
            max,
            p90: exceedance_percentile(&sorted, 90.0),
            p50: exceedance_percentile(&sorted, 50.0),
            p10: exceedance_percentile(&sorted, 10.0),
            histogram: build_histogram(&sorted, min, max),
            cdf: build_cdf(&sorted),
        })
    }
}

/// 超越概率百分位数（输入须已升序排序且非空）
///
/// `Pxx = sorted[floor((100 − xx)/100 × n)]`，下标钳制在数组内。
/// 注意不可写成 `1 − xx/100`：`1.0 − 0.9` 的浮点表示略小于 0.1，
/// floor 后下标会偏低一位。
#[must_use]
pub fn exceedance_percentile(sorted: &[f64], percentile: f64) -> f64 {
    let n = sorted.len();
    let idx = ((100.0 - percentile) / 100.0 * n as f64).floor() as usize;
    sorted[idx.min(n - 1)]
}

fn build_histogram(sorted: &[f64], min: f64, max: f64) -> Histogram {
    let span = max - min;
    let mut counts = vec![0usize; HISTOGRAM_BINS];

    if span <= 0.0 {
        // 退化：所有值相同，全部落入首箱
        counts[0] = sorted.len();
        return Histogram {
            min,
            max,
            bin_width: 0.0,
            counts,
        };
    }

    let bin_width = span / HISTOGRAM_BINS as f64;
    for &v in sorted {
        let bin = (((v - min) / bin_width) as usize).min(HISTOGRAM_BINS - 1);
        counts[bin] += 1;
    }

    Histogram {
        min,
        max,
        bin_width,
        counts,
    }
}

fn build_cdf(sorted: &[f64]) -> Vec<CdfPoint> {
    let n = sorted.len();
    let stride = (n / CDF_POINTS).max(1);

    let mut cdf: Vec<CdfPoint> = (0..n)
        .step_by(stride)
        .map(|i| CdfPoint {
            value: sorted[i],
            percent: 100.0 * (i + 1) as f64 / n as f64,
        })
        .collect();

    // 末点强制到最大值 / 100%
    cdf.push(CdfPoint {
        value: sorted[n - 1],
        percent: 100.0,
    });
    cdf
}

/// 皮尔逊相关系数
///
/// 任一序列为常量或方差为零时返回 0 而非 NaN。常量序列按精确
/// 相等检测：其均值的浮点累加误差会制造极小的伪方差，不能靠
/// `var <= 0` 捕获。
#[must_use]
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return 0.0;
    }
    if xs[..n].iter().all(|&v| v == xs[0]) || ys[..n].iter().all(|&v| v == ys[0]) {
        return 0.0;
    }
    let nf = n as f64;

    let mean_x = xs[..n].iter().sum::<f64>() / nf;
    let mean_y = ys[..n].iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = xs[i] - mean_x;
        let dy = ys[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return 0.0;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

// ============================================================================
// 测试
// ============================================================================
