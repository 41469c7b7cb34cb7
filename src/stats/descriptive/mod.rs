// 記述統計モジュール

use crate::error::{Error, Result};

/// 平均を計算する内部実装
pub(crate) fn mean_impl(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::EmptyData("平均の計算には少なくとも1つのデータが必要です".into()));
    }

    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// 不偏分散を計算する内部実装
pub(crate) fn variance_impl(data: &[f64]) -> Result<f64> {
    let mean = mean_impl(data)?;
    let n = data.len();

    if n <= 1 {
        return Err(Error::InsufficientData("分散計算には少なくとも2つのデータポイントが必要です".into()));
    }

    let sum_squared_diff = data.iter()
        .map(|&x| (x - mean).powi(2))
        .sum::<f64>();

    Ok(sum_squared_diff / (n - 1) as f64)
}

fn check_pair(x: &[f64], y: &[f64], name: &str) -> Result<()> {
    if x.len() != y.len() {
        return Err(Error::InputDimension { dates: x.len(), values: y.len() });
    }

    if x.is_empty() {
        return Err(Error::EmptyData(format!("{}計算にはデータが必要です", name)));
    }

    if x.len() <= 1 {
        return Err(Error::InsufficientData(format!(
            "{}計算には少なくとも2つのデータポイントが必要です",
            name
        )));
    }

    Ok(())
}

/// 共分散を計算する内部実装
pub(crate) fn crosscovariance_impl(x: &[f64], y: &[f64]) -> Result<f64> {
    check_pair(x, y, "共分散")?;

    let n = x.len();
    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let cov = x.iter().zip(y.iter())
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .sum::<f64>() / (n - 1) as f64;

    Ok(cov)
}

/// 相関係数を計算する内部実装
pub(crate) fn crosscorrelation_impl(x: &[f64], y: &[f64]) -> Result<f64> {
    check_pair(x, y, "相関係数")?;

    let n = x.len();
    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    // 分子: Σ(xi - x̄)(yi - ȳ)
    let numerator = x.iter().zip(y.iter())
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .sum::<f64>();

    // 分母: √[Σ(xi - x̄)² * Σ(yi - ȳ)²]
    let sum_squared_diff_x = x.iter()
        .map(|&xi| (xi - mean_x).powi(2))
        .sum::<f64>();

    let sum_squared_diff_y = y.iter()
        .map(|&yi| (yi - mean_y).powi(2))
        .sum::<f64>();

    if sum_squared_diff_x <= 0.0 || sum_squared_diff_y <= 0.0 {
        return Err(Error::ComputationError("分散がゼロの系列の相関係数は計算できません".into()));
    }

    let denominator = (sum_squared_diff_x * sum_squared_diff_y).sqrt();
    Ok(numerator / denominator)
}
