// 統計モジュール
//
// ローリングウィンドウの集計関数や時系列同士の比較に使う記述統計を提供します。
// 分散・共分散はベッセル補正（n-1 で割る）を行います。

pub mod descriptive;

use crate::error::Result;

/// 標本平均を計算
///
/// # 例
/// ```rust
/// use timeseries::stats;
///
/// assert_eq!(stats::mean(&[1.0, 2.0, 3.0]).unwrap(), 2.0);
/// ```
pub fn mean<T: AsRef<[f64]>>(data: T) -> Result<f64> {
    descriptive::mean_impl(data.as_ref())
}

/// 不偏分散を計算
///
/// # 例
/// ```rust
/// use timeseries::stats;
///
/// assert_eq!(stats::variance(&[1.0, 2.0, 3.0]).unwrap(), 1.0);
/// ```
pub fn variance<T: AsRef<[f64]>>(data: T) -> Result<f64> {
    descriptive::variance_impl(data.as_ref())
}

/// 相互共分散（正規化なし）を計算
///
/// # 例
/// ```rust
/// use timeseries::stats;
///
/// let cov = stats::crosscovariance(&[1.0, 2.0, 3.0], &[-2.0, -4.0, -6.0]).unwrap();
/// assert_eq!(cov, -2.0);
/// ```
pub fn crosscovariance<T: AsRef<[f64]>, U: AsRef<[f64]>>(x: T, y: U) -> Result<f64> {
    descriptive::crosscovariance_impl(x.as_ref(), y.as_ref())
}

/// ピアソンの相互相関係数を計算
///
/// どちらかの分散がゼロの場合はエラーになります。
///
/// # 例
/// ```rust
/// use timeseries::stats;
///
/// let corr = stats::crosscorrelation(&[1.0, 2.0, 3.0], &[-2.0, -4.0, -6.0]).unwrap();
/// assert!((corr + 1.0).abs() < 1e-12);
/// ```
pub fn crosscorrelation<T: AsRef<[f64]>, U: AsRef<[f64]>>(x: T, y: U) -> Result<f64> {
    descriptive::crosscorrelation_impl(x.as_ref(), y.as_ref())
}
