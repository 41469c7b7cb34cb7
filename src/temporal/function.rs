//! ウィンドウ関数を定義するモジュール
//!
//! ウィンドウ関数は次のいずれか一方の形を持ちます。
//! - ウィンドウ単位の集計（重み付きのウィンドウを1つの値に集約）
//! - 系列全体の関数（系列全体を一度に変換し、重みは使用しない）

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// ウィンドウ関数のキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowFunctionKind {
    Sum,
    Custom,
    ExponentialCustom,
    ExponentialMovingAverage,
}

impl WindowFunctionKind {
    /// キー文字列
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowFunctionKind::Sum => "sum",
            WindowFunctionKind::Custom => "custom",
            WindowFunctionKind::ExponentialCustom => "exponential_custom",
            WindowFunctionKind::ExponentialMovingAverage => "exponential_moving_average",
        }
    }

    /// 系列全体の関数かどうか
    pub fn is_series_function(&self) -> bool {
        matches!(
            self,
            WindowFunctionKind::ExponentialCustom | WindowFunctionKind::ExponentialMovingAverage
        )
    }
}

impl fmt::Display for WindowFunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WindowFunctionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sum" => Ok(WindowFunctionKind::Sum),
            "custom" => Ok(WindowFunctionKind::Custom),
            "exponential_custom" => Ok(WindowFunctionKind::ExponentialCustom),
            "exponential_moving_average" => Ok(WindowFunctionKind::ExponentialMovingAverage),
            other => Err(Error::UnknownFunction(other.to_string())),
        }
    }
}

/// ウィンドウ単位の集計関数
pub enum WindowReducer<'f> {
    /// 任意の集計関数
    Custom(Box<dyn Fn(&[f64]) -> f64 + 'f>),
    /// 合計
    Sum,
}

impl<'f> WindowReducer<'f> {
    /// 任意の集計関数から作成
    pub fn custom<F>(func: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + 'f,
    {
        WindowReducer::Custom(Box::new(func))
    }

    /// 重み付き済みのウィンドウを1つの値に集約
    pub fn apply_to_window(&self, values: &[f64]) -> f64 {
        match self {
            WindowReducer::Custom(func) => func(values),
            WindowReducer::Sum => values.iter().sum(),
        }
    }
}

impl fmt::Debug for WindowReducer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WindowReducer::Custom(_) => write!(f, "Custom(..)"),
            WindowReducer::Sum => write!(f, "Sum"),
        }
    }
}

/// 系列全体に適用する指数平滑化関数
pub enum SeriesFunction<'f> {
    /// 各値を変換してから指数平滑化
    ExponentialCustom {
        func: Box<dyn Fn(f64) -> f64 + 'f>,
        alpha: f64,
    },
    /// 指数加重移動平均
    ExponentialMovingAverage { alpha: f64 },
}

impl<'f> SeriesFunction<'f> {
    /// 変換関数付きの指数平滑化を作成
    /// alpha: 0.0 < alpha <= 1.0
    pub fn exponential_custom<F>(func: F, alpha: f64) -> Result<Self>
    where
        F: Fn(f64) -> f64 + 'f,
    {
        validate_alpha(alpha)?;
        Ok(SeriesFunction::ExponentialCustom {
            func: Box::new(func),
            alpha,
        })
    }

    /// 指数加重移動平均を作成
    /// alpha: 0.0 < alpha <= 1.0
    pub fn exponential_moving_average(alpha: f64) -> Result<Self> {
        validate_alpha(alpha)?;
        Ok(SeriesFunction::ExponentialMovingAverage { alpha })
    }

    /// 平滑化係数
    pub fn alpha(&self) -> f64 {
        match self {
            SeriesFunction::ExponentialCustom { alpha, .. } => *alpha,
            SeriesFunction::ExponentialMovingAverage { alpha } => *alpha,
        }
    }

    /// 系列全体に適用（出力の長さは入力と同じ）
    pub fn apply_to_series(&self, values: &[f64]) -> Vec<f64> {
        match self {
            SeriesFunction::ExponentialCustom { func, alpha } => {
                let transformed: Vec<f64> = values.iter().map(|&v| func(v)).collect();
                exponential_smoothing(&transformed, *alpha)
            }
            SeriesFunction::ExponentialMovingAverage { alpha } => {
                exponential_smoothing(values, *alpha)
            }
        }
    }
}

impl fmt::Debug for SeriesFunction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SeriesFunction::ExponentialCustom { alpha, .. } => {
                write!(f, "ExponentialCustom {{ alpha: {} }}", alpha)
            }
            SeriesFunction::ExponentialMovingAverage { alpha } => {
                write!(f, "ExponentialMovingAverage {{ alpha: {} }}", alpha)
            }
        }
    }
}

/// ウィンドウ関数（2つの形のいずれか）
#[derive(Debug)]
pub enum WindowFunction<'f> {
    /// ウィンドウ単位の集計
    Window(WindowReducer<'f>),
    /// 系列全体の関数
    Series(SeriesFunction<'f>),
}

impl<'f> WindowFunction<'f> {
    /// 合計
    pub fn sum() -> Self {
        WindowFunction::Window(WindowReducer::Sum)
    }

    /// 任意の集計関数
    pub fn custom<F>(func: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + 'f,
    {
        WindowFunction::Window(WindowReducer::custom(func))
    }

    /// 変換関数付きの指数平滑化
    pub fn exponential_custom<F>(func: F, alpha: f64) -> Result<Self>
    where
        F: Fn(f64) -> f64 + 'f,
    {
        Ok(WindowFunction::Series(SeriesFunction::exponential_custom(
            func, alpha,
        )?))
    }

    /// 指数加重移動平均
    pub fn exponential_moving_average(alpha: f64) -> Result<Self> {
        Ok(WindowFunction::Series(
            SeriesFunction::exponential_moving_average(alpha)?,
        ))
    }

    /// 関数のキー
    pub fn kind(&self) -> WindowFunctionKind {
        match self {
            WindowFunction::Window(WindowReducer::Sum) => WindowFunctionKind::Sum,
            WindowFunction::Window(WindowReducer::Custom(_)) => WindowFunctionKind::Custom,
            WindowFunction::Series(SeriesFunction::ExponentialCustom { .. }) => {
                WindowFunctionKind::ExponentialCustom
            }
            WindowFunction::Series(SeriesFunction::ExponentialMovingAverage { .. }) => {
                WindowFunctionKind::ExponentialMovingAverage
            }
        }
    }
}

fn validate_alpha(alpha: f64) -> Result<()> {
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(Error::SmoothingFactor(alpha));
    }
    Ok(())
}

/// 再帰的な指数平滑化（初期値の補正なし）
fn exponential_smoothing(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut smoothed_values = Vec::with_capacity(values.len());
    let mut iter = values.iter();

    if let Some(&first) = iter.next() {
        let mut smoothed = first;
        smoothed_values.push(smoothed);
        for &value in iter {
            smoothed = (1.0 - alpha) * smoothed + alpha * value;
            smoothed_values.push(smoothed);
        }
    }

    smoothed_values
}
