//! 時系列データのローリングウィンドウ操作を行うモジュール

use std::fmt;

use crate::config::RollingConfig;
use crate::error::{Error, Result};
use crate::series::TimeSeries;
use crate::temporal::function::{SeriesFunction, WindowFunction, WindowFunctionKind, WindowReducer};
use crate::temporal::weights::{Weights, WeightsKind, WeightsPolicy};

/// ウィンドウサイズとして受け付ける値
///
/// 数値に変換できる値であれば受け付け、検証は [`RollingWindow`] 側で行います。
#[derive(Debug, Clone, PartialEq)]
pub enum WindowSize {
    Integer(i64),
    Float(f64),
    Text(String),
    Sequence(Vec<f64>),
}

impl WindowSize {
    /// 時系列の長さに対して検証し、整数のウィンドウサイズを返す
    pub fn validate(&self, len: usize) -> Result<usize> {
        let value = match self {
            WindowSize::Integer(i) => *i as f64,
            WindowSize::Float(f) => *f,
            WindowSize::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::WindowSizeType(s.clone()))?,
            WindowSize::Sequence(_) => return Err(Error::WindowSizeType(self.to_string())),
        };

        if !value.is_finite() || value.fract() != 0.0 {
            return Err(Error::WindowSizeValue(format!(
                "ウィンドウサイズ ({}) は整数である必要があります",
                value
            )));
        }
        if value > len as f64 {
            return Err(Error::WindowTooLarge {
                window_size: value as usize,
                len,
            });
        }
        if value <= 0.0 {
            return Err(Error::WindowSizeValue(format!(
                "ウィンドウサイズ ({}) は1以上である必要があります",
                value
            )));
        }

        Ok(value as usize)
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WindowSize::Integer(i) => write!(f, "{}", i),
            WindowSize::Float(v) => write!(f, "{}", v),
            WindowSize::Text(s) => write!(f, "{}", s),
            WindowSize::Sequence(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<usize> for WindowSize {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or(WindowSize::Float(value as f64), WindowSize::Integer)
    }
}

impl From<i32> for WindowSize {
    fn from(value: i32) -> Self {
        WindowSize::Integer(value as i64)
    }
}

impl From<i64> for WindowSize {
    fn from(value: i64) -> Self {
        WindowSize::Integer(value)
    }
}

impl From<f64> for WindowSize {
    fn from(value: f64) -> Self {
        WindowSize::Float(value)
    }
}

impl From<&str> for WindowSize {
    fn from(value: &str) -> Self {
        WindowSize::Text(value.to_string())
    }
}

impl From<String> for WindowSize {
    fn from(value: String) -> Self {
        WindowSize::Text(value)
    }
}

impl From<Vec<f64>> for WindowSize {
    fn from(value: Vec<f64>) -> Self {
        WindowSize::Sequence(value)
    }
}

impl From<&[f64]> for WindowSize {
    fn from(value: &[f64]) -> Self {
        WindowSize::Sequence(value.to_vec())
    }
}

/// 名前でウィンドウ関数を呼び出す際のパラメータ
#[derive(Default)]
pub struct FunctionParams<'f> {
    reducer: Option<Box<dyn Fn(&[f64]) -> f64 + 'f>>,
    transform: Option<Box<dyn Fn(f64) -> f64 + 'f>>,
    alpha: Option<f64>,
}

impl<'f> FunctionParams<'f> {
    pub fn new() -> Self {
        Self::default()
    }

    /// `custom` 用の集計関数
    pub fn with_reducer<F>(mut self, func: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + 'f,
    {
        self.reducer = Some(Box::new(func));
        self
    }

    /// `exponential_custom` 用の変換関数
    pub fn with_transform<F>(mut self, func: F) -> Self
    where
        F: Fn(f64) -> f64 + 'f,
    {
        self.transform = Some(Box::new(func));
        self
    }

    /// 指数平滑化の平滑化係数
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    fn into_function(self, kind: WindowFunctionKind) -> Result<WindowFunction<'f>> {
        let alpha = self.alpha;
        let require_alpha =
            || alpha.ok_or_else(|| Error::MissingParameter(format!("{} には alpha が必要です", kind)));

        match kind {
            WindowFunctionKind::Sum => Ok(WindowFunction::sum()),
            WindowFunctionKind::Custom => {
                let reducer = self.reducer.ok_or_else(|| {
                    Error::MissingParameter(format!("{} には集計関数が必要です", kind))
                })?;
                Ok(WindowFunction::Window(WindowReducer::Custom(reducer)))
            }
            WindowFunctionKind::ExponentialCustom => {
                let alpha = require_alpha()?;
                let func = self.transform.ok_or_else(|| {
                    Error::MissingParameter(format!("{} には変換関数が必要です", kind))
                })?;
                Ok(WindowFunction::Series(SeriesFunction::exponential_custom(
                    func, alpha,
                )?))
            }
            WindowFunctionKind::ExponentialMovingAverage => {
                WindowFunction::exponential_moving_average(require_alpha()?)
            }
        }
    }
}

/// ローリングウィンドウによるフィルタリングを行うための構造体
#[derive(Debug, Clone)]
pub struct RollingWindow<'a> {
    /// 元の時系列データへの参照
    time_series: &'a TimeSeries,

    /// ウィンドウのサイズ（検証済み）
    window_size: usize,

    /// 重みの生成器
    weights: WeightsPolicy,
}

impl<'a> RollingWindow<'a> {
    /// 新しいローリングウィンドウを作成
    ///
    /// `weights` は `"even"`、`"linear"`、`"none"` のいずれか。
    /// `"linear"` の場合は `min_weight` が必要です。
    pub fn new<W>(
        time_series: &'a TimeSeries,
        window_size: W,
        weights: &str,
        min_weight: Option<f64>,
    ) -> Result<Self>
    where
        W: Into<WindowSize>,
    {
        let kind: WeightsKind = weights.parse()?;
        let window_size = window_size.into().validate(time_series.len())?;
        let weights = WeightsPolicy::from_kind(kind, min_weight)?;

        log::debug!(
            "rolling window: size {} over {} entries, {} weights",
            window_size,
            time_series.len(),
            kind
        );

        Ok(RollingWindow {
            time_series,
            window_size,
            weights,
        })
    }

    /// 設定から作成
    pub fn from_config(time_series: &'a TimeSeries, config: &RollingConfig) -> Result<Self> {
        Self::new(
            time_series,
            config.window_size,
            &config.weights,
            config.min_weight,
        )
    }

    /// ウィンドウサイズを取得
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// ウィンドウサイズを再設定（現在の時系列の長さに対して再検証）
    pub fn set_window_size<W: Into<WindowSize>>(&mut self, window_size: W) -> Result<()> {
        self.window_size = window_size.into().validate(self.time_series.len())?;
        Ok(())
    }

    /// 重みの種類を取得
    pub fn weights(&self) -> WeightsKind {
        self.weights.kind()
    }

    /// 現在のウィンドウサイズに対する重みを取得
    pub fn get_weights(&self) -> Vec<f64> {
        self.weights.get_weights(self.window_size)
    }

    /// ウィンドウ関数を適用
    pub fn apply(&self, function: WindowFunction<'_>) -> Result<TimeSeries> {
        match function {
            WindowFunction::Series(func) => self.apply_series_function(&func),
            WindowFunction::Window(reducer) => self.apply_window_reducer(&reducer),
        }
    }

    /// 名前でウィンドウ関数を適用
    pub fn apply_named(&self, key: &str, params: FunctionParams<'_>) -> Result<TimeSeries> {
        let kind: WindowFunctionKind = key.parse()?;
        self.apply(params.into_function(kind)?)
    }

    /// ウィンドウ内の重み付き合計
    pub fn sum(&self) -> Result<TimeSeries> {
        self.apply(WindowFunction::sum())
    }

    /// 重み付きウィンドウに任意の集計関数を適用
    pub fn custom<F>(&self, func: F) -> Result<TimeSeries>
    where
        F: Fn(&[f64]) -> f64,
    {
        self.apply(WindowFunction::custom(func))
    }

    /// 変換関数を適用してから指数平滑化
    pub fn exponential_custom<F>(&self, func: F, alpha: f64) -> Result<TimeSeries>
    where
        F: Fn(f64) -> f64,
    {
        self.apply(WindowFunction::exponential_custom(func, alpha)?)
    }

    /// 指数加重移動平均
    pub fn exponential_moving_average(&self, alpha: f64) -> Result<TimeSeries> {
        self.apply(WindowFunction::exponential_moving_average(alpha)?)
    }

    fn apply_series_function(&self, func: &SeriesFunction<'_>) -> Result<TimeSeries> {
        if self.weights.kind() != WeightsKind::None {
            log::warn!(
                "{} weights have no effect on whole-series functions",
                self.weights.kind()
            );
        }

        let values = func.apply_to_series(self.time_series.values());
        TimeSeries::new(self.time_series.dates().to_vec(), values)
    }

    fn apply_window_reducer(&self, reducer: &WindowReducer<'_>) -> Result<TimeSeries> {
        let window_size = self.window_size;
        let weights = self.get_weights();
        let values = self.time_series.values();

        // 各ウィンドウの結果はウィンドウ末尾の日付に対応
        let dates = self.time_series.dates()[window_size - 1..].to_vec();

        let mut result_values = Vec::with_capacity(dates.len());
        let mut weighted = Vec::with_capacity(window_size);
        for window in values.windows(window_size) {
            weighted.clear();
            weighted.extend(window.iter().zip(&weights).map(|(v, w)| v * w));
            result_values.push(reducer.apply_to_window(&weighted));
        }

        TimeSeries::new(dates, result_values)
    }
}
