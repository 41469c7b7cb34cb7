mod ops;

use std::fmt;
use std::ops::Range;

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::RollingConfig;
use crate::error::{Error, Result};
use crate::operator::{SeriesOperator, SetOperation};
use crate::stats;
use crate::temporal::{parse_iso, to_iso, RollingWindow, Timestamp, WindowSize};

/// 一変量の時系列データ
///
/// 日付は常に一意で、昇順に並んでいます。作成後は変更されず、
/// すべての操作は新しい時系列を返します。
///
/// 算術メソッド（`add`、`subtract`、`multiply`、`divide`）は `Result` を返します。
/// `std::ops::Add` などをスコープに入れると、所有値に対する `a.add(&b)` は
/// 演算子トレイト側（失敗しない版）に解決されます。その場合は
/// `TimeSeries::add(&a, &b)` のように型名から呼び出してください。
///
/// ```rust
/// use timeseries::TimeSeries;
///
/// let ts = TimeSeries::from_iso(&["1970-01-02", "1970-01-01", "1970-01-03"], vec![2, 1, 3]).unwrap();
///
/// assert_eq!(ts.values(), &[1.0, 2.0, 3.0]);
/// assert_eq!(ts.iso_dates()[1], "1970-01-02T00:00:00");
/// assert_eq!(ts.get_value_iso("1970-01-02").unwrap(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeriesData", into = "SeriesData")]
pub struct TimeSeries {
    /// 時系列の日付（昇順）
    dates: Vec<Timestamp>,

    /// 日付に対応する値
    values: Vec<f64>,
}

/// シリアライズ用の表現（読み込み時に検証される）
#[derive(Serialize, Deserialize)]
struct SeriesData {
    dates: Vec<Timestamp>,
    values: Vec<f64>,
}

impl TryFrom<SeriesData> for TimeSeries {
    type Error = Error;

    fn try_from(data: SeriesData) -> Result<Self> {
        TimeSeries::new(data.dates, data.values)
    }
}

impl From<TimeSeries> for SeriesData {
    fn from(ts: TimeSeries) -> Self {
        SeriesData {
            dates: ts.dates,
            values: ts.values,
        }
    }
}

impl TimeSeries {
    /// 日付と値から新しい時系列を作成
    ///
    /// 日付と値の長さが異なる場合、日付が重複する場合、
    /// 値を浮動小数点数に変換できない場合はエラーになります。
    pub fn new<V: ToPrimitive>(dates: Vec<Timestamp>, values: Vec<V>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(Error::InputDimension {
                dates: dates.len(),
                values: values.len(),
            });
        }

        let mut float_values = Vec::with_capacity(values.len());
        for (i, value) in values.iter().enumerate() {
            match value.to_f64() {
                Some(v) => float_values.push(v),
                None => {
                    return Err(Error::NumericValue(format!(
                        "位置 {} の値を浮動小数点数に変換できません",
                        i
                    )))
                }
            }
        }

        let mut pairs: Vec<(Timestamp, f64)> = dates.into_iter().zip(float_values).collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        if let Some(pair) = pairs.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(Error::Date(format!(
                "すべての日付は一意である必要があります: {}",
                to_iso(&pair[0].0)
            )));
        }

        let (dates, values) = pairs.into_iter().unzip();
        Ok(TimeSeries { dates, values })
    }

    /// ISO形式の日付文字列から作成
    pub fn from_iso<S, V>(dates: &[S], values: Vec<V>) -> Result<Self>
    where
        S: AsRef<str>,
        V: ToPrimitive,
    {
        let dates = dates
            .iter()
            .map(|s| parse_iso(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(dates, values)
    }

    /// 文字列の値から作成
    pub fn parse<S: AsRef<str>>(dates: Vec<Timestamp>, values: &[S]) -> Result<Self> {
        let values = values
            .iter()
            .map(|s| {
                let s = s.as_ref();
                s.trim().parse::<f64>().map_err(|_| {
                    Error::NumericValue(format!("'{}' を浮動小数点数に変換できません", s))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        Self::new(dates, values)
    }

    /// 整列済み・重複なしが保証された日付と値から作成（検証を省略）
    pub(crate) fn from_sorted_parts(dates: Vec<Timestamp>, values: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        debug_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        TimeSeries { dates, values }
    }

    /// 長さを取得
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 日付を取得
    pub fn dates(&self) -> &[Timestamp] {
        &self.dates
    }

    /// ISO形式の日付を取得
    pub fn iso_dates(&self) -> Vec<String> {
        self.dates.iter().map(to_iso).collect()
    }

    /// 値を取得
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// (日付, 値) の組を順に返す
    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// 位置から (日付, 値) を取得
    pub fn get(&self, pos: usize) -> Option<(Timestamp, f64)> {
        Some((*self.dates.get(pos)?, *self.values.get(pos)?))
    }

    pub fn first(&self) -> Option<(Timestamp, f64)> {
        self.get(0)
    }

    pub fn last(&self) -> Option<(Timestamp, f64)> {
        self.len().checked_sub(1).and_then(|pos| self.get(pos))
    }

    /// 日付の位置を二分探索で取得
    pub(crate) fn position(&self, date: &Timestamp) -> Option<usize> {
        self.dates.binary_search(date).ok()
    }

    /// 指定した日付の値を取得
    pub fn get_value(&self, date: &Timestamp) -> Result<f64> {
        self.position(date)
            .map(|pos| self.values[pos])
            .ok_or_else(|| Error::KeyNotFound(format!("{} は時系列に存在しません", to_iso(date))))
    }

    /// ISO形式の日付文字列で値を取得
    pub fn get_value_iso(&self, date: &str) -> Result<f64> {
        self.get_value(&parse_iso(date)?)
    }

    /// 指定した日付のみを含む時系列を取得
    pub fn select(&self, dates: &[Timestamp]) -> Result<Self> {
        let values = dates
            .iter()
            .map(|date| self.get_value(date))
            .collect::<Result<Vec<f64>>>()?;
        Self::new(dates.to_vec(), values)
    }

    /// 位置の範囲で時系列を切り出す
    pub fn slice(&self, range: Range<usize>) -> Result<Self> {
        if range.start > range.end {
            return Err(Error::IndexOutOfBounds {
                index: range.start,
                size: self.len(),
            });
        }
        if range.end > self.len() {
            return Err(Error::IndexOutOfBounds {
                index: range.end,
                size: self.len(),
            });
        }

        Ok(Self::from_sorted_parts(
            self.dates[range.clone()].to_vec(),
            self.values[range].to_vec(),
        ))
    }

    /// 指定された時間範囲（両端を含む）でフィルタリング
    pub fn filter_by_time(&self, start: &Timestamp, end: &Timestamp) -> Self {
        let (dates, values) = self
            .iter()
            .filter(|(date, _)| date >= start && date <= end)
            .unzip();
        Self::from_sorted_parts(dates, values)
    }

    /// ローリングウィンドウ操作を作成
    pub fn rolling<W: Into<WindowSize>>(
        &self,
        window_size: W,
        weights: &str,
        min_weight: Option<f64>,
    ) -> Result<RollingWindow<'_>> {
        RollingWindow::new(self, window_size, weights, min_weight)
    }

    /// 設定からローリングウィンドウ操作を作成
    pub fn rolling_with(&self, config: &RollingConfig) -> Result<RollingWindow<'_>> {
        RollingWindow::from_config(self, config)
    }

    /// 移動平均（均等な重みでの合計）
    pub fn moving_average<W: Into<WindowSize>>(&self, window_size: W) -> Result<Self> {
        self.rolling(window_size, "even", None)?.sum()
    }

    /// 指数加重移動平均
    pub fn exponential_moving_average(&self, alpha: f64) -> Result<Self> {
        self.rolling(1, "none", None)?
            .exponential_moving_average(alpha)
    }

    /// 移動分散（不偏分散）
    pub fn moving_variance<W: Into<WindowSize>>(&self, window_size: W) -> Result<Self> {
        let rolling = self.rolling(window_size, "none", None)?;
        if rolling.window_size() < 2 {
            return Err(Error::InsufficientData(format!(
                "移動分散にはウィンドウサイズ2以上が必要です: {}",
                rolling.window_size()
            )));
        }
        // ウィンドウサイズは2以上なので分散の計算は失敗しない
        rolling.custom(|window| stats::variance(window).unwrap_or(f64::NAN))
    }

    /// 演算子インターフェースを取得
    pub fn operator(&self) -> SeriesOperator<'_> {
        SeriesOperator::new(self)
    }

    /// 平均
    pub fn mean(&self) -> Result<f64> {
        stats::mean(&self.values)
    }

    /// 不偏分散
    pub fn variance(&self) -> Result<f64> {
        stats::variance(&self.values)
    }

    /// 共通の日付における共分散
    pub fn crosscovariance(&self, other: &TimeSeries) -> Result<f64> {
        self.aligned_statistic(other, |x, y| stats::crosscovariance(x, y))
    }

    /// 共通の日付におけるピアソン相関係数
    pub fn crosscorrelation(&self, other: &TimeSeries) -> Result<f64> {
        self.aligned_statistic(other, |x, y| stats::crosscorrelation(x, y))
    }

    fn aligned_statistic<F>(&self, other: &TimeSeries, func: F) -> Result<f64>
    where
        F: Fn(&[f64], &[f64]) -> Result<f64>,
    {
        let (x, y) = self.operator().align_with(other, SetOperation::Intersection, 0.0);
        func(x.values(), y.values())
    }
}

impl fmt::Display for TimeSeries {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:<19} {:>17}", "date", "value")?;
        for (date, value) in self.iter() {
            write!(f, "\n{} {:>17.2}", date.format("%Y-%m-%d %H:%M:%S"), value)?;
        }
        Ok(())
    }
}
