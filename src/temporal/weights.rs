//! ローリングウィンドウの重みを生成するモジュール

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// ウィンドウサイズから重みの列を生成するトレイト
pub trait Weights {
    /// 長さ `window_size` の重みを返す
    fn get_weights(&self, window_size: usize) -> Vec<f64>;
}

/// 均等な重み（合計は1）
///
/// ```rust
/// use timeseries::temporal::{EvenWeights, Weights};
///
/// assert_eq!(EvenWeights.get_weights(4), vec![0.25, 0.25, 0.25, 0.25]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvenWeights;

impl Weights for EvenWeights {
    fn get_weights(&self, window_size: usize) -> Vec<f64> {
        vec![1.0 / window_size as f64; window_size]
    }
}

/// `min_weight` から線形に増加する重み（合計は1）
///
/// ```rust
/// use timeseries::temporal::{LinearWeights, Weights};
///
/// let weights = LinearWeights::new(0.1).unwrap().get_weights(4);
/// for (w, expected) in weights.iter().zip([0.1, 0.2, 0.3, 0.4]) {
///     assert!((w - expected).abs() < 1e-12);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearWeights {
    min_weight: f64,
}

impl LinearWeights {
    /// 最小の重みを指定して作成
    /// min_weight: 0.0 < min_weight < 1.0
    pub fn new(min_weight: f64) -> Result<Self> {
        if !(min_weight > 0.0 && min_weight < 1.0) {
            return Err(Error::Weights(format!(
                "最小の重み ({}) は0と1の間である必要があります",
                min_weight
            )));
        }
        Ok(LinearWeights { min_weight })
    }

    /// 最小の重みを取得
    pub fn min_weight(&self) -> f64 {
        self.min_weight
    }
}

impl Weights for LinearWeights {
    fn get_weights(&self, window_size: usize) -> Vec<f64> {
        // 傾きが定義できないため、長さ1のウィンドウは重み1のみ
        if window_size == 1 {
            return vec![1.0];
        }

        // 1から window_size-1 までの自然数の和
        let partial_sum = (window_size * (window_size - 1) / 2) as f64;
        // 重みの合計が1になる傾き
        let slope = (1.0 - window_size as f64 * self.min_weight) / partial_sum;

        (0..window_size)
            .map(|i| self.min_weight + slope * i as f64)
            .collect()
    }
}

/// 重みなし（すべて1、正規化しない）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoneWeights;

impl Weights for NoneWeights {
    fn get_weights(&self, window_size: usize) -> Vec<f64> {
        vec![1.0; window_size]
    }
}

/// 重みの種類を表すキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightsKind {
    /// すべての点を均等に重み付け
    #[default]
    Even,
    /// `min_weight` から線形に増加
    Linear,
    /// 重みなし
    None,
}

impl WeightsKind {
    /// キー文字列
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightsKind::Even => "even",
            WeightsKind::Linear => "linear",
            WeightsKind::None => "none",
        }
    }
}

impl fmt::Display for WeightsKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WeightsKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "even" => Ok(WeightsKind::Even),
            "linear" => Ok(WeightsKind::Linear),
            "none" => Ok(WeightsKind::None),
            other => Err(Error::UnknownPolicy(other.to_string())),
        }
    }
}

/// 構築済みの重み生成器
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightsPolicy {
    Even(EvenWeights),
    Linear(LinearWeights),
    None(NoneWeights),
}

impl WeightsPolicy {
    /// キーと追加パラメータから重み生成器を作成
    pub fn from_kind(kind: WeightsKind, min_weight: Option<f64>) -> Result<Self> {
        match kind {
            WeightsKind::Even => Ok(WeightsPolicy::Even(EvenWeights)),
            WeightsKind::Linear => {
                let min_weight = min_weight.ok_or_else(|| {
                    Error::Weights("線形の重みには min_weight が必要です".to_string())
                })?;
                Ok(WeightsPolicy::Linear(LinearWeights::new(min_weight)?))
            }
            WeightsKind::None => Ok(WeightsPolicy::None(NoneWeights)),
        }
    }

    /// 重みの種類
    pub fn kind(&self) -> WeightsKind {
        match self {
            WeightsPolicy::Even(_) => WeightsKind::Even,
            WeightsPolicy::Linear(_) => WeightsKind::Linear,
            WeightsPolicy::None(_) => WeightsKind::None,
        }
    }
}

impl Weights for WeightsPolicy {
    fn get_weights(&self, window_size: usize) -> Vec<f64> {
        match self {
            WeightsPolicy::Even(w) => w.get_weights(window_size),
            WeightsPolicy::Linear(w) => w.get_weights(window_size),
            WeightsPolicy::None(w) => w.get_weights(window_size),
        }
    }
}
