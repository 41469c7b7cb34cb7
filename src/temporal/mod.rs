//! 時系列データ操作のためのモジュール
//!
//! タイムスタンプの変換と、ローリングウィンドウによるフィルタリング
//! （重みの生成、ウィンドウ関数、ウィンドウエンジン）を提供します。

pub mod function;
pub mod weights;
pub mod window;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};

pub use self::function::{SeriesFunction, WindowFunction, WindowFunctionKind, WindowReducer};
pub use self::weights::{EvenWeights, LinearWeights, NoneWeights, Weights, WeightsKind, WeightsPolicy};
pub use self::window::{FunctionParams, RollingWindow, WindowSize};

/// 時系列のタイムスタンプ（日付＋時刻）
pub type Timestamp = NaiveDateTime;

/// ISO-8601形式の文字列からタイムスタンプに変換
///
/// `1970-01-02T03:04:05`、`1970-01-02 03:04:05`（小数秒も可）と、
/// 日付のみの `1970-01-02`（00:00:00として扱う）を受け付けます。
pub fn parse_iso(s: &str) -> Result<Timestamp> {
    let s = s.trim();
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => Ok(date.and_time(NaiveTime::MIN)),
        Err(e) => Err(Error::Date(format!(
            "'{}' はISO形式の日時ではありません: {}",
            s, e
        ))),
    }
}

/// タイムスタンプをISO-8601形式の文字列に変換
pub fn to_iso(ts: &Timestamp) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}
