// 特定の警告を無効化
#![allow(clippy::needless_lifetimes)]
#![allow(clippy::type_complexity)]

//! 一変量時系列のローリングウィンドウ計算と日付を揃えた演算
//!
//! ```rust
//! use timeseries::TimeSeries;
//!
//! let ts = TimeSeries::from_iso(
//!     &["1970-01-01", "1970-01-02", "1970-01-03", "1970-01-04"],
//!     vec![1.0, 2.0, 3.0, 4.0],
//! )
//! .unwrap();
//!
//! let averaged = ts.moving_average(2).unwrap();
//! assert_eq!(averaged.values(), &[1.5, 2.5, 3.5]);
//!
//! let doubled = &ts * 2.0;
//! assert_eq!(doubled.values(), &[2.0, 4.0, 6.0, 8.0]);
//! ```

pub mod config;
pub mod error;
pub mod operator;
pub mod series;
pub mod stats;
pub mod temporal;

// Re-export commonly used types
pub use config::{OperatorConfig, RollingConfig};
pub use error::{Error, Result};
pub use operator::{FunctionValue, OperatorArg, OperatorOutput, SeriesOperator, SetOperation};
pub use series::TimeSeries;
pub use temporal::{
    FunctionParams, RollingWindow, Timestamp, Weights, WeightsKind, WeightsPolicy, WindowFunction,
    WindowFunctionKind, WindowSize,
};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
