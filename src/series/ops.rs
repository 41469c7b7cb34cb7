//! 時系列の算術演算
//!
//! 加算・減算は和集合（欠損は0で補完）、乗算・除算・累乗は共通部分
//! （欠損は1で補完）で日付を揃えてから要素ごとに計算します。

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::Result;
use crate::operator::functions::{self, BinaryFunction};
use crate::operator::{combine_scalar, combine_series, OperatorArg, OperatorConfig, SetOperation};
use crate::series::TimeSeries;

impl TimeSeries {
    fn arithmetic<'b, A>(&self, func: BinaryFunction, arg: A, config: OperatorConfig) -> Result<Self>
    where
        A: Into<OperatorArg<'b>>,
    {
        self.operator().custom(func, arg, &config)?.into_series()
    }

    /// 加算（和集合、欠損は0）
    pub fn add<'b, A: Into<OperatorArg<'b>>>(&self, arg: A) -> Result<Self> {
        self.arithmetic(functions::add, arg, OperatorConfig::union(0.0))
    }

    /// 右側からの加算
    pub fn radd<'b, A: Into<OperatorArg<'b>>>(&self, arg: A) -> Result<Self> {
        self.arithmetic(functions::add, arg, OperatorConfig::union(0.0))
    }

    /// 減算（和集合、欠損は0）
    pub fn subtract<'b, A: Into<OperatorArg<'b>>>(&self, arg: A) -> Result<Self> {
        self.arithmetic(functions::subtract, arg, OperatorConfig::union(0.0))
    }

    /// 右側からの減算（`arg - self`）
    pub fn rsubtract<'b, A: Into<OperatorArg<'b>>>(&self, arg: A) -> Result<Self> {
        self.arithmetic(functions::right_subtract, arg, OperatorConfig::union(0.0))
    }

    /// 乗算（共通部分、欠損は1）
    pub fn multiply<'b, A: Into<OperatorArg<'b>>>(&self, arg: A) -> Result<Self> {
        self.arithmetic(functions::multiply, arg, OperatorConfig::intersection(1.0))
    }

    /// 右側からの乗算
    pub fn rmultiply<'b, A: Into<OperatorArg<'b>>>(&self, arg: A) -> Result<Self> {
        self.arithmetic(functions::multiply, arg, OperatorConfig::intersection(1.0))
    }

    /// 除算（共通部分、欠損は1）
    pub fn divide<'b, A: Into<OperatorArg<'b>>>(&self, arg: A) -> Result<Self> {
        self.arithmetic(functions::divide, arg, OperatorConfig::intersection(1.0))
    }

    /// 右側からの除算（`arg / self`）
    pub fn rdivide<'b, A: Into<OperatorArg<'b>>>(&self, arg: A) -> Result<Self> {
        self.arithmetic(functions::right_divide, arg, OperatorConfig::intersection(1.0))
    }

    /// 累乗（共通部分、欠損は1）
    pub fn power<'b, A: Into<OperatorArg<'b>>>(&self, arg: A) -> Result<Self> {
        self.arithmetic(functions::power, arg, OperatorConfig::intersection(1.0))
    }

    /// 右側からの累乗（`arg ^ self`）
    pub fn rpower<'b, A: Into<OperatorArg<'b>>>(&self, arg: A) -> Result<Self> {
        self.arithmetic(functions::right_power, arg, OperatorConfig::intersection(1.0))
    }
}

// 演算子記号の実装（時系列同士・スカラーとの演算は失敗しない）
macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $func:path, $rfunc:path, $operation:expr, $fill:expr) => {
        impl $trait<&TimeSeries> for &TimeSeries {
            type Output = TimeSeries;

            fn $method(self, rhs: &TimeSeries) -> TimeSeries {
                combine_series(self, rhs, $func, $operation, $fill)
            }
        }

        impl $trait<TimeSeries> for TimeSeries {
            type Output = TimeSeries;

            fn $method(self, rhs: TimeSeries) -> TimeSeries {
                <&TimeSeries as $trait<&TimeSeries>>::$method(&self, &rhs)
            }
        }

        impl $trait<&TimeSeries> for TimeSeries {
            type Output = TimeSeries;

            fn $method(self, rhs: &TimeSeries) -> TimeSeries {
                <&TimeSeries as $trait<&TimeSeries>>::$method(&self, rhs)
            }
        }

        impl $trait<TimeSeries> for &TimeSeries {
            type Output = TimeSeries;

            fn $method(self, rhs: TimeSeries) -> TimeSeries {
                <&TimeSeries as $trait<&TimeSeries>>::$method(self, &rhs)
            }
        }

        impl $trait<f64> for &TimeSeries {
            type Output = TimeSeries;

            fn $method(self, rhs: f64) -> TimeSeries {
                combine_scalar(self, rhs, $func)
            }
        }

        impl $trait<f64> for TimeSeries {
            type Output = TimeSeries;

            fn $method(self, rhs: f64) -> TimeSeries {
                combine_scalar(&self, rhs, $func)
            }
        }

        impl $trait<&TimeSeries> for f64 {
            type Output = TimeSeries;

            fn $method(self, rhs: &TimeSeries) -> TimeSeries {
                combine_scalar(rhs, self, $rfunc)
            }
        }

        impl $trait<TimeSeries> for f64 {
            type Output = TimeSeries;

            fn $method(self, rhs: TimeSeries) -> TimeSeries {
                combine_scalar(&rhs, self, $rfunc)
            }
        }
    };
}

impl_binary_op!(Add, add, functions::add, functions::add, SetOperation::Union, 0.0);
impl_binary_op!(
    Sub,
    sub,
    functions::subtract,
    functions::right_subtract,
    SetOperation::Union,
    0.0
);
impl_binary_op!(
    Mul,
    mul,
    functions::multiply,
    functions::multiply,
    SetOperation::Intersection,
    1.0
);
impl_binary_op!(
    Div,
    div,
    functions::divide,
    functions::right_divide,
    SetOperation::Intersection,
    1.0
);

impl Neg for &TimeSeries {
    type Output = TimeSeries;

    fn neg(self) -> TimeSeries {
        combine_scalar(self, -1.0, functions::multiply)
    }
}

impl Neg for TimeSeries {
    type Output = TimeSeries;

    fn neg(self) -> TimeSeries {
        -&self
    }
}
