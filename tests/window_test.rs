mod common;

use common::{assert_series_close, daily, series};
use timeseries::temporal::{EvenWeights, LinearWeights, Weights};
use timeseries::{Error, FunctionParams, RollingConfig, WindowFunction, WindowSize};

#[test]
fn test_rolling_sum_weights() {
    let ts = series(&["1970-01-01", "1970-01-02", "1970-01-03"], vec![1.0, 2.0, 3.0]);

    // 均等な重み（0.5, 0.5）
    let even = ts.rolling(2, "even", None).unwrap().sum().unwrap();
    assert_eq!(even.iso_dates(), vec!["1970-01-02T00:00:00", "1970-01-03T00:00:00"]);
    assert_eq!(even.values(), &[1.5, 2.5]);

    // 重みなし
    let none = ts.rolling(2, "none", None).unwrap().sum().unwrap();
    assert_eq!(none.dates(), even.dates());
    assert_eq!(none.values(), &[3.0, 5.0]);
}

#[test]
fn test_rolling_linear_weights() {
    let ts = daily(vec![1.0, 2.0, 3.0, 4.0]);

    let rolling = ts.rolling(2, "linear", Some(0.2)).unwrap();
    let weights = rolling.get_weights();
    assert!((weights[0] - 0.2).abs() < 1e-12);
    assert!((weights[1] - 0.8).abs() < 1e-12);

    let result = rolling.sum().unwrap();
    let expected = daily(vec![0.0, 1.8, 2.8, 3.8]).slice(1..4).unwrap();
    assert_series_close(&result, &expected);
}

#[test]
fn test_weights_sum_to_one() {
    let linear = LinearWeights::new(0.05).unwrap();
    for window_size in 1..=10 {
        let even_total: f64 = EvenWeights.get_weights(window_size).iter().sum();
        let linear_total: f64 = linear.get_weights(window_size).iter().sum();
        assert!((even_total - 1.0).abs() < 1e-10);
        assert!((linear_total - 1.0).abs() < 1e-10);
    }
}

#[test]
fn test_linear_weights_bounds() {
    for min_weight in [0.0, 1.0, -0.5, 1.5] {
        match daily(vec![1.0, 2.0]).rolling(2, "linear", Some(min_weight)) {
            Err(e) => assert!(e.is_configuration()),
            Ok(_) => panic!("min_weight {} should be rejected", min_weight),
        }
    }

    // min_weight が指定されていない
    assert!(matches!(
        daily(vec![1.0, 2.0]).rolling(2, "linear", None),
        Err(Error::Weights(_))
    ));
}

#[test]
fn test_window_size_validation() {
    let ts = daily(vec![1.0, 2.0, 3.0]);

    assert!(matches!(ts.rolling(0, "even", None), Err(Error::WindowSizeValue(_))));
    assert!(matches!(ts.rolling(-2, "even", None), Err(Error::WindowSizeValue(_))));
    assert!(matches!(ts.rolling(1.1, "even", None), Err(Error::WindowSizeValue(_))));
    assert!(matches!(
        ts.rolling(4, "even", None),
        Err(Error::WindowTooLarge { window_size: 4, len: 3 })
    ));
    assert!(matches!(
        ts.rolling(vec![1.0, 2.0], "even", None),
        Err(Error::WindowSizeType(_))
    ));
    assert!(matches!(ts.rolling("two", "even", None), Err(Error::WindowSizeType(_))));

    // 整数に変換できる値は受け付ける
    assert_eq!(ts.rolling(2.0, "even", None).unwrap().window_size(), 2);
    assert_eq!(ts.rolling("3", "even", None).unwrap().window_size(), 3);
    assert_eq!(ts.rolling(WindowSize::Integer(1), "none", None).unwrap().window_size(), 1);

    for window_size in [0i64, -1, 4] {
        let err = ts.rolling(window_size, "even", None).unwrap_err();
        assert!(err.is_window_size());
    }
}

#[test]
fn test_unknown_keys() {
    let ts = daily(vec![1.0, 2.0, 3.0]);

    match ts.rolling(2, "quadratic", None) {
        Err(Error::UnknownPolicy(key)) => assert_eq!(key, "quadratic"),
        other => panic!("unexpected result: {:?}", other.map(|r| r.window_size())),
    }

    let rolling = ts.rolling(2, "even", None).unwrap();
    match rolling.apply_named("median", FunctionParams::new()) {
        Err(Error::UnknownFunction(key)) => assert_eq!(key, "median"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_moving_average_matches_custom_sum() {
    let ts = daily(vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);

    let moving_average = ts.moving_average(3).unwrap();
    let custom = ts
        .rolling(3, "even", None)
        .unwrap()
        .custom(|window| window.iter().sum())
        .unwrap();

    assert_series_close(&moving_average, &custom);
    assert_eq!(moving_average.len(), ts.len() - 2);
    assert!((moving_average.values()[0] - 8.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_custom_reducer() {
    let ts = daily(vec![1.0, 5.0, 2.0, 8.0]);

    let max = ts
        .rolling(2, "none", None)
        .unwrap()
        .custom(|window| window.iter().cloned().fold(f64::MIN, f64::max))
        .unwrap();
    assert_eq!(max.values(), &[5.0, 5.0, 8.0]);

    let variance = ts.moving_variance(2).unwrap();
    assert_eq!(variance.values(), &[8.0, 4.5, 18.0]);
}

#[test]
fn test_moving_variance_requires_two_points() {
    let ts = daily(vec![1.0, 2.0, 3.0]);

    // 長さ1のウィンドウでは分散を計算できない
    assert!(matches!(ts.moving_variance(1), Err(Error::InsufficientData(_))));

    // ウィンドウサイズ自体の検証が先に行われる
    assert!(matches!(ts.moving_variance(0), Err(Error::WindowSizeValue(_))));
    assert!(matches!(ts.moving_variance(4), Err(Error::WindowTooLarge { .. })));
}

#[test]
fn test_exponential_moving_average() {
    let ts = daily(vec![1.0, 2.0, 3.0, 4.0]);

    let ema = ts.exponential_moving_average(0.5).unwrap();
    assert_eq!(ema.dates(), ts.dates());
    assert_eq!(ema.values(), &[1.0, 1.5, 2.25, 3.125]);

    // 重みとウィンドウサイズは無視される
    let via_rolling = ts
        .rolling(3, "even", None)
        .unwrap()
        .exponential_moving_average(0.5)
        .unwrap();
    assert_eq!(via_rolling, ema);

    // alpha = 1 は平滑化しない
    let identity = ts.exponential_moving_average(1.0).unwrap();
    assert_eq!(identity, ts);
}

#[test]
fn test_exponential_custom() {
    let ts = daily(vec![1.0, 2.0, 3.0]);
    let rolling = ts.rolling(1, "none", None).unwrap();

    let squared = rolling.exponential_custom(|v| v * v, 0.5).unwrap();
    assert_eq!(squared.values()[0], 1.0);
    assert_eq!(squared.values(), &[1.0, 2.5, 5.75]);

    let identity = rolling.exponential_custom(|v| v, 0.5).unwrap();
    assert_eq!(identity, rolling.exponential_moving_average(0.5).unwrap());
}

#[test]
fn test_invalid_smoothing_factor() {
    let ts = daily(vec![1.0, 2.0]);
    for alpha in [0.0, -0.1, 1.01] {
        match ts.exponential_moving_average(alpha) {
            Err(Error::SmoothingFactor(a)) => assert_eq!(a, alpha),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

#[test]
fn test_apply_function_variants() {
    let ts = daily(vec![2.0, 4.0, 6.0]);
    let rolling = ts.rolling(2, "none", None).unwrap();

    assert_eq!(rolling.apply(WindowFunction::sum()).unwrap().values(), &[6.0, 10.0]);
    assert_eq!(
        rolling
            .apply_named("custom", FunctionParams::new().with_reducer(|w| w[1] - w[0]))
            .unwrap()
            .values(),
        &[2.0, 2.0]
    );
    assert_eq!(
        rolling
            .apply_named("exponential_moving_average", FunctionParams::new().with_alpha(1.0))
            .unwrap(),
        ts
    );
    assert!(matches!(
        rolling.apply_named("exponential_custom", FunctionParams::new().with_alpha(0.5)),
        Err(Error::MissingParameter(_))
    ));
}

#[test]
fn test_rolling_from_config() {
    let ts = daily(vec![1.0, 2.0, 3.0, 4.0]);
    let config = RollingConfig::from_json(r#"{"window_size": 2, "weights": "none"}"#).unwrap();

    let result = ts.rolling_with(&config).unwrap().sum().unwrap();
    assert_eq!(result.values(), &[3.0, 5.0, 7.0]);

    let too_large = RollingConfig::new(5);
    assert!(matches!(
        ts.rolling_with(&too_large),
        Err(Error::WindowTooLarge { .. })
    ));
}

#[test]
fn test_window_size_reassignment() {
    let ts = daily(vec![1.0, 2.0, 3.0]);
    let mut rolling = ts.rolling(1, "none", None).unwrap();

    rolling.set_window_size(3).unwrap();
    assert_eq!(rolling.sum().unwrap().values(), &[6.0]);

    assert!(rolling.set_window_size(10).is_err());
    assert_eq!(rolling.window_size(), 3);
}
