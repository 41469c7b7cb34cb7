use thiserror::Error;

/// エラー型の定義
#[derive(Error, Debug)]
pub enum Error {
    #[error("日付と値の長さが一致しません: 日付 {dates}, 値 {values}")]
    InputDimension { dates: usize, values: usize },

    #[error("日付エラー: {0}")]
    Date(String),

    #[error("数値変換エラー: {0}")]
    NumericValue(String),

    #[error("キーが見つかりません: {0}")]
    KeyNotFound(String),

    #[error("インデックスが範囲外です: インデックス {index}, サイズ {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("重みのパラメータが無効です: {0}")]
    Weights(String),

    #[error("平滑化係数 alpha ({0}) は0より大きく1以下である必要があります")]
    SmoothingFactor(f64),

    #[error("'{0}' は有効な重みの種類ではありません")]
    UnknownPolicy(String),

    #[error("'{0}' は有効なウィンドウ関数ではありません")]
    UnknownFunction(String),

    #[error("'{0}' は有効な集合演算ではありません")]
    UnknownOperation(String),

    #[error("'{0}' は有効なウィンドウサイズではありません")]
    WindowSizeType(String),

    #[error("ウィンドウサイズが無効です: {0}")]
    WindowSizeValue(String),

    #[error("ウィンドウサイズ ({window_size}) が時系列の長さ ({len}) を超えています")]
    WindowTooLarge { window_size: usize, len: usize },

    #[error("集合演算後の関数の適用に失敗しました")]
    OperatorApplication {
        #[source]
        source: Box<Error>,
    },

    #[error("必須パラメータがありません: {0}")]
    MissingParameter(String),

    #[error("データがありません: {0}")]
    EmptyData(String),

    #[error("データ不足エラー: {0}")]
    InsufficientData(String),

    #[error("計算エラー: {0}")]
    ComputationError(String),

    #[error("設定エラー: {0}")]
    Config(String),
}

/// Resultの型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// 演算子の適用エラーとして包む
    pub(crate) fn operator(source: Error) -> Self {
        Error::OperatorApplication {
            source: Box::new(source),
        }
    }

    /// 構築時のパラメータ（重み・平滑化係数）に起因するエラーか
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Weights(_) | Error::SmoothingFactor(_))
    }

    /// ウィンドウサイズの検証に起因するエラーか
    pub fn is_window_size(&self) -> bool {
        matches!(
            self,
            Error::WindowSizeType(_) | Error::WindowSizeValue(_) | Error::WindowTooLarge { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::Date(err.to_string())
    }
}
