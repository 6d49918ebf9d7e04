//! エラー型定義

use thiserror::Error;

/// 予測UIの共通エラー型
///
/// Displayがそのまま画面に出すメッセージになる
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Please select an image to analyze.")]
    NoImageSelected,

    #[error("{0}")]
    Backend(String),

    #[error("HTTP error! status: {0}")]
    Http(u16),

    #[error("Unexpected response format from server. Missing \"predictions\" array.")]
    UnexpectedFormat,

    #[error("An unknown error occurred during prediction.")]
    PredictionFailed,

    #[error("LLM API error: {0}")]
    RemedyApi(String),

    #[error("Could not generate remedies. Unexpected LLM response.")]
    UnexpectedRemedyFormat,

    #[error("Failed to fetch home remedies.")]
    RemedyFetchFailed,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
