//! 予測結果と選択画像の型定義
//!
//! Web(WASM)と共有される型:
//! - Prediction: 推論APIが返す1クラス分の結果
//! - SelectedImage: ユーザーが選択した画像ファイル
//! - RequestStatus: パイプラインごとの進行状態
//! - RemedyRequest / RemedyResponse: 生成AI APIのワイヤ型

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 推論APIが返す1件の予測
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub class_name: String,
    pub probability: f64,
}

/// 確率の降順で安定ソート（同値は受信順を維持）
pub fn sort_by_probability(predictions: &mut [Prediction]) {
    predictions.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });
}

/// ユーザーが選択した画像ファイル
///
/// 内容はブラウザのFileReaderが生成するData URL形式で保持する。
/// ページセッションのみが所有し、永続化しない
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectedImage {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub data_url: String,
}

/// パイプラインごとの進行状態
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed(String),
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// 生成AI APIリクエスト
#[derive(Debug, Serialize)]
pub struct RemedyRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

impl RemedyRequest {
    /// 単一のユーザープロンプトからリクエストを組み立てる
    pub fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

/// 生成AI APIレスポンス
///
/// 階層のどこが欠けてもデシリアライズ自体は通し、
/// 本文抽出側で形式エラーとして扱う（textのみ必須）
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RemedyResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub content: ResponseContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResponseContent {
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: String,
}
