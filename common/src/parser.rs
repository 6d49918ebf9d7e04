//! APIレスポンスパーサー
//!
//! 推論APIと生成AI APIのレスポンス本文から
//! 予測リストと家庭療法リストを取り出す

use crate::error::{Error, Result};
use crate::types::{sort_by_probability, Prediction, RemedyResponse};
use serde_json::Value;

/// 推論APIの2xxレスポンス本文をパース
///
/// 判定順序:
/// 1. `predictions` 配列があれば確率降順に並べて返す
/// 2. `error` フィールドがあればそのメッセージで失敗
/// 3. どちらも無ければ形式エラー
///
/// # Arguments
/// * `body` - レスポンス本文（JSON文字列）
///
/// # Returns
/// * `Ok(Vec<Prediction>)` - 確率降順ソート済みの予測リスト
/// * `Err` - バックエンドのエラーメッセージまたは形式エラー
pub fn parse_prediction_response(body: &str) -> Result<Vec<Prediction>> {
    let value: Value = serde_json::from_str(body).map_err(|_| Error::UnexpectedFormat)?;

    if let Some(list) = value.get("predictions").filter(|v| v.is_array()) {
        let mut predictions: Vec<Prediction> =
            serde_json::from_value(list.clone()).map_err(|_| Error::UnexpectedFormat)?;
        sort_by_probability(&mut predictions);
        return Ok(predictions);
    }

    match value.get("error").and_then(Value::as_str) {
        Some(message) => Err(Error::Backend(message.to_string())),
        None => Err(Error::UnexpectedFormat),
    }
}

/// 非2xxレスポンス本文からエラーを取り出す
///
/// JSON本文の `error` フィールドを優先し、取れなければ
/// HTTPステータス由来の汎用メッセージにフォールバック
pub fn parse_error_body(body: &str, status: u16) -> Error {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(String::from))
        .map(Error::Backend)
        .unwrap_or(Error::Http(status))
}

/// 生成AIレスポンスから本文テキストを取り出す
///
/// `candidates[0].content.parts[0].text` の経路がどこかで
/// 欠けていればNone
pub fn extract_remedy_text(response: &RemedyResponse) -> Option<&str> {
    response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.as_str())
}

/// 生成テキストから箇条書き行だけを取り出す
///
/// `*` または `-` で始まる行のみ残し、マーカーと前後の空白を除去する。
/// 1行もマッチしなければ空リスト（エラーではない）
pub fn parse_remedies(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.starts_with('*') || trimmed.starts_with('-') {
                Some(trimmed[1..].trim().to_string())
            } else {
                None
            }
        })
        .collect()
}
