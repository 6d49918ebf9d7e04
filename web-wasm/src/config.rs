//! 環境変数ベースの設定
//!
//! WASMビルドには実行時環境変数が無いため、ビルド時に
//! `option_env!` で埋め込む。未設定はここでは検証せず、
//! 失敗したネットワーク呼び出しとして表面化する

/// バックエンドのベースURL（例: http://localhost:5000）
pub fn backend_base_url() -> &'static str {
    option_env!("BACKEND_URL").unwrap_or_default()
}

/// 予測エンドポイントURL
pub fn predict_url() -> String {
    format!("{}/predict", backend_base_url())
}

/// Gemini APIキー
pub fn gemini_api_key() -> &'static str {
    option_env!("GEMINI_API_KEY").unwrap_or_default()
}
