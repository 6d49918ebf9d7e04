//! Gemini API連携（家庭療法の生成）
//!
//! 最上位予測の病名からプロンプトを組み立てて generateContent を呼び、
//! 返ってきたテキストの箇条書き行を家庭療法リストにする

use derma_ai_common::{
    build_remedy_prompt, extract_remedy_text, parse_remedies, Error, RemedyRequest, RemedyResponse,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::config;

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// 病名から家庭療法リストを取得
///
/// 失敗はこのパイプライン内で閉じる。箇条書きが1行も無い応答は
/// 空リスト（正常）として返す
pub async fn fetch_remedies(condition: &str) -> Result<Vec<String>, Error> {
    match call_gemini_api(condition).await {
        Ok(outcome) => outcome,
        Err(_js) => Err(Error::RemedyFetchFailed),
    }
}

/// fetch実行部。外側のResultはJS例外、内側はAPIレベルの成否
async fn call_gemini_api(condition: &str) -> Result<Result<Vec<String>, Error>, JsValue> {
    let request_body = RemedyRequest::from_prompt(build_remedy_prompt(condition));
    let body =
        serde_json::to_string(&request_body).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let url = format!("{}?key={}", GEMINI_API_URL, config::gemini_api_key());

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().unwrap();
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Ok(Err(Error::RemedyApi(resp.status_text())));
    }

    let json = JsFuture::from(resp.json()?).await?;
    let Ok(response) = serde_wasm_bindgen::from_value::<RemedyResponse>(json) else {
        return Ok(Err(Error::UnexpectedRemedyFormat));
    };

    let Some(text) = extract_remedy_text(&response) else {
        return Ok(Err(Error::UnexpectedRemedyFormat));
    };

    Ok(Ok(parse_remedies(text)))
}
