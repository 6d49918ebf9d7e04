//! 推論バックエンド連携
//!
//! 選択画像をmultipart/form-dataでPOSTし、予測リストを受け取る。
//! レスポンス本文の解釈は共通ライブラリのパーサーに委ねる

use base64::{engine::general_purpose::STANDARD, Engine as _};
use derma_ai_common::{
    parse_error_body, parse_prediction_response, Error, Prediction, SelectedImage,
};
use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

use super::{extract_base64_from_data_url, extract_mime_type_from_data_url};
use crate::config;

/// 画像を送信して予測リストを取得
///
/// 戻りのVecは確率降順ソート済み。ブラウザのfetch層で
/// 落ちた場合も画面表示用の `Error` に落とす
pub async fn submit_image(image: &SelectedImage) -> Result<Vec<Prediction>, Error> {
    match try_submit(image).await {
        Ok(outcome) => outcome,
        Err(_js) => Err(Error::PredictionFailed),
    }
}

/// fetch実行部。外側のResultはJS例外、内側はAPIレベルの成否
async fn try_submit(image: &SelectedImage) -> Result<Result<Vec<Prediction>, Error>, JsValue> {
    let form = build_form_data(image)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    // multipart境界はブラウザが付与するためContent-Typeは設定しない
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(&config::predict_url(), &opts)?;

    let window = web_sys::window().unwrap();
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let status = resp.status();
    let body = JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    if !resp.ok() {
        return Ok(Err(parse_error_body(&body, status)));
    }

    Ok(parse_prediction_response(&body))
}

/// Data URLからバイナリを復元してFormDataを組み立てる
///
/// フィールド名はバックエンドが期待する "image" 固定
fn build_form_data(image: &SelectedImage) -> Result<FormData, JsValue> {
    let base64_data = extract_base64_from_data_url(&image.data_url)
        .ok_or_else(|| JsValue::from_str("Invalid data URL"))?;
    let bytes = STANDARD
        .decode(base64_data)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let mime_type = if image.mime_type.is_empty() {
        extract_mime_type_from_data_url(&image.data_url)
    } else {
        image.mime_type.as_str()
    };

    let array = Uint8Array::from(bytes.as_slice());
    let parts = Array::of1(&array);
    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename("image", &blob, &image.name)?;
    Ok(form)
}
