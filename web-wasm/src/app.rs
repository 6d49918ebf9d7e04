//! メインアプリケーションコンポーネント
//!
//! セッション状態（PredictionSession）を唯一の真実として持ち、
//! アップロード→予測→家庭療法の流れを接続する

use derma_ai_common::{PredictionSession, SelectedImage};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::components::{prediction_display::PredictionDisplay, upload_area::UploadArea};

#[component]
pub fn App() -> impl IntoView {
    // ページセッション状態
    let session = RwSignal::new(PredictionSession::new());

    // 画像選択ハンドラ（以前の結果・エラーはセッション側で破棄される）
    let on_image_selected = move |image: SelectedImage| {
        session.update(|s| s.select_image(image));
    };

    // クリアハンドラ
    let on_clear = move |_| {
        session.update(|s| s.clear());
    };

    // 解析開始ハンドラ
    //
    // begin_submitがNoneを返す場合（未選択・送信中）はネットワークに出ない。
    // 家庭療法の取得は予測成功後にのみ明示的に直列で続ける
    let on_analyze = move |_| {
        let Some(generation) = session.try_update(|s| s.begin_submit()).flatten() else {
            return;
        };
        let Some(image) = session.with_untracked(|s| s.selected().cloned()) else {
            return;
        };

        spawn_local(async move {
            let outcome = api::predict::submit_image(&image).await;
            if let Err(error) = &outcome {
                gloo::console::error!("Prediction failed:", error.to_string());
            }
            session.update(|s| s.resolve_submit(generation, outcome));

            let Some(remedy_generation) = session.try_update(|s| s.begin_remedy()).flatten()
            else {
                return;
            };
            let Some(condition) =
                session.with_untracked(|s| s.top_prediction().map(|p| p.class_name.clone()))
            else {
                return;
            };

            let outcome = api::gemini::fetch_remedies(&condition).await;
            if let Err(error) = &outcome {
                gloo::console::error!("Error fetching remedies:", error.to_string());
            }
            session.update(|s| s.resolve_remedy(remedy_generation, outcome));
        });
    };

    // 各ビューへ渡す読み取り専用の投影
    let selected = Signal::derive(move || session.with(|s| s.selected().cloned()));
    let predictions = Signal::derive(move || session.with(|s| s.predictions().to_vec()));
    let is_loading = Signal::derive(move || session.with(|s| s.predict_status().is_loading()));
    let error =
        Signal::derive(move || session.with(|s| s.predict_status().error().map(str::to_string)));
    let remedies = Signal::derive(move || session.with(|s| s.remedies().to_vec()));
    let remedy_loading = Signal::derive(move || session.with(|s| s.remedy_status().is_loading()));
    let remedy_error =
        Signal::derive(move || session.with(|s| s.remedy_status().error().map(str::to_string)));

    let can_submit = Signal::derive(move || {
        session.with(|s| s.selected().is_some() && !s.predict_status().is_loading())
    });

    view! {
        <div class="container">
            <h1 class="page-title">"Predict Type of Skin Disease"</h1>

            <div class="prediction-layout">
                <div class="prediction-column">
                    <UploadArea
                        selected=selected
                        is_uploading=is_loading
                        error=error
                        on_image_selected=on_image_selected
                        on_clear=on_clear
                    />
                    <button
                        class="btn btn-primary analyze-button"
                        disabled=move || !can_submit.get()
                        on:click=on_analyze
                    >
                        {move || if is_loading.get() { "Analyzing..." } else { "Analyze Image" }}
                    </button>
                </div>

                <div class="prediction-column">
                    <PredictionDisplay
                        predictions=predictions
                        is_loading=is_loading
                        error=error
                        remedies=remedies
                        remedy_loading=remedy_loading
                        remedy_error=remedy_error
                    />
                </div>
            </div>
        </div>
    }
}
