//! 予測結果表示コンポーネント
//!
//! 確率降順の予測リストと、最上位予測に対する家庭療法を表示する。
//! 2つのパイプラインの状態は独立に描画する

use derma_ai_common::Prediction;
use leptos::prelude::*;

#[component]
pub fn PredictionDisplay(
    predictions: Signal<Vec<Prediction>>,
    is_loading: Signal<bool>,
    error: Signal<Option<String>>,
    remedies: Signal<Vec<String>>,
    remedy_loading: Signal<bool>,
    remedy_error: Signal<Option<String>>,
) -> impl IntoView {
    let has_predictions = move || !predictions.get().is_empty();

    view! {
        <div class="prediction-display">
            <Show when=move || is_loading.get()>
                <div class="loading-state">
                    <div class="spinner"></div>
                    <p>"Analyzing image and generating predictions..."</p>
                </div>
            </Show>

            {move || error.get().map(|message| view! {
                <div class="alert alert-error">
                    <strong>"Error"</strong>
                    <p>{message}</p>
                </div>
            })}

            <Show when=move || has_predictions() && !is_loading.get() && error.get().is_none()>
                <div class="results-card">
                    <h2>"Prediction Results"</h2>
                    <div class="prediction-list">
                        <For
                            each={move || predictions.get().into_iter().enumerate().collect::<Vec<_>>()}
                            key=|(index, prediction)| (*index, prediction.class_name.clone())
                            children=move |(index, prediction)| {
                                view! {
                                    <div class="prediction-row" class:top=move || index == 0>
                                        <span class="prediction-label">
                                            {prediction.class_name.clone()}
                                        </span>
                                        <span class="prediction-probability">
                                            {format!("{:.4}", prediction.probability)}
                                        </span>
                                    </div>
                                }
                            }
                        />
                    </div>

                    <div class="remedies">
                        <h2>"Home Remedies"</h2>

                        <Show when=move || remedy_loading.get()>
                            <div class="loading-state small">
                                <div class="spinner"></div>
                                <p>"Generating remedies..."</p>
                            </div>
                        </Show>

                        {move || remedy_error.get().map(|message| view! {
                            <div class="alert alert-error">
                                <strong>"Remedy Error"</strong>
                                <p>{message}</p>
                            </div>
                        })}

                        <Show when=move || !remedy_loading.get() && remedy_error.get().is_none()>
                            <Show
                                when=move || !remedies.get().is_empty()
                                fallback=|| view! {
                                    <p class="text-muted">
                                        "No specific home remedies found or generated for this condition."
                                    </p>
                                }
                            >
                                <ul class="remedy-list">
                                    <For
                                        each=move || remedies.get()
                                        key=|remedy| remedy.clone()
                                        children=move |remedy| view! { <li>{remedy}</li> }
                                    />
                                </ul>
                            </Show>
                        </Show>

                        <p class="disclaimer">
                            "Disclaimer: These are general home remedies and not a substitute \
                             for professional medical advice. Consult a healthcare professional \
                             for diagnosis and treatment."
                        </p>
                    </div>
                </div>
            </Show>

            <Show when=move || !is_loading.get() && !has_predictions() && error.get().is_none()>
                <div class="placeholder-card">
                    <p class="text-muted">"Upload an image to see predictions."</p>
                </div>
            </Show>
        </div>
    }
}
