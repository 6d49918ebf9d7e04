//! アップロードエリアコンポーネント
//!
//! ドラッグ&ドロップまたはクリックで画像を1枚選び、
//! Data URLに読み込んでコールバックへ渡す

use derma_ai_common::SelectedImage;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileList, FileReader, MouseEvent};

#[component]
pub fn UploadArea<F, FC>(
    selected: Signal<Option<SelectedImage>>,
    is_uploading: Signal<bool>,
    error: Signal<Option<String>>,
    on_image_selected: F,
    on_clear: FC,
) -> impl IntoView
where
    F: Fn(SelectedImage) + 'static + Clone + Send,
    FC: Fn(()) + 'static + Clone + Send,
{
    let (is_dragover, set_is_dragover) = signal(false);

    let handle_files = {
        let on_image_selected = on_image_selected.clone();
        move |files: FileList| {
            // 複数ドロップは先頭の1枚のみ
            if let Some(file) = files.get(0) {
                read_file(file, on_image_selected.clone());
            }
        }
    };

    let on_drop = {
        let handle_files = handle_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(dt) = ev.data_transfer() {
                if let Some(files) = dt.files() {
                    handle_files(files);
                }
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = {
        let handle_files = handle_files.clone();
        move |_| {
            // ファイル選択ダイアログを開く
            let document = web_sys::window().unwrap().document().unwrap();
            let input: web_sys::HtmlInputElement = document
                .create_element("input")
                .unwrap()
                .dyn_into()
                .unwrap();
            input.set_type("file");
            input.set_accept("image/*");

            let handle_files = handle_files.clone();
            let input_for_closure = input.clone();
            let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
                if let Some(files) = input_for_closure.files() {
                    handle_files(files);
                }
            }) as Box<dyn FnMut(_)>);

            input.set_onchange(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
            input.click();
        }
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if error.get().is_some() {
                    classes.push("has-error");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            {
                let on_clear = on_clear.clone();
                move || match selected.get() {
                    Some(image) => {
                        let on_clear = on_clear.clone();
                        view! {
                            <div class="preview">
                                <img src=image.data_url.clone() alt=image.name.clone() />
                                <div class="preview-meta">
                                    <p class="file-name">{image.name.clone()}</p>
                                    <button
                                        class="btn btn-small btn-tertiary"
                                        title="Clear Selection"
                                        on:click=move |ev: MouseEvent| {
                                            // 背面のアップロードエリアのクリックを抑止
                                            ev.stop_propagation();
                                            on_clear(());
                                        }
                                    >
                                        "✕"
                                    </button>
                                </div>
                            </div>
                        }
                        .into_any()
                    }
                    None => view! {
                        <div class="upload-placeholder">
                            <div class="upload-icon">"📷"</div>
                            <p>"Drag and drop an image here, or click to select a file."</p>
                            <p class="text-muted">"(JPG, PNG, GIF)"</p>
                        </div>
                    }
                    .into_any(),
                }
            }

            <Show when=move || is_uploading.get()>
                <div class="upload-overlay">
                    <div class="spinner"></div>
                </div>
            </Show>

            {move || error.get().map(|message| view! {
                <p class="upload-error">{message}</p>
            })}
        </div>
    }
}

fn read_file<F>(file: File, on_image_selected: F)
where
    F: Fn(SelectedImage) + 'static,
{
    let name = file.name();
    let mime_type = file.type_();
    let size = file.size() as u64;
    let reader = FileReader::new().unwrap();

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if let Ok(result) = reader_clone.result() {
            if let Some(data_url) = result.as_string() {
                on_image_selected(SelectedImage {
                    name: name.clone(),
                    mime_type: mime_type.clone(),
                    size,
                    data_url,
                });
            }
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    let _ = reader.read_as_data_url(&file);
}
