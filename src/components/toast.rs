//! トースト表示コンポーネント

use leptos::*;

use crate::utils::toast::{dismiss, Toast};

/// 通知の一覧（クリックで閉じる）
#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = use_context::<RwSignal<Vec<Toast>>>().expect("toast signal not found");

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.get()
                key=|t| t.id
                children=move |t: Toast| {
                    let id = t.id;
                    view! {
                        <div class="toast error" on:click=move |_| dismiss(toasts, id)>
                            {t.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
