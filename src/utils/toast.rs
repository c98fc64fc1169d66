//! トースト通知

use leptos::*;
use std::cell::Cell;

/// ユーザー向け通知の出口
pub trait Notifier {
    fn error(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

/// 画面右上に積むトースト。一定時間で自動的に消える
pub struct Toaster {
    toasts: RwSignal<Vec<Toast>>,
    next_id: Cell<u64>,
    timeout_ms: u32,
}

impl Toaster {
    pub fn new(timeout_ms: u32) -> Self {
        Toaster {
            toasts: create_rw_signal(Vec::new()),
            next_id: Cell::new(0),
            timeout_ms,
        }
    }

    pub fn toasts(&self) -> RwSignal<Vec<Toast>> {
        self.toasts
    }
}

/// トーストを閉じる
pub fn dismiss(toasts: RwSignal<Vec<Toast>>, id: u64) {
    toasts.update(|list| list.retain(|t| t.id != id));
}

impl Notifier for Toaster {
    fn error(&self, message: &str) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.toasts.update(|list| {
            list.push(Toast {
                id,
                message: message.to_string(),
            })
        });

        let toasts = self.toasts;
        let timeout_ms = self.timeout_ms;
        spawn_local(async move {
            gloo::timers::future::TimeoutFuture::new(timeout_ms).await;
            dismiss(toasts, id);
        });
    }
}
