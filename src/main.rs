use leptos::*;
use std::rc::Rc;

mod cart;
mod components;
mod config;
mod models;
mod utils;

use cart::context::provide_cart_context;
use cart::CartManager;
use components::{CartBadge, CartView, ToastStack};
use config::CartConfig;
use utils::api::HttpCatalog;
use utils::log_trace;
use utils::storage::browser_storage;
use utils::toast::Toaster;

// ============================================
// メインアプリ
// ============================================

#[component]
fn App() -> impl IntoView {
    let storage = browser_storage();
    if let Some(url) = config::init_api_url_from_params(&*storage) {
        log_trace::log_info("config", &format!("API URLを設定: {}", url));
    }
    let config = CartConfig::load(&*storage);
    log_trace::set_capacity(config.log_capacity);

    let toaster = Rc::new(Toaster::new(config.toast_timeout_ms));
    provide_context(toaster.toasts());

    let manager = CartManager::new(
        storage,
        config.storage_key.clone(),
        Rc::new(HttpCatalog::new(config.api_url.clone())),
        toaster,
    );
    provide_cart_context(manager);

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"RocketShoes"</h1>
                <CartBadge />
            </header>

            <main class="container">
                <CartView />
            </main>

            <ToastStack />
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
