//! 設定
//!
//! API URLの優先順位: 保存済みの上書き値 > ビルド時の `CART_API_URL` > 既定値

use crate::utils::log_trace::DEFAULT_MAX_LOG_ENTRIES;
use crate::utils::storage::{KeyValueStore, StorageError};

pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";
const API_URL_KEY: &str = "@RocketShoes:api_url";
const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_TOAST_TIMEOUT_MS: u32 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    pub api_url: String,
    pub storage_key: String,
    pub toast_timeout_ms: u32,
    pub log_capacity: usize,
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            api_url: built_in_api_url().to_string(),
            storage_key: CART_STORAGE_KEY.to_string(),
            toast_timeout_ms: DEFAULT_TOAST_TIMEOUT_MS,
            log_capacity: DEFAULT_MAX_LOG_ENTRIES,
        }
    }
}

impl CartConfig {
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        let mut config = CartConfig::default();
        if let Some(url) = get_api_url(storage) {
            config.api_url = url;
        }
        config
    }
}

/// ビルド時に埋め込まれたAPI URL（build.rs 参照）
fn built_in_api_url() -> &'static str {
    option_env!("CART_API_URL").unwrap_or(DEFAULT_API_URL)
}

/// API URLを保存
pub fn save_api_url(storage: &dyn KeyValueStore, url: &str) -> Result<(), StorageError> {
    storage.set_item(API_URL_KEY, url.trim().trim_end_matches('/'))
}

/// 保存済みAPI URLを取得
pub fn get_api_url(storage: &dyn KeyValueStore) -> Option<String> {
    let url = storage.get_item(API_URL_KEY).ok()??;
    if url.is_empty() { None } else { Some(url) }
}

/// API URLの上書きを解除
pub fn clear_api_url(storage: &dyn KeyValueStore) -> Result<(), StorageError> {
    storage.remove_item(API_URL_KEY)
}

/// クエリ文字列から `api` パラメータ（エンコード済みのまま）を取り出す
pub fn api_param(search: &str) -> Option<&str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == "api")
        .map(|(_, value)| value)
}

/// URLパラメータからAPI URLを読み込む (?api=xxx)
/// 空の値 (?api=) は上書きの解除
pub fn init_api_url_from_params(storage: &dyn KeyValueStore) -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let encoded = api_param(&search)?;
    if encoded.is_empty() {
        let _ = clear_api_url(storage);
        return None;
    }
    let decoded = js_sys::decode_uri_component(encoded).ok()?.as_string()?;
    save_api_url(storage, &decoded).ok()?;

    // URLからパラメータを削除
    let pathname = window.location().pathname().ok()?;
    let hash = window.location().hash().ok().unwrap_or_default();
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(
            &wasm_bindgen::JsValue::NULL,
            "",
            Some(&format!("{}{}", pathname, hash)),
        );
    }
    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;

    #[test]
    fn test_defaults() {
        let config = CartConfig::load(&MemoryStorage::new());
        assert_eq!(config.storage_key, "@RocketShoes:cart");
        assert_eq!(config.api_url, built_in_api_url());
        assert_eq!(config.log_capacity, 1000);
    }

    #[test]
    fn test_stored_api_url_wins() {
        let storage = MemoryStorage::new();
        save_api_url(&storage, " https://api.rocketshoes.dev/ ").unwrap();
        assert_eq!(CartConfig::load(&storage).api_url, "https://api.rocketshoes.dev");

        clear_api_url(&storage).unwrap();
        assert_eq!(CartConfig::load(&storage).api_url, built_in_api_url());
    }

    #[test]
    fn test_empty_stored_url_is_ignored() {
        let storage = MemoryStorage::new();
        storage.set_item(API_URL_KEY, "").unwrap();
        assert_eq!(get_api_url(&storage), None);
    }

    #[test]
    fn test_api_param() {
        assert_eq!(api_param("?api=http%3A%2F%2Fhost%3A3333"), Some("http%3A%2F%2Fhost%3A3333"));
        assert_eq!(api_param("?lang=pt&api=x"), Some("x"));
        assert_eq!(api_param("?api="), Some(""));
        assert_eq!(api_param("?apix=1"), None);
        assert_eq!(api_param(""), None);
    }
}
