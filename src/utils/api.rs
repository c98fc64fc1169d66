//! カタログAPI（商品・在庫）連携

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::models::{Product, ProductId, Stock};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("decode failed: {0}")]
    Decode(String),
}

/// 商品と在庫の参照先
///
/// レコードが無い場合は `Ok(None)`。通信失敗などは `Err`。
#[async_trait(?Send)]
pub trait CatalogApi {
    async fn product(&self, id: ProductId) -> Result<Option<Product>, ApiError>;
    async fn stock(&self, id: ProductId) -> Result<Option<Stock>, ApiError>;
}

/// json-server 形式のHTTPバックエンド
pub struct HttpCatalog {
    base_url: String,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpCatalog { base_url }
    }

    pub fn url_for(&self, resource: &str, id: ProductId) -> String {
        format!("{}/{}/{}", self.base_url, resource, id)
    }

    /// GETしてJSONを取得。404は None
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, ApiError> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|e| ApiError::Request(format!("Request作成失敗: {:?}", e)))?;

        let window = web_sys::window().ok_or_else(|| ApiError::Request("windowがありません".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ApiError::Request(format!("fetch失敗: {:?}", e)))?;

        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| ApiError::Decode("Responseへの変換失敗".to_string()))?;

        if resp.status() == 404 {
            return Ok(None);
        }
        if !resp.ok() {
            return Err(ApiError::Status(resp.status()));
        }

        let json = JsFuture::from(resp.json().map_err(|e| ApiError::Decode(format!("json()失敗: {:?}", e)))?)
            .await
            .map_err(|e| ApiError::Decode(format!("JSON取得失敗: {:?}", e)))?;

        serde_wasm_bindgen::from_value(json)
            .map(Some)
            .map_err(|e| ApiError::Decode(format!("JSONパース失敗: {:?}", e)))
    }
}

#[async_trait(?Send)]
impl CatalogApi for HttpCatalog {
    async fn product(&self, id: ProductId) -> Result<Option<Product>, ApiError> {
        self.get_json(&self.url_for("products", id)).await
    }

    async fn stock(&self, id: ProductId) -> Result<Option<Stock>, ApiError> {
        self.get_json(&self.url_for("stock", id)).await
    }
}
