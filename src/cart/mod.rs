//! カート管理
//!
//! 追加・削除・数量変更はすべて在庫を確認してから反映し、
//! 成功するたびにストレージへ保存して購読者に通知する。
//! 各操作は `queue` のロックを最後まで保持するので、
//! 同時に呼ばれても到着順に1つずつ処理される。

pub mod context;
pub mod error;
pub mod store;

use std::rc::Rc;

use futures::lock::Mutex;
use serde_json::json;

use crate::models::{Cart, ProductId, UpdateProductAmount};
use crate::utils::api::CatalogApi;
use crate::utils::cache::{clear_cart, load_cart, save_cart};
use crate::utils::log_trace;
use crate::utils::storage::KeyValueStore;
use crate::utils::toast::Notifier;

pub use error::{CartError, CartOp};
pub use store::{CartStore, SubscriptionId};

const LOG_CATEGORY: &str = "cart";

pub struct CartManager {
    queue: Mutex<()>,
    store: CartStore,
    storage: Rc<dyn KeyValueStore>,
    storage_key: String,
    catalog: Rc<dyn CatalogApi>,
    notifier: Rc<dyn Notifier>,
}

impl CartManager {
    /// 保存済みのカートがあれば復元して起動
    pub fn new(
        storage: Rc<dyn KeyValueStore>,
        storage_key: impl Into<String>,
        catalog: Rc<dyn CatalogApi>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let storage_key = storage_key.into();
        let initial = load_cart(&*storage, &storage_key);
        log_trace::log_info(LOG_CATEGORY, &format!("カート復元: {}件", initial.len()));

        CartManager {
            queue: Mutex::new(()),
            store: CartStore::new(initial),
            storage,
            storage_key,
            catalog,
            notifier,
        }
    }

    pub fn cart(&self) -> Cart {
        self.store.snapshot()
    }

    pub fn subscribe(&self, subscriber: impl Fn(&Cart) + 'static) -> SubscriptionId {
        self.store.subscribe(subscriber)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub async fn add_product(&self, product_id: ProductId) {
        let _turn = self.queue.lock().await;
        if let Err(e) = self.try_add_product(product_id).await {
            self.report(CartOp::Add, product_id, &e);
        }
    }

    pub async fn remove_product(&self, product_id: ProductId) {
        let _turn = self.queue.lock().await;
        if let Err(e) = self.try_remove_product(product_id) {
            self.report(CartOp::Remove, product_id, &e);
        }
    }

    pub async fn update_product_amount(&self, request: UpdateProductAmount) {
        let _turn = self.queue.lock().await;
        if let Err(e) = self.try_update_amount(request.product_id, request.amount).await {
            self.report(CartOp::UpdateAmount, request.product_id, &e);
        }
    }

    /// カートを空にし、保存済みスナップショットも消す
    pub async fn clear(&self) {
        let _turn = self.queue.lock().await;
        match clear_cart(&*self.storage, &self.storage_key) {
            Ok(()) => {
                self.store.publish(Cart::new());
                log_trace::log_info(LOG_CATEGORY, "カートを空にしました");
            }
            Err(e) => {
                let e = CartError::from(e);
                self.notifier.error(e.user_message(CartOp::Clear));
                log_trace::log_error(LOG_CATEGORY, &format!("clear: {}", e));
            }
        }
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let product = self
            .catalog
            .product(product_id)
            .await?
            .ok_or(CartError::ProductNotFound(product_id))?;
        let stock = self
            .catalog
            .stock(product_id)
            .await?
            .ok_or(CartError::StockNotFound(product_id))?;

        if stock.amount <= 0 {
            return Err(CartError::OutOfStock {
                id: product_id,
                requested: 1,
                available: stock.amount,
            });
        }

        let cart = self.store.snapshot();
        match cart.find(product_id) {
            // 既にカートにある場合は数量変更として在庫を再確認
            Some(item) => {
                let requested = item.amount.checked_add(1).ok_or(CartError::OutOfStock {
                    id: product_id,
                    requested: item.amount,
                    available: stock.amount,
                })?;
                self.try_update_amount(product_id, requested).await
            }
            None => self.commit(CartOp::Add, product_id, cart.with_item(product.with_amount(1))),
        }
    }

    fn try_remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let next = self
            .store
            .snapshot()
            .without(product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        self.commit(CartOp::Remove, product_id, next)
    }

    async fn try_update_amount(&self, product_id: ProductId, amount: i64) -> Result<(), CartError> {
        if amount <= 0 {
            return Ok(());
        }

        let stock = self
            .catalog
            .stock(product_id)
            .await?
            .ok_or(CartError::StockNotFound(product_id))?;

        if stock.amount <= 0 || amount > stock.amount {
            return Err(CartError::OutOfStock {
                id: product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let next = self
            .store
            .snapshot()
            .with_amount(product_id, amount)
            .ok_or(CartError::NotInCart(product_id))?;
        self.commit(CartOp::UpdateAmount, product_id, next)
    }

    /// 保存に成功したときだけ公開する
    fn commit(&self, op: CartOp, product_id: ProductId, next: Cart) -> Result<(), CartError> {
        save_cart(&*self.storage, &self.storage_key, &next)?;
        let amount = next.find(product_id).map(|p| p.amount).unwrap_or(0);
        self.store.publish(next);

        log_trace::log_info_with_data(
            LOG_CATEGORY,
            op.as_str(),
            json!({ "productId": product_id, "amount": amount }),
        );
        Ok(())
    }

    fn report(&self, op: CartOp, product_id: ProductId, error: &CartError) {
        self.notifier.error(error.user_message(op));
        log_trace::log_error_with_data(
            LOG_CATEGORY,
            &format!("{}: {}", op.as_str(), error),
            json!({ "productId": product_id }),
        );
    }
}
