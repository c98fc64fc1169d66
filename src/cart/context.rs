//! カートのLeptosコンテキスト
//!
//! UI側は `use_cart()` で取得し、`cart` シグナルを読んで各操作を呼ぶ。

use leptos::*;
use std::rc::Rc;

use super::CartManager;
use crate::models::{Cart, ProductId, UpdateProductAmount};

#[derive(Clone)]
pub struct CartContext {
    pub cart: ReadSignal<Cart>,
    manager: Rc<CartManager>,
}

impl CartContext {
    pub fn add_product(&self, product_id: ProductId) {
        let manager = self.manager.clone();
        spawn_local(async move { manager.add_product(product_id).await });
    }

    pub fn remove_product(&self, product_id: ProductId) {
        let manager = self.manager.clone();
        spawn_local(async move { manager.remove_product(product_id).await });
    }

    pub fn update_product_amount(&self, request: UpdateProductAmount) {
        let manager = self.manager.clone();
        spawn_local(async move { manager.update_product_amount(request).await });
    }

    pub fn clear(&self) {
        let manager = self.manager.clone();
        spawn_local(async move { manager.clear().await });
    }
}

/// マネージャーをシグナルに繋いでコンテキストに登録
pub fn provide_cart_context(manager: CartManager) -> CartContext {
    let (cart, set_cart) = create_signal(manager.cart());
    manager.subscribe(move |next| set_cart.set(next.clone()));

    let ctx = CartContext {
        cart,
        manager: Rc::new(manager),
    };
    provide_context(ctx.clone());
    ctx
}

pub fn use_cart() -> CartContext {
    use_context::<CartContext>().expect("CartContext not found")
}
