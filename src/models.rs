//! データ構造体モジュール

use serde::{Deserialize, Serialize};

pub type ProductId = u64;

// ============================================
// カタログ / 在庫
// ============================================

/// 商品。`amount` はカートに入っている数量（カタログ側には存在しない）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub amount: i64,
}

impl Product {
    pub fn with_amount(self, amount: i64) -> Self {
        Product { amount, ..self }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * self.amount as f64
    }
}

/// 在庫エントリ（バックエンドの `/stock`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: i64,
}

/// 数量変更リクエスト
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

// ============================================
// カート
// ============================================

/// カート。idで一意、各エントリの数量は1以上
///
/// 保存形式は `Product` のJSON配列そのもの。読み込み時は `from_items` を通る
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Product>", into = "Vec<Product>")]
pub struct Cart {
    items: Vec<Product>,
}

impl From<Vec<Product>> for Cart {
    fn from(items: Vec<Product>) -> Self {
        Cart::from_items(items)
    }
}

impl From<Cart> for Vec<Product> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存データなど外部由来の一覧から組み立てる
    /// 数量0以下は捨て、重複idは先勝ち
    pub fn from_items(items: Vec<Product>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            if item.amount > 0 && cart.find(item.id).is_none() {
                cart.items.push(item);
            }
        }
        cart
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|item| item.id == id)
    }

    /// 行数（ヘッダーのバッジ表示用）
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(Product::subtotal).sum()
    }

    /// 末尾に追加したカートを返す。`product.id` は未登録であること
    pub fn with_item(&self, product: Product) -> Cart {
        debug_assert!(self.find(product.id).is_none());
        let mut items = self.items.clone();
        items.push(product);
        Cart { items }
    }

    /// 数量を差し替えたカートを返す。該当なしなら None
    pub fn with_amount(&self, id: ProductId, amount: i64) -> Option<Cart> {
        self.find(id)?;
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    item.clone().with_amount(amount)
                } else {
                    item.clone()
                }
            })
            .collect();
        Some(Cart { items })
    }

    /// エントリを除いたカートを返す。該当なしなら None
    pub fn without(&self, id: ProductId) -> Option<Cart> {
        let items: Vec<Product> = self.items.iter().filter(|item| item.id != id).cloned().collect();
        if items.len() == self.items.len() {
            None
        } else {
            Some(Cart { items })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: ProductId, price: f64, amount: i64) -> Product {
        Product {
            id,
            title: format!("Tênis {}", id),
            price,
            image: format!("https://example.com/{}.jpg", id),
            amount,
        }
    }

    #[test]
    fn test_from_items_drops_empty_and_duplicates() {
        let cart = Cart::from_items(vec![
            product(1, 100.0, 2),
            product(2, 50.0, 0),
            product(1, 100.0, 5),
            product(3, 10.0, -1),
            product(4, 20.0, 1),
        ]);
        let ids: Vec<_> = cart.items().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(cart.find(1).map(|p| p.amount), Some(2));
    }

    #[test]
    fn test_with_amount_keeps_order() {
        let cart = Cart::from_items(vec![product(1, 10.0, 1), product(2, 20.0, 1), product(3, 30.0, 1)]);
        let next = cart.with_amount(2, 4).unwrap();
        assert_eq!(next.items()[1].amount, 4);
        assert_eq!(next.items()[0], cart.items()[0]);
        assert_eq!(next.items()[2], cart.items()[2]);
        assert!(cart.with_amount(9, 1).is_none());
    }

    #[test]
    fn test_without() {
        let cart = Cart::from_items(vec![product(1, 10.0, 1), product(2, 20.0, 3)]);
        let next = cart.without(1).unwrap();
        assert_eq!(next.len(), 1);
        assert_eq!(next.items()[0], product(2, 20.0, 3));
        assert!(next.without(1).is_none());
    }

    #[test]
    fn test_total() {
        let cart = Cart::from_items(vec![product(1, 139.9, 2), product(2, 10.0, 1)]);
        assert!((cart.total() - 289.8).abs() < 1e-9);
        assert_eq!(Cart::new().total(), 0.0);
    }

    #[test]
    fn test_stored_snapshot_format() {
        let json = r#"[{"id":1,"title":"Tênis de Caminhada","price":179.9,"image":"a.jpg","amount":2}]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.find(1).map(|p| p.amount), Some(2));
        assert!(serde_json::to_string(&cart).unwrap().starts_with('['));
    }

    #[test]
    fn test_deserialize_enforces_cart_invariants() {
        let cart: Cart = serde_json::from_str(r#"[{"id":1,"amount":0},{"id":1,"amount":3},{"id":2,"amount":1}]"#).unwrap();
        let amounts: Vec<_> = cart.items().iter().map(|p| (p.id, p.amount)).collect();
        assert_eq!(amounts, vec![(1, 3), (2, 1)]);
    }

    #[test]
    fn test_catalog_record_without_amount() {
        let json = r#"{"id":3,"title":"Tênis","price":99.9,"image":"b.jpg"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.amount, 0);
    }

    #[test]
    fn test_update_request_uses_camel_case() {
        let req: UpdateProductAmount = serde_json::from_str(r#"{"productId":7,"amount":3}"#).unwrap();
        assert_eq!(req, UpdateProductAmount { product_id: 7, amount: 3 });
    }
}
