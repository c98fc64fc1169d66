//! カートのスナップショット保存

use crate::models::Cart;
use crate::utils::log_trace;
use crate::utils::storage::{KeyValueStore, StorageError};

/// カートを保存（常に上書き）
pub fn save_cart(storage: &dyn KeyValueStore, key: &str, cart: &Cart) -> Result<(), StorageError> {
    let json = serde_json::to_string(cart)?;
    storage.set_item(key, &json)
}

/// 保存済みカートを読み込み。無い・壊れている場合は空のカート
pub fn load_cart(storage: &dyn KeyValueStore, key: &str) -> Cart {
    let json = match storage.get_item(key) {
        Ok(Some(json)) => json,
        Ok(None) => return Cart::new(),
        Err(e) => {
            log_trace::log_warn("cart-cache", &format!("スナップショット読込失敗: {}", e));
            return Cart::new();
        }
    };

    match serde_json::from_str::<Cart>(&json) {
        Ok(cart) => cart,
        Err(e) => {
            log_trace::log_warn("cart-cache", &format!("スナップショット破損: {}", e));
            Cart::new()
        }
    }
}

/// 保存済みカートを削除
pub fn clear_cart(storage: &dyn KeyValueStore, key: &str) -> Result<(), StorageError> {
    storage.remove_item(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crate::utils::storage::MemoryStorage;

    const KEY: &str = "@RocketShoes:cart";

    #[test]
    fn test_missing_snapshot_is_empty() {
        let storage = MemoryStorage::new();
        assert!(load_cart(&storage, KEY).is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        let cart = Cart::new().with_item(Product {
            id: 2,
            title: "Tênis VR Caminhada Confortável".to_string(),
            price: 139.9,
            image: "https://example.com/2.jpg".to_string(),
            amount: 3,
        });
        save_cart(&storage, KEY, &cart).unwrap();
        assert_eq!(load_cart(&storage, KEY), cart);
    }

    #[test]
    fn test_corrupt_snapshot_is_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(KEY, "{not json").unwrap();
        assert!(load_cart(&storage, KEY).is_empty());
    }

    #[test]
    fn test_snapshot_is_normalized() {
        let storage = MemoryStorage::new();
        storage
            .set_item(KEY, r#"[{"id":1,"amount":0},{"id":2,"amount":1},{"id":2,"amount":4}]"#)
            .unwrap();
        let cart = load_cart(&storage, KEY);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.find(2).map(|p| p.amount), Some(1));
    }

    #[test]
    fn test_clear_cart() {
        let storage = MemoryStorage::new();
        save_cart(&storage, KEY, &Cart::new()).unwrap();
        clear_cart(&storage, KEY).unwrap();
        assert_eq!(storage.get_item(KEY).unwrap(), None);
    }
}
