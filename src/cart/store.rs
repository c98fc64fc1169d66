//! 購読可能なカート状態

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::Cart;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Rc<dyn Fn(&Cart)>;

/// 現在のカートと購読者一覧
#[derive(Default)]
pub struct CartStore {
    current: RefCell<Cart>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber)>>,
    next_id: Cell<u64>,
}

impl CartStore {
    pub fn new(initial: Cart) -> Self {
        CartStore {
            current: RefCell::new(initial),
            ..Default::default()
        }
    }

    pub fn snapshot(&self) -> Cart {
        self.current.borrow().clone()
    }

    /// 新しいカートに差し替えて購読者へ通知
    pub fn publish(&self, cart: Cart) {
        *self.current.borrow_mut() = cart;

        // 通知中の subscribe / unsubscribe に備えて一覧を複製してから呼ぶ
        let subscribers: Vec<Subscriber> = self.subscribers.borrow().iter().map(|(_, s)| s.clone()).collect();
        let current = self.snapshot();
        for subscriber in subscribers {
            subscriber(&current);
        }
    }

    pub fn subscribe(&self, subscriber: impl Fn(&Cart) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let subscriber: Subscriber = Rc::new(subscriber);
        self.subscribers.borrow_mut().push((id, subscriber));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;

    fn cart_with(id: u64, amount: i64) -> Cart {
        Cart::new().with_item(Product {
            id,
            title: String::new(),
            price: 1.0,
            image: String::new(),
            amount,
        })
    }

    #[test]
    fn test_publish_notifies_subscribers() {
        let store = CartStore::new(Cart::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        store.subscribe(move |cart| sink.borrow_mut().push(cart.len()));

        store.publish(cart_with(1, 1));
        store.publish(Cart::new());
        assert_eq!(*seen.borrow(), vec![1, 0]);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_unsubscribe() {
        let store = CartStore::new(Cart::new());
        let count = Rc::new(Cell::new(0));

        let c = count.clone();
        let id = store.subscribe(move |_| c.set(c.get() + 1));
        store.publish(cart_with(1, 1));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.publish(cart_with(1, 2));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_subscriber_may_unsubscribe_itself() {
        let store = Rc::new(CartStore::new(Cart::new()));
        let own_id = Rc::new(Cell::new(None));

        let s = store.clone();
        let slot = own_id.clone();
        let id = store.subscribe(move |cart| {
            assert_eq!(s.snapshot(), *cart);
            if let Some(id) = slot.get() {
                s.unsubscribe(id);
            }
        });
        own_id.set(Some(id));

        store.publish(cart_with(3, 1));
        assert!(!store.unsubscribe(id));
    }
}
