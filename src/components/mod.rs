//! UIコンポーネントモジュール

pub mod cart_view;
pub mod toast;

pub use cart_view::{CartBadge, CartView};
pub use toast::ToastStack;
