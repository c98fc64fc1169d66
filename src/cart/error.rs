//! カート操作のエラー

use thiserror::Error;

use crate::models::ProductId;
use crate::utils::api::ApiError;
use crate::utils::storage::StorageError;

/// 操作の種類（通知メッセージの選択に使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOp {
    Add,
    Remove,
    UpdateAmount,
    Clear,
}

impl CartOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartOp::Add => "add",
            CartOp::Remove => "remove",
            CartOp::UpdateAmount => "update-amount",
            CartOp::Clear => "clear",
        }
    }
}

#[derive(Debug, Error)]
pub enum CartError {
    #[error("product {0} not found")]
    ProductNotFound(ProductId),
    #[error("stock entry for product {0} not found")]
    StockNotFound(ProductId),
    #[error("product {id} out of stock: requested {requested}, available {available}")]
    OutOfStock {
        id: ProductId,
        requested: i64,
        available: i64,
    },
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CartError {
    /// トーストに出す文言
    pub fn user_message(&self, op: CartOp) -> &'static str {
        match (self, op) {
            (CartError::OutOfStock { .. }, _) => "Quantidade solicitada fora de estoque",
            (CartError::Storage(_), _) => "Erro ao salvar o carrinho",
            (_, CartOp::Add) => "Erro na adição do produto",
            (_, CartOp::Remove) => "Erro na remoção do produto",
            (_, CartOp::UpdateAmount) => "Erro na alteração de quantidade do produto",
            (_, CartOp::Clear) => "Erro ao salvar o carrinho",
        }
    }
}
