//! カート表示コンポーネント

use leptos::*;

use crate::cart::context::use_cart;
use crate::models::{Product, UpdateProductAmount};
use crate::utils::format_price;

/// ヘッダーのカートバッジ
#[component]
pub fn CartBadge() -> impl IntoView {
    let cart = use_cart().cart;

    view! {
        <div class="cart-badge">
            <strong>"Meu carrinho"</strong>
            <span>{move || {
                let n = cart.with(|c| c.len());
                if n == 1 { "1 item".to_string() } else { format!("{} itens", n) }
            }}</span>
        </div>
    }
}

/// カートの1行
#[component]
fn CartRow(product: Product) -> impl IntoView {
    let ctx = use_cart();
    let id = product.id;
    let amount = product.amount;

    let ctx_dec = ctx.clone();
    let decrement = move |_| {
        ctx_dec.update_product_amount(UpdateProductAmount { product_id: id, amount: amount - 1 })
    };
    let ctx_inc = ctx.clone();
    let increment = move |_| {
        ctx_inc.update_product_amount(UpdateProductAmount { product_id: id, amount: amount + 1 })
    };
    let remove = move |_| ctx.remove_product(id);

    view! {
        <tr class="cart-row">
            <td><img src=product.image.clone() alt=product.title.clone() /></td>
            <td>
                <strong>{product.title.clone()}</strong>
                <span class="price">{format_price(product.price)}</span>
            </td>
            <td class="amount">
                <button on:click=decrement disabled={amount <= 1}>"−"</button>
                <input type="text" readonly=true value=amount />
                <button on:click=increment>"+"</button>
            </td>
            <td class="subtotal">{format_price(product.subtotal())}</td>
            <td><button class="remove-btn" on:click=remove>"Remover"</button></td>
        </tr>
    }
}

/// カート一覧と合計
#[component]
pub fn CartView() -> impl IntoView {
    let ctx = use_cart();
    let cart = ctx.cart;
    let (product_id_input, set_product_id_input) = create_signal(String::new());

    let ctx_add = ctx.clone();
    let on_add = move |_| {
        match product_id_input.get().trim().parse() {
            Ok(id) => {
                ctx_add.add_product(id);
                set_product_id_input.set(String::new());
            }
            Err(_) => crate::utils::log_trace::log_warn("ui-action", "商品IDが不正です"),
        }
    };
    let on_clear = move |_| ctx.clear();

    view! {
        <div class="cart-view">
            <div class="input-group">
                <input type="text" placeholder="ID do produto"
                    prop:value=move || product_id_input.get()
                    on:input=move |ev| set_product_id_input.set(event_target_value(&ev)) />
                <button on:click=on_add>"Adicionar ao carrinho"</button>
            </div>

            {move || if cart.with(|c| c.is_empty()) {
                view! { <p class="empty">"Seu carrinho está vazio"</p> }.into_view()
            } else {
                view! {
                    <table class="product-table">
                        <thead>
                            <tr>
                                <th></th>
                                <th>"PRODUTO"</th>
                                <th>"QTD"</th>
                                <th>"SUBTOTAL"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {cart.get().items().iter().cloned().map(|p| view! {
                                <CartRow product=p />
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_view()
            }}

            <footer class="cart-footer">
                <button class="clear-btn" on:click=on_clear>"Finalizar pedido"</button>
                <div class="total">
                    <span>"TOTAL"</span>
                    <strong>{move || format_price(cart.with(|c| c.total()))}</strong>
                </div>
            </footer>
        </div>
    }
}
