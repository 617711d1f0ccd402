//! HTTP surface: one page with an order form and a grid of cards,
//! plus the two form endpoints behind it. Handlers delegate to the
//! state container and redirect back to the page.

use std::sync::Arc;

use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use orderdesk_core::{NewOrder, Order, OrderId};

use crate::{error::AppError, state::OrderState};

pub fn router(state: Arc<OrderState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/orders", post(save_order))
        .route("/orders/:id/delete", post(delete_order))
        .with_state(state)
}

/// Raw form fields. A malformed amount is rejected by the extractor
/// before the handler runs; an empty description becomes absent.
#[derive(Debug, Deserialize)]
pub struct OrderForm {
    name: String,
    #[serde(default)]
    description: String,
    amount: f64,
}

impl From<OrderForm> for NewOrder {
    fn from(form: OrderForm) -> Self {
        NewOrder {
            name: form.name,
            description: if form.description.is_empty() {
                None
            } else {
                Some(form.description)
            },
            amount: form.amount,
        }
    }
}

async fn index(State(state): State<Arc<OrderState>>) -> Result<Html<String>, AppError> {
    state.load().await?;
    let orders = state.orders().await;
    Ok(Html(render_page(&orders)))
}

async fn save_order(
    State(state): State<Arc<OrderState>>,
    Form(form): Form<OrderForm>,
) -> Result<Redirect, AppError> {
    let order = state.save(form.into()).await?;
    tracing::info!(id = order.id, name = %order.name, "order saved");
    Ok(Redirect::to("/"))
}

async fn delete_order(
    State(state): State<Arc<OrderState>>,
    Path(id): Path<OrderId>,
) -> Result<Redirect, AppError> {
    state.delete(id).await?;
    tracing::info!(id, "order deleted");
    Ok(Redirect::to("/"))
}

fn render_page(orders: &[Order]) -> String {
    let mut cards = String::new();
    for order in orders {
        cards.push_str(&render_card(order));
    }
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Orderdesk</title></head>\n<body>\n\
         <h1>Orders</h1>\n\
         <div style=\"display:flex;flex-wrap:wrap;gap:1em\">\n{cards}</div>\n\
         <hr>\n\
         <form method=\"post\" action=\"/orders\">\n\
         <label>Name <input name=\"name\" required></label><br>\n\
         <label>Description <input name=\"description\"></label><br>\n\
         <label>Amount <input name=\"amount\" type=\"number\" step=\"any\" required></label><br>\n\
         <button type=\"submit\">Add Order</button>\n\
         </form>\n</body>\n</html>\n"
    )
}

fn render_card(order: &Order) -> String {
    let description = match &order.description {
        Some(d) => escape(d),
        None => "No description".to_string(),
    };
    format!(
        "<div style=\"border:1px solid #ccc;padding:1em\">\n\
         <form method=\"post\" action=\"/orders/{id}/delete\" style=\"float:right\">\
         <button type=\"submit\">x</button></form>\n\
         <h4>{name}</h4>\n\
         <p>{description}</p>\n\
         <p>${amount}</p>\n\
         </div>\n",
        id = order.id,
        name = escape(&order.name),
        amount = order.amount,
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
