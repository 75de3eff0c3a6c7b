//! Orders service for order placement and management.

use std::sync::Arc;

use serde::Deserialize;

use crate::client::{ClientInner, Exchange, Page, Request};
use crate::error::ClientSideError;
use crate::models::{
    AccountNumber, NewOrder, Order, OrderEdit, OrderErrorResponse, OrderId, OrderSubmission,
    OrdersQuery, PlacedOrderResponse,
};
use crate::{Error, Result};

/// Service for order operations.
///
/// # Example
///
/// ```no_run
/// use tasty_rs::AccountNumber;
/// use tasty_rs::models::{NewOrderBuilder, OrderType, TimeInForce, OrderLeg, PriceEffect};
/// use rust_decimal_macros::dec;
///
/// # async fn example(client: tasty_rs::TastyClient) -> tasty_rs::Result<()> {
/// let account = AccountNumber::new("5WV12345");
///
/// let order = NewOrderBuilder::new()
///     .time_in_force(TimeInForce::Day)
///     .order_type(OrderType::Limit)
///     .price(dec!(150.00))
///     .price_effect(PriceEffect::Debit)
///     .add_leg(OrderLeg::buy_equity("AAPL", dec!(10)))
///     .build()?;
///
/// // Dry run to validate
/// let dry_run = client.orders().dry_run(&account, &order).await?;
/// println!("Fees: {:?}", dry_run.result.fee_calculation);
///
/// // Place the order
/// let placed = client.orders().place(&account, &order).await?;
/// println!("Order ID: {}", placed.result.order.id);
/// # Ok(())
/// # }
/// ```
pub struct OrdersService {
    inner: Arc<ClientInner>,
}

/// Submission responses carry an order-level `error` beside `data`.
#[derive(Deserialize)]
struct SubmissionEnvelope {
    data: PlacedOrderResponse,
    #[serde(default)]
    error: Option<OrderErrorResponse>,
}

impl OrdersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List orders for an account, one page at a time.
    pub async fn list(
        &self,
        account_number: &AccountNumber,
        query: &OrdersQuery,
    ) -> Result<Page<Order>> {
        self.inner
            .page(Request::get(format!("/accounts/{}/orders", account_number)).query(query))
            .await
    }

    /// Get live (working) orders for an account.
    pub async fn live(&self, account_number: &AccountNumber) -> Result<Vec<Order>> {
        let page: Page<Order> = self
            .inner
            .page(Request::get(format!("/accounts/{}/orders/live", account_number)))
            .await?;
        Ok(page.items)
    }

    /// Get a specific order by ID.
    pub async fn get(&self, account_number: &AccountNumber, order_id: &OrderId) -> Result<Order> {
        self.inner
            .data(Request::get(order_path(account_number, order_id)))
            .await
    }

    /// Cancel an order.
    ///
    /// The order must be in a cancellable state.
    pub async fn cancel(&self, account_number: &AccountNumber, order_id: &OrderId) -> Result<Order> {
        self.inner
            .data(Request::delete(order_path(account_number, order_id)))
            .await
    }

    /// Replace an order. Every field of the edit is applied.
    pub async fn replace(
        &self,
        account_number: &AccountNumber,
        order_id: &OrderId,
        edit: &OrderEdit,
    ) -> Result<Order> {
        self.inner
            .data(Request::put(order_path(account_number, order_id)).json(edit))
            .await
    }

    /// Edit an order. Only the fields set in the edit change.
    pub async fn edit(
        &self,
        account_number: &AccountNumber,
        order_id: &OrderId,
        edit: &OrderEdit,
    ) -> Result<Order> {
        self.inner
            .data(Request::patch(order_path(account_number, order_id)).json(edit))
            .await
    }

    /// Preview a replacement without applying it.
    pub async fn edit_dry_run(
        &self,
        account_number: &AccountNumber,
        order_id: &OrderId,
        edit: &OrderEdit,
    ) -> Result<PlacedOrderResponse> {
        let path = format!("{}/dry-run", order_path(account_number, order_id));
        self.inner.data(Request::post(path).json(edit)).await
    }

    /// Dry-run an order to validate and see effects without placing it.
    pub async fn dry_run(
        &self,
        account_number: &AccountNumber,
        order: &NewOrder,
    ) -> Result<OrderSubmission> {
        self.submit(format!("/accounts/{}/orders/dry-run", account_number), order)
            .await
    }

    /// Place a new order.
    ///
    /// Returns the placed order along with buying power effects, fee
    /// calculations and any order-level error the server attached.
    pub async fn place(
        &self,
        account_number: &AccountNumber,
        order: &NewOrder,
    ) -> Result<OrderSubmission> {
        self.submit(format!("/accounts/{}/orders", account_number), order)
            .await
    }

    /// Reconfirm an order that is waiting for confirmation.
    pub async fn reconfirm(
        &self,
        account_number: &AccountNumber,
        order_id: &OrderId,
    ) -> Result<Order> {
        let path = format!("{}/reconfirm", order_path(account_number, order_id));
        self.inner.data(Request::post(path)).await
    }

    /// Live orders across a customer's accounts.
    pub async fn customer_live(&self, customer_id: &str, query: &OrdersQuery) -> Result<Vec<Order>> {
        let page: Page<Order> = self
            .inner
            .page(Request::get(format!("/customers/{}/orders/live", customer_id)).query(query))
            .await?;
        Ok(page.items)
    }

    /// Orders across a customer's accounts, one page at a time.
    pub async fn customer_orders(
        &self,
        customer_id: &str,
        query: &OrdersQuery,
    ) -> Result<Page<Order>> {
        self.inner
            .page(Request::get(format!("/customers/{}/orders", customer_id)).query(query))
            .await
    }

    async fn submit(&self, path: String, order: &NewOrder) -> Result<OrderSubmission> {
        let Exchange { response, data } = self
            .inner
            .send::<SubmissionEnvelope, _, _>(Request::post(path).json(order))
            .await?;

        let envelope =
            data.ok_or_else(|| Error::client_side(ClientSideError::EmptyBody, Some(response)))?;
        if let Some(err) = &envelope.error {
            tracing::warn!(code = %err.code, message = %err.message, "Order submission reported an error");
        }

        Ok(OrderSubmission {
            result: envelope.data,
            error: envelope.error,
        })
    }
}

fn order_path(account_number: &AccountNumber, order_id: &OrderId) -> String {
    format!("/accounts/{}/orders/{}", account_number, order_id)
}
