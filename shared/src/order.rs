//! Order status board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AdminError, AdminResult};
use crate::gateway::OrderGateway;

pub type OrderId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Approved,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Selector order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Approved,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Approved => "Approved",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown order status `{}`", s))
    }
}

/// Order document as stored under `orders/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub customer: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub customer: String,
    pub status: OrderStatus,
}

impl Order {
    pub fn from_record(id: OrderId, record: OrderRecord) -> Self {
        Self {
            id,
            customer: record.customer,
            status: record.status,
        }
    }
}

/// Local copy of the order list. Rows only change after the gateway accepted
/// the new status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBoard {
    orders: Vec<Order>,
}

impl OrderBoard {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    pub async fn load<G: OrderGateway + ?Sized>(gateway: &G) -> AdminResult<Self> {
        Ok(Self::new(gateway.list_orders().await?))
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn contains(&self, id: &str) -> bool {
        self.orders.iter().any(|order| order.id == id)
    }

    /// Checks that `id` is on the board and returns the pending change.
    /// The board itself is not touched until [`OrderBoard::apply`].
    pub fn prepare_status(&self, id: &str, status: OrderStatus) -> AdminResult<StatusChange> {
        if !self.contains(id) {
            return Err(AdminError::not_found(format!("order {} is not on the board", id))
                .in_op_with("orders.update_status", id));
        }
        Ok(StatusChange {
            id: id.to_string(),
            status,
        })
    }

    /// Writes an accepted change into its row only. Returns false if the row
    /// has left the board in the meantime.
    pub fn apply(&mut self, change: &StatusChange) -> bool {
        match self.orders.iter_mut().find(|order| order.id == change.id) {
            Some(order) => {
                order.status = change.status;
                true
            }
            None => false,
        }
    }

    pub async fn update_status<G: OrderGateway + ?Sized>(
        &mut self,
        gateway: &G,
        id: &str,
        status: OrderStatus,
    ) -> AdminResult<()> {
        let change = self.prepare_status(id, status)?.send(gateway).await?;
        self.apply(&change);
        Ok(())
    }
}

/// A status change for one row, checked against the board but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub id: OrderId,
    pub status: OrderStatus,
}

impl StatusChange {
    /// Pushes the change through the gateway. Hands it back for
    /// [`OrderBoard::apply`] once accepted.
    pub async fn send<G: OrderGateway + ?Sized>(self, gateway: &G) -> AdminResult<Self> {
        gateway
            .update_status(&self.id, self.status)
            .await
            .map_err(|e| e.in_op_with("orders.update_status", &self.id))?;
        Ok(self)
    }
}
