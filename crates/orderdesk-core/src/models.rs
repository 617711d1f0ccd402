/// Identifier assigned by storage on insert.
pub type OrderId = i64;

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub description: Option<String>,
    pub amount: f64,
}

/// Write model for an order that has not been persisted yet.
/// Storage assigns the id and returns the full `Order`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub name: String,
    pub description: Option<String>,
    pub amount: f64,
}

impl NewOrder {
    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            name: self.name,
            description: self.description,
            amount: self.amount,
        }
    }
}
