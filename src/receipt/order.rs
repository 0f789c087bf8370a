use serde::{Serialize, Deserialize};

/// Order handed over by the ordering front end
///
/// Both snake case keys and the camel cased keys of the ordering system (`orderNo`, `orderid`, `timeStamp`, `userid`, `userPhone`) are accepted.
///
/// ```rust
/// use escpos_receipt::OrderPayload;
///
/// let order: OrderPayload = serde_json::from_str(r#"{
///     "orderNo": "12345",
///     "orderid": "ORD-987654",
///     "timeStamp": "31/03/2025 14:30",
///     "userid": "John Doe",
///     "items": [{"name": "Dal Makhani", "qty": 1, "price": 150, "total": 150}],
///     "subtotal": 150,
///     "tax": 7.5,
///     "total": 157.5
/// }"#).unwrap();
/// assert_eq!("ORD-987654", order.order_id);
/// assert_eq!(None, order.phone);
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct OrderPayload {
    #[serde(alias = "orderNo")]
    pub order_no: String,
    #[serde(alias = "orderid", alias = "orderId")]
    pub order_id: String,
    /// Already formatted for printing
    #[serde(alias = "timeStamp")]
    pub timestamp: String,
    #[serde(alias = "userid")]
    pub customer: String,
    #[serde(default, alias = "userPhone")]
    pub phone: Option<String>,
    /// Payment method, cash when missing
    #[serde(default)]
    pub payment: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64
}

/// One ordered product
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct LineItem {
    pub name: String,
    #[serde(alias = "qty")]
    pub quantity: u32,
    #[serde(alias = "price")]
    pub unit_price: f64,
    /// Expected to be `quantity * unit_price`, not checked
    #[serde(alias = "total")]
    pub line_total: f64
}

impl LineItem {
    pub fn new<A: Into<String>>(name: A, quantity: u32, unit_price: f64) -> LineItem {
        LineItem {
            name: name.into(),
            quantity,
            unit_price,
            line_total: (quantity as f64) * unit_price
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_keys_are_accepted() {
        let order: OrderPayload = serde_json::from_str(r#"{
            "order_no": "7",
            "order_id": "A-7",
            "timestamp": "now",
            "customer": "Asha",
            "phone": "+91 1",
            "payment": "Card",
            "items": [{"name": "Tea", "quantity": 2, "unit_price": 10, "line_total": 20}],
            "subtotal": 20,
            "tax": 1,
            "total": 21
        }"#).unwrap();
        assert_eq!(Some("+91 1".to_string()), order.phone);
        assert_eq!(LineItem::new("Tea", 2, 10.0), order.items[0]);
    }
}
