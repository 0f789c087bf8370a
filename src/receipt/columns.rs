//! Fixed width columns of the order receipt

use super::LineItem;

pub(crate) const NAME_WIDTH: usize = 14;
pub(crate) const QUANTITY_WIDTH: usize = 2;
pub(crate) const PRICE_WIDTH: usize = 7;
pub(crate) const TOTAL_WIDTH: usize = 7;
pub(crate) const SEPARATOR: &str = "  ";

const DIVIDER_WIDTH: usize = 30;

pub(crate) fn divider() -> String {
    "-".repeat(DIVIDER_WIDTH)
}

pub(crate) fn header(currency_symbol: &str) -> String {
    format!("Item          Qty  {}/Unit  Total", currency_symbol)
}

/// Name truncated or padded to its column, numbers right justified and never truncated
pub(crate) fn item_line(item: &LineItem) -> String {
    let name: String = item.name.chars().take(NAME_WIDTH).collect();
    format!("{:<nw$}{sep}{:>qw$}{sep}{:>pw$}{sep}{:>tw$}",
        name,
        item.quantity,
        item.unit_price,
        item.line_total,
        sep = SEPARATOR,
        nw = NAME_WIDTH,
        qw = QUANTITY_WIDTH,
        pw = PRICE_WIDTH,
        tw = TOTAL_WIDTH
    )
}

pub(crate) fn money(label: &str, currency_symbol: &str, amount: f64) -> String {
    format!("{}: {}{:.2}", label, currency_symbol, amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_columns_have_fixed_widths() {
        let line = item_line(&LineItem::new("Paneer Tikka", 2, 180.0));
        assert_eq!("Paneer Tikka     2      180      360", line);
    }

    #[test]
    fn long_names_are_truncated() {
        let line = item_line(&LineItem::new("Chicken Biryani Special", 1, 33.5));
        assert_eq!("Chicken Biryan   1     33.5     33.5", line);
    }

    #[test]
    fn numbers_are_never_truncated() {
        let line = item_line(&LineItem::new("Feast", 120, 12345.25));
        assert!(line.ends_with("  120  12345.25  1481430"));
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!("TOTAL: ₹703.50", money("TOTAL", "₹", 703.5));
    }
}
