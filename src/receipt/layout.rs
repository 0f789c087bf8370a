use log::warn;

use super::{OrderPayload, ReceiptOptions, columns};
use crate::{
    ReceiptDocument, PrinterProfile,
    instruction::{Instruction, Justification, TextStyle}
};

impl ReceiptDocument {
    /// Lays out a whole order receipt
    ///
    /// The layout goes: optional logo, centered merchant header with the order number, order details, the item table, right aligned totals (the grand total in bold), the closing lines and a cut. Text lines are followed by a single line feed, except the last closing line, which is followed by a feed of 4 before the cut.
    ///
    /// Bold starts with the merchant name and lasts through the order details, up to the divider under the column header.
    ///
    /// A logo that cannot be loaded is skipped with a warning, the rest of the receipt is laid out as usual. The logo is scaled down to `options.logo_width`, use [render_order_for](ReceiptDocument::render_order_for) when that might not fit the printer.
    ///
    /// ```rust
    /// use escpos_receipt::{ReceiptDocument, OrderPayload, LineItem, ReceiptOptions, PrinterModel};
    ///
    /// let order = OrderPayload {
    ///     order_no: "1".to_string(),
    ///     items: vec![LineItem::new("Masala Chai", 2, 20.0)],
    ///     subtotal: 40.0,
    ///     tax: 2.0,
    ///     total: 42.0,
    ///     ..Default::default()
    /// };
    /// let mut document = ReceiptDocument::new();
    /// document.render_order(&order, &ReceiptOptions::default());
    ///
    /// // The item table needs 36 columns, an 80mm printer fits it in one line
    /// let preview = document.preview(&PrinterModel::TMT20.profile());
    /// assert!(preview.contains("Masala Chai      2       20       40\n"));
    /// ```
    pub fn render_order(&mut self, order: &OrderPayload, options: &ReceiptOptions) -> &mut ReceiptDocument {
        self.lay_out_order(order, options, options.logo_width)
    }

    /// Same as [render_order](ReceiptDocument::render_order), with the logo also capped to what the printer fits at `options.logo_density`
    pub fn render_order_for(&mut self, order: &OrderPayload, options: &ReceiptOptions, printer_profile: &PrinterProfile) -> &mut ReceiptDocument {
        let logo_width = options.logo_width.min(options.logo_density.max_columns(printer_profile.width()));
        self.lay_out_order(order, options, logo_width)
    }

    fn lay_out_order(&mut self, order: &OrderPayload, options: &ReceiptOptions, logo_width: u16) -> &mut ReceiptDocument {
        if let Some(logo) = &options.logo {
            match logo.load(logo_width) {
                Ok(bitmap) => {
                    self.push(Instruction::image(bitmap, options.logo_density));
                },
                Err(e) => warn!("Logo skipped, it could not be loaded: {}", e)
            }
        }

        // Header
        self
            .align(Justification::Center)
            .style(TextStyle::bold())
            .size(0, 1)
            .line(options.merchant_name.as_str())
            .size(0, 0)
            .line("Order Receipt")
            .line(format!("Order No: {}", order.order_no))
            .line(columns::divider());

        // Order details
        self
            .align(Justification::Left)
            .line(format!("Order ID: {}", order.order_id))
            .line(format!("Date & Time: {}", order.timestamp))
            .line(format!("Customer: {}", order.customer));
        if let Some(phone) = order.phone.as_deref().filter(|phone| !phone.is_empty()) {
            self.line(format!("Phone: {}", phone));
        }
        let payment = order.payment.as_deref().filter(|payment| !payment.is_empty()).unwrap_or("Cash");
        self
            .line(format!("Payment: {}", payment))
            .line(columns::divider());

        // Items, the bold header ends here
        self
            .line(columns::header(&options.currency_symbol))
            .line(columns::divider())
            .style(TextStyle::plain());
        for item in &order.items {
            self.line(columns::item_line(item));
        }

        // Totals
        self
            .line(columns::divider())
            .align(Justification::Right)
            .line(columns::money("Subtotal", &options.currency_symbol, order.subtotal))
            .line(columns::money(&options.tax_label, &options.currency_symbol, order.tax))
            .style(TextStyle::bold())
            .line(columns::money("TOTAL", &options.currency_symbol, order.total))
            .style(TextStyle::plain());

        // Closing
        self
            .align(Justification::Center)
            .feed(1);
        for (idx, closing_line) in options.closing_lines.iter().enumerate() {
            self.text(closing_line.as_str());
            if idx + 1 < options.closing_lines.len() {
                self.feed(1);
            }
        }
        self
            .feed(4)
            .cut()
    }
}
