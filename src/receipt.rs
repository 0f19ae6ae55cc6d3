//! Receipt
//!
//! Renders a completed order into a downloadable plain-text tax invoice.
//! Purely derived from the order snapshot; no network dependency.

use tabled::{Table, Tabled, settings::Style};

use crate::{money::format_inr, orders::CompletedOrder};

/// One row of the invoice item table.
#[derive(Debug, Tabled)]
struct InvoiceRow {
    #[tabled(rename = "Item")]
    name: String,

    #[tabled(rename = "Size")]
    size: String,

    #[tabled(rename = "Qty")]
    quantity: u32,

    #[tabled(rename = "Unit Price")]
    unit_price: String,

    #[tabled(rename = "Amount")]
    amount: String,
}

/// A rendered tax invoice for a completed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    number: String,
    text: String,
}

impl Invoice {
    /// Render the invoice for a completed order under the given store name.
    pub fn from_order(order: &CompletedOrder, store_name: &str) -> Self {
        let draft = order.order();

        let rows: Vec<InvoiceRow> = draft
            .items
            .iter()
            .map(|item| InvoiceRow {
                name: item.name.clone(),
                size: item.size.clone().unwrap_or_else(|| "-".to_owned()),
                quantity: item.quantity,
                unit_price: format_inr(item.unit_price),
                amount: format_inr(item.unit_price * u64::from(item.quantity)),
            })
            .collect();

        let mut items_table = Table::new(rows);
        items_table.with(Style::sharp());

        let date = order.completed_at().strftime("%d/%m/%Y");

        let shipping = if draft.pricing.shipping == 0 {
            "Free".to_owned()
        } else {
            format_inr(draft.pricing.shipping)
        };

        let mut text = String::new();

        text.push_str(&format!("{}\n", store_name.to_uppercase()));
        text.push_str("TAX INVOICE\n\n");
        text.push_str(&format!("Invoice #{}\n", draft.id));
        text.push_str(&format!("Invoice Date: {date}\n\n"));

        text.push_str("Bill To:\n");
        text.push_str(&format!("  {}\n", draft.customer.name));
        text.push_str(&format!("  {}\n", draft.customer.address));
        text.push_str(&format!(
            "  {}, {} - {}\n",
            draft.customer.city, draft.customer.state, draft.customer.postal_code
        ));
        text.push_str(&format!("  {}\n", draft.customer.phone));
        text.push_str(&format!("  {}\n\n", draft.customer.email));

        text.push_str(&items_table.to_string());
        text.push('\n');

        text.push_str(&format!("\nSubtotal: {}\n", format_inr(draft.pricing.subtotal)));
        if draft.pricing.discount > 0 {
            text.push_str(&format!("Discount: -{}\n", format_inr(draft.pricing.discount)));
        }
        text.push_str(&format!("Shipping: {shipping}\n"));
        text.push_str(&format!("Total: {}\n\n", format_inr(draft.pricing.total)));

        text.push_str(&format!("Payment Reference: {}\n", order.payment_ref()));
        text.push_str("Payment Status: completed\n");

        Self {
            number: draft.id.to_string(),
            text,
        }
    }

    /// The invoice number (the order identifier).
    pub fn number(&self) -> &str {
        &self.number
    }

    /// The rendered invoice document.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Suggested download filename.
    pub fn filename(&self) -> String {
        format!("invoice-{}.txt", self.number)
    }
}
