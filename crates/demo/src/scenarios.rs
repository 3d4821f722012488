use chrono::{DateTime, Utc};

use invoicekit_invoicing::{Invoice, InvoiceLine};

pub fn invoice_with_one_item() -> Invoice {
    let mut invoice = Invoice::default();
    invoice.add_invoice_line(InvoiceLine::new(1, 6.99, 1, "Apple"));
    invoice
}

pub fn invoice_with_multiple_items_and_quantities() -> Invoice {
    let mut invoice = Invoice::default();
    invoice.add_invoice_lines([
        InvoiceLine::new(1, 10.21, 4, "Banana"),
        InvoiceLine::new(2, 5.21, 1, "Orange"),
        InvoiceLine::new(3, 6.21, 5, "Pineapple"),
    ]);
    invoice
}

pub fn remove_item() -> Invoice {
    let mut invoice = Invoice::default();
    invoice
        .add_invoice_line(InvoiceLine::new(1, 10.21, 1, "Orange"))
        .add_invoice_line(InvoiceLine::new(2, 10.99, 5, "Banana"))
        .remove_invoice_line(1);
    invoice
}

pub fn merge_invoices() -> Invoice {
    let mut invoice1 = Invoice::default();
    let mut invoice2 = Invoice::default();

    invoice2
        .add_invoice_line(InvoiceLine::new(2, 5.29, 4, "Orange"))
        .add_invoice_line(InvoiceLine::new(3, 9.99, 1, "Banana"));

    invoice1
        .add_invoice_line(InvoiceLine::new(1, 10.21, 1, "Blueberries"))
        .merge_invoice(&invoice2);
    invoice1
}

pub fn clone_invoice() -> Invoice {
    let mut invoice = Invoice::default();
    invoice
        .add_invoice_line(InvoiceLine::new(1, 0.99, 5, "Onion"))
        .add_invoice_line(InvoiceLine::new(2, 10.49, 2, "Watermelon"))
        .clone()
}

pub fn printable_invoice(date: DateTime<Utc>, number: i64) -> Invoice {
    Invoice::new(date, number, vec![InvoiceLine::new(1, 1.99, 20, "Pear")])
}

/// Label and invoice for every totals scenario, in presentation order.
pub fn totals() -> Vec<(&'static str, Invoice)> {
    vec![
        ("Invoice with one item", invoice_with_one_item()),
        (
            "Multiple items & quantities",
            invoice_with_multiple_items_and_quantities(),
        ),
        ("Remove item", remove_item()),
        ("Merge invoices", merge_invoices()),
        ("Cloned invoice", clone_invoice()),
    ]
}
