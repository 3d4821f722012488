use chrono::Utc;

use invoicekit_demo::{INVOICE_NUMBER_ENV, invoice_number_from, scenarios};

fn main() -> anyhow::Result<()> {
    invoicekit_observability::init();

    let raw_number = std::env::var(INVOICE_NUMBER_ENV).ok();
    let number = invoice_number_from(raw_number.as_deref());

    for (label, invoice) in scenarios::totals() {
        tracing::info!(
            scenario = label,
            lines = invoice.lines().len(),
            total = invoice.total(),
            "scenario complete"
        );
        println!("{label}: ${:.2}", invoice.total());
    }

    let invoice = scenarios::printable_invoice(Utc::now(), number);
    println!();
    print!("{invoice}");
    println!("{}", serde_json::to_string_pretty(&invoice)?);

    Ok(())
}
