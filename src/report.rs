use crate::flight::{Offer, ResultEnvelope};

pub const DEFAULT_REPORT_LIMIT: usize = 5;

// Short text block for one offer:
//   1. <outbound>
//      Return: <inbound>
//      Price: <price text>
pub fn render_offer(position: usize, offer: &Offer) -> String {
    format!(
        "{position}. {}\n   Return: {}\n   Price: {}",
        offer.outbound, offer.inbound, offer.price_text
    )
}

// Console summary of one search run, showing at most `limit` offers
pub fn render_report(envelope: &ResultEnvelope, limit: usize) -> String {
    let total = envelope.offers.len();
    let mut out = format!(
        "Status: {}\nMessage: {}\nDate Range: {}\nFound {} flights\n",
        envelope.status,
        envelope.message,
        envelope.date_range(),
        total
    );

    if envelope.offers.is_empty() {
        out.push_str("No flights found.\n");
    } else {
        out.push_str("\n--- Flight Results ---\n");
        for (i, offer) in envelope.offers.iter().take(limit).enumerate() {
            out.push_str(&format!("\n{}\n", render_offer(i + 1, offer)));
        }
        if total > limit {
            out.push_str(&format!("\n... and {} more flights\n", total - limit));
        }
    }

    out.push_str(&format!("\nSource URL: {}", envelope.source));
    out
}
