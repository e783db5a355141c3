use std::collections::HashSet;

use crate::flight::Offer;

// Offers priced strictly below `threshold`, in their original order
pub fn filter_by_price(offers: Vec<Offer>, threshold: f64) -> Vec<Offer> {
    offers
        .into_iter()
        .filter(|offer| offer.price < threshold)
        .collect()
}

// Distinct destination names in first-seen order, for the enrichment step
pub fn destinations(offers: &[Offer]) -> Vec<String> {
    let mut seen = HashSet::new();
    offers
        .iter()
        .map(|offer| offer.destination.trim())
        .filter(|name| !name.is_empty() && seen.insert(name.to_string()))
        .map(str::to_string)
        .collect()
}
