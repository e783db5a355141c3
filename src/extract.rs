// Offer extraction from a search results page
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{NodeSpec, SelectorConfig};
use crate::flight::{Leg, LegKind, Offer, Stop};
use crate::markup::{Document, MarkupNode};

// Reasons a single offer block is dropped
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockParseError {
    #[error("Missing {0} marker")]
    MissingMarker(LegKind),

    #[error("No leg container around the {0} marker")]
    MissingContainer(LegKind),

    #[error("Missing price node")]
    MissingPrice,
}

// Offers found in one document plus how many blocks were dropped
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub offers: Vec<Offer>,
    pub blocks: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Extractor {
    selectors: SelectorConfig,
}

impl Extractor {
    pub fn new(selectors: SelectorConfig) -> Self {
        Self { selectors }
    }

    // Never fails; a page with no usable blocks yields an empty list
    pub fn extract(&self, html: &str) -> Vec<Offer> {
        self.extract_with_report(html).offers
    }

    pub fn extract_with_report(&self, html: &str) -> Extraction {
        let document = Document::parse(html);
        let blocks = document.root().find_all(&self.selectors.block);

        let mut extraction = Extraction {
            offers: Vec::with_capacity(blocks.len()),
            blocks: blocks.len(),
            skipped: 0,
        };

        for (index, block) in blocks.iter().enumerate() {
            match self.parse_block(block) {
                Ok(offer) => extraction.offers.push(offer),
                Err(err) => {
                    debug!(block = index, reason = %err, "skipping offer block");
                    extraction.skipped += 1;
                }
            }
        }

        info!(
            blocks = extraction.blocks,
            offers = extraction.offers.len(),
            skipped = extraction.skipped,
            "extracted offers"
        );
        extraction
    }

    pub fn parse_block<N: MarkupNode>(&self, block: &N) -> Result<Offer, BlockParseError> {
        let outbound = self.locate_leg(block, LegKind::Outbound)?;
        let inbound = self.locate_leg(block, LegKind::Inbound)?;

        let outbound = self.parse_leg(&outbound);
        let inbound = self.parse_leg(&inbound);

        let price_node = block
            .find(&self.selectors.price)
            .ok_or(BlockParseError::MissingPrice)?;
        let price_text = price_node.full_text().trim().to_string();
        let price = parse_price(&price_text);

        Ok(Offer::from_legs(&outbound, &inbound, price_text, price))
    }

    // Marker node -> enclosing paragraph holding the whole leg
    fn locate_leg<N: MarkupNode>(&self, block: &N, kind: LegKind) -> Result<N, BlockParseError> {
        let marker_spec = match kind {
            LegKind::Outbound => &self.selectors.outbound_marker,
            LegKind::Inbound => &self.selectors.inbound_marker,
        };

        let marker = block
            .find(marker_spec)
            .ok_or(BlockParseError::MissingMarker(kind))?;

        marker
            .find_parent(&self.selectors.leg_container)
            .ok_or(BlockParseError::MissingContainer(kind))
    }

    fn parse_leg<N: MarkupNode>(&self, container: &N) -> Leg {
        let date = container
            .find(&self.selectors.date)
            .map(|node| node.full_text().replace('\u{a0}', " ").trim().to_string())
            .unwrap_or_default();

        Leg {
            date,
            departure: self.parse_stop(container, &self.selectors.departure),
            arrival: self.parse_stop(container, &self.selectors.arrival),
        }
    }

    fn parse_stop<N: MarkupNode>(&self, container: &N, spec: &NodeSpec) -> Option<Stop> {
        let location = container.find(spec)?;
        let full_text = location.full_text();

        // Some layouts drop the <strong> around the time
        let time = match location.find(&self.selectors.time) {
            Some(node) => node.full_text().trim().to_string(),
            None => full_text
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string(),
        };

        // Own text only: some variants glue the city name inside the code node
        let code_node = location.find(&self.selectors.code);
        let code = code_node
            .as_ref()
            .map(|node| node.own_text().trim().to_string())
            .unwrap_or_default();

        let without_code = match &code_node {
            Some(node) => location.text_excluding(node),
            None => full_text,
        };
        let city = if time.is_empty() {
            without_code.trim().to_string()
        } else {
            without_code.replace(&time, "").trim().to_string()
        };

        Some(Stop { time, city, code })
    }
}

// Numeric value of a displayed price.
//
// Takes the first run of digits and commas, optionally followed by a dot and
// more digits, and reads commas as decimal separators. Anything that does not
// parse gives 0.0; the caller keeps the original text for display.
pub fn parse_price(text: &str) -> f64 {
    let Some(start) = text.find(|c: char| c.is_ascii_digit() || c == ',') else {
        return 0.0;
    };
    let rest = &text[start..];

    let mut end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == ','))
        .unwrap_or(rest.len());
    if rest[end..].starts_with('.') {
        end += 1;
        end += rest[end..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len() - end);
    }

    rest[..end].replace(',', ".").parse::<f64>().unwrap_or(0.0)
}
