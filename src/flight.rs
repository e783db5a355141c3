use serde::{Deserialize, Serialize};

// One directional journey segment as read from the results page.
// The date label keeps the page's own formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Leg {
    pub date: String,
    pub departure: Option<Stop>,
    pub arrival: Option<Stop>,
}

// Time, city and airport code of one end of a leg
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stop {
    pub time: String,
    pub city: String,
    pub code: String,
}

impl Stop {
    pub fn render(&self) -> String {
        format!("{} {} ({})", self.time, self.city, self.code)
    }
}

impl Leg {
    // "{date} {depTime} {depCity} ({depCode}) → {arrTime} {arrCity} ({arrCode})"
    // A stop missing from the markup renders as an empty string.
    pub fn render(&self) -> String {
        format!(
            "{} {} → {}",
            self.date,
            self.departure.as_ref().map(Stop::render).unwrap_or_default(),
            self.arrival.as_ref().map(Stop::render).unwrap_or_default()
        )
    }

    pub fn arrival_city(&self) -> &str {
        self.arrival.as_ref().map_or("", |stop| stop.city.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegKind {
    Outbound,
    Inbound,
}

impl std::fmt::Display for LegKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LegKind::Outbound => write!(f, "outbound"),
            LegKind::Inbound => write!(f, "inbound"),
        }
    }
}

// A round-trip listing. Field names on the wire match what API callers
// and the notification templates already consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    #[serde(rename = "start")]
    pub outbound: String,
    #[serde(rename = "return_flight")]
    pub inbound: String,
    #[serde(rename = "priceText")]
    pub price_text: String,
    pub price: f64,
    // Arrival city of the outbound leg
    #[serde(default)]
    pub destination: String,
}

impl Offer {
    pub fn from_legs(outbound: &Leg, inbound: &Leg, price_text: String, price: f64) -> Self {
        Self {
            outbound: outbound.render(),
            inbound: inbound.render(),
            price_text,
            price,
            destination: outbound.arrival_city().to_string(),
        }
    }
}

// Response envelope handed to every caller (HTTP, console, email)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub status: u16,
    pub message: String,
    #[serde(rename = "flights")]
    pub offers: Vec<Offer>,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    #[serde(rename = "url")]
    pub source: String,
}

impl ResultEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    // "start - end" as shown in reports and alert subjects
    pub fn date_range(&self) -> String {
        format!("{} - {}", self.start_date, self.end_date)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
