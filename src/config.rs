use thiserror::Error;

use crate::envelope::SearchWindow;

pub const DEFAULT_PRICE_LIMIT: f64 = 300.0;
pub const DEFAULT_WINDOW_DAYS: i64 = 90;
pub const MAX_WINDOW_DAYS: i64 = 3650;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) \
    Chrome/91.0.4472.124 Safari/537.36";

// Flexi return search from the Silesia/Lesser Poland airports to anywhere.
// `{depdate}` and `{arrdate}` are filled from the search window.
pub const SEARCH_URL_TEMPLATE: &str = concat!(
    "https://www.azair.eu/azfin.php?tp=0&searchtype=flexi&",
    "srcAirport=Katowice+%5BKTW%5D+%28%2BKRK%2COSR%2CLCJ%2CWRO%29&",
    "srcTypedText=&srcFreeTypedText=&srcMC=&srcap0=KRK&srcap1=OSR&",
    "srcap2=LCJ&srcap3=WRO&srcFreeAirport=&",
    "dstAirport=Gdziekolwiek+%5BXXX%5D&dstTypedText=gdziek&",
    "dstFreeTypedText=&dstMC=&adults=2&children=3&infants=0&",
    "minHourStay=0%3A45&maxHourStay=23%3A20&",
    "minHourOutbound=17%3A00&maxHourOutbound=24%3A00&",
    "minHourInbound=20%3A00&maxHourInbound=24%3A00&",
    "depdate={depdate}&arrdate={arrdate}&",
    "minDaysStay=4&maxDaysStay=5&nextday=0&autoprice=true&",
    "currency=PLN&wizzxclub=false&flyoneclub=false&",
    "blueairbenefits=false&megavolotea=false&schengen=false&",
    "transfer=false&samedep=true&samearr=true&dep0=false&",
    "dep1=false&dep2=false&dep3=true&dep4=true&dep5=false&",
    "dep6=false&arr0=true&arr1=false&arr2=false&arr3=false&",
    "arr4=false&arr5=false&arr6=true&maxChng=2&",
    "isOneway=return&resultSubmit=Szukaj"
);

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

// Element/class pairs identifying the parts of an offer block.
// A class string may hold several space separated classes; all must match.
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    pub block: NodeSpec,
    pub outbound_marker: NodeSpec,
    pub inbound_marker: NodeSpec,
    pub leg_container: NodeSpec,
    pub date: NodeSpec,
    pub departure: NodeSpec,
    pub arrival: NodeSpec,
    pub time: NodeSpec,
    pub code: NodeSpec,
    pub price: NodeSpec,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    pub tag: String,
    pub class: Option<String>,
}

impl NodeSpec {
    pub fn new(tag: &str, class: &str) -> Self {
        Self {
            tag: tag.to_string(),
            class: Some(class.to_string()),
        }
    }

    pub fn tag(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            class: None,
        }
    }

    pub fn matches(&self, tag: &str, classes: &[&str]) -> bool {
        if !self.tag.eq_ignore_ascii_case(tag) {
            return false;
        }
        match &self.class {
            None => true,
            Some(wanted) => wanted.split_whitespace().all(|c| classes.contains(&c)),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            block: NodeSpec::new("div", "result"),
            outbound_marker: NodeSpec::new("span", "caption tam"),
            inbound_marker: NodeSpec::new("span", "caption sem"),
            leg_container: NodeSpec::tag("p"),
            date: NodeSpec::new("span", "date"),
            departure: NodeSpec::new("span", "from"),
            arrival: NodeSpec::new("span", "to"),
            time: NodeSpec::tag("strong"),
            code: NodeSpec::new("span", "code"),
            price: NodeSpec::new("span", "tp"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub price_limit: f64,
    pub window_days: i64,
    pub search_url_template: String,
    pub user_agent: String,
    pub selectors: SelectorConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            price_limit: DEFAULT_PRICE_LIMIT,
            window_days: DEFAULT_WINDOW_DAYS,
            search_url_template: SEARCH_URL_TEMPLATE.to_string(),
            user_agent: USER_AGENT.to_string(),
            selectors: SelectorConfig::default(),
        }
    }
}

impl MonitorConfig {
    // Defaults overridden by PRICE_LIMIT and WINDOW_DAYS when set
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("PRICE_LIMIT") {
            config.price_limit = match raw.trim().parse::<f64>() {
                Ok(limit) if limit.is_finite() && limit >= 0.0 => limit,
                _ => return Err(invalid("PRICE_LIMIT", raw)),
            };
        }

        if let Some(raw) = lookup("WINDOW_DAYS") {
            config.window_days = match raw.trim().parse::<i64>() {
                Ok(days) if (0..=MAX_WINDOW_DAYS).contains(&days) => days,
                _ => return Err(invalid("WINDOW_DAYS", raw)),
            };
        }

        Ok(config)
    }

    pub fn search_url(&self, window: &SearchWindow) -> String {
        self.search_url_template
            .replace("{depdate}", &window.start)
            .replace("{arrdate}", &window.end)
    }
}

fn invalid(key: &str, value: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    }
}
