//! Offer records produced by the external offer scrapers.
//!
//! The engine only ever reads these: a package offer is attached to the
//! package process by a selection step, and the `package_selected` trigger
//! copies its `flight` and `hotel` sub-records into the sibling processes.

use serde::{Deserialize, Serialize};

/// What an offer bundles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    /// Flight and hotel together
    #[default]
    Package,
    /// Flight only
    Flight,
    /// Hotel only
    Hotel,
}

/// A single flight leg (outbound or return).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct FlightSegment {
    pub flight_number: String,
    pub airline: String,
    pub airline_code: String,
    pub departure_airport: String,
    pub departure_code: String,
    pub departure_time: String,
    pub arrival_airport: String,
    pub arrival_code: String,
    pub arrival_time: String,
    pub date: String,
}

impl FlightSegment {
    /// True if at least the flight number and one airport code are present.
    pub fn is_populated(&self) -> bool {
        !self.flight_number.is_empty()
            && (!self.departure_code.is_empty() || !self.arrival_code.is_empty())
    }
}

/// Outbound and return flight pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct FlightInfo {
    pub outbound: FlightSegment,
    #[serde(rename = "return")]
    pub inbound: FlightSegment,
}

impl FlightInfo {
    pub fn is_populated(&self) -> bool {
        self.outbound.is_populated() || self.inbound.is_populated()
    }
}

/// Hotel details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct HotelInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    pub area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub access: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_width_cm: Option<u32>,
}

impl HotelInfo {
    pub fn is_populated(&self) -> bool {
        !self.name.is_empty() || !self.names.is_empty()
    }
}

/// Availability of a departure date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    SoldOut,
    Limited,
    #[default]
    Unknown,
}

/// Price for a specific departure date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatePricing {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_person: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_total: Option<u64>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Cheapest departure date of an offer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BestValue {
    pub date: String,
    pub price_per_person: u64,
    pub price_total: u64,
}

/// A package, flight or hotel offer as emitted by a scraper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Offer {
    /// Stable offer identifier; becomes the provenance marker of populated data
    pub id: String,

    #[serde(default)]
    pub source_id: String,

    #[serde(rename = "type", default)]
    pub offer_type: OfferType,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub url: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_person: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_total: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight: Option<FlightInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<HotelInfo>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub date_pricing: Vec<DatePricing>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_value: Option<BestValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<String>,
}

fn default_currency() -> String {
    "TWD".to_string()
}

impl Offer {
    /// An offer with only its id set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_id: String::new(),
            offer_type: OfferType::default(),
            title: String::new(),
            url: String::new(),
            currency: default_currency(),
            price_per_person: None,
            price_total: None,
            flight: None,
            hotel: None,
            includes: Vec::new(),
            date_pricing: Vec::new(),
            best_value: None,
            scraped_at: None,
        }
    }

    /// Cheapest priced departure date.
    ///
    /// Uses the scraper-provided `best_value` when present, otherwise derives
    /// it from `date_pricing`, assuming two travellers when a total is
    /// missing.
    pub fn best_value(&self) -> Option<BestValue> {
        if let Some(best) = &self.best_value {
            return Some(best.clone());
        }

        self.date_pricing
            .iter()
            .filter_map(|dp| dp.price_per_person.map(|price| (dp, price)))
            .min_by_key(|(_, price)| *price)
            .map(|(dp, price)| BestValue {
                date: dp.date.clone(),
                price_per_person: price,
                price_total: dp.price_total.unwrap_or(price.saturating_mul(2)),
            })
    }
}
