use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Columns every property source must carry
pub const PROPERTY_COLUMNS: [&str; 12] = [
    "listing_id",
    "property_name",
    "city",
    "property_type",
    "bedrooms",
    "bathrooms",
    "area_sqft",
    "price",
    "price_currency",
    "availability",
    "short_description",
    "agent_email",
];

/// Core listing data model, one row of the property source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyRecord {
    pub listing_id: String,
    pub property_name: String,
    pub city: String,
    pub property_type: String,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area_sqft: f64,
    pub price: f64,
    pub price_currency: String,
    pub availability: String,
    pub short_description: String,
    pub agent_email: String,
}

impl PropertyRecord {
    /// Bedroom count, with a missing value shown as zero
    pub fn bedrooms(&self) -> u32 {
        self.bedrooms.unwrap_or(0)
    }

    pub fn bathrooms(&self) -> u32 {
        self.bathrooms.unwrap_or(0)
    }
}

/// Visit request captured by the chat booking flow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRequest {
    pub timestamp: DateTime<Utc>,
    pub listing_id: Option<String>,
    pub property_name: Option<String>,
    pub name: String,
    pub phone: String,
    #[serde(rename = "user_message")]
    pub raw_user_message: String,
}

impl BookingRequest {
    /// Stamp a new request with the current time, truncated to whole seconds
    pub fn capture(
        listing: Option<&PropertyRecord>,
        name: String,
        phone: String,
        raw_user_message: String,
    ) -> Self {
        Self {
            timestamp: Utc::now().trunc_subsecs(0),
            listing_id: listing.map(|p| p.listing_id.clone()),
            property_name: listing.map(|p| p.property_name.clone()),
            name,
            phone,
            raw_user_message,
        }
    }
}

/// Booking submitted through the simple form path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegacyBooking {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Property Name")]
    pub property_name: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
}
