use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Ordering of the listing grid; ties always fall back to the property name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Price (low→high)
    #[default]
    PriceAsc,
    /// Price (high→low)
    PriceDesc,
    /// Area (high→low)
    AreaDesc,
    /// Bedrooms (high→low)
    BedroomsDesc,
}

/// Filter parameters for browsing listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingFilter {
    /// Case-insensitive fragment of the property name
    pub search: Option<String>,
    /// Exact city
    pub city: Option<String>,
    /// Exact property type
    pub property_type: Option<String>,
    /// Minimum price (inclusive)
    pub min_price: Option<f64>,
    /// Maximum price (inclusive)
    pub max_price: Option<f64>,
    pub sort: SortOrder,
}
