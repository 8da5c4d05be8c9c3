pub mod types;

pub use types::{ListingFilter, SortOrder};

use crate::models::PropertyRecord;
use crate::store::RecordStore;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::debug;

/// Listings passing `filter`, in the requested order
pub fn browse<'s>(store: &'s RecordStore, filter: &ListingFilter) -> Vec<&'s PropertyRecord> {
    let search = filter.search.as_deref().map(str::to_lowercase);

    let mut listings: Vec<_> = store
        .iter()
        .filter(|p| {
            search
                .as_deref()
                .map_or(true, |s| p.property_name.to_lowercase().contains(s))
        })
        .filter(|p| filter.city.as_deref().map_or(true, |c| p.city == c))
        .filter(|p| {
            filter
                .property_type
                .as_deref()
                .map_or(true, |t| p.property_type == t)
        })
        .filter(|p| filter.min_price.map_or(true, |min| p.price >= min))
        .filter(|p| filter.max_price.map_or(true, |max| p.price <= max))
        .collect();

    listings.sort_by(|a, b| compare(filter.sort, a, b));
    debug!("Browsing {} of {} listings", listings.len(), store.len());
    listings
}

fn compare(sort: SortOrder, a: &PropertyRecord, b: &PropertyRecord) -> Ordering {
    let primary = match sort {
        SortOrder::PriceAsc => a.price.total_cmp(&b.price),
        SortOrder::PriceDesc => b.price.total_cmp(&a.price),
        SortOrder::AreaDesc => b.area_sqft.total_cmp(&a.area_sqft),
        SortOrder::BedroomsDesc => b.bedrooms().cmp(&a.bedrooms()),
    };
    primary.then_with(|| a.property_name.cmp(&b.property_name))
}

pub fn distinct_cities(store: &RecordStore) -> Vec<String> {
    distinct(store, |p| &p.city)
}

pub fn distinct_types(store: &RecordStore) -> Vec<String> {
    distinct(store, |p| &p.property_type)
}

fn distinct(store: &RecordStore, field: impl Fn(&PropertyRecord) -> &String) -> Vec<String> {
    store
        .iter()
        .map(field)
        .filter(|v| !v.is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Lowest and highest asking price, if the store has any listings
pub fn price_bounds(store: &RecordStore) -> Option<(f64, f64)> {
    store.iter().map(|p| p.price).fold(None, |acc, price| match acc {
        None => Some((price, price)),
        Some((lo, hi)) => Some((lo.min(price), hi.max(price))),
    })
}
