use crate::error::StoreError;
use crate::models::{BookingRequest, LegacyBooking};
use crate::resolver::Resolver;
use crate::store::RecordStore;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Visit requests captured by the chat booking flow
#[derive(Debug, Clone)]
pub struct VisitLog {
    path: PathBuf,
}

impl VisitLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one request, rewriting the whole file
    pub fn append(&self, request: &BookingRequest) -> Result<(), StoreError> {
        append_row(&self.path, request)?;
        info!(
            "Booking captured for {} ({})",
            request.name,
            request.listing_id.as_deref().unwrap_or("no listing")
        );
        Ok(())
    }

    pub fn load(&self) -> Result<Vec<BookingRequest>, StoreError> {
        read_rows(&self.path)
    }
}

/// Bookings from the simple form path, kept in their own file
#[derive(Debug, Clone)]
pub struct LegacyBookingLog {
    path: PathBuf,
}

impl LegacyBookingLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn append(&self, booking: &LegacyBooking) -> Result<(), StoreError> {
        append_row(&self.path, booking)?;
        info!(
            "Booking confirmed for {} at {} on {}",
            booking.name, booking.property_name, booking.date
        );
        Ok(())
    }

    /// All bookings so far; an absent file means none
    pub fn load(&self) -> Result<Vec<LegacyBooking>, StoreError> {
        read_rows(&self.path)
    }
}

/// Validate a form booking; the property may be a listing id or a name
pub fn form_booking(
    store: &RecordStore,
    name: &str,
    property: &str,
    date: NaiveDate,
) -> Result<LegacyBooking, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::IncompleteForm);
    }
    let listing = store
        .get(property)
        .or_else(|| Resolver::new(store).resolve(property))
        .ok_or(StoreError::IncompleteForm)?;

    Ok(LegacyBooking {
        name: name.to_string(),
        property_name: listing.property_name.clone(),
        date,
    })
}

/// Numbered listing of form bookings
pub fn render_bookings(bookings: &[LegacyBooking]) -> String {
    if bookings.is_empty() {
        return "No bookings yet.".to_string();
    }
    let mut out = String::from("📋 All Bookings");
    for (i, b) in bookings.iter().enumerate() {
        out.push_str(&format!("\n{}. {} — {} on {}", i + 1, b.name, b.property_name, b.date));
    }
    out
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader.deserialize().collect::<Result<Vec<T>, _>>()?;
    Ok(rows)
}

// Read-modify-write: the file is replaced, not appended to in place.
fn append_row<T>(path: &Path, row: &T) -> Result<(), StoreError>
where
    T: Serialize + DeserializeOwned,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let existing: Vec<T> = read_rows(path)?;
    debug!("Rewriting {} with {} rows", path.display(), existing.len() + 1);

    let mut writer = csv::Writer::from_path(path)?;
    for old in &existing {
        writer.serialize(old)?;
    }
    writer.serialize(row)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{record, sample_records};

    fn nov_2() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 11, 2).unwrap()
    }

    #[test]
    fn test_visit_log_creates_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let log = VisitLog::new(dir.path().join("data").join("visits.csv"));

        let studio = record("P003", "Marina Studio");
        let request = BookingRequest::capture(
            Some(&studio),
            "Jane Doe".into(),
            "555-1234".into(),
            "P003".into(),
        );
        log.append(&request).unwrap();

        let raw = std::fs::read_to_string(log.path()).unwrap();
        assert!(raw.starts_with("timestamp,listing_id,property_name,name,phone,user_message\n"));
        assert!(raw.contains("P003,Marina Studio,Jane Doe,555-1234,P003"));
    }

    #[test]
    fn test_visit_log_appends_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let log = VisitLog::new(dir.path().join("visits.csv"));

        let first = BookingRequest::capture(None, "Jane".into(), "1".into(), "skip".into());
        let studio = record("P003", "Marina Studio");
        let second =
            BookingRequest::capture(Some(&studio), "Raj".into(), "2".into(), "marina".into());
        log.append(&first).unwrap();
        log.append(&second).unwrap();

        let rows = log.load().unwrap();
        assert_eq!(rows, vec![first, second]);
        assert_eq!(rows[0].listing_id, None);
        assert_eq!(rows[1].listing_id.as_deref(), Some("P003"));
    }

    #[test]
    fn test_legacy_log_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let log = LegacyBookingLog::new(dir.path().join("bookings.csv"));
        assert!(log.load().unwrap().is_empty());

        let booking = LegacyBooking {
            name: "Jane Doe".into(),
            property_name: "Marina Studio".into(),
            date: nov_2(),
        };
        log.append(&booking).unwrap();

        let raw = std::fs::read_to_string(dir.path().join("bookings.csv")).unwrap();
        assert_eq!(raw, "Name,Property Name,Date\nJane Doe,Marina Studio,2026-11-02\n");
        assert_eq!(log.load().unwrap(), vec![booking]);
    }

    #[test]
    fn test_form_booking_by_listing_id() {
        let store = RecordStore::from_records(sample_records()).unwrap();
        let booking = form_booking(&store, "  Jane Doe ", "p003", nov_2()).unwrap();
        assert_eq!(booking.name, "Jane Doe");
        assert_eq!(booking.property_name, "Marina Studio");
        assert_eq!(booking.date, nov_2());
    }

    #[test]
    fn test_form_booking_by_property_name() {
        let store = RecordStore::from_records(sample_records()).unwrap();
        let booking = form_booking(&store, "Raj", "marina", nov_2()).unwrap();
        assert_eq!(booking.property_name, "Marina Studio");

        let booking = form_booking(&store, "Raj", "Palm Garden Villa", nov_2()).unwrap();
        assert_eq!(booking.property_name, "Palm Garden Villa");
    }

    #[test]
    fn test_form_booking_rejects_blank_name() {
        let store = RecordStore::from_records(sample_records()).unwrap();
        let err = form_booking(&store, "   ", "P003", nov_2()).unwrap_err();
        assert!(matches!(err, StoreError::IncompleteForm));
        assert_eq!(err.to_string(), "⚠️ Please fill all fields.");
    }

    #[test]
    fn test_form_booking_rejects_unknown_property() {
        let store = RecordStore::from_records(sample_records()).unwrap();
        let err = form_booking(&store, "Jane", "Lighthouse Castle", nov_2()).unwrap_err();
        assert!(matches!(err, StoreError::IncompleteForm));
    }

    #[test]
    fn test_render_bookings() {
        assert_eq!(render_bookings(&[]), "No bookings yet.");

        let rendered = render_bookings(&[
            LegacyBooking {
                name: "Jane Doe".into(),
                property_name: "Marina Studio".into(),
                date: nov_2(),
            },
            LegacyBooking {
                name: "Raj".into(),
                property_name: "Palm Garden Villa".into(),
                date: nov_2(),
            },
        ]);
        assert_eq!(
            rendered,
            "📋 All Bookings\n\
             1. Jane Doe — Marina Studio on 2026-11-02\n\
             2. Raj — Palm Garden Villa on 2026-11-02"
        );
    }

    #[test]
    fn test_empty_log_renders_no_bookings() {
        let dir = tempfile::tempdir().unwrap();
        let log = LegacyBookingLog::new(dir.path().join("bookings.csv"));
        assert_eq!(render_bookings(&log.load().unwrap()), "No bookings yet.");
    }
}
