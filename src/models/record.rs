use crate::models::schema::Column;
use std::fmt;

/// Minimal encoded length for a photo cell to count as a real image.
/// Shorter values are leftovers of "no photo" (empty, `nan`, stray padding).
pub const PHOTO_MIN_ENCODED_LEN: usize = 50;

/// One logged vehicle movement / fuel event.
///
/// Fields that the active schema does not carry stay empty (`""` or `None`)
/// and are not written to the log file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub timestamp: String,
    pub vehicle: String,
    pub driver: String,
    pub authorized_by: String,
    pub start_km: Option<u64>,
    pub end_km: Option<u64>,
    pub distance: Option<u64>,
    pub fuel_ltrs: Option<f64>,
    pub purpose: String,
    pub location: String,
    pub items: String,
    /// Base64 JPEG, empty when no photo was attached.
    pub photo: String,
}

impl Record {
    /// Cell value for `column` as written to the CSV file.
    pub fn value(&self, column: Column) -> String {
        match column {
            Column::Timestamp => self.timestamp.clone(),
            Column::Vehicle => self.vehicle.clone(),
            Column::Driver => self.driver.clone(),
            Column::AuthorizedBy => self.authorized_by.clone(),
            Column::StartKm => fmt_opt(self.start_km),
            Column::EndKm => fmt_opt(self.end_km),
            Column::Distance => fmt_opt(self.distance),
            // `{:?}` keeps the decimal point (0.0, 12.5) and round-trips exactly.
            Column::FuelLtrs => self.fuel_ltrs.map(|f| format!("{f:?}")).unwrap_or_default(),
            Column::Purpose => self.purpose.clone(),
            Column::Location => self.location.clone(),
            Column::Items => self.items.clone(),
            Column::Photo => self.photo.clone(),
        }
    }

    /// Fill `column` from a raw CSV cell. Unparsable numbers become `None`.
    pub fn set(&mut self, column: Column, raw: &str) {
        match column {
            Column::Timestamp => self.timestamp = raw.to_string(),
            Column::Vehicle => self.vehicle = raw.to_string(),
            Column::Driver => self.driver = raw.to_string(),
            Column::AuthorizedBy => self.authorized_by = raw.to_string(),
            Column::StartKm => self.start_km = parse_km(raw),
            Column::EndKm => self.end_km = parse_km(raw),
            Column::Distance => self.distance = parse_km(raw),
            Column::FuelLtrs => self.fuel_ltrs = raw.trim().parse::<f64>().ok(),
            Column::Purpose => self.purpose = raw.to_string(),
            Column::Location => self.location = raw.to_string(),
            Column::Items => self.items = raw.to_string(),
            Column::Photo => self.photo = raw.to_string(),
        }
    }

    pub fn has_photo(&self) -> bool {
        self.photo.trim().len() > PHOTO_MIN_ENCODED_LEN
    }

    /// Label used to pick a record in the photo viewer.
    pub fn label(&self) -> String {
        format!("{} | {} | {}", self.timestamp, self.vehicle, self.location)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn fmt_opt(v: Option<u64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

/// Accepts `120` as well as `120.0`, which spreadsheet round-trips produce.
fn parse_km(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u64>() {
        return Some(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => Some(f as u64),
        _ => None,
    }
}
