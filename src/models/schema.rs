//! Column set of the log file.
//!
//! Both deployments share one record type; a `Schema` decides which columns
//! are written, which text fields are mandatory, and whether the odometer
//! check applies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every column a log file may carry, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Timestamp,
    Vehicle,
    Driver,
    AuthorizedBy,
    StartKm,
    EndKm,
    Distance,
    FuelLtrs,
    Purpose,
    Location,
    Items,
    Photo,
}

impl Column {
    pub const ALL: [Column; 12] = [
        Column::Timestamp,
        Column::Vehicle,
        Column::Driver,
        Column::AuthorizedBy,
        Column::StartKm,
        Column::EndKm,
        Column::Distance,
        Column::FuelLtrs,
        Column::Purpose,
        Column::Location,
        Column::Items,
        Column::Photo,
    ];

    /// Header name as written in the CSV file.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Timestamp => "Timestamp",
            Column::Vehicle => "Vehicle",
            Column::Driver => "Driver",
            Column::AuthorizedBy => "Authorized_By",
            Column::StartKm => "Start_KM",
            Column::EndKm => "End_KM",
            Column::Distance => "Distance",
            Column::FuelLtrs => "Fuel_Ltrs",
            Column::Purpose => "Purpose",
            Column::Location => "Location",
            Column::Items => "Items",
            Column::Photo => "Photo",
        }
    }

    /// Human label used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Column::Timestamp => "Timestamp",
            Column::Vehicle => "Vehicle",
            Column::Driver => "Driver",
            Column::AuthorizedBy => "Authorization",
            Column::StartKm => "Start KM",
            Column::EndKm => "End KM",
            Column::Distance => "Distance",
            Column::FuelLtrs => "Fuel",
            Column::Purpose => "Purpose",
            Column::Location => "Location",
            Column::Items => "Item Details",
            Column::Photo => "Photo",
        }
    }

    pub fn from_header(s: &str) -> Option<Self> {
        Column::ALL.into_iter().find(|c| c.header() == s.trim())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Deployment preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Vehicle movement and fuel: driver, authorizer, odometer, fuel.
    #[default]
    Fleet,
    /// Deliveries only: vehicle, purpose, destination, items.
    Dispatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub variant: Variant,
    pub columns: Vec<Column>,
    pub required: Vec<Column>,
}

impl Schema {
    pub fn fleet() -> Self {
        Self {
            variant: Variant::Fleet,
            columns: Column::ALL.to_vec(),
            required: vec![Column::AuthorizedBy, Column::Location],
        }
    }

    pub fn dispatch() -> Self {
        Self {
            variant: Variant::Dispatch,
            columns: vec![
                Column::Timestamp,
                Column::Vehicle,
                Column::Purpose,
                Column::Location,
                Column::Items,
                Column::Photo,
            ],
            required: vec![Column::Items, Column::Location],
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Fleet => Self::fleet(),
            Variant::Dispatch => Self::dispatch(),
        }
    }

    pub fn has(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// The odometer rule only makes sense when both readings are logged.
    pub fn checks_odometer(&self) -> bool {
        self.has(Column::StartKm) && self.has(Column::EndKm)
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(Column::header).collect()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::fleet()
    }
}
