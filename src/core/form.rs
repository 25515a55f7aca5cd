//! Form validation and record construction.

use crate::config::Config;
use crate::core::photo::encode_photo;
use crate::errors::{AppError, AppResult};
use crate::models::{Column, Record, Schema};

/// Raw form values as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub vehicle: String,
    pub driver: Option<String>,
    pub purpose: String,
    pub start_km: u64,
    pub end_km: u64,
    pub fuel_ltrs: f64,
    pub authorized_by: String,
    pub location: String,
    pub items: String,
    /// Raw image file contents (any format the decoder understands).
    pub photo: Option<Vec<u8>>,
}

/// Allowed values of the enumerated fields.
#[derive(Debug, Clone)]
pub struct Choices {
    pub vehicles: Vec<String>,
    pub drivers: Vec<String>,
    pub purposes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Form {
    pub schema: Schema,
    pub choices: Choices,
    pub photo_quality: u8,
}

impl Form {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            schema: cfg.schema(),
            choices: Choices {
                vehicles: cfg.vehicles.clone(),
                drivers: cfg.drivers.clone(),
                purposes: cfg.purposes.clone(),
            },
            photo_quality: cfg.photo_quality,
        }
    }

    /// Validate `input` and build the record stamped with `timestamp`.
    /// Nothing is built when any check fails.
    pub fn build(&self, input: &FormInput, timestamp: String) -> AppResult<Record> {
        self.validate(input)?;

        let vehicle = pick("vehicle", &input.vehicle, &self.choices.vehicles)?;
        let purpose = pick("purpose", &input.purpose, &self.choices.purposes)?;

        let photo = match &input.photo {
            Some(bytes) if self.schema.has(Column::Photo) => {
                encode_photo(bytes, self.photo_quality)?
            }
            _ => String::new(),
        };

        let mut record = Record {
            timestamp,
            vehicle,
            purpose,
            location: normalize(&input.location),
            items: normalize(&input.items),
            photo,
            ..Record::default()
        };

        if self.schema.has(Column::Driver) {
            record.driver = match &input.driver {
                Some(d) => pick("driver", d, &self.choices.drivers)?,
                None => self
                    .choices
                    .drivers
                    .first()
                    .cloned()
                    .ok_or_else(|| AppError::MissingField(Column::Driver.label().to_string()))?,
            };
        }
        if self.schema.has(Column::AuthorizedBy) {
            record.authorized_by = normalize(&input.authorized_by);
        }
        if self.schema.has(Column::StartKm) {
            record.start_km = Some(input.start_km);
        }
        if self.schema.has(Column::EndKm) {
            record.end_km = Some(input.end_km);
        }
        if self.schema.has(Column::Distance) {
            record.distance = Some(distance(input.start_km, input.end_km));
        }
        if self.schema.has(Column::FuelLtrs) {
            record.fuel_ltrs = Some(input.fuel_ltrs);
        }

        Ok(record)
    }

    /// Range and presence checks, in the order the user sees them.
    pub fn validate(&self, input: &FormInput) -> AppResult<()> {
        if self.schema.checks_odometer() && input.end_km < input.start_km && input.end_km != 0 {
            return Err(AppError::OdometerRange {
                start: input.start_km,
                end: input.end_km,
            });
        }

        let blank: Vec<&str> = self
            .schema
            .required
            .iter()
            .filter(|c| field_text(input, **c).trim().is_empty())
            .map(|c| c.label())
            .collect();
        if !blank.is_empty() {
            return Err(AppError::MissingField(blank.join(" and ")));
        }

        if self.schema.has(Column::FuelLtrs)
            && (!input.fuel_ltrs.is_finite() || input.fuel_ltrs < 0.0)
        {
            return Err(AppError::InvalidNumber {
                field: "fuel",
                reason: format!("{} is not a quantity of litres", input.fuel_ltrs),
            });
        }

        Ok(())
    }
}

/// Trip length; an unset end reading (0) means no distance yet.
pub fn distance(start_km: u64, end_km: u64) -> u64 {
    if end_km > 0 {
        end_km.saturating_sub(start_km)
    } else {
        0
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_uppercase()
}

fn field_text(input: &FormInput, column: Column) -> &str {
    match column {
        Column::Vehicle => &input.vehicle,
        Column::Driver => input.driver.as_deref().unwrap_or(""),
        Column::AuthorizedBy => &input.authorized_by,
        Column::Purpose => &input.purpose,
        Column::Location => &input.location,
        Column::Items => &input.items,
        // Numeric columns always carry a value; the remaining columns are
        // filled by the system.
        _ => "-",
    }
}

/// Case-insensitive match against the allowed values, returning the
/// canonical spelling.
fn pick(field: &'static str, value: &str, allowed: &[String]) -> AppResult<String> {
    allowed
        .iter()
        .find(|a| a.eq_ignore_ascii_case(value.trim()))
        .cloned()
        .ok_or_else(|| AppError::InvalidChoice {
            field,
            value: value.to_string(),
            allowed: allowed.join(", "),
        })
}
