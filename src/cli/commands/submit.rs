use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::form::{Form, FormInput};
use crate::core::submit::SubmitLogic;
use crate::errors::AppResult;
use crate::models::Variant;
use crate::store::LogStore;
use crate::sync::RemoteSync;
use crate::ui::messages::{success, warning};
use crate::utils::time::{now_at, record_stamp};
use std::fs;

/// Validate the form, append the record and mirror the log.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Submit {
        vehicle,
        driver,
        purpose,
        start_km,
        end_km,
        fuel,
        auth_by,
        location,
        items,
        photo,
    } = cmd
    {
        // Secrets and offset are checked before anything is touched.
        let secrets = cfg.secrets()?;
        let offset = cfg.offset()?;

        let photo_bytes = match photo {
            Some(path) => Some(fs::read(path)?),
            None => None,
        };

        let input = FormInput {
            vehicle: vehicle.clone(),
            driver: driver.clone(),
            purpose: purpose.clone(),
            start_km: *start_km,
            end_km: *end_km,
            fuel_ltrs: *fuel,
            authorized_by: auth_by.clone(),
            location: location.clone(),
            items: items.clone(),
            photo: photo_bytes,
        };

        let store = LogStore::from_config(cfg);
        let sync = RemoteSync::from_config(cfg, &secrets)?;
        let form = Form::from_config(cfg);

        let outcome = SubmitLogic::apply(
            &store,
            &sync,
            &form,
            &input,
            record_stamp(now_at(offset)),
        )?;

        let what = match cfg.variant {
            Variant::Fleet => format!(
                "Logged {}km trip by {}",
                outcome.record.distance.unwrap_or(0),
                outcome.record.driver
            ),
            Variant::Dispatch => format!(
                "Logged {} trip to {}",
                outcome.record.vehicle, outcome.record.location
            ),
        };

        if outcome.synced {
            success(format!("{what} ({} records, synced)", outcome.rows));
        } else {
            warning(format!(
                "{what}: saved locally to {}, remote mirror not updated",
                store.path().display()
            ));
        }
    }

    Ok(())
}
