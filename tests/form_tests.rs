use rfleetlog::config::Config;
use rfleetlog::core::form::{Form, FormInput, distance};
use rfleetlog::errors::AppError;
use rfleetlog::models::Variant;

fn fleet_form() -> Form {
    Form::from_config(&Config::default())
}

fn dispatch_form() -> Form {
    let cfg = Config {
        variant: Variant::Dispatch,
        ..Config::default()
    };
    Form::from_config(&cfg)
}

fn valid_input() -> FormInput {
    FormInput {
        vehicle: "Mahindra".to_string(),
        driver: Some("Brahmiah".to_string()),
        purpose: "Pickup".to_string(),
        start_km: 100,
        end_km: 112,
        fuel_ltrs: 0.0,
        authorized_by: "Subodth".to_string(),
        location: "unit 2".to_string(),
        items: "cement bags".to_string(),
        photo: None,
    }
}

const TS: &str = "2025-01-01 09:00";

#[test]
fn test_valid_fleet_record() {
    let r = fleet_form().build(&valid_input(), TS.to_string()).unwrap();

    assert_eq!(r.timestamp, TS);
    assert_eq!(r.vehicle, "Mahindra");
    assert_eq!(r.driver, "Brahmiah");
    assert_eq!(r.start_km, Some(100));
    assert_eq!(r.end_km, Some(112));
    assert_eq!(r.distance, Some(12));
    assert_eq!(r.fuel_ltrs, Some(0.0));
    assert_eq!(r.photo, "");
}

#[test]
fn test_text_fields_uppercased() {
    let r = fleet_form().build(&valid_input(), TS.to_string()).unwrap();

    assert_eq!(r.location, "UNIT 2");
    assert_eq!(r.authorized_by, "SUBODTH");
    assert_eq!(r.items, "CEMENT BAGS");
}

#[test]
fn test_end_below_start_rejected() {
    let input = FormInput {
        start_km: 10,
        end_km: 5,
        ..valid_input()
    };

    let err = fleet_form().build(&input, TS.to_string()).unwrap_err();
    assert!(matches!(err, AppError::OdometerRange { start: 10, end: 5 }));
    assert!(err.is_validation());
    assert!(err.to_string().contains("End KM cannot be less than Start KM"));
}

#[test]
fn test_end_zero_accepted_with_zero_distance() {
    let input = FormInput {
        start_km: 10,
        end_km: 0,
        ..valid_input()
    };

    let r = fleet_form().build(&input, TS.to_string()).unwrap();
    assert_eq!(r.distance, Some(0));
    assert_eq!(r.end_km, Some(0));
}

#[test]
fn test_blank_authorizer_and_location_rejected() {
    let input = FormInput {
        authorized_by: "   ".to_string(),
        location: String::new(),
        ..valid_input()
    };

    let err = fleet_form().build(&input, TS.to_string()).unwrap_err();
    assert_eq!(err.to_string(), "Please fill in Authorization and Location.");
}

#[test]
fn test_odometer_checked_before_presence() {
    let input = FormInput {
        start_km: 10,
        end_km: 5,
        location: String::new(),
        ..valid_input()
    };

    let err = fleet_form().build(&input, TS.to_string()).unwrap_err();
    assert!(matches!(err, AppError::OdometerRange { .. }));
}

#[test]
fn test_dispatch_requires_items_and_location() {
    let input = FormInput {
        items: String::new(),
        authorized_by: String::new(),
        ..valid_input()
    };

    let err = dispatch_form().build(&input, TS.to_string()).unwrap_err();
    assert_eq!(err.to_string(), "Please fill in Item Details.");
}

#[test]
fn test_dispatch_ignores_odometer_and_fleet_fields() {
    let input = FormInput {
        start_km: 10,
        end_km: 5,
        authorized_by: String::new(),
        ..valid_input()
    };

    let r = dispatch_form().build(&input, TS.to_string()).unwrap();
    assert_eq!(r.start_km, None);
    assert_eq!(r.distance, None);
    assert_eq!(r.driver, "");
    assert_eq!(r.location, "UNIT 2");
}

#[test]
fn test_unknown_vehicle_rejected() {
    let input = FormInput {
        vehicle: "Tata".to_string(),
        ..valid_input()
    };

    let err = fleet_form().build(&input, TS.to_string()).unwrap_err();
    assert!(matches!(err, AppError::InvalidChoice { field: "vehicle", .. }));
    assert!(err.to_string().contains("Ashok Leyland, Mahindra"));
}

#[test]
fn test_choices_match_case_insensitively() {
    let input = FormInput {
        vehicle: "ashok leyland".to_string(),
        purpose: "site delivery".to_string(),
        driver: None,
        ..valid_input()
    };

    let r = fleet_form().build(&input, TS.to_string()).unwrap();
    assert_eq!(r.vehicle, "Ashok Leyland");
    assert_eq!(r.purpose, "Site Delivery");
    assert_eq!(r.driver, "Brahmiah");
}

#[test]
fn test_negative_fuel_rejected() {
    let input = FormInput {
        fuel_ltrs: -1.5,
        ..valid_input()
    };

    let err = fleet_form().build(&input, TS.to_string()).unwrap_err();
    assert!(matches!(err, AppError::InvalidNumber { field: "fuel", .. }));
}

#[test]
fn test_invalid_photo_rejected() {
    let input = FormInput {
        photo: Some(b"definitely not an image".to_vec()),
        ..valid_input()
    };

    let err = fleet_form().build(&input, TS.to_string()).unwrap_err();
    assert!(matches!(err, AppError::Photo(_)));
    assert!(err.is_validation());
}

#[test]
fn test_distance_rule() {
    assert_eq!(distance(100, 150), 50);
    assert_eq!(distance(100, 0), 0);
    assert_eq!(distance(0, 0), 0);
    assert_eq!(distance(100, 100), 0);
}
