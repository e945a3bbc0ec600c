//! Feature vector construction
//!
//! Turns a validated forecast request plus store profile into the
//! 17-column numeric record the regression model was trained on. Column
//! order is fixed by [`FEATURE_NAMES`]; the model artifact is checked
//! against it at load time, so a mismatch between training and serving
//! columns fails loudly instead of silently scoring garbage.

use crate::encoders::EncoderSet;
use crate::error::{Error, Result};
use crate::stores::StoreProfile;
use chrono::{Datelike, NaiveDate};

/// Model input columns, in training order
pub const FEATURE_NAMES: [&str; 17] = [
    "store_nbr",
    "family",
    "onpromotion",
    "type",
    "cluster",
    "dcoilwtico",
    "month",
    "day_of_month",
    "day_of_week",
    "day_of_year",
    "quarter",
    "is_weekend",
    "is_payday",
    "is_post_payday",
    "is_holiday_or_event",
    "city",
    "state",
];

/// Crude oil price (USD/barrel) assumed for every forecast
///
/// The training data carried a daily oil price; at serving time a flat
/// mid-range value stands in for it.
pub const OIL_PRICE_USD: f64 = 50.0;

/// Date format accepted in forecast requests
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a request date string (`YYYY-MM-DD`)
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| Error::MalformedInput(format!("Invalid date '{}', expected YYYY-MM-DD", date)))
}

/// Map a promotion status to its numeric promotion level
///
/// Unrecognized statuses are treated as no promotion.
pub fn promotion_level(status: &str) -> f64 {
    match status {
        "none" => 0.0,
        "standard" => 10.0,
        "high" => 50.0,
        _ => 0.0,
    }
}

/// Calendar-derived feature values for one date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarFeatures {
    pub month: u32,
    pub day_of_month: u32,
    /// Monday = 0 .. Sunday = 6
    pub day_of_week: u32,
    /// 1-based ordinal day
    pub day_of_year: u32,
    pub quarter: u32,
    pub is_weekend: bool,
    /// Mid-month and end-of-month salary days (15th, 30th, 31st)
    pub is_payday: bool,
    /// Days right after a salary day (1st, 16th)
    pub is_post_payday: bool,
}

/// Derive the calendar features for a date
pub fn calendar_features(date: NaiveDate) -> CalendarFeatures {
    let day = date.day();
    let day_of_week = date.weekday().num_days_from_monday();
    CalendarFeatures {
        month: date.month(),
        day_of_month: day,
        day_of_week,
        day_of_year: date.ordinal(),
        quarter: (date.month() - 1) / 3 + 1,
        is_weekend: day_of_week >= 5,
        is_payday: matches!(day, 15 | 30 | 31),
        is_post_payday: matches!(day, 1 | 16),
    }
}

/// One model input record, a value per training column
///
/// `store_type` carries the column the artifact calls `type`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub store_nbr: f64,
    pub family: f64,
    pub onpromotion: f64,
    pub store_type: f64,
    pub cluster: f64,
    pub dcoilwtico: f64,
    pub month: f64,
    pub day_of_month: f64,
    pub day_of_week: f64,
    pub day_of_year: f64,
    pub quarter: f64,
    pub is_weekend: f64,
    pub is_payday: f64,
    pub is_post_payday: f64,
    pub is_holiday_or_event: f64,
    pub city: f64,
    pub state: f64,
}

impl FeatureVector {
    /// Values in [`FEATURE_NAMES`] order, the layout the model scores
    pub fn as_array(&self) -> [f64; 17] {
        [
            self.store_nbr,
            self.family,
            self.onpromotion,
            self.store_type,
            self.cluster,
            self.dcoilwtico,
            self.month,
            self.day_of_month,
            self.day_of_week,
            self.day_of_year,
            self.quarter,
            self.is_weekend,
            self.is_payday,
            self.is_post_payday,
            self.is_holiday_or_event,
            self.city,
            self.state,
        ]
    }
}

/// Build the feature vector for one forecast request
///
/// # Arguments
/// * `date` - Parsed forecast date
/// * `family` - Product family (must be a known encoder class)
/// * `promotion_status` - Promotion status literal from the request
/// * `store` - Store profile resolved for the request city
/// * `encoders` - Fitted label encoders
///
/// # Errors
/// Returns [`Error::MalformedInput`] if the family is not a known class.
/// The city is encoded forgivingly and never fails; the mismatch in
/// strictness is deliberate (the city dropdown is wider than the training
/// vocabulary, the family dropdown is not).
pub fn build_features(
    date: NaiveDate,
    family: &str,
    promotion_status: &str,
    store: &StoreProfile,
    encoders: &EncoderSet,
) -> Result<FeatureVector> {
    let family_code = encoders
        .family
        .encode(family)
        .ok_or_else(|| Error::MalformedInput(format!("Unknown product family: {}", family)))?;
    let city_code = encoders.city.encode_or_first(&store.city);
    let type_code = encoders.store_type.encode_or_first(&store.store_type);
    let cal = calendar_features(date);

    Ok(FeatureVector {
        store_nbr: store.store_nbr as f64,
        family: family_code as f64,
        onpromotion: promotion_level(promotion_status),
        store_type: type_code as f64,
        cluster: store.cluster as f64,
        dcoilwtico: OIL_PRICE_USD,
        month: cal.month as f64,
        day_of_month: cal.day_of_month as f64,
        day_of_week: cal.day_of_week as f64,
        day_of_year: cal.day_of_year as f64,
        quarter: cal.quarter as f64,
        is_weekend: cal.is_weekend as u8 as f64,
        is_payday: cal.is_payday as u8 as f64,
        is_post_payday: cal.is_post_payday as u8 as f64,
        // no holiday calendar at serving time; the column stays because
        // the model was trained with it
        is_holiday_or_event: 0.0,
        city: city_code as f64,
        // training data had no separate state source, so state mirrors
        // the city code
        state: city_code as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoders::DEFAULT_ENCODERS_JSON;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn lagos_store() -> StoreProfile {
        StoreProfile {
            store_nbr: 7,
            city: "Lagos".to_string(),
            store_type: "D".to_string(),
            cluster: 8,
        }
    }

    #[test]
    fn test_parse_date_accepts_iso_format() {
        assert_eq!(
            date("2017-08-16"),
            NaiveDate::from_ymd_opt(2017, 8, 16).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert!(parse_date("16-08-2017").is_err());
        assert!(parse_date("2017/08/16").is_err());
        assert!(parse_date("not a date").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_date_rejects_impossible_dates() {
        assert!(parse_date("2017-02-30").is_err());
        assert!(parse_date("2017-13-01").is_err());
        // leap day is fine in a leap year only
        assert!(parse_date("2020-02-29").is_ok());
        assert!(parse_date("2019-02-29").is_err());
    }

    #[test]
    fn test_calendar_features_midweek_post_payday() {
        // Wednesday 2017-08-16
        let cal = calendar_features(date("2017-08-16"));
        assert_eq!(cal.month, 8);
        assert_eq!(cal.day_of_month, 16);
        assert_eq!(cal.day_of_week, 2);
        assert_eq!(cal.day_of_year, 228);
        assert_eq!(cal.quarter, 3);
        assert!(!cal.is_weekend);
        assert!(!cal.is_payday);
        assert!(cal.is_post_payday);
    }

    #[test]
    fn test_calendar_features_weekend_payday() {
        // Saturday 2017-12-30
        let cal = calendar_features(date("2017-12-30"));
        assert_eq!(cal.day_of_week, 5);
        assert_eq!(cal.day_of_year, 364);
        assert_eq!(cal.quarter, 4);
        assert!(cal.is_weekend);
        assert!(cal.is_payday);
        assert!(!cal.is_post_payday);
    }

    #[test]
    fn test_calendar_features_first_of_month() {
        // Sunday 2017-01-01
        let cal = calendar_features(date("2017-01-01"));
        assert_eq!(cal.day_of_week, 6);
        assert_eq!(cal.day_of_year, 1);
        assert_eq!(cal.quarter, 1);
        assert!(cal.is_weekend);
        assert!(!cal.is_payday);
        assert!(cal.is_post_payday);
    }

    #[test]
    fn test_calendar_features_leap_year_ordinal() {
        // 2020-03-01 is day 61 in a leap year
        let cal = calendar_features(date("2020-03-01"));
        assert_eq!(cal.day_of_year, 61);
        assert!(cal.is_post_payday);
    }

    #[test]
    fn test_promotion_levels() {
        assert_eq!(promotion_level("none"), 0.0);
        assert_eq!(promotion_level("standard"), 10.0);
        assert_eq!(promotion_level("high"), 50.0);
        // anything else silently means no promotion
        assert_eq!(promotion_level("mega"), 0.0);
        assert_eq!(promotion_level(""), 0.0);
        assert_eq!(promotion_level("None"), 0.0);
    }

    #[test]
    fn test_feature_vector_contents() {
        let encoders = EncoderSet::from_json(DEFAULT_ENCODERS_JSON).unwrap();
        let features =
            build_features(date("2017-08-16"), "GROCERY I", "high", &lagos_store(), &encoders)
                .unwrap();

        assert_eq!(features.store_nbr, 7.0);
        assert_eq!(features.family, 12.0); // GROCERY I
        assert_eq!(features.onpromotion, 50.0); // high promotion
        assert_eq!(features.store_type, 3.0); // type D
        assert_eq!(features.cluster, 8.0);
        assert_eq!(features.dcoilwtico, OIL_PRICE_USD);
        assert_eq!(features.month, 8.0);
        assert_eq!(features.day_of_month, 16.0);
        assert_eq!(features.day_of_week, 2.0); // Wednesday
        assert_eq!(features.day_of_year, 228.0);
        assert_eq!(features.quarter, 3.0);
        assert_eq!(features.is_weekend, 0.0);
        assert_eq!(features.is_payday, 0.0);
        assert_eq!(features.is_post_payday, 1.0);
        assert_eq!(features.is_holiday_or_event, 0.0); // never computed
        assert_eq!(features.city, 18.0); // Lagos
        assert_eq!(features.state, 18.0); // state mirrors city
    }

    #[test]
    fn test_as_array_matches_training_column_order() {
        let encoders = EncoderSet::from_json(DEFAULT_ENCODERS_JSON).unwrap();
        let features =
            build_features(date("2017-08-16"), "GROCERY I", "high", &lagos_store(), &encoders)
                .unwrap();
        let array = features.as_array();

        assert_eq!(array.len(), FEATURE_NAMES.len());
        assert_eq!(array[0], features.store_nbr);
        assert_eq!(array[2], features.onpromotion);
        assert_eq!(array[3], features.store_type);
        assert_eq!(array[5], features.dcoilwtico);
        assert_eq!(array[15], features.city);
        assert_eq!(array[16], features.state);
    }

    #[test]
    fn test_unknown_family_is_rejected() {
        let encoders = EncoderSet::from_json(DEFAULT_ENCODERS_JSON).unwrap();
        let result =
            build_features(date("2017-08-16"), "GADGETS", "none", &lagos_store(), &encoders);
        assert!(matches!(result, Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_unknown_city_encodes_as_first_class() {
        let encoders = EncoderSet::from_json(DEFAULT_ENCODERS_JSON).unwrap();
        // Zamfara has no encoder class; profile carries the raw city name
        let store = StoreProfile {
            store_nbr: 1,
            city: "Zamfara".to_string(),
            store_type: "D".to_string(),
            cluster: 1,
        };
        let features =
            build_features(date("2017-08-16"), "EGGS", "none", &store, &encoders).unwrap();
        assert_eq!(features.city, 0.0);
        assert_eq!(features.state, 0.0);
    }
}
