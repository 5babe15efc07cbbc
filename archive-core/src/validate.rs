use thiserror::Error;

use crate::model::{ArchiveQuery, Field, QueryInput};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{0}' is empty")]
    MissingField(Field),

    #[error("Field '{field}' must look like YYYY-MM-DD, got '{value}'")]
    InvalidDate { field: Field, value: String },

    #[error("Field '{field}' is not a number: '{value}'")]
    InvalidCoordinate { field: Field, value: String },

    #[error("Field '{field}' is out of range: {value}")]
    CoordinateOutOfRange { field: Field, value: f64 },
}

/// Pattern check for `YYYY-MM-DD`. The calendar is not consulted, so
/// `2023-13-40` is accepted.
pub fn is_valid_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// The validation gate run before any request is sent.
pub fn validate(input: &QueryInput) -> Result<ArchiveQuery, ValidationError> {
    for field in Field::all() {
        if input.get(*field).is_empty() {
            return Err(ValidationError::MissingField(*field));
        }
    }

    for field in [Field::StartDate, Field::EndDate] {
        let value = input.get(field);
        if !is_valid_date(value) {
            return Err(ValidationError::InvalidDate { field, value: value.to_string() });
        }
    }

    Ok(ArchiveQuery {
        latitude: parse_coordinate(Field::Latitude, &input.latitude, 90.0)?,
        longitude: parse_coordinate(Field::Longitude, &input.longitude, 180.0)?,
        start_date: input.start_date.clone(),
        end_date: input.end_date.clone(),
    })
}

fn parse_coordinate(field: Field, raw: &str, limit: f64) -> Result<f64, ValidationError> {
    let value: f64 = raw
        .trim()
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| ValidationError::InvalidCoordinate { field, value: raw.to_string() })?;

    if value.abs() > limit {
        return Err(ValidationError::CoordinateOutOfRange { field, value });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(lat: &str, lon: &str, start: &str, end: &str) -> QueryInput {
        QueryInput {
            latitude: lat.into(),
            longitude: lon.into(),
            start_date: start.into(),
            end_date: end.into(),
        }
    }

    #[test]
    fn date_pattern() {
        assert!(is_valid_date("2023-05-01"));
        assert!(!is_valid_date("2023-5-1"));
        assert!(!is_valid_date(""));
        assert!(!is_valid_date("2023/05/01"));
        assert!(!is_valid_date("2023-05-01 "));
        assert!(!is_valid_date("２０２３-05-01"));
    }

    #[test]
    fn date_pattern_ignores_calendar() {
        assert!(is_valid_date("2023-13-40"));
        assert!(is_valid_date("0000-00-00"));
    }

    #[test]
    fn each_empty_field_is_reported() {
        for field in Field::all() {
            let mut raw = input("52.5", "13.4", "2023-05-01", "2023-05-02");
            raw.set(*field, String::new());

            assert_eq!(validate(&raw).unwrap_err(), ValidationError::MissingField(*field));
        }
    }

    #[test]
    fn bad_end_date_is_reported() {
        let err = validate(&input("52.5", "13.4", "2023-05-01", "tomorrow")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDate { field: Field::EndDate, value: "tomorrow".into() }
        );
    }

    #[test]
    fn non_numeric_coordinates_are_rejected() {
        for bad in ["north", "NaN", "inf", "12,5"] {
            let err = validate(&input(bad, "13.4", "2023-05-01", "2023-05-02")).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidCoordinate { field: Field::Latitude, .. }),
                "{bad} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let err = validate(&input("52.5", "181", "2023-05-01", "2023-05-02")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::CoordinateOutOfRange { field: Field::Longitude, value: 181.0 }
        );
    }

    #[test]
    fn valid_input_becomes_query() {
        let query = validate(&input(" 52.52 ", "-13.41", "2023-05-01", "2023-13-40")).unwrap();

        assert_eq!(query.latitude, 52.52);
        assert_eq!(query.longitude, -13.41);
        assert_eq!(query.start_date, "2023-05-01");
        assert_eq!(query.end_date, "2023-13-40");
    }
}
