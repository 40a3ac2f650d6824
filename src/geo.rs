use custom_error::custom_error;

custom_error! {pub CoordinateError
    MissingHemisphere{text: String} = "N/S/E/W not found in '{text}'",
    Misordered{text: String} = "E/W marker precedes N/S marker in '{text}'",
    TooManyParts{part: String} = "more than two ':' separators in '{part}'",
    BadNumber{part: String} = "'{part}' is not a number"
}

/// A latitude/longitude pair in signed decimal degrees.
///
/// Positions that failed to parse are kept around with `valid == false` so
/// whatever geometry referenced them still lines up with the source file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
    pub valid: bool,
}

impl Position {
    pub fn new(lat: f64, lon: f64) -> Self {
        Position {
            lat,
            lon,
            valid: true,
        }
    }

    pub fn invalid() -> Self {
        Position::default()
    }

    //Ex: N050.05.00.000 E014.25.00.000
    pub fn to_vrc(self) -> String {
        fn to_dms(dd: f64) -> (i64, i64, f64) {
            let ms = (dd.abs() * 3_600_000.0).round() as i64;
            (ms / 3_600_000, (ms / 60_000) % 60, (ms % 60_000) as f64 / 1000.0)
        }

        if !self.valid {
            return "invalid".to_owned();
        }

        let mut tmp = String::new();
        tmp += if self.lat.is_sign_negative() { "S" } else { "N" };
        let (d, m, s) = to_dms(self.lat);
        tmp += &format!("{:03}.{:02}.{:06.03}", d, m, s);

        tmp += " ";

        tmp += if self.lon.is_sign_negative() { "W" } else { "E" };
        let (d, m, s) = to_dms(self.lon);
        tmp += &format!("{:03}.{:02}.{:06.03}", d, m, s);
        tmp
    }
}

// Ex: 50:05:00 N 014:25:00 E, 50:05.5N 14:25.5E, 50.0833N 14.4167E
pub fn try_parse_coordinate(text: &str) -> Result<Position, CoordinateError> {
    let ns = text.find(|c: char| matches!(c, 'N' | 'S' | 'n' | 's'));
    let ew = text.find(|c: char| matches!(c, 'E' | 'W' | 'e' | 'w'));

    let (ns, ew) = match (ns, ew) {
        (Some(ns), Some(ew)) => (ns, ew),
        _ => {
            return Err(CoordinateError::MissingHemisphere {
                text: text.to_owned(),
            })
        }
    };
    if ew < ns {
        return Err(CoordinateError::Misordered {
            text: text.to_owned(),
        });
    }

    // Markers are ASCII so ns + 1 stays on a char boundary
    let mut lat = to_degrees(&text[..ns])?;
    let mut lon = to_degrees(&text[ns + 1..ew])?;
    if text[ns..].starts_with(|c: char| c == 'S' || c == 's') {
        lat = -lat;
    }
    if text[ew..].starts_with(|c: char| c == 'W' || c == 'w') {
        lon = -lon;
    }

    Ok(Position::new(lat, lon))
}

fn to_degrees(magnitude: &str) -> Result<f64, CoordinateError> {
    if magnitude.matches(':').count() > 2 {
        return Err(CoordinateError::TooManyParts {
            part: magnitude.trim().to_owned(),
        });
    }

    let parts = magnitude
        .split(':')
        .map(|part| {
            part.trim().parse::<f64>().map_err(|_| CoordinateError::BadNumber {
                part: part.trim().to_owned(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // d + (m + s / 60) / 60, innermost group first
    Ok(parts.iter().rev().fold(0.0, |acc, part| part + acc / 60.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn degrees_and_minutes() {
        let pos = try_parse_coordinate("50:05N 014:25E").unwrap();
        assert!(pos.valid);
        assert!(close(pos.lat, 50.0833));
        assert!(close(pos.lon, 14.4167));
    }

    #[test]
    fn degrees_minutes_seconds_with_spaces() {
        let pos = try_parse_coordinate("50:05:30 N 014:25:45 E").unwrap();
        assert!(close(pos.lat, 50.0 + 5.0 / 60.0 + 30.0 / 3600.0));
        assert!(close(pos.lon, 14.0 + 25.0 / 60.0 + 45.0 / 3600.0));
    }

    #[test]
    fn decimal_degrees() {
        let pos = try_parse_coordinate("50.087811N 14.42046E").unwrap();
        assert!(close(pos.lat, 50.087811));
        assert!(close(pos.lon, 14.42046));
    }

    #[test]
    fn southern_and_western_hemispheres_are_negative() {
        let pos = try_parse_coordinate("33:30:00 s 070:40:00 w").unwrap();
        assert!(close(pos.lat, -33.5));
        assert!(close(pos.lon, -70.6667));
    }

    #[test]
    fn missing_hemisphere_is_invalid() {
        for text in &["50:05 014:25E", "50:05N 014:25", "", "garbage"] {
            assert!(try_parse_coordinate(text).is_err(), "{}", text);
            assert!(!try_parse_coordinate(text).unwrap_or_default().valid);
        }
    }

    #[test]
    fn swapped_order_is_invalid() {
        let err = try_parse_coordinate("14.42046E 50.087811N").unwrap_err();
        assert!(matches!(err, CoordinateError::Misordered { .. }));
        assert!(!try_parse_coordinate("14.42046E 50.087811N").unwrap_or_default().valid);
    }

    #[test]
    fn too_many_colons_is_invalid() {
        let err = try_parse_coordinate("50:05:00:01N 014:25E").unwrap_err();
        assert!(matches!(err, CoordinateError::TooManyParts { .. }));
    }

    #[test]
    fn non_numeric_component_is_invalid() {
        let err = try_parse_coordinate("5O:05N 014:25E").unwrap_err();
        assert!(matches!(err, CoordinateError::BadNumber { .. }));
    }

    #[test]
    fn latitude_is_not_range_checked() {
        let pos = try_parse_coordinate("95:00N 200:00E").unwrap();
        assert!(pos.valid);
        assert!(close(pos.lat, 95.0));
        assert!(close(pos.lon, 200.0));
    }

    #[test]
    fn vrc_format() {
        assert_eq!(
            try_parse_coordinate("50:05N 014:25W").unwrap().to_vrc(),
            "N050.05.00.000 W014.25.00.000"
        );
        assert_eq!(Position::invalid().to_vrc(), "invalid");
    }
}
