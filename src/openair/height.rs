use lazy_static::lazy_static;
use regex::Regex;

/// Numeric reading of an `AL`/`AH` limit.
///
/// `feet == 0` with non-empty source text means the height could not be
/// determined, not ground level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Height {
    pub feet: i32,
    pub agl: bool,
}

lazy_static! {
    static ref FLIGHT_LEVEL: Regex = Regex::new(r"(?i)FL").unwrap();
    static ref MEAN_SEA_LEVEL: Regex = Regex::new(r"(?i)MSL").unwrap();
    static ref ABOVE_GROUND: Regex = Regex::new(r"(?i)AGL").unwrap();
    // First digit through last digit, whatever lies between
    static ref DIGIT_RUN: Regex = Regex::new(r"[0-9](?:.*[0-9])?").unwrap();
}

// Ex: FL095, 1500ft MSL, 2000 ft AGL, ASK 122.8
pub fn parse_height(text: &str) -> Height {
    let digits = || {
        DIGIT_RUN
            .find(text)
            .and_then(|m| m.as_str().parse::<i32>().ok())
            .unwrap_or(0)
    };

    if FLIGHT_LEVEL.is_match(text) {
        Height {
            feet: digits().saturating_mul(100),
            agl: false,
        }
    } else if MEAN_SEA_LEVEL.is_match(text) {
        Height {
            feet: digits(),
            agl: false,
        }
    } else if ABOVE_GROUND.is_match(text) {
        Height {
            feet: digits(),
            agl: true,
        }
    } else {
        Height::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_level_is_hundreds_of_feet() {
        assert_eq!(parse_height("FL095"), Height { feet: 9500, agl: false });
        assert_eq!(parse_height("fl 65"), Height { feet: 6500, agl: false });
    }

    #[test]
    fn mean_sea_level() {
        assert_eq!(parse_height("1500ft MSL"), Height { feet: 1500, agl: false });
        assert_eq!(parse_height("4500 msl"), Height { feet: 4500, agl: false });
    }

    #[test]
    fn above_ground() {
        assert_eq!(parse_height("2000ft AGL"), Height { feet: 2000, agl: true });
    }

    #[test]
    fn flight_level_wins_over_agl() {
        assert_eq!(parse_height("FL 50 AGL"), Height { feet: 5000, agl: false });
    }

    #[test]
    fn unrecognised_text_is_unknown() {
        assert_eq!(parse_height("ASK 122.8"), Height::default());
        assert_eq!(parse_height("GND"), Height::default());
        assert_eq!(parse_height(""), Height::default());
    }

    #[test]
    fn broken_digit_run_is_zero() {
        // "1500 ft MSL 2" spans text between the digits
        assert_eq!(parse_height("1500 ft MSL 2"), Height { feet: 0, agl: false });
        assert_eq!(parse_height("MSL"), Height { feet: 0, agl: false });
    }
}
