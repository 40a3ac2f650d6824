use derive_builder::Builder;

use crate::geo::Position;

pub mod geometry;
pub mod height;
pub mod parse;

pub use geometry::Geometry;
pub use height::{parse_height, Height};
pub use parse::{Diagnostic, OpenAirStream, ParseOptions, ParserContext};

// Variants spell the OpenAir class tokens
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AirspaceClass {
    R,
    Q,
    P,
    A,
    B,
    C,
    D,
    E,
    GP,
    CTR,
    W,
    #[default]
    NotApplicable,
}

impl AirspaceClass {
    pub fn from_token(token: &str) -> Self {
        match token {
            "R" => AirspaceClass::R,
            "Q" => AirspaceClass::Q,
            "P" => AirspaceClass::P,
            "A" => AirspaceClass::A,
            "B" => AirspaceClass::B,
            "C" => AirspaceClass::C,
            "D" => AirspaceClass::D,
            "E" => AirspaceClass::E,
            "GP" => AirspaceClass::GP,
            "CTR" => AirspaceClass::CTR,
            "W" => AirspaceClass::W,
            _ => AirspaceClass::NotApplicable,
        }
    }
}

/// `SP style, width, R, G, B`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pen {
    pub style: i32,
    pub width: i32,
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

/// `SB R, G, B`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Brush {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

/// One OpenAir record, from its `AC` line up to the next one.
///
/// Floor and ceiling are kept as written ("ASK 122.8" is legal); use
/// [`Airspace::parse_height`] for the numeric reading.
#[derive(Clone, Debug, Default, Builder)]
#[builder(private)]
pub struct Airspace {
    pub class: AirspaceClass,
    #[builder(setter(into))]
    pub class_text: String,
    #[builder(default, setter(into, strip_option))]
    pub name: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub floor: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub ceiling: Option<String>,
    #[builder(default)]
    pub labels: Vec<Position>,
    #[builder(default, setter(into, strip_option))]
    pub terrain_open: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub terrain_closed: Option<String>,
    #[builder(default, setter(strip_option))]
    pub pen: Option<Pen>,
    #[builder(default, setter(strip_option))]
    pub brush: Option<Brush>,
    #[builder(default)]
    pub geometry: Vec<Geometry>,
    #[builder(default)]
    pub airway: Vec<Position>,
    #[builder(default, setter(strip_option))]
    pub airway_width: Option<f64>,
}

impl Airspace {
    /// Numeric reading of the floor (`floor == true`) or ceiling text.
    pub fn parse_height(&self, floor: bool) -> Height {
        let text = if floor { &self.floor } else { &self.ceiling };
        text.as_deref().map(parse_height).unwrap_or_default()
    }

    pub fn floor_height(&self) -> Height {
        self.parse_height(true)
    }

    pub fn ceiling_height(&self) -> Height {
        self.parse_height(false)
    }

    pub fn is_airway(&self) -> bool {
        self.class == AirspaceClass::W
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_lookup_is_exact() {
        assert_eq!(AirspaceClass::from_token("CTR"), AirspaceClass::CTR);
        assert_eq!(AirspaceClass::from_token("GP"), AirspaceClass::GP);
        assert_eq!(AirspaceClass::from_token("ctr"), AirspaceClass::NotApplicable);
        assert_eq!(AirspaceClass::from_token("TMZ"), AirspaceClass::NotApplicable);
        assert_eq!(AirspaceClass::from_token(""), AirspaceClass::NotApplicable);
    }

    #[test]
    fn heights_read_stored_text() {
        let airspace = Airspace {
            floor: Some("2000ft AGL".to_owned()),
            ceiling: Some("FL095".to_owned()),
            ..Airspace::default()
        };
        assert_eq!(airspace.floor_height(), Height { feet: 2000, agl: true });
        assert_eq!(airspace.ceiling_height(), Height { feet: 9500, agl: false });
        // No mutation between calls
        assert_eq!(airspace.parse_height(false), airspace.parse_height(false));
        assert_eq!(airspace.floor.as_deref(), Some("2000ft AGL"));
    }

    #[test]
    fn absent_height_is_zero() {
        let airspace = Airspace::default();
        assert_eq!(airspace.floor_height(), Height::default());
        assert_eq!(airspace.ceiling_height(), Height { feet: 0, agl: false });
    }

    #[test]
    fn builder_requires_class() {
        let mut record = AirspaceBuilder::default();
        record.name("Nameless");
        assert!(record.build().is_err());

        record.class(AirspaceClass::R).class_text("R");
        let airspace = record.build().unwrap();
        assert_eq!(airspace.name.as_deref(), Some("Nameless"));
        assert!(airspace.geometry.is_empty());
    }
}
