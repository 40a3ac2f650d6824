use super::parse::ParserContext;
use crate::geo::Position;

/// A drawing primitive of an airspace boundary.
///
/// Center, direction and zoom are taken from the parser context at the time
/// the command was read, so later `V` assignments never touch earlier
/// entries.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// `DP`
    Polygon { point: Position, zoom: Option<f32> },
    /// `DA radius, start, end`
    Arc {
        center: Position,
        radius: f64,
        clockwise: bool,
        start_angle: f64,
        end_angle: f64,
        zoom: Option<f32>,
    },
    /// `DB start, end`
    ArcBetween {
        center: Position,
        start: Position,
        end: Position,
        clockwise: bool,
        zoom: Option<f32>,
    },
    /// `DC radius`
    Circle {
        center: Position,
        radius: f64,
        zoom: Option<f32>,
    },
}

impl Geometry {
    pub fn polygon(point: Position, ctx: &ParserContext) -> Self {
        Geometry::Polygon {
            point,
            zoom: ctx.zoom(),
        }
    }

    pub fn arc(radius: f64, start_angle: f64, end_angle: f64, ctx: &ParserContext) -> Self {
        Geometry::Arc {
            center: ctx.center(),
            radius,
            clockwise: ctx.clockwise(),
            start_angle,
            end_angle,
            zoom: ctx.zoom(),
        }
    }

    pub fn arc_between(start: Position, end: Position, ctx: &ParserContext) -> Self {
        Geometry::ArcBetween {
            center: ctx.center(),
            start,
            end,
            clockwise: ctx.clockwise(),
            zoom: ctx.zoom(),
        }
    }

    pub fn circle(radius: f64, ctx: &ParserContext) -> Self {
        Geometry::Circle {
            center: ctx.center(),
            radius,
            zoom: ctx.zoom(),
        }
    }

    pub fn zoom(&self) -> Option<f32> {
        match *self {
            Geometry::Polygon { zoom, .. }
            | Geometry::Arc { zoom, .. }
            | Geometry::ArcBetween { zoom, .. }
            | Geometry::Circle { zoom, .. } => zoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openair::ParseOptions;

    #[test]
    fn builders_snapshot_context() {
        let mut ctx = ParserContext::new(ParseOptions::default());
        ctx.set_center(Position::new(50.0, 14.0));
        ctx.set_clockwise(false);
        ctx.set_zoom(Some(2.5));

        let arc = Geometry::arc(5.0, 90.0, 180.0, &ctx);
        ctx.set_center(Position::new(51.0, 15.0));
        let circle = Geometry::circle(3.0, &ctx);

        assert_eq!(
            arc,
            Geometry::Arc {
                center: Position::new(50.0, 14.0),
                radius: 5.0,
                clockwise: false,
                start_angle: 90.0,
                end_angle: 180.0,
                zoom: Some(2.5),
            }
        );
        assert_eq!(
            circle,
            Geometry::Circle {
                center: Position::new(51.0, 15.0),
                radius: 3.0,
                zoom: Some(2.5),
            }
        );
    }

    #[test]
    fn polygon_without_zoom() {
        let ctx = ParserContext::new(ParseOptions::default());
        let vertex = Geometry::polygon(Position::new(1.0, 2.0), &ctx);
        assert_eq!(vertex.zoom(), None);
    }

    #[test]
    fn arc_between_uses_current_center() {
        let ctx = ParserContext::new(ParseOptions::default());
        let arc = Geometry::arc_between(Position::new(1.0, 2.0), Position::new(3.0, 4.0), &ctx);
        match arc {
            Geometry::ArcBetween {
                center, clockwise, ..
            } => {
                assert!(!center.valid);
                assert!(clockwise);
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }
}
