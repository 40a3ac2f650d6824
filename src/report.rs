use crate::error::{Error, Result};
use crate::openair::{Airspace, Diagnostic, Geometry, Height, ParserContext};
use itertools::Itertools;

static RECORD_SEPERATOR: &str =
    "\n;===============================================================================\n\n";

/// Drops records whose raw class token is not in `classes` (an empty list
/// keeps everything). With `strict`, any warning diagnostic fails the run.
pub fn select(
    mut airspaces: Vec<Airspace>,
    ctx: &ParserContext,
    classes: &[String],
    strict: bool,
) -> Result<Vec<Airspace>> {
    if strict {
        let count = ctx.warning_count();
        if count > 0 {
            return Err(Error::Strict { count });
        }
    }

    if !classes.is_empty() {
        airspaces.retain(|a| classes.iter().any(|c| *c == a.class_text));
    }
    Ok(airspaces)
}

/// Plain-text dump of parsed records, one block per airspace, with
/// coordinates in VRC notation.
pub fn listing(airspaces: &[Airspace], diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();

    for a in airspaces {
        out += RECORD_SEPERATOR;
        out += &format!(
            "[{}] {}\n",
            a.class_text,
            a.name.as_deref().unwrap_or("(unnamed)")
        );
        out += &format!("AL {}\n", describe_limit(a.floor.as_deref(), a.floor_height()));
        out += &format!("AH {}\n", describe_limit(a.ceiling.as_deref(), a.ceiling_height()));

        if let Some(pen) = a.pen {
            out += &format!(
                "SP {},{},{},{},{}\n",
                pen.style, pen.width, pen.r, pen.g, pen.b
            );
        }
        if let Some(brush) = a.brush {
            out += &format!("SB {},{},{}\n", brush.r, brush.g, brush.b);
        }
        if let Some(ref terrain) = a.terrain_open {
            out += &format!("TO {}\n", terrain);
        }
        if let Some(ref terrain) = a.terrain_closed {
            out += &format!("TC {}\n", terrain);
        }
        for label in &a.labels {
            out += &format!("AT {}\n", label.to_vrc());
        }

        for g in &a.geometry {
            out += &describe_geometry(g);
            out += "\n";
        }

        if a.is_airway() || !a.airway.is_empty() {
            if let Some(width) = a.airway_width {
                out += &format!("W {}\n", width);
            }
            out += &format!(
                "DY {}\n",
                a.airway.iter().map(|p| p.to_vrc()).join(" -> ")
            );
        }
    }

    let warnings = diagnostics
        .iter()
        .filter(|d| d.kind.level() == log::Level::Warn)
        .collect_vec();
    if !warnings.is_empty() {
        out += RECORD_SEPERATOR;
        out += "[DIAGNOSTICS]\n";
        for d in warnings {
            out += &format!("{}\n", d);
        }
    }

    out
}

fn describe_limit(text: Option<&str>, height: Height) -> String {
    match text {
        None => "(none)".to_owned(),
        Some(text) if height.feet == 0 => format!("{} (unknown)", text),
        Some(text) => format!(
            "{} ({} ft {})",
            text,
            height.feet,
            if height.agl { "AGL" } else { "MSL" }
        ),
    }
}

fn direction(clockwise: bool) -> &'static str {
    if clockwise {
        "cw"
    } else {
        "ccw"
    }
}

fn describe_geometry(g: &Geometry) -> String {
    let mut line = match g {
        Geometry::Polygon { point, .. } => format!("DP {}", point.to_vrc()),
        Geometry::Arc {
            center,
            radius,
            clockwise,
            start_angle,
            end_angle,
            ..
        } => format!(
            "DA {} r={} {}..{} {}",
            center.to_vrc(),
            radius,
            start_angle,
            end_angle,
            direction(*clockwise)
        ),
        Geometry::ArcBetween {
            center,
            start,
            end,
            clockwise,
            ..
        } => format!(
            "DB {} {} -> {} {}",
            center.to_vrc(),
            start.to_vrc(),
            end.to_vrc(),
            direction(*clockwise)
        ),
        Geometry::Circle { center, radius, .. } => format!("DC {} r={}", center.to_vrc(), radius),
    };
    if let Some(zoom) = g.zoom() {
        line += &format!(" Z={}", zoom);
    }
    line
}
