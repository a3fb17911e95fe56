//! Smoothed route outline through projected waypoints. Purely cosmetic.

use super::bounds::ScreenPoint;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(ScreenPoint),
    CubicTo {
        c1: ScreenPoint,
        c2: ScreenPoint,
        to: ScreenPoint,
    },
    LineTo(ScreenPoint),
}

/// Curves into every interior waypoint and draws a straight final segment.
/// Fewer than two points produce no path.
pub fn smooth_path(points: &[ScreenPoint]) -> Vec<PathCommand> {
    if points.len() < 2 {
        return Vec::new();
    }
    let mut commands = Vec::with_capacity(points.len());
    commands.push(PathCommand::MoveTo(points[0]));
    for i in 1..points.len() {
        let prev = points[i - 1];
        let curr = points[i];
        match points.get(i + 1) {
            Some(next) => commands.push(PathCommand::CubicTo {
                c1: ScreenPoint {
                    x: prev.x + (curr.x - prev.x) * 0.5,
                    y: prev.y,
                },
                c2: ScreenPoint {
                    x: curr.x - (next.x - curr.x) * 0.5,
                    y: curr.y,
                },
                to: curr,
            }),
            None => commands.push(PathCommand::LineTo(curr)),
        }
    }
    commands
}

/// Renders commands as SVG path data, e.g. `M 5 95 C 10 95, 20 50, 25 50 L 95 5`.
pub fn to_svg(commands: &[PathCommand]) -> String {
    let mut out = String::new();
    for (i, command) in commands.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // Writing to a String cannot fail.
        let _ = match command {
            PathCommand::MoveTo(p) => write!(out, "M {} {}", p.x, p.y),
            PathCommand::CubicTo { c1, c2, to } => write!(
                out,
                "C {} {}, {} {}, {} {}",
                c1.x, c1.y, c2.x, c2.y, to.x, to.y
            ),
            PathCommand::LineTo(p) => write!(out, "L {} {}", p.x, p.y),
        };
    }
    out
}
