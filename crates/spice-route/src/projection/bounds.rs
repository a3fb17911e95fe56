use crate::model::Coordinate;
use serde::Serialize;

/// A position on the map canvas, in percent of width (`x`) and height (`y`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const CENTER: ScreenPoint = ScreenPoint { x: 50.0, y: 50.0 };
}

/// A padded lat/lng rectangle enclosing every coordinate on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl MapBounds {
    /// `None` when `points` is empty.
    pub fn enclosing(points: &[Coordinate], padding: f64) -> Option<MapBounds> {
        let first = points.first()?;
        let seed = MapBounds {
            north: first.lat,
            south: first.lat,
            east: first.lng,
            west: first.lng,
        };
        let tight = points.iter().fold(seed, |b, p| MapBounds {
            north: b.north.max(p.lat),
            south: b.south.min(p.lat),
            east: b.east.max(p.lng),
            west: b.west.min(p.lng),
        });
        Some(MapBounds {
            north: tight.north + padding,
            south: tight.south - padding,
            east: tight.east + padding,
            west: tight.west - padding,
        })
    }

    pub fn contains(&self, c: &Coordinate) -> bool {
        (self.south..=self.north).contains(&c.lat) && (self.west..=self.east).contains(&c.lng)
    }

    /// Linear projection into `[0, 100]²` (north up), clamped to `[inset_min, inset_max]`.
    /// An axis with no extent maps to the centre. An inverted inset never panics; the
    /// upper edge wins.
    pub fn project(&self, c: &Coordinate, inset_min: f64, inset_max: f64) -> ScreenPoint {
        let width = self.east - self.west;
        let height = self.north - self.south;
        let x = if width > 0.0 {
            (c.lng - self.west) / width * 100.0
        } else {
            ScreenPoint::CENTER.x
        };
        let y = if height > 0.0 {
            (self.north - c.lat) / height * 100.0
        } else {
            ScreenPoint::CENTER.y
        };
        ScreenPoint {
            x: x.max(inset_min).min(inset_max),
            y: y.max(inset_min).min(inset_max),
        }
    }
}
