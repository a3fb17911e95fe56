//! # Map projection
//!
//! Lays out the restaurant, destination, driver and route on a normalized canvas:
//! a padded bounding box around every coordinate, a linear projection into
//! `[0, 100]²` clamped to an inset, and a smoothed route outline.
//!
//! [`MapProjector`] keeps the last layout and only recomputes when the set of input
//! coordinates changes, so redrawing an unchanged tracking view is free.

pub mod bounds;
pub mod path;

pub use bounds::{MapBounds, ScreenPoint};
pub use path::{smooth_path, to_svg, PathCommand};

use crate::model::Coordinate;
use crate::tracking::TrackingState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Degrees added on every side of the tight bounding box.
    pub padding: f64,
    pub inset_min: f64,
    pub inset_max: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            padding: 0.005,
            inset_min: 5.0,
            inset_max: 95.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLayout {
    pub bounds: MapBounds,
    pub restaurant: ScreenPoint,
    pub destination: ScreenPoint,
    pub driver: ScreenPoint,
    pub route: Vec<ScreenPoint>,
    pub route_path: String,
}

/// The coordinates a layout depends on.
#[derive(Debug, Clone, PartialEq)]
struct LayoutInput {
    restaurant: Coordinate,
    destination: Coordinate,
    driver: Coordinate,
    route: Vec<Coordinate>,
}

impl LayoutInput {
    fn of(state: &TrackingState) -> Self {
        Self {
            restaurant: state.origin,
            destination: state.destination,
            driver: state.current_position,
            route: state.route.clone(),
        }
    }

    fn all(&self) -> Vec<Coordinate> {
        let mut all = vec![self.restaurant, self.destination, self.driver];
        all.extend_from_slice(&self.route);
        all
    }
}

/// Computes a layout from scratch.
pub fn layout(
    restaurant: Coordinate,
    destination: Coordinate,
    driver: Coordinate,
    route: &[Coordinate],
    config: &MapConfig,
) -> MapLayout {
    let input = LayoutInput {
        restaurant,
        destination,
        driver,
        route: route.to_vec(),
    };
    compute(&input, config)
}

fn compute(input: &LayoutInput, config: &MapConfig) -> MapLayout {
    let all = input.all();
    // `all` always holds at least the three fixed markers.
    let bounds = MapBounds::enclosing(&all, config.padding).unwrap_or(MapBounds {
        north: input.restaurant.lat,
        south: input.restaurant.lat,
        east: input.restaurant.lng,
        west: input.restaurant.lng,
    });
    let project = |c: &Coordinate| bounds.project(c, config.inset_min, config.inset_max);
    let route: Vec<ScreenPoint> = input.route.iter().map(project).collect();
    let route_path = to_svg(&smooth_path(&route));
    MapLayout {
        bounds,
        restaurant: project(&input.restaurant),
        destination: project(&input.destination),
        driver: project(&input.driver),
        route,
        route_path,
    }
}

/// Caches the layout of the most recent tracking view.
#[derive(Debug, Default)]
pub struct MapProjector {
    config: MapConfig,
    cached: Option<(LayoutInput, MapLayout)>,
    computed: usize,
}

impl MapProjector {
    pub fn new(config: MapConfig) -> Self {
        Self {
            config,
            cached: None,
            computed: 0,
        }
    }

    pub fn layout(&mut self, state: &TrackingState) -> &MapLayout {
        let input = LayoutInput::of(state);
        let stale = self
            .cached
            .as_ref()
            .is_none_or(|(previous, _)| *previous != input);
        if stale {
            self.cached = None;
        }
        let config = &self.config;
        let computed = &mut self.computed;
        let (_, layout) = self.cached.get_or_insert_with(move || {
            *computed += 1;
            let layout = compute(&input, config);
            (input, layout)
        });
        layout
    }

    /// How many times a layout was actually computed.
    pub fn computations(&self) -> usize {
        self.computed
    }
}
