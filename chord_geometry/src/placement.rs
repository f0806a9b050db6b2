// Placement of the labels and gradients of a chord diagram.

use log::debug;

use crate::{
    bearing_to_anchor, bearing_to_coord, compute_chord_info, Coordinate, Subgroup, TextAnchor,
};

/// Name of the pseudo-candidate that collects exhausted ballots.
pub const EXHAUSTED: &str = "Exhausted";

const RING_WIDTH: f64 = 20.0;
const VALUE_LABEL_INSET: f64 = 30.0;
const GROUP_LABEL_GAP: f64 = 10.0;
const GROUP_LABEL_VERTICAL_GAP: f64 = 20.0;

/// The two radii of a chord diagram: ribbons end on the inner one, the
/// group arcs span the ring between both.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ChordRadii {
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl ChordRadii {
    /// Fits the diagram in a `width` x `height` viewport.
    pub fn from_viewport(width: f64, height: f64) -> ChordRadii {
        let outer_radius = width.min(height) * 0.4;
        ChordRadii::from_outer_radius(outer_radius)
    }

    pub fn from_outer_radius(outer_radius: f64) -> ChordRadii {
        ChordRadii {
            inner_radius: outer_radius - RING_WIDTH,
            outer_radius,
        }
    }

    pub fn from_inner_radius(inner_radius: f64) -> ChordRadii {
        ChordRadii {
            inner_radius,
            outer_radius: inner_radius + RING_WIDTH,
        }
    }

    /// Radius at which the transfer counts are written, inside the ribbons.
    pub fn value_label_radius(&self) -> f64 {
        self.inner_radius - VALUE_LABEL_INSET
    }

    /// Radius of a candidate label outside the ring.
    ///
    /// Labels centered above or below the circle are pushed further out so
    /// that the text does not touch the arc.
    pub fn group_label_radius(&self, anchor: TextAnchor, vertical_offset: bool) -> f64 {
        if anchor == TextAnchor::Middle && vertical_offset {
            self.outer_radius + GROUP_LABEL_VERTICAL_GAP
        } else {
            self.outer_radius + GROUP_LABEL_GAP
        }
    }
}

impl Default for ChordRadii {
    fn default() -> Self {
        ChordRadii::from_viewport(700.0, 500.0)
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct RibbonPlacement {
    /// Clockwise gradient rotation, in degrees.
    pub rotation: f64,
    pub source_label: Coordinate,
    pub target_label: Coordinate,
}

impl RibbonPlacement {
    /// The SVG `gradientTransform` value, rotating around the center of
    /// the bounding box of the ribbon.
    pub fn gradient_transform(&self) -> String {
        gradient_transform(self.rotation)
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct GroupLabel {
    pub anchor: TextAnchor,
    pub position: Coordinate,
}

pub fn gradient_transform(degrees: f64) -> String {
    format!("rotate({}, 0.5, 0.5)", degrees)
}

pub fn place_ribbon(source: &Subgroup, target: &Subgroup, radii: &ChordRadii) -> RibbonPlacement {
    let info = compute_chord_info(source, target, radii.value_label_radius());
    debug!(
        "place_ribbon: {} -> {}: rotation {}",
        source.index, target.index, info.degrees
    );
    RibbonPlacement {
        rotation: info.degrees,
        source_label: info.coord1,
        target_label: info.coord2,
    }
}

/// Places the label of a candidate next to its arc.
pub fn place_group_label(group: &Subgroup, name: &str, radii: &ChordRadii) -> GroupLabel {
    let anchor = bearing_to_anchor(group.start_angle, group.end_angle);
    // The exhausted label reads fine without the extra gap.
    let radius = radii.group_label_radius(anchor, name != EXHAUSTED);
    let position = bearing_to_coord(group.start_angle, group.end_angle, radius);
    debug!(
        "place_group_label: {} ({}) anchored {} at radius {}",
        group.index, name, anchor, radius
    );
    GroupLabel { anchor, position }
}

/// The text shown for a candidate: the last word of the name, usually the
/// family name.
pub fn short_label(name: &str) -> &str {
    name.split_whitespace().next_back().unwrap_or(name)
}
