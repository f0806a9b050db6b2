/*!
Geometry for chord diagrams of ranked-choice election transfers.

A circular chord layout describes every arc and every ribbon endpoint as a
pair of *bearings*: clockwise angles, in radians, measured from the top of
the circle. The trigonometric functions expect the mathematical convention
instead (counter-clockwise from the right). This crate converts between the
two and derives what a renderer needs from a layout:

- the rotation, in degrees, of a left-to-right linear gradient so that it
  runs from the source endpoint of a chord towards its target endpoint,
- the positions of value labels at both ends of a chord,
- the horizontal text anchor of the label of an arc.

```
use chord_geometry::{compute_chord_info, Subgroup};
use std::f64::consts::PI;

let source = Subgroup { start_angle: 0.0, end_angle: 0.5 * PI, index: 0 };
let target = Subgroup { start_angle: 1.5 * PI, end_angle: 2.0 * PI, index: 3 };

let info = compute_chord_info(&source, &target, 150.0);
assert!((info.degrees - 180.0).abs() < 1e-9);
```

All the functions are pure. Non-finite angles are not checked and simply
produce `NaN` in the outputs.
*/
mod placement;

use log::debug;

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Display;

pub use crate::placement::*;

/// A clockwise angle from the top of the circle, in radians, within `[0, 2π)`.
pub type Bearing = f64;

/// A counter-clockwise angle from the right of the circle, in radians.
pub type MathAngle = f64;

// Length of the auxiliary vector that stands for the unrotated gradient.
// Only its direction matters.
const GRADIENT_AXIS_LENGTH: f64 = 10.0;

/// One angular span of a circular layout.
///
/// It is either one end of a chord (source or target) or the arc of a
/// whole group. `index` is the position of the group (the candidate) in the
/// layout.
///
/// Expected: `0 <= start_angle <= end_angle`.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Subgroup {
    pub start_angle: Bearing,
    pub end_angle: Bearing,
    pub index: usize,
}

impl Subgroup {
    /// The bearing halfway through the span.
    pub fn mid_bearing(&self) -> Bearing {
        mid_bearing(self.start_angle, self.end_angle)
    }
}

/// A point in the plane of the layout, centered on the circle, y pointing up.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Coordinate {
        Coordinate { x, y }
    }

    /// The same point in a y-down (screen, SVG) frame.
    pub fn to_screen(&self) -> Coordinate {
        Coordinate {
            x: self.x,
            y: -self.y,
        }
    }

    fn vector_to(&self, other: &Coordinate) -> (f64, f64) {
        (other.x - self.x, other.y - self.y)
    }
}

/// Everything needed to draw one chord.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ChordInfo {
    /// Clockwise rotation of the gradient, in degrees, within `[0, 360)`.
    pub degrees: f64,
    /// Label position at the source end.
    pub coord1: Coordinate,
    /// Label position at the target end.
    pub coord2: Coordinate,
}

/// Horizontal anchoring of a text label, with the names used by SVG.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

impl Display for TextAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn mid_bearing(start_angle: Bearing, end_angle: Bearing) -> Bearing {
    (start_angle + end_angle) / 2.0
}

/// Converts a bearing (clockwise from the top) into a mathematical angle
/// (counter-clockwise from the right).
///
/// The result can be passed directly to `cos` and `sin`. It is not reduced
/// to `[0, 2π)`: bearings past the right side map into `(π/2, 2π)` after
/// going through `2.5π - bearing`.
pub fn bearing_to_angle(bearing: Bearing) -> MathAngle {
    if bearing < FRAC_PI_2 {
        FRAC_PI_2 - bearing
    } else if bearing == FRAC_PI_2 {
        // Rightmost point.
        0.0
    } else {
        // In degrees: 450 - bearing.
        2.5 * PI - bearing
    }
}

/// The point at the middle of the span `[start_angle, end_angle]` on a
/// circle of the given radius.
///
/// A negative radius mirrors the point through the center.
pub fn bearing_to_coord(start_angle: Bearing, end_angle: Bearing, radius: f64) -> Coordinate {
    let angle = bearing_to_angle(mid_bearing(start_angle, end_angle));
    Coordinate {
        x: angle.cos() * radius,
        y: angle.sin() * radius,
    }
}

/// Computes the gradient rotation and the label positions of a chord.
///
/// The labels sit at the middle of each endpoint, at `radius` from the
/// center. The rotation is the *clockwise* angle between the positive x
/// axis (the direction of an unrotated gradient) and the vector going from
/// the source label to the target label. It is obtained with `atan2` over
/// the determinant and the dot product, since the cosine rule would only
/// give the interior angle.
///
/// When both endpoints share the same middle bearing, no direction exists.
/// The shared bearing is then returned as is in `degrees`. This only
/// happens for self-referencing chords, which election transfers never
/// produce.
pub fn compute_chord_info(source: &Subgroup, target: &Subgroup, radius: f64) -> ChordInfo {
    let coord1 = bearing_to_coord(source.start_angle, source.end_angle, radius);
    let coord2 = bearing_to_coord(target.start_angle, target.end_angle, radius);

    let mid_bearing1 = source.mid_bearing();
    let mid_bearing2 = target.mid_bearing();
    if mid_bearing1 == mid_bearing2 {
        debug!(
            "compute_chord_info: {} -> {} share the middle bearing {}",
            source.index, target.index, mid_bearing1
        );
        return ChordInfo {
            degrees: mid_bearing1,
            coord1,
            coord2,
        };
    }

    // Both vectors start from the source label.
    let axis_end = Coordinate::new(coord1.x + GRADIENT_AXIS_LENGTH, coord1.y);
    let vec1 = coord1.vector_to(&axis_end);
    let vec2 = coord1.vector_to(&coord2);

    let mut theta = determinant(vec1, vec2).atan2(dot_product(vec1, vec2));
    if theta < 0.0 {
        theta += TAU;
    }
    let mut degrees = theta / TAU * 360.0;
    // A tiny negative theta rounds up to a full turn.
    if degrees >= 360.0 {
        degrees -= 360.0;
    }

    ChordInfo {
        degrees,
        coord1,
        coord2,
    }
}

/// Picks the text anchor of the label of an arc.
///
/// Arcs on the right half of the circle get `Start` (the text grows away
/// from the circle to the right), arcs on the left half get `End`. Arcs
/// within a tenth of a half-circle of the top or the bottom get `Middle`.
pub fn bearing_to_anchor(start_angle: Bearing, end_angle: Bearing) -> TextAnchor {
    let mid = mid_bearing(start_angle, end_angle);
    let pad = 0.1 * PI;
    if pad < mid && mid < PI - pad {
        TextAnchor::Start
    } else if PI + pad < mid && mid < TAU - pad {
        TextAnchor::End
    } else {
        TextAnchor::Middle
    }
}

fn dot_product(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.0 + a.1 * b.1
}

fn determinant(a: (f64, f64), b: (f64, f64)) -> f64 {
    b.0 * a.1 - b.1 * a.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {} but got {}",
            expected,
            actual
        );
    }

    fn span(start_angle: f64, end_angle: f64, index: usize) -> Subgroup {
        Subgroup {
            start_angle,
            end_angle,
            index,
        }
    }

    fn quadrants() -> Vec<Subgroup> {
        (0..4)
            .map(|idx| span(idx as f64 * FRAC_PI_2, (idx + 1) as f64 * FRAC_PI_2, idx))
            .collect()
    }

    #[test]
    fn bearing_to_angle_top() {
        assert_eq!(bearing_to_angle(0.0), FRAC_PI_2);
    }

    #[test]
    fn bearing_to_angle_right_is_exactly_zero() {
        assert_eq!(bearing_to_angle(FRAC_PI_2), 0.0);
    }

    #[test]
    fn bearing_to_angle_bottom_points_down() {
        let angle = bearing_to_angle(PI);
        assert_close(angle, 1.5 * PI);
        assert_close(angle.cos(), 0.0);
        assert_close(angle.sin(), -1.0);
    }

    #[test]
    fn bearing_to_angle_left_points_left() {
        let angle = bearing_to_angle(1.5 * PI);
        assert_close(angle.cos(), -1.0);
        assert_close(angle.sin(), 0.0);
    }

    #[test]
    fn coord_stays_on_circle() {
        for radius in [150.0, 1.0, -30.0] {
            for step in 0..360 {
                let bearing = step as f64 / 360.0 * TAU;
                let c = bearing_to_coord(bearing, bearing, radius);
                assert_close(c.x * c.x + c.y * c.y, radius * radius);
            }
        }
    }

    #[test]
    fn coord_at_top() {
        let c = bearing_to_coord(0.0, 0.0, 120.0);
        assert_close(c.x, 0.0);
        assert_close(c.y, 120.0);
    }

    #[test]
    fn coord_at_right() {
        let c = bearing_to_coord(FRAC_PI_2, FRAC_PI_2, 120.0);
        assert_close(c.x, 120.0);
        assert_close(c.y, 0.0);
    }

    #[test]
    fn coord_uses_middle_of_span() {
        // [0, π] has its middle on the right side.
        let c = bearing_to_coord(0.0, PI, 10.0);
        assert_close(c.x, 10.0);
        assert_close(c.y, 0.0);
    }

    #[test]
    fn negative_radius_mirrors_through_center() {
        let c = bearing_to_coord(0.0, 0.0, -50.0);
        assert_close(c.x, 0.0);
        assert_close(c.y, -50.0);
    }

    #[test]
    fn screen_coordinates_flip_y() {
        let c = Coordinate::new(3.0, 4.0).to_screen();
        assert_eq!(c, Coordinate::new(3.0, -4.0));
    }

    #[test]
    fn chord_with_same_endpoint_returns_the_bearing() {
        init_logger();
        let s = span(0.2, 0.6, 1);
        let info = compute_chord_info(&s, &s, 100.0);
        assert_close(info.degrees, 0.4);
        assert_eq!(info.coord1, info.coord2);
    }

    #[test]
    fn chord_across_the_top_points_left() {
        let q = quadrants();
        let info = compute_chord_info(&q[0], &q[3], 150.0);
        assert_close(info.degrees, 180.0);
    }

    #[test]
    fn chord_across_the_top_points_right() {
        let q = quadrants();
        let info = compute_chord_info(&q[3], &q[0], 150.0);
        assert!((0.0..360.0).contains(&info.degrees), "got {}", info.degrees);
        assert!(
            info.degrees < EPS || (360.0 - info.degrees) < EPS,
            "got {}",
            info.degrees
        );
    }

    #[test]
    fn mirrored_chords_stay_below_a_full_turn() {
        for b in [3.9081412610657025, 3.933274002294421, 3.94269878025519] {
            let source = span(b, b, 0);
            let target = span(TAU - b, TAU - b, 1);
            let info = compute_chord_info(&source, &target, 150.0);
            assert!(
                (0.0..360.0).contains(&info.degrees),
                "b={} degrees={}",
                b,
                info.degrees
            );
        }
        for step in 1..2000 {
            let b = PI + step as f64 / 2000.0 * PI;
            let source = span(b, b, 0);
            let target = span(TAU - b, TAU - b, 1);
            let degrees = compute_chord_info(&source, &target, 150.0).degrees;
            assert!(degrees < 360.0, "b={} degrees={}", b, degrees);
        }
    }

    #[test]
    fn chord_to_opposite_quadrant() {
        init_logger();
        let q = quadrants();
        // Middles at 45 and 225 degrees of bearing: the chord goes down and left.
        let info = compute_chord_info(&q[0], &q[2], 150.0);
        assert_close(info.degrees, 135.0);
        let a = 150.0 / 2f64.sqrt();
        assert_close(info.coord1.x, a);
        assert_close(info.coord1.y, a);
        assert_close(info.coord2.x, -a);
        assert_close(info.coord2.y, -a);
    }

    #[test]
    fn chord_from_top_to_bottom_points_down() {
        let top = span(-0.1, 0.1, 0);
        let bottom = span(PI - 0.1, PI + 0.1, 1);
        let info = compute_chord_info(&top, &bottom, 80.0);
        // Clockwise from the x axis with y up: straight down is 90 degrees.
        assert_close(info.degrees, 90.0);
    }

    #[test]
    fn swapping_endpoints_reverses_the_gradient() {
        let pairs = [
            (span(0.1, 0.5, 0), span(2.0, 2.4, 1)),
            (span(1.0, 1.3, 2), span(4.5, 5.0, 3)),
            (span(3.3, 3.5, 4), span(5.9, 6.2, 5)),
        ];
        for (source, target) in pairs.iter() {
            let forward = compute_chord_info(source, target, 150.0).degrees;
            let backward = compute_chord_info(target, source, 150.0).degrees;
            assert!((0.0..360.0).contains(&forward));
            assert!((0.0..360.0).contains(&backward));
            assert_close((forward - backward).rem_euclid(360.0), 180.0);
        }
    }

    #[test]
    fn rotation_does_not_depend_on_positive_radius() {
        let source = span(0.3, 0.9, 0);
        let target = span(3.9, 4.1, 1);
        let near = compute_chord_info(&source, &target, 10.0).degrees;
        let far = compute_chord_info(&source, &target, 500.0).degrees;
        assert_close(near, far);
    }

    #[test]
    fn nan_angles_propagate() {
        let source = span(f64::NAN, 0.5, 0);
        let target = span(2.0, 2.5, 1);
        let info = compute_chord_info(&source, &target, 100.0);
        assert!(info.degrees.is_nan());
        assert!(info.coord1.x.is_nan());
    }

    #[test]
    fn anchor_near_top() {
        assert_eq!(bearing_to_anchor(0.0, 0.01 * PI), TextAnchor::Middle);
    }

    #[test]
    fn anchor_right_side() {
        assert_eq!(bearing_to_anchor(0.4 * PI, 0.6 * PI), TextAnchor::Start);
    }

    #[test]
    fn anchor_left_side() {
        assert_eq!(bearing_to_anchor(1.4 * PI, 1.6 * PI), TextAnchor::End);
    }

    #[test]
    fn anchor_near_bottom() {
        assert_eq!(bearing_to_anchor(0.99 * PI, 1.01 * PI), TextAnchor::Middle);
    }

    #[test]
    fn anchor_on_pad_boundaries_is_middle() {
        let pad = 0.1 * PI;
        for mid in [pad, PI - pad, PI + pad, TAU - pad] {
            assert_eq!(bearing_to_anchor(mid, mid), TextAnchor::Middle, "mid={}", mid);
        }
    }

    #[test]
    fn anchor_near_end_of_circle() {
        assert_eq!(bearing_to_anchor(1.95 * PI, 1.99 * PI), TextAnchor::Middle);
    }

    #[test]
    fn anchor_names() {
        assert_eq!(TextAnchor::Start.to_string(), "start");
        assert_eq!(TextAnchor::Middle.as_str(), "middle");
        assert_eq!(TextAnchor::End.to_string(), "end");
    }
}
