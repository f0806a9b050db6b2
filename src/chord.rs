use log::{debug, info, warn};

use chord_geometry::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod config_reader;

use crate::chord::config_reader::*;

#[derive(Debug, Snafu)]
pub enum ChordError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingJson {
        source: std::io::Error,
        path: String,
    },

    #[snafu(display("Subgroup of candidate {index} has an angle that is not finite"))]
    NonFiniteAngle { index: usize },
    #[snafu(display("Index {index} does not refer to a candidate ({num_names} names)"))]
    UnknownCandidate { index: usize, num_names: usize },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ChordResult<T> = Result<T, ChordError>;

/// A point in screen space (y pointing down).
#[derive(PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl From<Coordinate> for ScreenPoint {
    fn from(c: Coordinate) -> Self {
        let s = c.to_screen();
        ScreenPoint { x: s.x, y: s.y }
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RibbonOutput {
    pub source: usize,
    pub target: usize,
    pub title: String,
    pub rotation: f64,
    #[serde(rename = "gradientTransform")]
    pub gradient_transform: String,
    #[serde(rename = "sourceLabel")]
    pub source_label: ScreenPoint,
    #[serde(rename = "targetLabel")]
    pub target_label: ScreenPoint,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct LabelOutput {
    pub index: usize,
    pub text: String,
    pub anchor: String,
    pub x: f64,
    pub y: f64,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PlacementOutput {
    pub ribbons: Vec<RibbonOutput>,
    pub labels: Vec<LabelOutput>,
}

fn candidate_name<'a>(names: &'a [String], index: usize) -> ChordResult<&'a str> {
    names
        .get(index)
        .map(|n| n.as_str())
        .context(UnknownCandidateSnafu {
            index,
            num_names: names.len(),
        })
}

fn ribbon_title(chord: &LayoutChord, names: &[String]) -> ChordResult<String> {
    let source_name = candidate_name(names, chord.source.index)?;
    let target_name = candidate_name(names, chord.target.index)?;
    Ok(format!(
        "{} {} → {}\n{} {} → {}",
        chord.source.value,
        source_name,
        target_name,
        chord.target.value,
        target_name,
        source_name
    ))
}

pub fn compute_placements(layout: &ChordLayout) -> ChordResult<PlacementOutput> {
    let radii = layout.radii();
    let num_names = layout.names.len();
    info!(
        "compute_placements: inner radius {} outer radius {}",
        radii.inner_radius, radii.outer_radius
    );

    let mut ribbons: Vec<RibbonOutput> = Vec::new();
    for chord in layout.chords.iter() {
        let source = chord.source.to_subgroup(num_names)?;
        let target = chord.target.to_subgroup(num_names)?;
        let placement = place_ribbon(&source, &target, &radii);
        ribbons.push(RibbonOutput {
            source: source.index,
            target: target.index,
            title: ribbon_title(chord, &layout.names)?,
            rotation: placement.rotation,
            gradient_transform: placement.gradient_transform(),
            source_label: placement.source_label.into(),
            target_label: placement.target_label.into(),
        });
    }

    let mut labels: Vec<LabelOutput> = Vec::new();
    for group in layout.groups.iter() {
        let group = group.to_subgroup(num_names)?;
        let text = short_label(candidate_name(&layout.names, group.index)?);
        if layout.hidden_labels.iter().any(|h| h == text) {
            debug!("compute_placements: skipping label {:?}", text);
            continue;
        }
        let label = place_group_label(&group, text, &radii);
        let position = label.position.to_screen();
        labels.push(LabelOutput {
            index: group.index,
            text: text.to_string(),
            anchor: label.anchor.to_string(),
            x: position.x,
            y: position.y,
        });
    }

    info!(
        "compute_placements: {} ribbons, {} labels",
        ribbons.len(),
        labels.len()
    );
    Ok(PlacementOutput { ribbons, labels })
}

fn write_output(pretty_js: &str, out_path: Option<String>) -> ChordResult<()> {
    match out_path.as_deref() {
        None | Some("stdout") => {
            println!("{}", pretty_js);
        }
        Some(path) => {
            info!("Writing placements to {}", path);
            fs::write(path, pretty_js).context(WritingJsonSnafu { path })?;
        }
    }
    Ok(())
}

/// Reads a chord layout, computes the placements and writes them out.
///
/// If a reference file is given, the output must match it.
pub fn run_placement(
    input_path: &str,
    out_path: Option<String>,
    reference_path: Option<String>,
) -> ChordResult<()> {
    let layout = read_layout(input_path)?;
    let placements = compute_placements(&layout)?;

    let result_js = serde_json::to_value(&placements).context(ParsingJsonSnafu {})?;
    let pretty_js = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    write_output(&pretty_js, out_path)?;

    if let Some(reference_p) = reference_path {
        let reference_js = read_reference(&reference_p)?;
        let pretty_reference =
            serde_json::to_string_pretty(&reference_js).context(ParsingJsonSnafu {})?;
        if pretty_reference != pretty_js {
            warn!("Found differences with the reference {}", reference_p);
            print_diff(pretty_reference.as_str(), pretty_js.as_str(), "\n");
            whatever!("Difference detected between computed placements and reference placements")
        }
    }

    Ok(())
}
