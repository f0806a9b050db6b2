// The chord layout file, as written by the layout step.

use crate::chord::*;

use serde::{Deserialize, Serialize};

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSubgroup {
    pub index: usize,
    #[serde(rename = "startAngle")]
    pub start_angle: f64,
    #[serde(rename = "endAngle")]
    pub end_angle: f64,
    /// Number of ballots flowing out of this endpoint.
    #[serde(default)]
    pub value: f64,
}

impl LayoutSubgroup {
    /// Checks the angles and the index before handing the span to the geometry.
    pub fn to_subgroup(&self, num_names: usize) -> ChordResult<Subgroup> {
        ensure!(
            self.start_angle.is_finite() && self.end_angle.is_finite(),
            NonFiniteAngleSnafu { index: self.index }
        );
        ensure!(
            self.index < num_names,
            UnknownCandidateSnafu {
                index: self.index,
                num_names
            }
        );
        Ok(Subgroup {
            start_angle: self.start_angle,
            end_angle: self.end_angle,
            index: self.index,
        })
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct LayoutChord {
    pub source: LayoutSubgroup,
    pub target: LayoutSubgroup,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ChordLayout {
    /// Candidate names, in the order of the group indices.
    pub names: Vec<String>,
    #[serde(rename = "innerRadius")]
    pub inner_radius: Option<f64>,
    #[serde(rename = "outerRadius")]
    pub outer_radius: Option<f64>,
    /// Short labels that are not drawn (candidates with too thin an arc).
    #[serde(rename = "hiddenLabels", default)]
    pub hidden_labels: Vec<String>,
    #[serde(default)]
    pub groups: Vec<LayoutSubgroup>,
    pub chords: Vec<LayoutChord>,
}

impl ChordLayout {
    pub fn radii(&self) -> ChordRadii {
        match (self.inner_radius, self.outer_radius) {
            (Some(inner_radius), Some(outer_radius)) => ChordRadii {
                inner_radius,
                outer_radius,
            },
            (Some(inner_radius), None) => ChordRadii::from_inner_radius(inner_radius),
            (None, Some(outer_radius)) => ChordRadii::from_outer_radius(outer_radius),
            (None, None) => ChordRadii::default(),
        }
    }
}

pub fn read_layout(path: &str) -> ChordResult<ChordLayout> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_layout: {} bytes from {}", contents.len(), path);
    parse_layout(&contents)
}

pub fn parse_layout(contents: &str) -> ChordResult<ChordLayout> {
    let layout: ChordLayout = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    info!(
        "layout: {} candidates, {} groups, {} chords",
        layout.names.len(),
        layout.groups.len(),
        layout.chords.len()
    );
    Ok(layout)
}

pub fn read_reference(path: &str) -> ChordResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(&contents).context(ParsingJsonSnafu {})
}
