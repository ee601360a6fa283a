//! Rendering result files as SVG, for checking them by eye.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use kurbo::Rect;
use svg::node::element::{Circle, Group, Line};
use svg::Document;

use crate::format::parse_result;
use crate::{Error, ResultFile};

/// How to draw a result file.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotStyle {
    /// If set, segments at this index and later get `family_b_color`.
    ///
    /// For a grid file, this is `m`.
    pub family_split: Option<usize>,
    /// The stroke color of segments before `family_split` (or of all
    /// segments, if there is no split).
    pub family_a_color: String,
    /// The stroke color of segments from `family_split` onwards.
    pub family_b_color: String,
    /// The fill color of intersection markers.
    pub marker_color: String,
    /// Stroke width, as a fraction of the larger side of the bounding box.
    pub stroke_width: f64,
    /// Marker radius, as a multiple of the stroke width.
    pub marker_radius: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        PlotStyle {
            family_split: None,
            family_a_color: "#005f73".to_owned(),
            family_b_color: "#ca6702".to_owned(),
            marker_color: "#ae2012".to_owned(),
            stroke_width: 1.0 / 512.0,
            marker_radius: 2.5,
        }
    }
}

/// The smallest rectangle containing all the segments and intersection
/// points, or `None` if there are none.
pub fn bounding_box(result: &ResultFile) -> Option<Rect> {
    let mut points = result
        .segments
        .iter()
        .flat_map(|s| [s.p0, s.p1])
        .chain(result.intersections.iter().copied())
        .map(|p| p.to_kurbo());
    let first = points.next()?;
    Some(points.fold(Rect::from_points(first, first), |r, p| r.union_pt(p)))
}

/// Draws every segment as a line and every intersection as a round marker.
///
/// The `y` axis points up, and there's a 10% margin around the data.
pub fn render(result: &ResultFile, style: &PlotStyle) -> Document {
    let bbox = bounding_box(result).unwrap_or(Rect::new(0.0, 0.0, 1.0, 1.0));
    let mut size = bbox.width().max(bbox.height());
    if size == 0.0 {
        size = 1.0;
    }
    let margin = |len: f64| if len > 0.0 { 0.1 * len } else { 0.1 * size };
    let view = bbox.inflate(margin(bbox.width()), margin(bbox.height()));
    let stroke = size * style.stroke_width;

    // SVG's y axis points down; flip it within the view box.
    let mut group = Group::new().set(
        "transform",
        format!("matrix(1 0 0 -1 0 {})", view.y0 + view.y1),
    );

    for (idx, s) in result.segments.iter().enumerate() {
        let color = match style.family_split {
            Some(split) if idx >= split => &style.family_b_color,
            _ => &style.family_a_color,
        };
        let line = Line::new()
            .set("x1", s.p0.x)
            .set("y1", s.p0.y)
            .set("x2", s.p1.x)
            .set("y2", s.p1.y)
            .set("stroke", color.as_str())
            .set("stroke-width", stroke)
            .set("stroke-linecap", "round");
        group = group.add(line);
    }

    for p in &result.intersections {
        let marker = Circle::new()
            .set("cx", p.x)
            .set("cy", p.y)
            .set("r", stroke * style.marker_radius)
            .set("fill", style.marker_color.as_str())
            .set("stroke", "black")
            .set("stroke-width", stroke / 4.0);
        group = group.add(marker);
    }

    Document::new()
        .set("viewBox", (view.x0, view.y0, view.width(), view.height()))
        .add(group)
}

/// Writes a rendered document to `path`.
pub fn save(path: impl AsRef<Path>, document: &Document) -> Result<(), Error> {
    svg::save(path, document)?;
    Ok(())
}

/// Reads the result file at `input` and renders it to an SVG file at `output`.
pub fn plot_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    style: &PlotStyle,
) -> Result<(), Error> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let result = parse_result(BufReader::new(File::open(input)?))?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        segments = result.segments.len(),
        intersections = result.intersections.len(),
        "plotting result file"
    );
    save(output, &render(&result, style))
}
