//! SVG renderer for `funcplot` pictures.
//!
//! Converts a [`Picture`] into an SVG [`Document`] using the `svg` crate.
//!
//! Key design points:
//! - Plot coordinates have Y pointing **up**; SVG has Y pointing **down**.
//!   All Y coordinates are negated at render time so that no global
//!   transform is needed.
//! - Each stroke becomes one `<path>` polyline (`M`, then `L` per point),
//!   matching how the plotted batch connects consecutive samples.
//! - Path data is built as raw `d` strings to preserve `f64` precision
//!   (the `svg` crate's `Data` builder uses `f32`).

use std::fmt::Write;

use svg::Document;
use svg::node::element::{Group, Path as SvgPath};

use funcplot_graphics::bbox::BoundingBox;
use funcplot_graphics::picture::{Picture, Stroke};
use funcplot_graphics::types::{Color, Point, Scalar};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a [`Picture`] to an SVG [`Document`] with default options.
#[must_use]
pub fn render(picture: &Picture) -> Document {
    render_with_options(picture, &RenderOptions::default())
}

/// Render a [`Picture`] to an SVG string.
#[must_use]
pub fn render_to_string(picture: &Picture) -> String {
    render(picture).to_string()
}

/// Options controlling SVG output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Padding around the plotted range, in plot units. Default: 50.
    pub margin: Scalar,
    /// Number of decimal places for coordinates. Default: 4.
    pub precision: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin: 50.0,
            precision: 4,
        }
    }
}

/// Render a [`Picture`] to an SVG [`Document`] with custom options.
#[must_use]
pub fn render_with_options(picture: &Picture, opts: &RenderOptions) -> Document {
    let mut content = Group::new();
    for stroke in &picture.strokes {
        if !stroke.points.is_empty() {
            content = content.add(render_stroke(stroke, opts));
        }
    }
    build_document(&picture.bbox(), opts, content)
}

// ---------------------------------------------------------------------------
// Stroke rendering
// ---------------------------------------------------------------------------

/// Render one batch as a polyline `<path>`.
fn render_stroke(stroke: &Stroke, opts: &RenderOptions) -> SvgPath {
    let style = &stroke.style;
    SvgPath::new()
        .set("d", points_to_d(&stroke.points, opts.precision))
        .set("fill", "none")
        .set("stroke", color_to_svg(style.color))
        .set("stroke-opacity", fmt_scalar(style.opacity, opts.precision))
        .set("stroke-width", fmt_scalar(style.line_width, opts.precision))
        .set("stroke-linecap", "round")
        .set("stroke-linejoin", "round")
}

/// Convert a point batch to SVG path data.
///
/// A single point is drawn as a zero-length segment so that the round cap
/// makes it visible as a dot.
fn points_to_d(points: &[Point], precision: usize) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };

    let mut d = String::with_capacity(points.len() * 24);
    d.push('M');
    write_point(&mut d, first.x, -first.y, precision);

    if rest.is_empty() {
        d.push('L');
        write_point(&mut d, first.x, -first.y, precision);
    }
    for p in rest {
        d.push('L');
        write_point(&mut d, p.x, -p.y, precision);
    }
    d
}

/// Write "x,y" to the string with the given precision.
///
/// Normalizes negative zero to positive zero for cleaner output.
fn write_point(d: &mut String, x: Scalar, y: Scalar, precision: usize) {
    let x = if x == 0.0 { 0.0 } else { x };
    let y = if y == 0.0 { 0.0 } else { y };
    let _ = write!(d, "{},{}", fmt_scalar(x, precision), fmt_scalar(y, precision));
}

// ---------------------------------------------------------------------------
// Attribute helpers
// ---------------------------------------------------------------------------

/// Convert a [`Color`] to an SVG color string.
fn color_to_svg(c: Color) -> String {
    match c {
        Color::BLACK => "black".to_owned(),
        Color::WHITE => "white".to_owned(),
        _ => format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b()),
    }
}

/// Format a scalar to the given precision, stripping trailing zeros.
fn fmt_scalar(v: Scalar, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        s
    };
    if s == "-0" { "0".to_owned() } else { s }
}

// ---------------------------------------------------------------------------
// Document assembly
// ---------------------------------------------------------------------------

/// Build the final SVG [`Document`].
///
/// The `viewBox` is the picture's bounding box grown by the margin, with
/// the Y range negated: SVG `min_y = -bb.max_y`.
fn build_document(bb: &BoundingBox, opts: &RenderOptions, content: Group) -> Document {
    let (vb_x, vb_y, vb_w, vb_h) = if bb.is_valid() {
        let padded = bb.expanded(opts.margin);
        (padded.min_x, -padded.max_y, padded.width(), padded.height())
    } else {
        (0.0, 0.0, 100.0, 100.0)
    };

    // A single point (or a horizontal/vertical line) with no margin would
    // give a degenerate viewBox.
    let vb_w = if vb_w > 0.0 { vb_w } else { 1.0 };
    let vb_h = if vb_h > 0.0 { vb_h } else { 1.0 };

    Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set(
            "viewBox",
            format!(
                "{} {} {} {}",
                fmt_scalar(vb_x, opts.precision),
                fmt_scalar(vb_y, opts.precision),
                fmt_scalar(vb_w, opts.precision),
                fmt_scalar(vb_h, opts.precision),
            ),
        )
        .set("width", fmt_scalar(vb_w, opts.precision))
        .set("height", fmt_scalar(vb_h, opts.precision))
        .add(content)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use funcplot_graphics::picture::Renderer;
    use funcplot_graphics::types::Style;

    use super::*;

    fn line_picture() -> Picture {
        let mut pic = Picture::new();
        pic.draw(&[Point::new(0.0, 0.0), Point::new(10.0, 5.0)], &Style::DEFAULT);
        pic
    }

    #[test]
    fn test_points_to_d_y_negation() {
        let d = points_to_d(&[Point::new(1.0, 2.0), Point::new(3.0, -4.5)], 4);
        assert_eq!(d, "M1,-2L3,4.5");
    }

    #[test]
    fn test_points_to_d_single_point() {
        let d = points_to_d(&[Point::new(1.0, 1.0)], 4);
        assert_eq!(d, "M1,-1L1,-1");
    }

    #[test]
    fn test_points_to_d_empty() {
        assert_eq!(points_to_d(&[], 4), "");
    }

    #[test]
    fn test_color_to_svg() {
        assert_eq!(color_to_svg(Color::BLACK), "black");
        assert_eq!(color_to_svg(Color::WHITE), "white");
        assert_eq!(color_to_svg(Color::RED), "#ff0000");
        assert_eq!(color_to_svg(Color::YELLOW), "#ffff00");
    }

    #[test]
    fn test_fmt_scalar_trailing_zeros() {
        assert_eq!(fmt_scalar(1.0, 4), "1");
        assert_eq!(fmt_scalar(1.5, 4), "1.5");
        assert_eq!(fmt_scalar(0.123_456, 4), "0.1235");
        assert_eq!(fmt_scalar(-0.000_01, 4), "0");
        assert_eq!(fmt_scalar(100.0, 2), "100");
    }

    #[test]
    fn test_render_empty_picture() {
        let svg = render_to_string(&Picture::new());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("viewBox=\"0 0 100 100\""));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_render_stroke_attributes() {
        let mut pic = Picture::new();
        let style = Style {
            color: Color::BLUE,
            opacity: 0.5,
            line_width: 2.25,
        };
        pic.draw(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], &style);
        let svg = render_to_string(&pic);
        assert!(svg.contains("<path"), "{svg}");
        assert!(svg.contains("stroke=\"#0000ff\""), "{svg}");
        assert!(svg.contains("stroke-opacity=\"0.5\""), "{svg}");
        assert!(svg.contains("stroke-width=\"2.25\""), "{svg}");
        assert!(svg.contains("fill=\"none\""), "{svg}");
        assert!(svg.contains("M0,0L1,-1"), "{svg}");
    }

    #[test]
    fn test_viewbox_uses_bbox_and_margin() {
        let svg = render_to_string(&line_picture());
        // x: 0..10 -> -50..60, y: 0..5 -> svg -55..50
        assert!(svg.contains("viewBox=\"-50 -55 110 105\""), "{svg}");
    }

    #[test]
    fn test_custom_margin_and_precision() {
        let mut pic = Picture::new();
        pic.draw(&[Point::new(0.0, 0.0), Point::new(1.0 / 3.0, 1.0)], &Style::DEFAULT);
        let opts = RenderOptions {
            margin: 0.0,
            precision: 2,
        };
        let svg = render_with_options(&pic, &opts).to_string();
        assert!(svg.contains("viewBox=\"0 -1 0.33 1\""), "{svg}");
        assert!(svg.contains("L0.33,-1"), "{svg}");
    }

    #[test]
    fn test_degenerate_viewbox_is_widened() {
        let mut pic = Picture::new();
        pic.draw(&[Point::new(2.0, 3.0)], &Style::DEFAULT);
        let opts = RenderOptions {
            margin: 0.0,
            precision: 4,
        };
        let svg = render_with_options(&pic, &opts).to_string();
        assert!(svg.contains("viewBox=\"2 -3 1 1\""), "{svg}");
    }

    #[test]
    fn test_one_path_per_stroke() {
        let mut pic = line_picture();
        pic.draw(&[Point::new(-1.0, -1.0), Point::new(0.0, 2.0)], &Style::DEFAULT);
        let svg = render_to_string(&pic);
        assert_eq!(svg.matches("<path").count(), 2, "{svg}");
    }
}
