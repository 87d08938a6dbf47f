//! Drawing primitives, the canvas capability, and the frame driver.
//!
//! The engine draws through the [`Canvas`] trait, an immediate-mode 2D
//! contract. [`RenderList`] is the recording implementation used by render
//! backends (such as the GPUI backend) and by tests.

mod frame;

pub use frame::{Frame, FrameKey, Renderer};

use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;
use crate::geom::{ScreenPoint, ScreenRect};

/// RGBA color.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Opaque color from a packed `0xRRGGBB` value.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Parse `#rrggbb` or `#rgb`.
    pub fn from_hex(text: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(text.to_string());
        let digits = text.strip_prefix('#').ok_or_else(err)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let packed = u32::from_str_radix(digits, 16).map_err(|_| err())?;
        match digits.len() {
            6 => Ok(Self::hex(packed)),
            3 => {
                let expand = |nibble: u32| (nibble * 17) as u8;
                Ok(Self::rgb8(
                    expand((packed >> 8) & 0xf),
                    expand((packed >> 4) & 0xf),
                    expand(packed & 0xf),
                ))
            }
            _ => Err(err()),
        }
    }

    /// Format as `#rrggbb`, ignoring alpha.
    pub fn to_hex(&self) -> String {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// Line stroke styling.
///
/// The width is expressed in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Horizontal text anchoring relative to the text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Position is the left edge.
    #[default]
    Left,
    /// Position is the horizontal center.
    Center,
    /// Position is the right edge.
    Right,
}

/// Vertical text anchoring relative to the text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    /// Position is the top of the line box.
    Top,
    /// Position is the vertical middle.
    Middle,
    /// Position is the alphabetic baseline.
    #[default]
    Alphabetic,
}

/// Font family class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    /// The platform UI font.
    #[default]
    SansSerif,
    /// A fixed-width font.
    Monospace,
}

/// Font selection for text drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Size in pixels.
    pub size: f32,
    /// Family class.
    pub family: FontFamily,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size: 10.0,
            family: FontFamily::SansSerif,
        }
    }
}

/// Text styling captured at `fill_text` time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font.
    pub font: Font,
    /// Horizontal anchoring.
    pub align: TextAlign,
    /// Vertical anchoring.
    pub baseline: TextBaseline,
}

/// Immediate-mode 2D drawing surface.
///
/// Paths are built with `begin_path`, `move_to` and `line_to`, and drawn
/// with `stroke` using the stroke style and width current at that time.
pub trait Canvas {
    /// Clear the whole `width × height` surface.
    fn clear(&mut self, width: f64, height: f64);
    /// Discard the current path and start a new one.
    fn begin_path(&mut self);
    /// Start a new sub-path at `point`.
    fn move_to(&mut self, point: ScreenPoint);
    /// Extend the current sub-path to `point`.
    fn line_to(&mut self, point: ScreenPoint);
    /// Stroke the current path.
    fn stroke(&mut self);
    /// Set the stroke color.
    fn set_stroke_style(&mut self, color: Color);
    /// Set the stroke width in pixels.
    fn set_line_width(&mut self, width: f32);
    /// Set the font used by `fill_text`.
    fn set_font(&mut self, font: Font);
    /// Set the text fill color.
    fn set_fill_style(&mut self, color: Color);
    /// Set horizontal text anchoring.
    fn set_text_align(&mut self, align: TextAlign);
    /// Set vertical text anchoring.
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    /// Draw `text` anchored at `position`.
    fn fill_text(&mut self, text: &str, position: ScreenPoint);
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub const fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

/// Recorded draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Clear the surface.
    Clear {
        /// Surface width.
        width: f64,
        /// Surface height.
        height: f64,
    },
    /// Stroke a path made of sub-paths.
    Path {
        /// Sub-paths; each starts at a `move_to`.
        subpaths: Vec<Vec<ScreenPoint>>,
        /// Styling for the stroke.
        style: LineStyle,
    },
    /// Draw text.
    Text {
        /// Anchor position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Recording [`Canvas`] that turns draw calls into [`RenderCommand`]s.
#[derive(Debug, Clone)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
    path: Vec<Vec<ScreenPoint>>,
    stroke: LineStyle,
    fill: Color,
    font: Font,
    align: TextAlign,
    baseline: TextBaseline,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            path: Vec::new(),
            stroke: LineStyle::default(),
            fill: Color::BLACK,
            font: Font::default(),
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
        }
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Iterate over stroked paths drawn in `color`.
    pub fn paths_with_color(
        &self,
        color: Color,
    ) -> impl Iterator<Item = &[Vec<ScreenPoint>]> + '_ {
        self.commands.iter().filter_map(move |command| match command {
            RenderCommand::Path { subpaths, style } if style.color == color => {
                Some(subpaths.as_slice())
            }
            _ => None,
        })
    }

    /// Iterate over drawn text strings.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Default for RenderList {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for RenderList {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.clear();
        self.commands.push(RenderCommand::Clear { width, height });
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: ScreenPoint) {
        self.path.push(vec![point]);
    }

    fn line_to(&mut self, point: ScreenPoint) {
        match self.path.last_mut() {
            Some(subpath) => subpath.push(point),
            None => self.path.push(vec![point]),
        }
    }

    fn stroke(&mut self) {
        let subpaths: Vec<Vec<ScreenPoint>> = self
            .path
            .iter()
            .filter(|subpath| subpath.len() >= 2)
            .cloned()
            .collect();
        if subpaths.is_empty() {
            return;
        }
        self.commands.push(RenderCommand::Path {
            subpaths,
            style: self.stroke,
        });
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.stroke.color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.stroke.width = width;
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn set_fill_style(&mut self, color: Color) {
        self.fill = color;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, position: ScreenPoint) {
        if text.is_empty() {
            return;
        }
        self.commands.push(RenderCommand::Text {
            position,
            text: text.to_string(),
            style: TextStyle {
                color: self.fill,
                font: self.font,
                align: self.align,
                baseline: self.baseline,
            },
        });
    }
}

/// Clip a polyline to `rect`, splitting it where it leaves the rectangle.
///
/// Pieces shorter than two points are dropped.
pub(crate) fn clip_polyline(points: &[ScreenPoint], rect: ScreenRect) -> Vec<Vec<ScreenPoint>> {
    let mut out: Vec<Vec<ScreenPoint>> = Vec::new();
    let mut current: Vec<ScreenPoint> = Vec::new();
    for window in points.windows(2) {
        let Some((start, end)) = clip_segment(window[0], window[1], rect) else {
            if current.len() >= 2 {
                out.push(std::mem::take(&mut current));
            }
            current.clear();
            continue;
        };
        if current.last() != Some(&start) {
            if current.len() >= 2 {
                out.push(std::mem::take(&mut current));
            }
            current.clear();
            current.push(start);
        }
        current.push(end);
    }
    if current.len() >= 2 {
        out.push(current);
    }
    out
}

pub(crate) fn clip_segment(
    mut start: ScreenPoint,
    mut end: ScreenPoint,
    rect: ScreenRect,
) -> Option<(ScreenPoint, ScreenPoint)> {
    const LEFT: u8 = 1;
    const RIGHT: u8 = 2;
    const TOP: u8 = 4;
    const BOTTOM: u8 = 8;

    let region = |point: ScreenPoint| {
        let mut code = 0;
        if point.x < rect.min.x {
            code |= LEFT;
        } else if point.x > rect.max.x {
            code |= RIGHT;
        }
        if point.y < rect.min.y {
            code |= TOP;
        } else if point.y > rect.max.y {
            code |= BOTTOM;
        }
        code
    };

    let mut out_start = region(start);
    let mut out_end = region(end);

    loop {
        if (out_start | out_end) == 0 {
            return Some((start, end));
        }
        if (out_start & out_end) != 0 {
            return None;
        }

        let out_code = if out_start != 0 { out_start } else { out_end };
        let (x, y) = if (out_code & TOP) != 0 {
            (
                start.x + (end.x - start.x) * (rect.min.y - start.y) / (end.y - start.y),
                rect.min.y,
            )
        } else if (out_code & BOTTOM) != 0 {
            (
                start.x + (end.x - start.x) * (rect.max.y - start.y) / (end.y - start.y),
                rect.max.y,
            )
        } else if (out_code & RIGHT) != 0 {
            (
                rect.max.x,
                start.y + (end.y - start.y) * (rect.max.x - start.x) / (end.x - start.x),
            )
        } else {
            (
                rect.min.x,
                start.y + (end.y - start.y) * (rect.min.x - start.x) / (end.x - start.x),
            )
        };

        let new_point = ScreenPoint::new(x, y);
        if out_code == out_start {
            start = new_point;
            out_start = region(start);
        } else {
            end = new_point;
            out_end = region(end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_segment_inside() {
        let rect = ScreenRect::from_size(10.0, 10.0);
        let start = ScreenPoint::new(2.0, 2.0);
        let end = ScreenPoint::new(8.0, 8.0);
        let clipped = clip_segment(start, end, rect).expect("segment should clip");
        assert_eq!(clipped.0, start);
        assert_eq!(clipped.1, end);
    }

    #[test]
    fn clip_segment_crossing_top() {
        let rect = ScreenRect::from_size(10.0, 10.0);
        let (start, end) =
            clip_segment(ScreenPoint::new(5.0, 5.0), ScreenPoint::new(5.0, -1e300), rect).unwrap();
        assert_eq!(start, ScreenPoint::new(5.0, 5.0));
        assert_eq!(end, ScreenPoint::new(5.0, 0.0));
    }

    #[test]
    fn clip_polyline_splits_on_exit_and_reentry() {
        let rect = ScreenRect::from_size(10.0, 10.0);
        let points = [
            ScreenPoint::new(1.0, 5.0),
            ScreenPoint::new(3.0, 5.0),
            ScreenPoint::new(4.0, 50.0),
            ScreenPoint::new(5.0, 50.0),
            ScreenPoint::new(6.0, 5.0),
            ScreenPoint::new(8.0, 5.0),
        ];
        let pieces = clip_polyline(&points, rect);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0][0], ScreenPoint::new(1.0, 5.0));
        assert_eq!(pieces[1].last(), Some(&ScreenPoint::new(8.0, 5.0)));
    }

    #[test]
    fn hex_colors_parse_both_forms() {
        assert_eq!(Color::from_hex("#2563eb").unwrap(), Color::hex(0x2563eb));
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::rgb8(255, 255, 255));
        assert_eq!(Color::hex(0x16a34a).to_hex(), "#16a34a");
        assert!(Color::from_hex("2563eb").is_err());
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#+12345").is_err());
    }

    #[test]
    fn render_list_records_one_path_per_stroke() {
        let mut list = RenderList::new();
        list.clear(100.0, 100.0);
        list.begin_path();
        list.set_stroke_style(Color::WHITE);
        list.move_to(ScreenPoint::new(0.0, 0.0));
        list.line_to(ScreenPoint::new(1.0, 1.0));
        list.move_to(ScreenPoint::new(5.0, 5.0));
        list.line_to(ScreenPoint::new(6.0, 6.0));
        list.move_to(ScreenPoint::new(9.0, 9.0));
        list.stroke();
        let paths: Vec<_> = list.paths_with_color(Color::WHITE).collect();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 2);
    }

    #[test]
    fn stroking_empty_path_records_nothing() {
        let mut list = RenderList::new();
        list.begin_path();
        list.stroke();
        assert!(list.commands().is_empty());
    }
}
