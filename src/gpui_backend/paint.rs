use gpui::{App, Bounds, PathBuilder, Pixels, TextRun, Window, font, point, px};

use crate::geom::ScreenPoint;
use crate::render::{
    Color, FontFamily, LineStyle, RenderCommand, RenderList, TextAlign, TextBaseline, TextStyle,
};

const SANS_FAMILY: &str = ".SystemUIFont";
const MONO_FAMILY: &str = "Menlo";

/// Replay `list` with its origin at the top-left of `bounds`.
pub(crate) fn paint_list(list: &RenderList, bounds: Bounds<Pixels>, window: &mut Window, cx: &mut App) {
    let origin = ScreenPoint::new(
        f64::from(f32::from(bounds.origin.x)),
        f64::from(f32::from(bounds.origin.y)),
    );
    let at = |p: ScreenPoint| point(px((origin.x + p.x) as f32), px((origin.y + p.y) as f32));

    for command in list.commands() {
        match command {
            // The element background already fills the bounds.
            RenderCommand::Clear { .. } => {}
            RenderCommand::Path { subpaths, style } => {
                paint_path(window, subpaths, *style, at);
            }
            RenderCommand::Text {
                position,
                text,
                style,
            } => {
                paint_text(window, cx, at(*position), text, style);
            }
        }
    }
}

fn paint_path(
    window: &mut Window,
    subpaths: &[Vec<ScreenPoint>],
    style: LineStyle,
    at: impl Fn(ScreenPoint) -> gpui::Point<Pixels>,
) {
    let width = style.width.max(0.5);
    let mut builder = PathBuilder::stroke(px(width));
    for subpath in subpaths {
        let Some((first, rest)) = subpath.split_first() else {
            continue;
        };
        builder.move_to(at(*first));
        for p in rest {
            builder.line_to(at(*p));
        }
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    anchor: gpui::Point<Pixels>,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }
    let family = match style.font.family {
        FontFamily::SansSerif => SANS_FAMILY,
        FontFamily::Monospace => MONO_FAMILY,
    };
    let run = TextRun {
        len: text.len(),
        font: font(family),
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), px(style.font.size), &[run], None);

    let line_height = shaped.ascent + shaped.descent;
    let dx = match style.align {
        TextAlign::Left => px(0.0),
        TextAlign::Center => shaped.width * 0.5,
        TextAlign::Right => shaped.width,
    };
    let dy = match style.baseline {
        TextBaseline::Top => px(0.0),
        TextBaseline::Middle => line_height * 0.5,
        TextBaseline::Alphabetic => shaped.ascent,
    };
    let origin = point(anchor.x - dx, anchor.y - dy);
    let _ = shaped.paint(origin, line_height, window, cx);
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}
