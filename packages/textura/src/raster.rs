//! CPU rasterization of a wrapped layout into a premultiplied RGBA pixmap.

use kurbo::{Affine, Point, Stroke};
use peniko::color::{AlphaColor, DynamicColor, Hsl, Srgb};
use peniko::{ColorStop, Extend, Fill, Gradient};
use vello_cpu::{Glyph, PaintType, Pixmap, RenderContext, RenderMode};

use crate::fonts::LoadedFont;
use crate::layout::{self, TextLayout};
use crate::measure::TextMeasurer;
use crate::style::TextStyle;

/// Stop count of the rainbow fill's hue wheel.
const RAINBOW_STOPS: usize = 12;

/// Raster buffer dimensions for a bounding box drawn at `scale`.
pub(crate) fn buffer_dimensions(size: [f32; 2], scale: f32) -> (u32, u32) {
    (
        (size[0] * scale).ceil() as u32,
        (size[1] * scale).ceil() as u32,
    )
}

/// Rotation anchor: the horizontal middle of the box, at the cap height of
/// the first line. Deliberately not shifted for left/right alignment, so
/// rotation behaves the same regardless of alignment.
pub(crate) fn rotation_center(bounding_width: f32, font_size: f32) -> [f32; 2] {
    [bounding_width / 2.0, layout::ASCENT_RATIO * font_size]
}

/// Evenly spaced hue wheel spanning one line's horizontal extent.
fn rainbow_gradient(x: f32, line_width: f32) -> Gradient {
    let mut gradient = Gradient::new_linear(
        Point::new(f64::from(x), 0.0),
        Point::new(f64::from(x + line_width), 0.0),
    )
    .with_extend(Extend::Pad);
    for i in 0..RAINBOW_STOPS {
        let hue = 360.0 * i as f32 / RAINBOW_STOPS as f32;
        let color = AlphaColor::<Hsl>::new([hue, 100.0, 50.0, 1.0]).convert::<Srgb>();
        gradient.stops.push(ColorStop {
            color: DynamicColor::from_alpha_color(color),
            offset: i as f32 / RAINBOW_STOPS as f32,
        });
    }
    gradient
}

/// Glyphs for one line, pen-advanced from `origin_x` along `baseline`.
fn positioned_glyphs(
    font: &LoadedFont,
    font_size: f32,
    line: &str,
    origin_x: f32,
    baseline: f32,
) -> Vec<Glyph> {
    let mut pen_x = origin_x;
    font.glyphs(font_size, line)
        .into_iter()
        .map(|(id, advance)| {
            let glyph = Glyph {
                id,
                x: pen_x,
                y: baseline,
            };
            pen_x += advance;
            glyph
        })
        .collect()
}

/// Draws `layout` at `scale` into a fresh `width` x `height` buffer.
///
/// The context transform carries the scale, so everything below it is in
/// logical pixels. Stroked lines are outlined before being filled, leaving
/// the fill on top. An absent `font` (unregistered name) still produces a
/// correctly sized buffer, just without glyphs.
pub(crate) fn rasterize(
    layout: &TextLayout,
    style: &TextStyle,
    font: Option<&LoadedFont>,
    measurer: &mut dyn TextMeasurer,
    scale: f32,
    width: u32,
    height: u32,
) -> Pixmap {
    let width = width.min(u32::from(u16::MAX)) as u16;
    let height = height.min(u32::from(u16::MAX)) as u16;
    let mut ctx = RenderContext::new(width, height);

    let Some(font) = font else {
        log::debug!(
            "font '{}' is not registered; rendering an empty {width}x{height} raster",
            style.font
        );
        let mut pixmap = Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap, RenderMode::OptimizeSpeed);
        return pixmap;
    };

    ctx.set_transform(Affine::scale(f64::from(scale)));
    ctx.set_fill_rule(Fill::NonZero);
    measurer.set_font(&style.font, style.font_size);

    for (index, line) in layout.lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let line_width = measurer.measure(line);
        let x = layout::aligned_x(style.align, layout.size[0], line_width);
        let baseline = layout::baseline_y(style, index);
        let glyphs = positioned_glyphs(font, style.font_size, line, x, baseline);

        if style.stroke_width > 0.0 {
            ctx.set_stroke(Stroke::new(f64::from(style.stroke_width) * 2.0));
            ctx.set_paint(PaintType::Solid(style.stroke_color));
            ctx.glyph_run(font.font())
                .font_size(style.font_size)
                .hint(true)
                .stroke_glyphs(glyphs.iter().copied());
        }

        if style.rainbow {
            ctx.set_paint(PaintType::Gradient(rainbow_gradient(x, line_width)));
        } else {
            ctx.set_paint(PaintType::Solid(style.color));
        }
        ctx.glyph_run(font.font())
            .font_size(style.font_size)
            .hint(true)
            .fill_glyphs(glyphs.into_iter());
    }

    let mut pixmap = Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap, RenderMode::OptimizeSpeed);
    pixmap
}
