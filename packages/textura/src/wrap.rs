//! Word wrapping against measured pixel widths.

use unicode_segmentation::UnicodeSegmentation;

use crate::measure::TextMeasurer;

/// Splits text into lines that fit a pixel width limit.
///
/// Pure function of its inputs: implementations hold no state between calls.
pub trait LineWrapper {
    /// Wraps `text` to `max_width` pixels, measuring through `measurer`
    /// after configuring it for `font`/`font_size`.
    fn wrap(
        &self,
        measurer: &mut dyn TextMeasurer,
        max_width: f32,
        text: &str,
        font: &str,
        font_size: f32,
    ) -> Vec<String>;
}

/// Word-boundary wrapper.
///
/// Explicit newlines are hard breaks (empty lines preserved). Soft breaks
/// happen at Unicode word boundaries when the joined candidate line measures
/// strictly wider than the limit; a line that measures exactly at the limit
/// does not break. Trailing whitespace is trimmed from a line when it wraps,
/// and whitespace is not carried onto the start of the next line. A single
/// segment wider than the limit is force-broken at grapheme boundaries.
/// Empty input produces no lines; a non-positive limit disables soft
/// wrapping entirely.
#[derive(Default)]
pub struct WordWrapper;

impl WordWrapper {
    pub fn new() -> Self {
        Self
    }

    fn wrap_line(
        &self,
        measurer: &mut dyn TextMeasurer,
        max_width: f32,
        line: &str,
        lines: &mut Vec<String>,
    ) {
        let mut current = String::new();

        for segment in line.split_word_bounds() {
            let mut candidate = current.clone();
            candidate.push_str(segment);

            if measurer.measure(&candidate) > max_width {
                if !current.is_empty() {
                    lines.push(current.trim_end().to_string());
                    current = String::new();
                }

                // Segment wider than the limit on its own: break inside it.
                if measurer.measure(segment) > max_width {
                    current = force_break(measurer, max_width, segment, lines, current);
                    continue;
                }

                // Whitespace never starts a wrapped line.
                if segment.chars().all(char::is_whitespace) {
                    continue;
                }
            }

            current.push_str(segment);
        }

        lines.push(current);
    }
}

impl LineWrapper for WordWrapper {
    fn wrap(
        &self,
        measurer: &mut dyn TextMeasurer,
        max_width: f32,
        text: &str,
        font: &str,
        font_size: f32,
    ) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        measurer.set_font(font, font_size);
        if max_width <= 0.0 {
            return text.split('\n').map(str::to_string).collect();
        }

        let mut lines = Vec::new();
        for raw_line in text.split('\n') {
            self.wrap_line(measurer, max_width, raw_line, &mut lines);
        }
        lines
    }
}

/// Break a segment wider than `max_width` at grapheme boundaries, returning
/// the unfinished remainder as the new current line.
fn force_break(
    measurer: &mut dyn TextMeasurer,
    max_width: f32,
    segment: &str,
    lines: &mut Vec<String>,
    mut current: String,
) -> String {
    for grapheme in segment.graphemes(true) {
        let mut candidate = current.clone();
        candidate.push_str(grapheme);

        if measurer.measure(&candidate) > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current.push_str(grapheme);
        } else {
            current = candidate;
        }
    }
    current
}
