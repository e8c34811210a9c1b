//! Bar Chart Drawing
//!
//! Draws single-series bar charts either as SVG markup (no extra dependencies)
//! or, with the `charts` feature, as a raster image encoded to PNG.
//! Both outputs share one [`ChartLayout`] so bar geometry is identical.

use std::fs;
use std::path::Path;

/// Chart styling constants
const MARGIN_TOP: f64 = 60.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 80.0;
const MARGIN_LEFT: f64 = 80.0;

/// Fraction of each slot covered by its bar
const BAR_FILL: f64 = 0.8;

/// Headroom above the tallest bar, as a multiple of the largest value
pub const Y_HEADROOM: f64 = 1.1;

/// Gap between a bar top and its value label, as a fraction of the largest value
pub const LABEL_OFFSET: f64 = 0.01;

const COLOR_BAR: &str = "#87ceeb";
const COLOR_GRID: &str = "#ecf0f1";
const COLOR_AXIS: &str = "#2c3e50";
const COLOR_TEXT: &str = "#2c3e50";

/// One bar: category label and its count
#[derive(Debug, Clone, PartialEq)]
pub struct BarData {
    pub label: String,
    pub value: usize,
}

/// A complete single-series bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<BarData>,
    /// Upper limit of the y axis
    pub y_max: f64,
    /// Vertical gap between bar tops and their labels, in data units
    pub label_offset: f64,
}

impl BarChart {
    /// Build a chart; the y axis extends to 110% of the largest value
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        bars: Vec<BarData>,
    ) -> Self {
        let max_value = bars.iter().map(|b| b.value).max().unwrap_or(0) as f64;
        let y_max = if max_value > 0.0 {
            max_value * Y_HEADROOM
        } else {
            1.0
        };

        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            bars,
            y_max,
            label_offset: max_value * LABEL_OFFSET,
        }
    }
}

/// Pixel geometry shared by the SVG and raster renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub plot_left: f64,
    pub plot_top: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub y_max: f64,
    slot_width: f64,
}

impl ChartLayout {
    pub fn new(width: u32, height: u32, num_bars: usize, y_max: f64) -> Self {
        let width = width as f64;
        let height = height as f64;
        let plot_width = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
        let plot_height = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);

        Self {
            width,
            height,
            plot_left: MARGIN_LEFT,
            plot_top: MARGIN_TOP,
            plot_width,
            plot_height,
            y_max: if y_max > 0.0 { y_max } else { 1.0 },
            slot_width: plot_width / num_bars.max(1) as f64,
        }
    }

    pub fn slot_width(&self) -> f64 {
        self.slot_width
    }

    pub fn bar_width(&self) -> f64 {
        self.slot_width * BAR_FILL
    }

    /// Left edge of bar `index`
    pub fn bar_left(&self, index: usize) -> f64 {
        self.plot_left + index as f64 * self.slot_width + (self.slot_width - self.bar_width()) / 2.0
    }

    /// Horizontal center of bar `index`
    pub fn bar_center(&self, index: usize) -> f64 {
        self.plot_left + (index as f64 + 0.5) * self.slot_width
    }

    /// Vertical pixel position of a data value
    pub fn value_y(&self, value: f64) -> f64 {
        self.baseline_y() - (value / self.y_max) * self.plot_height
    }

    /// Pixel row of the x axis
    pub fn baseline_y(&self) -> f64 {
        self.plot_top + self.plot_height
    }

    pub fn plot_right(&self) -> f64 {
        self.plot_left + self.plot_width
    }
}

/// A 1/2/5 x 10^n step giving roughly `target` intervals up to `y_max`.
/// Never below 1, since the axis shows whole sample counts.
pub fn nice_step(y_max: f64, target: usize) -> f64 {
    let raw = y_max / target.max(1) as f64;
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    (nice * magnitude).max(1.0)
}

/// Tick values from 0 up to `y_max` inclusive
pub fn y_ticks(y_max: f64) -> Vec<f64> {
    let step = nice_step(y_max, 5);
    let mut ticks = Vec::new();
    let mut i = 0u32;
    loop {
        let value = step * i as f64;
        if value > y_max + 1e-9 {
            break;
        }
        ticks.push(value);
        i += 1;
    }
    ticks
}

/// Render a bar chart as SVG markup
pub fn generate_bar_chart_svg(chart: &BarChart, width: u32, height: u32) -> String {
    let layout = ChartLayout::new(width, height, chart.bars.len(), chart.y_max);
    let (w, h) = (layout.width, layout.height);

    let mut svg = String::new();

    // SVG header
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
        w, h, w, h
    ));

    // Background
    svg.push_str(&format!(
        r#"<rect width="{}" height="{}" fill="white"/>"#,
        w, h
    ));

    // Title
    svg.push_str(&format!(
        r#"<text x="{}" y="35" text-anchor="middle" font-family="Arial, sans-serif" font-size="18" font-weight="bold" fill="{}">{}</text>"#,
        w / 2.0, COLOR_TEXT, escape_xml(&chart.title)
    ));

    // Grid lines
    for tick in y_ticks(layout.y_max) {
        let y = layout.value_y(tick);

        svg.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1"/>"#,
            layout.plot_left, y, layout.plot_right(), y, COLOR_GRID
        ));

        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="end" font-family="Arial, sans-serif" font-size="12" fill="{}">{:.0}</text>"#,
            layout.plot_left - 10.0, y + 4.0, COLOR_TEXT, tick
        ));
    }

    // Bars
    for (i, bar) in chart.bars.iter().enumerate() {
        let x = layout.bar_left(i);
        let y = layout.value_y(bar.value as f64);
        let center = layout.bar_center(i);

        svg.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            x,
            y,
            layout.bar_width(),
            layout.baseline_y() - y,
            COLOR_BAR
        ));

        // Count label just above the bar
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="Arial, sans-serif" font-size="12" fill="{}">{}</text>"#,
            center,
            layout.value_y(bar.value as f64 + chart.label_offset),
            COLOR_TEXT,
            bar.value
        ));

        // X-axis label
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="Arial, sans-serif" font-size="11" fill="{}">{}</text>"#,
            center, layout.baseline_y() + 20.0, COLOR_TEXT, escape_xml(&bar.label)
        ));
    }

    // Axes
    svg.push_str(&format!(
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="2"/>"#,
        layout.plot_left, layout.baseline_y(), layout.plot_right(), layout.baseline_y(), COLOR_AXIS
    ));
    svg.push_str(&format!(
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="2"/>"#,
        layout.plot_left, layout.plot_top, layout.plot_left, layout.baseline_y(), COLOR_AXIS
    ));

    // Axis labels
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" text-anchor="middle" font-family="Arial, sans-serif" font-size="14" fill="{}">{}</text>"#,
        layout.plot_left + layout.plot_width / 2.0, h - 20.0, COLOR_TEXT, escape_xml(&chart.x_label)
    ));
    svg.push_str(&format!(
        r#"<text x="20" y="{}" text-anchor="middle" font-family="Arial, sans-serif" font-size="14" fill="{}" transform="rotate(-90 20 {})">{}</text>"#,
        h / 2.0, COLOR_TEXT, h / 2.0, escape_xml(&chart.y_label)
    ));

    svg.push_str("</svg>");

    svg
}

/// Render a bar chart as SVG and write it to `output_path`
pub fn write_bar_chart_svg(
    chart: &BarChart,
    width: u32,
    height: u32,
    output_path: &Path,
) -> std::io::Result<()> {
    fs::write(output_path, generate_bar_chart_svg(chart, width, height))
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(feature = "charts")]
pub use raster::{draw_bar_chart, save_bar_chart_png};

#[cfg(feature = "charts")]
mod raster {
    use std::path::Path;

    use image::{ImageFormat, Rgb, RgbImage};

    use super::{y_ticks, BarChart, ChartLayout};
    use crate::utils::error::Result;
    use crate::utils::glyphs::{
        drawable_text, glyph, glyph_pixel, text_width, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH,
    };

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BAR: Rgb<u8> = Rgb([135, 206, 235]);
    const GRID: Rgb<u8> = Rgb([236, 240, 241]);
    const AXIS: Rgb<u8> = Rgb([44, 62, 80]);
    const TEXT: Rgb<u8> = Rgb([44, 62, 80]);

    const LABEL_SCALE: u32 = 2;
    const TITLE_SCALE: u32 = 2;

    /// Rasterize a bar chart
    pub fn draw_bar_chart(chart: &BarChart, width: u32, height: u32) -> RgbImage {
        let layout = ChartLayout::new(width, height, chart.bars.len(), chart.y_max);
        let mut img = RgbImage::from_pixel(width, height, WHITE);

        let plot_left = layout.plot_left.round() as i64;
        let plot_right = layout.plot_right().round() as i64;
        let plot_top = layout.plot_top.round() as i64;
        let baseline = layout.baseline_y().round() as i64;

        // Title
        let title = drawable_text(&chart.title);
        let title_w = text_width(&title, TITLE_SCALE) as i64;
        draw_text(&mut img, (width as i64 - title_w) / 2, 20, &title, TITLE_SCALE, TEXT);

        // Grid lines and y tick labels
        for tick in y_ticks(layout.y_max) {
            let y = layout.value_y(tick).round() as i64;
            fill_rect(&mut img, plot_left, y, plot_right, y + 1, GRID);

            let label = format!("{:.0}", tick);
            let label_w = text_width(&label, 1) as i64;
            draw_text(&mut img, plot_left - 8 - label_w, y - GLYPH_HEIGHT as i64 / 2, &label, 1, TEXT);
        }

        // Bars with count labels and class names
        let slot = layout.slot_width();
        for (i, bar) in chart.bars.iter().enumerate() {
            let x0 = layout.bar_left(i).round() as i64;
            let x1 = (layout.bar_left(i) + layout.bar_width()).round() as i64;
            let top = layout.value_y(bar.value as f64).round() as i64;
            fill_rect(&mut img, x0, top, x1, baseline, BAR);

            let center = layout.bar_center(i).round() as i64;

            let count = bar.value.to_string();
            let scale = if text_width(&count, LABEL_SCALE) as f64 <= slot { LABEL_SCALE } else { 1 };
            let label_bottom = layout.value_y(bar.value as f64 + chart.label_offset).round() as i64;
            draw_text(
                &mut img,
                center - text_width(&count, scale) as i64 / 2,
                label_bottom - (GLYPH_HEIGHT * scale) as i64,
                &count,
                scale,
                TEXT,
            );

            let (name, scale) = fit_label(&drawable_text(&bar.label), slot);
            draw_text(
                &mut img,
                center - text_width(&name, scale) as i64 / 2,
                baseline + 8,
                &name,
                scale,
                TEXT,
            );
        }

        // Axes
        fill_rect(&mut img, plot_left, baseline, plot_right, baseline + 2, AXIS);
        fill_rect(&mut img, plot_left - 2, plot_top, plot_left, baseline + 2, AXIS);

        // Axis labels
        let x_label = drawable_text(&chart.x_label);
        let x_label_w = text_width(&x_label, LABEL_SCALE) as i64;
        let plot_mid = (layout.plot_left + layout.plot_width / 2.0).round() as i64;
        draw_text(
            &mut img,
            plot_mid - x_label_w / 2,
            height as i64 - 20 - (GLYPH_HEIGHT * LABEL_SCALE) as i64,
            &x_label,
            LABEL_SCALE,
            TEXT,
        );

        let y_label = drawable_text(&chart.y_label);
        let y_label_h = text_width(&y_label, LABEL_SCALE) as i64;
        let plot_mid_y = (layout.plot_top + layout.plot_height / 2.0).round() as i64;
        draw_text_vertical(&mut img, 16, plot_mid_y + y_label_h / 2, &y_label, LABEL_SCALE, TEXT);

        img
    }

    /// Rasterize a bar chart and save it as PNG
    pub fn save_bar_chart_png(chart: &BarChart, width: u32, height: u32, output_path: &Path) -> Result<()> {
        draw_bar_chart(chart, width, height).save_with_format(output_path, ImageFormat::Png)?;
        Ok(())
    }

    /// Pick a scale (and truncate if needed) so a label fits `max_width` pixels
    fn fit_label(text: &str, max_width: f64) -> (String, u32) {
        if text_width(text, LABEL_SCALE) as f64 <= max_width {
            return (text.to_string(), LABEL_SCALE);
        }
        if text_width(text, 1) as f64 <= max_width {
            return (text.to_string(), 1);
        }

        let max_chars = ((max_width + 1.0) / GLYPH_ADVANCE as f64).floor() as usize;
        if max_chars <= 2 {
            return (text.chars().take(max_chars).collect(), 1);
        }
        let mut truncated: String = text.chars().take(max_chars - 2).collect();
        truncated.push_str("..");
        (truncated, 1)
    }

    /// Fill the half-open rectangle `[x0, x1) x [y0, y1)`, clamped to the image
    fn fill_rect(img: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        let (w, h) = img.dimensions();
        let x0 = x0.clamp(0, w as i64) as u32;
        let x1 = x1.clamp(0, w as i64) as u32;
        let y0 = y0.clamp(0, h as i64) as u32;
        let y1 = y1.clamp(0, h as i64) as u32;
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, color);
            }
        }
    }

    /// Draw text left-to-right with its top-left corner at (`x`, `y`)
    fn draw_text(img: &mut RgbImage, x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let s = scale as i64;
        for (idx, c) in text.chars().enumerate() {
            let rows = glyph(c);
            let origin = x + (idx as i64) * (GLYPH_ADVANCE as i64) * s;
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if glyph_pixel(&rows, col, row) {
                        let px = origin + col as i64 * s;
                        let py = y + row as i64 * s;
                        fill_rect(img, px, py, px + s, py + s, color);
                    }
                }
            }
        }
    }

    /// Draw text bottom-to-top (rotated 90° counter-clockwise) starting at (`x`, `y_bottom`)
    fn draw_text_vertical(img: &mut RgbImage, x: i64, y_bottom: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let s = scale as i64;
        for (idx, c) in text.chars().enumerate() {
            let rows = glyph(c);
            let origin = y_bottom - (idx as i64) * (GLYPH_ADVANCE as i64) * s;
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if glyph_pixel(&rows, col, row) {
                        let px = x + row as i64 * s;
                        let py = origin - (col as i64 + 1) * s;
                        fill_rect(img, px, py, px + s, py + s, color);
                    }
                }
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::utils::charts::BarData;

        fn chart() -> BarChart {
            BarChart::new(
                "'Test' Set - Sample Distribution per Class",
                "Class Name",
                "Number of Samples",
                vec![
                    BarData { label: "cat".to_string(), value: 2 },
                    BarData { label: "dog".to_string(), value: 1 },
                ],
            )
        }

        #[test]
        fn test_bars_are_filled() {
            let chart = chart();
            let img = draw_bar_chart(&chart, 1000, 600);
            let layout = ChartLayout::new(1000, 600, 2, chart.y_max);
            assert_eq!(img.dimensions(), (1000, 600));

            // Just above the baseline in the middle of each bar.
            let y = layout.baseline_y() as u32 - 3;
            assert_eq!(img.get_pixel(layout.bar_center(0) as u32, y), &BAR);
            assert_eq!(img.get_pixel(layout.bar_center(1) as u32, y), &BAR);

            // The shorter bar stops halfway up the taller one.
            let above_dog = layout.value_y(1.5) as u32;
            assert_eq!(img.get_pixel(layout.bar_center(0) as u32, above_dog), &BAR);
            assert_ne!(img.get_pixel(layout.bar_center(1) as u32, above_dog), &BAR);
        }

        #[test]
        fn test_rendering_is_deterministic() {
            let chart = chart();
            assert_eq!(draw_bar_chart(&chart, 400, 300), draw_bar_chart(&chart, 400, 300));
        }

        #[test]
        fn test_fit_label_truncates() {
            assert_eq!(fit_label("cat", 100.0), ("cat".to_string(), 2));
            assert_eq!(fit_label("abcdefghij", 40.0), ("abcd..".to_string(), 1));
            assert_eq!(fit_label("abcdef", 11.0), ("ab".to_string(), 1));
        }

        /// Pixels under the class-name row of bar slot `index`
        fn x_label_slot(img: &RgbImage, layout: &ChartLayout, index: usize) -> RgbImage {
            let slot = layout.slot_width() as u32;
            let left = layout.plot_left as u32 + index as u32 * slot;
            let top = layout.baseline_y() as u32 + 4;
            image::imageops::crop_imm(img, left, top, slot, GLYPH_HEIGHT * LABEL_SCALE + 8).to_image()
        }

        #[test]
        fn test_labels_differing_by_case_draw_differently() {
            let chart = BarChart::new(
                "Case",
                "Class Name",
                "Number of Samples",
                vec![
                    BarData { label: "Cat".to_string(), value: 1 },
                    BarData { label: "cat".to_string(), value: 1 },
                ],
            );
            let img = draw_bar_chart(&chart, 1000, 600);
            let layout = ChartLayout::new(1000, 600, 2, chart.y_max);

            let upper = x_label_slot(&img, &layout, 0);
            let lower = x_label_slot(&img, &layout, 1);
            assert!(upper.pixels().any(|p| *p == TEXT));
            assert!(lower.pixels().any(|p| *p == TEXT));
            assert_ne!(upper, lower);
        }

        #[test]
        fn test_undrawable_labels_stay_distinct() {
            let chart = BarChart::new(
                "Korean",
                "Class Name",
                "Number of Samples",
                vec![
                    BarData { label: "\u{ac1c}".to_string(), value: 1 },
                    BarData { label: "\u{ace0}".to_string(), value: 1 },
                ],
            );
            let img = draw_bar_chart(&chart, 1000, 600);
            let layout = ChartLayout::new(1000, 600, 2, chart.y_max);
            assert_ne!(x_label_slot(&img, &layout, 0), x_label_slot(&img, &layout, 1));
        }

        #[test]
        fn test_draw_text_marks_pixels() {
            let mut img = RgbImage::from_pixel(20, 10, WHITE);
            draw_text(&mut img, 0, 0, "1", 1, TEXT);
            assert_eq!(img.get_pixel(2, 0), &TEXT);
            assert_eq!(img.get_pixel(0, 0), &WHITE);
        }
    }
}
