//! Heatmap Renderer
//! Draws the EPA pivot matrix, or the no-data placeholder, as an SVG document.
//!
//! Layout:
//! 1. Title centered across the top
//! 2. Matrix cells, first alignment on the bottom row, cell text = mean to 2 decimals
//! 3. Alignment labels on the left, formation labels below, axis titles
//! 4. Color bar on the right spanning the value range

use crate::stats::PivotMatrix;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use thiserror::Error;

// Neutral palette
pub const DARK_GRAY: RGBColor = RGBColor(0x33, 0x33, 0x33);
pub const LIGHT_GRAY: RGBColor = RGBColor(0xE0, 0xE0, 0xE0);
pub const BACKGROUND: RGBColor = RGBColor(0xFF, 0xFF, 0xFF);

pub const HEATMAP_TITLE: &str =
    "Average Expected Points Added (EPA) by Defensive Alignment and Offensive Formation";
pub const NO_DATA_TITLE: &str = "No data for selected filters";
pub const NO_DATA_MESSAGE: &str = "No data to display";
pub const X_AXIS_TITLE: &str = "Offensive Formation";
pub const Y_AXIS_TITLE: &str = "Defensive Alignment";
pub const COLOR_BAR_TITLE: &str = "Avg EPA";

const FONT: &str = "Arial";

// Plot area margins (pixels)
const TITLE_H: i32 = 60;
const LEFT_W: i32 = 190;
const RIGHT_W: i32 = 130;
const BOTTOM_H: i32 = 90;
const COLOR_BAR_W: i32 = 22;
const COLOR_BAR_STEPS: i32 = 40;

type DrawResult<T> = Result<T, DrawingAreaErrorKind<std::io::Error>>;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Draw(#[from] DrawingAreaErrorKind<std::io::Error>),
}

/// Renders heatmaps to SVG strings.
pub struct HeatmapRenderer {
    width: u32,
    height: u32,
}

impl Default for HeatmapRenderer {
    fn default() -> Self {
        Self::new(1100, 640)
    }
}

impl HeatmapRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Render the matrix as a heatmap.
    pub fn render_matrix(&self, matrix: &PivotMatrix) -> Result<String, ChartError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            root.fill(&BACKGROUND)?;
            self.draw_title(&root, HEATMAP_TITLE)?;
            self.draw_cells(&root, matrix)?;
            self.draw_color_bar(&root, matrix.value_range())?;
            root.present()?;
        }
        Ok(svg)
    }

    /// Render the placeholder shown when no plays match the filters.
    pub fn render_no_data(&self) -> Result<String, ChartError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            root.fill(&BACKGROUND)?;
            self.draw_title(&root, NO_DATA_TITLE)?;

            let style = text_style(20, &DARK_GRAY, HPos::Center, VPos::Center);
            let center = (self.width as i32 / 2, self.height as i32 / 2);
            root.draw(&Text::new(NO_DATA_MESSAGE.to_string(), center, style))?;
            root.present()?;
        }
        Ok(svg)
    }

    fn plot_area(&self) -> (i32, i32, i32, i32) {
        let left = LEFT_W;
        let top = TITLE_H;
        let right = self.width as i32 - RIGHT_W;
        let bottom = self.height as i32 - BOTTOM_H;
        (left, top, right.max(left + 1), bottom.max(top + 1))
    }

    fn draw_title(&self, root: &DrawingArea<SVGBackend<'_>, Shift>, title: &str) -> DrawResult<()> {
        let style = text_style(17, &DARK_GRAY, HPos::Center, VPos::Center);
        root.draw(&Text::new(
            title.to_string(),
            (self.width as i32 / 2, TITLE_H / 2),
            style,
        ))
    }

    fn draw_cells(
        &self,
        root: &DrawingArea<SVGBackend<'_>, Shift>,
        matrix: &PivotMatrix,
    ) -> DrawResult<()> {
        let (rows, cols) = matrix.shape();
        if rows == 0 || cols == 0 {
            return Ok(());
        }

        let (left, top, right, bottom) = self.plot_area();
        let cell_w = (right - left) as f64 / cols as f64;
        let cell_h = (bottom - top) as f64 / rows as f64;
        let (lo, hi) = matrix.value_range();

        for (row, alignment) in matrix.alignments.iter().enumerate() {
            // First row sits at the bottom of the plot.
            let y1 = bottom - (row as f64 * cell_h).round() as i32;
            let y0 = bottom - ((row + 1) as f64 * cell_h).round() as i32;

            for (col, value) in matrix.values[row].iter().enumerate() {
                let x0 = left + (col as f64 * cell_w).round() as i32;
                let x1 = left + ((col + 1) as f64 * cell_w).round() as i32;
                let t = normalize(*value, lo, hi);

                root.draw(&Rectangle::new([(x0, y0), (x1, y1)], scale_color(t).filled()))?;
                let text_color = if t > 0.65 { BACKGROUND } else { DARK_GRAY };
                root.draw(&Text::new(
                    format!("{value:.2}"),
                    ((x0 + x1) / 2, (y0 + y1) / 2),
                    text_style(13, &text_color, HPos::Center, VPos::Center),
                ))?;
            }

            root.draw(&Text::new(
                alignment.clone(),
                (left - 8, (y0 + y1) / 2),
                text_style(13, &DARK_GRAY, HPos::Right, VPos::Center),
            ))?;
        }

        for (col, formation) in matrix.formations.iter().enumerate() {
            let x = left + ((col as f64 + 0.5) * cell_w).round() as i32;
            root.draw(&Text::new(
                formation.clone(),
                (x, bottom + 8),
                text_style(13, &DARK_GRAY, HPos::Center, VPos::Top),
            ))?;
        }

        root.draw(&Rectangle::new(
            [(left, top), (right, bottom)],
            ShapeStyle::from(&LIGHT_GRAY).stroke_width(1),
        ))?;

        root.draw(&Text::new(
            X_AXIS_TITLE.to_string(),
            ((left + right) / 2, bottom + 50),
            text_style(14, &DARK_GRAY, HPos::Center, VPos::Center),
        ))?;
        root.draw(&Text::new(
            Y_AXIS_TITLE.to_string(),
            (24, (top + bottom) / 2),
            text_style(14, &DARK_GRAY, HPos::Center, VPos::Center)
                .transform(FontTransform::Rotate270),
        ))?;

        Ok(())
    }

    fn draw_color_bar(
        &self,
        root: &DrawingArea<SVGBackend<'_>, Shift>,
        (lo, hi): (f64, f64),
    ) -> DrawResult<()> {
        let (_, top, right, bottom) = self.plot_area();
        let x0 = right + 30;
        let x1 = x0 + COLOR_BAR_W;
        let span = (bottom - top) as f64;

        for step in 0..COLOR_BAR_STEPS {
            let t = step as f64 / (COLOR_BAR_STEPS - 1) as f64;
            let y1 = bottom - (step as f64 * span / COLOR_BAR_STEPS as f64).round() as i32;
            let y0 = bottom - ((step + 1) as f64 * span / COLOR_BAR_STEPS as f64).round() as i32;
            root.draw(&Rectangle::new([(x0, y0), (x1, y1)], scale_color(t).filled()))?;
        }
        root.draw(&Rectangle::new(
            [(x0, top), (x1, bottom)],
            ShapeStyle::from(&LIGHT_GRAY).stroke_width(1),
        ))?;

        let label_style = text_style(12, &DARK_GRAY, HPos::Left, VPos::Center);
        root.draw(&Text::new(format!("{hi:.2}"), (x1 + 6, top), label_style.clone()))?;
        root.draw(&Text::new(format!("{lo:.2}"), (x1 + 6, bottom), label_style))?;
        root.draw(&Text::new(
            COLOR_BAR_TITLE.to_string(),
            ((x0 + x1) / 2, top - 12),
            text_style(12, &DARK_GRAY, HPos::Center, VPos::Bottom),
        ))?;
        Ok(())
    }
}

fn text_style<'a>(size: u32, color: &'a RGBColor, h: HPos, v: VPos) -> TextStyle<'a> {
    TextStyle::from((FONT, size).into_font())
        .color(color)
        .pos(Pos::new(h, v))
}

/// Position of `value` within `[lo, hi]`; a flat range maps to the midpoint.
fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if hi - lo <= f64::EPSILON {
        return 0.5;
    }
    ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Light gray at 0, white at 0.5, dark gray at 1.
fn scale_color(t: f64) -> RGBColor {
    if t <= 0.5 {
        lerp(&LIGHT_GRAY, &BACKGROUND, t * 2.0)
    } else {
        lerp(&BACKGROUND, &DARK_GRAY, (t - 0.5) * 2.0)
    }
}

fn lerp(from: &RGBColor, to: &RGBColor, t: f64) -> RGBColor {
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> PivotMatrix {
        PivotMatrix {
            alignments: vec!["Man".to_string(), "Zone".to_string()],
            formations: vec!["Pistol".to_string(), "Shotgun".to_string()],
            values: vec![vec![-0.5, 1.5], vec![0.0, 0.25]],
            counts: vec![vec![1, 2], vec![0, 1]],
        }
    }

    #[test]
    fn heatmap_svg_carries_labels_and_rounded_values() {
        let svg = HeatmapRenderer::default().render_matrix(&matrix()).unwrap();
        assert!(svg.contains("<svg"));
        for text in ["Man", "Zone", "Pistol", "Shotgun", "-0.50", "1.50", "0.00", "0.25"] {
            assert!(svg.contains(text), "missing {text}");
        }
        assert!(svg.contains(X_AXIS_TITLE));
        assert!(svg.contains(Y_AXIS_TITLE));
        assert!(!svg.contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn no_data_svg_has_the_placeholder_and_no_cells() {
        let svg = HeatmapRenderer::default().render_no_data().unwrap();
        assert!(svg.contains(NO_DATA_TITLE));
        assert!(svg.contains(NO_DATA_MESSAGE));
        assert!(!svg.contains(X_AXIS_TITLE));
    }

    #[test]
    fn color_scale_runs_light_white_dark() {
        assert_eq!(scale_color(0.0), LIGHT_GRAY);
        assert_eq!(scale_color(0.5), BACKGROUND);
        assert_eq!(scale_color(1.0), DARK_GRAY);
    }

    #[test]
    fn flat_range_maps_to_the_midpoint() {
        assert_eq!(normalize(0.3, 0.3, 0.3), 0.5);
        assert_eq!(normalize(2.0, 0.0, 4.0), 0.5);
    }
}
