//! Choropleth renderer: country shapes filled by claim totals, plus the
//! non-interactive outline layer used when no basemap is available.

use crate::braille::BrailleCanvas;
use crate::map::geometry::{draw_line, fill_pixels, point_in_rings};
use crate::map::projection::Viewport;
use crate::map::spatial::FeatureGrid;
use ratatui::style::Color;
use rayon::prelude::*;

/// A geographic line (sequence of lon/lat coordinates).
pub type LineString = Vec<(f64, f64)>;

/// Country border strokes, drawn over the fills.
pub const BORDER: Color = Color::Rgb(0xff, 0xff, 0xff);
/// Selected-country outline.
pub const HIGHLIGHT: Color = Color::Rgb(0x3b, 0x82, 0xf6);
/// Fallback continent outlines.
pub const OUTLINE: Color = Color::Cyan;

/// One basemap country: numeric identifier, display name, exterior rings.
pub struct CountryShape {
    pub code: String,
    pub name: String,
    pub rings: Vec<LineString>,
    bbox: (f64, f64, f64, f64),
}

pub struct MapRenderer {
    shapes: Vec<CountryShape>,
    outlines: Vec<LineString>,
    grid: Option<FeatureGrid>,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            outlines: Vec::new(),
            grid: None,
        }
    }

    /// Add a clickable country shape.
    pub fn add_country(&mut self, code: String, name: String, rings: Vec<LineString>) {
        let mut bbox = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for ring in &rings {
            for &(lon, lat) in ring {
                bbox.0 = bbox.0.min(lon);
                bbox.1 = bbox.1.min(lat);
                bbox.2 = bbox.2.max(lon);
                bbox.3 = bbox.3.max(lat);
            }
        }
        self.shapes.push(CountryShape {
            code,
            name,
            rings,
            bbox,
        });
    }

    /// Add a decorative outline (fallback basemap).
    pub fn add_outline(&mut self, line: LineString) {
        self.outlines.push(line);
    }

    /// Rebuild the spatial index after shapes are loaded.
    pub fn build_index(&mut self) {
        self.grid = Some(FeatureGrid::build(
            self.shapes.iter().map(|s| s.bbox),
            10.0,
        ));
    }

    pub fn has_shapes(&self) -> bool {
        !self.shapes.is_empty()
    }

    pub fn shapes(&self) -> &[CountryShape] {
        &self.shapes
    }

    /// Render fills, borders and outlines into the canvas.
    ///
    /// `fill` maps each shape to its choropleth color; `highlight` is the
    /// numeric identifier of the selected country, stroked on top.
    pub fn render<F>(
        &self,
        canvas: &mut BrailleCanvas,
        viewport: &Viewport,
        fill: F,
        highlight: Option<&str>,
    ) where
        F: Fn(&CountryShape) -> Color + Sync + Send,
    {
        let view_bbox = viewport.visible_bbox();
        let clip_w = canvas.pixel_width() as i32;
        let clip_h = canvas.pixel_height() as i32;

        let visible: Vec<&CountryShape> = self
            .shapes
            .iter()
            .filter(|s| bbox_overlap(s.bbox, view_bbox))
            .collect();

        // Fills are independent per country; compute them in parallel and
        // blend sequentially.
        let fills: Vec<(Vec<(i32, i32)>, Color)> = visible
            .par_iter()
            .map(|shape| {
                let rings_px: Vec<Vec<(i32, i32)>> = shape
                    .rings
                    .iter()
                    .map(|ring| {
                        ring.iter()
                            .map(|&(lon, lat)| viewport.project(lon, lat))
                            .collect::<Vec<_>>()
                    })
                    .filter(|ring| !wraps_horizontally(ring, clip_w))
                    .collect();
                (fill_pixels(&rings_px, clip_w, clip_h), fill(shape))
            })
            .collect();

        for (pixels, color) in fills {
            for (x, y) in pixels {
                canvas.set_pixel_signed(x, y, color);
            }
        }

        for shape in &visible {
            for ring in &shape.rings {
                self.draw_linestring(canvas, ring, viewport, BORDER);
            }
        }

        for line in &self.outlines {
            self.draw_linestring(canvas, line, viewport, OUTLINE);
        }

        if let Some(code) = highlight {
            if let Some(shape) = visible.iter().find(|s| s.code == code) {
                for ring in &shape.rings {
                    self.draw_linestring(canvas, ring, viewport, HIGHLIGHT);
                }
            }
        }
    }

    /// Shape under a geographic point, if any.
    pub fn hit_test(&self, lon: f64, lat: f64) -> Option<&CountryShape> {
        let grid = self.grid.as_ref()?;
        grid.candidates(lon, lat)
            .iter()
            .map(|&idx| &self.shapes[idx])
            .find(|s| point_in_rings(&s.rings, lon, lat))
    }

    /// Draw a linestring with viewport culling.
    fn draw_linestring(
        &self,
        canvas: &mut BrailleCanvas,
        line: &[(f64, f64)],
        viewport: &Viewport,
        color: Color,
    ) {
        if line.len() < 2 {
            return;
        }

        let mut prev: Option<(i32, i32)> = None;

        for &(lon, lat) in line {
            let (px, py) = viewport.project(lon, lat);

            if let Some((prev_x, prev_y)) = prev {
                let dist = ((px - prev_x).abs() + (py - prev_y).abs()) as usize;
                if dist < viewport.width && viewport.line_might_be_visible((prev_x, prev_y), (px, py))
                {
                    draw_line(canvas, prev_x, prev_y, px, py, color);
                }
            }

            prev = Some((px, py));
        }
    }
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn bbox_overlap(a: (f64, f64, f64, f64), b: (f64, f64, f64, f64)) -> bool {
    a.0 <= b.2 && a.2 >= b.0 && a.1 <= b.3 && a.3 >= b.1
}

/// A projected ring that jumps more than a screen width between consecutive
/// points is an antimeridian wrap artifact; filling it would smear across the
/// whole row.
fn wraps_horizontally(ring: &[(i32, i32)], clip_w: i32) -> bool {
    ring.windows(2).any(|w| (w[1].0 - w[0].0).abs() > clip_w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(code: &str, lon0: f64, lat0: f64, size: f64) -> (String, String, Vec<LineString>) {
        (
            code.to_string(),
            format!("Country {code}"),
            vec![vec![
                (lon0, lat0),
                (lon0 + size, lat0),
                (lon0 + size, lat0 + size),
                (lon0, lat0 + size),
                (lon0, lat0),
            ]],
        )
    }

    fn renderer_with_squares() -> MapRenderer {
        let mut renderer = MapRenderer::new();
        let (code, name, rings) = square("768", 0.0, 0.0, 40.0);
        renderer.add_country(code, name, rings);
        let (code, name, rings) = square("840", -120.0, 10.0, 40.0);
        renderer.add_country(code, name, rings);
        renderer.build_index();
        renderer
    }

    #[test]
    fn hit_test_resolves_containing_shape() {
        let renderer = renderer_with_squares();
        assert_eq!(renderer.hit_test(20.0, 20.0).unwrap().code, "768");
        assert_eq!(renderer.hit_test(-100.0, 30.0).unwrap().code, "840");
        assert!(renderer.hit_test(60.0, -40.0).is_none());
    }

    #[test]
    fn hit_test_without_index_is_none() {
        let mut renderer = MapRenderer::new();
        let (code, name, rings) = square("768", 0.0, 0.0, 40.0);
        renderer.add_country(code, name, rings);
        assert!(renderer.hit_test(20.0, 20.0).is_none());
    }

    #[test]
    fn render_fills_countries_with_their_color() {
        let renderer = renderer_with_squares();
        let mut canvas = BrailleCanvas::new(100, 25);
        let viewport = Viewport::world(200, 100);

        renderer.render(&mut canvas, &viewport, |_| Color::Red, None);

        let mut reds = 0;
        for cy in 0..canvas.height() {
            for cx in 0..canvas.width() {
                if let Some((_, Color::Red)) = canvas.cell(cx, cy) {
                    reds += 1;
                }
            }
        }
        assert!(reds > 0, "expected filled cells");
    }

    #[test]
    fn wrap_artifact_rings_are_dropped_from_fill() {
        let ring = vec![(0, 10), (500, 10), (0, 20)];
        assert!(wraps_horizontally(&ring, 200));
        let ring = vec![(0, 10), (50, 10), (0, 20)];
        assert!(!wraps_horizontally(&ring, 200));
    }
}
