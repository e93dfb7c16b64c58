//! Raster primitives for the braille canvas: line strokes, polygon fills and
//! the point-in-polygon test used for click hit-testing.

use crate::braille::BrailleCanvas;
use ratatui::style::Color;

/// Draw a line using Bresenham's algorithm.
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Interior pixels of a polygon given as projected rings, even-odd scanline
/// rule, clipped to `0..clip_w x 0..clip_h`.
///
/// Returns pixel coordinates rather than writing to a canvas so fills for
/// independent shapes can be computed in parallel and blended afterwards.
pub fn fill_pixels(rings: &[Vec<(i32, i32)>], clip_w: i32, clip_h: i32) -> Vec<(i32, i32)> {
    let mut min_y = i32::MAX;
    let mut max_y = i32::MIN;
    for ring in rings {
        for &(_, y) in ring {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }
    if min_y > max_y {
        return Vec::new();
    }
    min_y = min_y.max(0);
    max_y = max_y.min(clip_h - 1);

    let mut pixels = Vec::new();
    let mut crossings: Vec<f64> = Vec::new();

    for y in min_y..=max_y {
        // Sample at the pixel center so edges lying exactly on integer rows
        // do not double-count.
        let scan = y as f64 + 0.5;
        crossings.clear();

        for ring in rings {
            if ring.len() < 2 {
                continue;
            }
            for i in 0..ring.len() {
                let (x0, y0) = ring[i];
                let (x1, y1) = ring[(i + 1) % ring.len()];
                let (y0, y1) = (y0 as f64, y1 as f64);
                if (y0 <= scan && y1 > scan) || (y1 <= scan && y0 > scan) {
                    let t = (scan - y0) / (y1 - y0);
                    crossings.push(x0 as f64 + t * (x1 - x0) as f64);
                }
            }
        }

        crossings.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in crossings.chunks_exact(2) {
            let start = (pair[0].ceil() as i32).max(0);
            let end = (pair[1].floor() as i32).min(clip_w - 1);
            for x in start..=end {
                pixels.push((x, y));
            }
        }
    }

    pixels
}

/// Even-odd point-in-polygon test over geographic rings.
pub fn point_in_rings(rings: &[Vec<(f64, f64)>], lon: f64, lat: f64) -> bool {
    let mut inside = false;
    for ring in rings {
        if ring.len() < 3 {
            continue;
        }
        let mut j = ring.len() - 1;
        for i in 0..ring.len() {
            let (xi, yi) = ring[i];
            let (xj, yj) = ring[j];
            if (yi > lat) != (yj > lat) {
                let x_cross = xj + (lat - yj) / (yi - yj) * (xi - xj);
                if lon < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_line_sets_pixels() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0, Color::White);
        assert!(canvas.cell(0, 0).is_some());
        assert!(canvas.cell(4, 0).is_some());
    }

    #[test]
    fn filled_square_covers_interior() {
        let ring = vec![(0, 0), (10, 0), (10, 10), (0, 10)];
        let pixels = fill_pixels(&[ring], 20, 20);
        assert!(pixels.contains(&(5, 5)));
        assert!(pixels.contains(&(1, 9)));
        assert!(!pixels.iter().any(|&(x, _)| x > 10));
    }

    #[test]
    fn fill_respects_clip_bounds() {
        let ring = vec![(-5, -5), (30, -5), (30, 30), (-5, 30)];
        let pixels = fill_pixels(&[ring], 8, 8);
        assert!(pixels.iter().all(|&(x, y)| (0..8).contains(&x) && (0..8).contains(&y)));
        assert!(pixels.contains(&(0, 0)));
        assert!(pixels.contains(&(7, 7)));
    }

    #[test]
    fn degenerate_ring_fills_nothing() {
        assert!(fill_pixels(&[vec![]], 10, 10).is_empty());
        assert!(fill_pixels(&[vec![(3, 3)]], 10, 10).is_empty());
    }

    #[test]
    fn point_in_square() {
        let ring = vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        assert!(point_in_rings(&[ring.clone()], 5.0, 5.0));
        assert!(!point_in_rings(&[ring], 15.0, 5.0));
    }

    #[test]
    fn point_in_multipolygon_checks_every_part() {
        let a = vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)];
        let b = vec![(10.0, 10.0), (12.0, 10.0), (12.0, 12.0), (10.0, 12.0)];
        let rings = [a, b];
        assert!(point_in_rings(&rings, 1.0, 1.0));
        assert!(point_in_rings(&rings, 11.0, 11.0));
        assert!(!point_in_rings(&rings, 5.0, 5.0));
    }
}
