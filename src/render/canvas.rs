use image::{Rgb, RgbImage};

use crate::render::contour::Segment;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const RED: Rgb<u8> = Rgb([214, 39, 40]);
pub const GREEN: Rgb<u8> = Rgb([44, 160, 44]);
pub const BLUE: Rgb<u8> = Rgb([31, 119, 180]);

/// Raster plot area mapping world coordinates onto an image.
pub struct Canvas {
    image: RgbImage,
    xlim: [f64; 2],
    ylim: [f64; 2],
    margin: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32, xlim: [f64; 2], ylim: [f64; 2]) -> Canvas {
        let margin = (width.min(height) / 12).max(4);
        Canvas {
            image: RgbImage::from_pixel(width, height, WHITE),
            xlim,
            ylim,
            margin,
        }
    }

    /// World → pixel, y pointing down.
    pub fn to_pixel(&self, p: [f64; 2]) -> (f64, f64) {
        let w = (self.image.width() - 2 * self.margin) as f64;
        let h = (self.image.height() - 2 * self.margin) as f64;
        let u = (p[0] - self.xlim[0]) / (self.xlim[1] - self.xlim[0]);
        let v = (p[1] - self.ylim[0]) / (self.ylim[1] - self.ylim[0]);
        (self.margin as f64 + u * w, self.margin as f64 + (1.0 - v) * h)
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    fn line_px(&mut self, a: (f64, f64), b: (f64, f64), color: Rgb<u8>) {
        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as usize;
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            let x = a.0 + t * (b.0 - a.0);
            let y = a.1 + t * (b.1 - a.1);
            self.put(x.round() as i64, y.round() as i64, color);
        }
    }

    pub fn line(&mut self, a: [f64; 2], b: [f64; 2], color: Rgb<u8>) {
        let (pa, pb) = (self.to_pixel(a), self.to_pixel(b));
        self.line_px(pa, pb, color);
    }

    pub fn segments(&mut self, segments: &[Segment], color: Rgb<u8>) {
        for [a, b] in segments {
            self.line(*a, *b, color);
        }
    }

    /// Hollow circle marker, radius in pixels.
    pub fn circle(&mut self, centre: [f64; 2], radius: f64, color: Rgb<u8>) {
        let (cx, cy) = self.to_pixel(centre);
        let n = (radius * 8.0).ceil().max(8.0) as usize;
        for k in 0..n {
            let theta = 2.0 * std::f64::consts::PI * k as f64 / n as f64;
            self.put(
                (cx + radius * theta.cos()).round() as i64,
                (cy + radius * theta.sin()).round() as i64,
                color,
            );
        }
    }

    /// Diagonal cross marker, half-size in pixels.
    pub fn cross(&mut self, centre: [f64; 2], half: f64, color: Rgb<u8>) {
        let (cx, cy) = self.to_pixel(centre);
        self.line_px((cx - half, cy - half), (cx + half, cy + half), color);
        self.line_px((cx - half, cy + half), (cx + half, cy - half), color);
    }

    /// Plot border with tick marks at `xticks` / `yticks`.
    pub fn frame(&mut self, xticks: &[f64], yticks: &[f64]) {
        let [x0, x1] = self.xlim;
        let [y0, y1] = self.ylim;
        for (a, b) in [([x0, y0], [x1, y0]), ([x1, y0], [x1, y1]), ([x1, y1], [x0, y1]), ([x0, y1], [x0, y0])] {
            self.line(a, b, BLACK);
        }
        let len = (self.margin as f64 / 3.0).max(2.0);
        for &x in xticks {
            let (px, py) = self.to_pixel([x, y0]);
            self.line_px((px, py), (px, py + len), BLACK);
        }
        for &y in yticks {
            let (px, py) = self.to_pixel([x0, y]);
            self.line_px((px - len, py), (px, py), BLACK);
        }
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_inside_the_margin() {
        let c = Canvas::new(120, 120, [0.0, 1.0], [0.0, 1.0]);
        let (x, y) = c.to_pixel([0.0, 0.0]);
        assert_eq!((x, y), (10.0, 110.0));
        let (x, y) = c.to_pixel([1.0, 1.0]);
        assert_eq!((x, y), (110.0, 10.0));
    }

    #[test]
    fn drawing_out_of_bounds_is_clipped() {
        let mut c = Canvas::new(64, 64, [0.0, 1.0], [0.0, 1.0]);
        c.line([-10.0, -10.0], [10.0, 10.0], RED);
        c.circle([5.0, 5.0], 3.0, BLUE);
        let img = c.into_image();
        assert!(img.pixels().any(|p| *p == RED));
    }
}
