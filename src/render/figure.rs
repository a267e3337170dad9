use image::RgbImage;
use log::info;

use crate::config::FigureConfig;
use crate::data::dataset::Dataset;
use crate::error::Result;
use crate::network::Network;
use crate::render::canvas::{Canvas, BLACK, BLUE, GREEN, RED};
use crate::render::contour::contour_segments;
use crate::render::grid::Grid;
use crate::render::reference::ReferenceDensity;

/// Draws decision contours of trained networks over the training data.
///
/// Black: boundary before the prior update. Red: after. Green: the
/// ground-truth boundary from `ReferenceDensity`.
pub struct DecisionSurfaceRenderer {
    pub config: FigureConfig,
    pub reference: ReferenceDensity,
}

impl DecisionSurfaceRenderer {
    pub fn new(config: FigureConfig) -> DecisionSurfaceRenderer {
        DecisionSurfaceRenderer { config, reference: ReferenceDensity::default() }
    }

    /// Network output over the configured mesh.
    pub fn evaluate(&self, network: &Network) -> Grid {
        Grid::from_network(self.config.xlim, self.config.ylim, self.config.resolution, network)
    }

    pub fn ground_truth(&self) -> Grid {
        Grid::from_fn(self.config.xlim, self.config.ylim, self.config.resolution, |x, y| {
            self.reference.value(x, y)
        })
    }

    pub fn render(&self, data: &Dataset, before: &Grid, after: &Grid) -> RgbImage {
        let cfg = &self.config;
        let mut canvas = Canvas::new(cfg.width, cfg.height, cfg.xlim, cfg.ylim);

        let marker = (cfg.width.min(cfg.height) as f64 / 150.0).max(2.0);
        for p in data.class_points(0) {
            canvas.circle(p, marker, BLUE);
        }
        for p in data.class_points(1) {
            canvas.cross(p, marker * 0.8, RED);
        }

        for &level in &cfg.network_levels {
            canvas.segments(&contour_segments(before, level), BLACK);
            canvas.segments(&contour_segments(after, level), RED);
        }
        let truth = self.ground_truth();
        for &level in &cfg.truth_levels {
            canvas.segments(&contour_segments(&truth, level), GREEN);
        }

        canvas.frame(&cfg.ticks, &cfg.ticks);
        canvas.into_image()
    }

    /// Renders and writes a PNG to `path`.
    pub fn save(&self, path: &str, data: &Dataset, before: &Grid, after: &Grid) -> Result<()> {
        let image = self.render(data, before, after);
        image.save(path)?;
        info!("figure written to {path}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_two_class;
    use crate::network::NetworkSpec;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn writes_a_png_of_the_configured_size() {
        let mut rng = StdRng::seed_from_u64(2);
        let data = generate_two_class(20, &mut rng);
        let net = Network::from_spec(&NetworkSpec::two_layer(2, 8, 1), &mut rng).unwrap();
        let config = FigureConfig { resolution: 40, width: 200, height: 180, ..Default::default() };
        let renderer = DecisionSurfaceRenderer::new(config);
        let grid = renderer.evaluate(&net);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");
        renderer.save(path.to_str().unwrap(), &data, &grid, &grid).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (200, 180));
        assert!(img.pixels().any(|p| *p == GREEN));
    }

    #[test]
    fn ground_truth_has_both_signs() {
        let renderer = DecisionSurfaceRenderer::new(FigureConfig { resolution: 30, ..Default::default() });
        let truth = renderer.ground_truth();
        assert!(truth.values.data.iter().any(|&v| v < 0.0));
        assert!(truth.values.data.iter().any(|&v| v > 0.0));
        assert!(!contour_segments(&truth, 0.0).is_empty());
    }
}
