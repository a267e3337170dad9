use crate::math::matrix::Matrix;
use crate::network::Network;

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Scalar field sampled on a rectangular mesh.
///
/// `values[(i, j)]` is the field at `(xs[j], ys[i])`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub values: Matrix,
}

impl Grid {
    pub fn new(xlim: [f64; 2], ylim: [f64; 2], resolution: usize) -> Grid {
        let xs = linspace(xlim[0], xlim[1], resolution);
        let ys = linspace(ylim[0], ylim[1], resolution);
        let values = Matrix::zeros(ys.len(), xs.len());
        Grid { xs, ys, values }
    }

    /// Every mesh point as a row `[x, y]`, row-major over `(i, j)`.
    pub fn points(&self) -> Matrix {
        let mut pts = Matrix::zeros(self.xs.len() * self.ys.len(), 2);
        for (i, &y) in self.ys.iter().enumerate() {
            for (j, &x) in self.xs.iter().enumerate() {
                let r = i * self.xs.len() + j;
                pts[(r, 0)] = x;
                pts[(r, 1)] = y;
            }
        }
        pts
    }

    pub fn from_fn<F>(xlim: [f64; 2], ylim: [f64; 2], resolution: usize, f: F) -> Grid
    where
        F: Fn(f64, f64) -> f64,
    {
        let mut grid = Grid::new(xlim, ylim, resolution);
        for i in 0..grid.ys.len() {
            for j in 0..grid.xs.len() {
                grid.values[(i, j)] = f(grid.xs[j], grid.ys[i]);
            }
        }
        grid
    }

    /// Network output (first unit) at every mesh point, in one batch.
    pub fn from_network(xlim: [f64; 2], ylim: [f64; 2], resolution: usize, network: &Network) -> Grid {
        let mut grid = Grid::new(xlim, ylim, resolution);
        let out = network.forward(&grid.points());
        for (k, v) in grid.values.data.iter_mut().enumerate() {
            *v = out[(k, 0)];
        }
        grid
    }
}
