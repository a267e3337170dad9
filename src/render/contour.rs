use crate::render::grid::Grid;

/// Line segment in world coordinates.
pub type Segment = [[f64; 2]; 2];

/// Iso-line of `grid` at `level`, traced by marching squares.
///
/// Cells touching a NaN are skipped. Saddle cells are resolved with the
/// cell-centre average.
pub fn contour_segments(grid: &Grid, level: f64) -> Vec<Segment> {
    let mut segments = Vec::new();
    if grid.xs.len() < 2 || grid.ys.len() < 2 {
        return segments;
    }

    for i in 0..grid.ys.len() - 1 {
        for j in 0..grid.xs.len() - 1 {
            let (x0, x1) = (grid.xs[j], grid.xs[j + 1]);
            let (y0, y1) = (grid.ys[i], grid.ys[i + 1]);
            // Corners counter-clockwise from bottom-left.
            let corners = [
                ([x0, y0], grid.values[(i, j)]),
                ([x1, y0], grid.values[(i, j + 1)]),
                ([x1, y1], grid.values[(i + 1, j + 1)]),
                ([x0, y1], grid.values[(i + 1, j)]),
            ];
            if corners.iter().any(|(_, v)| v.is_nan()) {
                continue;
            }

            // Crossing on each edge (bottom, right, top, left).
            let mut crossings: Vec<[f64; 2]> = Vec::with_capacity(4);
            for k in 0..4 {
                let (pa, va) = corners[k];
                let (pb, vb) = corners[(k + 1) % 4];
                if (va >= level) != (vb >= level) {
                    let t = (level - va) / (vb - va);
                    crossings.push([pa[0] + t * (pb[0] - pa[0]), pa[1] + t * (pb[1] - pa[1])]);
                }
            }

            match crossings.len() {
                2 => segments.push([crossings[0], crossings[1]]),
                4 => {
                    let centre = corners.iter().map(|(_, v)| v).sum::<f64>() / 4.0;
                    if (centre >= level) == (corners[0].1 >= level) {
                        // Bottom-left and top-right are joined: cut off the
                        // other two corners.
                        segments.push([crossings[0], crossings[1]]);
                        segments.push([crossings[2], crossings[3]]);
                    } else {
                        segments.push([crossings[3], crossings[0]]);
                        segments.push([crossings[1], crossings[2]]);
                    }
                }
                _ => {}
            }
        }
    }

    segments
}
