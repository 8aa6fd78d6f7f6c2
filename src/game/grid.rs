//====================================================================

use rand::Rng;

use crate::engine::renderer::pipelines::ShapeBatch;

//====================================================================

pub const GRID_COLUMNS: u32 = 8;
pub const GRID_ROWS: u32 = 8;

const CELL_COLOR: [f32; 4] = [1., 1., 1., 1.];
const DECORATION_COLOR: [f32; 4] = [0., 1., 0., 1.];
const DECORATION_SCALE: f32 = 0.8;
const DECORATION_BORDER_WIDTH: f32 = 1.;
const LINE_COLOR: [f32; 4] = [0., 0., 0., 1.];

//====================================================================

/// Which cells of the grid carry a circle decoration. Each cell rolls at
/// roughly 1 in 3.
pub struct GridPattern {
    columns: u32,
    rows: u32,
    decorated: Vec<bool>,
}

impl GridPattern {
    pub fn roll(columns: u32, rows: u32, rng: &mut impl Rng) -> Self {
        let decorated = (0..columns * rows)
            .map(|_| rng.gen_range(0..3) == 1)
            .collect();

        Self {
            columns,
            rows,
            decorated,
        }
    }

    #[inline]
    pub fn decorated(&self, row: u32, col: u32) -> bool {
        self.decorated[(row * self.columns + col) as usize]
    }

    #[inline]
    pub fn decoration_count(&self) -> usize {
        self.decorated.iter().filter(|val| **val).count()
    }
}

//====================================================================

/// Paint the grid into a shape batch: a solid rectangle per cell laid out
/// top-down, a circle on each decorated cell, then the grid lines over
/// everything.
pub fn paint(pattern: &GridPattern, origin: glam::Vec2, size: glam::Vec2, batch: &mut ShapeBatch) {
    let row_height = size.y / pattern.rows as f32;
    let column_width = size.x / pattern.columns as f32;

    for row in 0..pattern.rows {
        let row_start = origin.y + size.y - row as f32 * row_height;

        for col in 0..pattern.columns {
            let col_start = origin.x + col as f32 * column_width;

            batch.draw_solid_rect(
                glam::vec2(col_start, row_start),
                glam::vec2(col_start + column_width, row_start - row_height),
                CELL_COLOR,
            );

            if pattern.decorated(row, col) {
                batch.draw_solid_circle(
                    glam::vec2(col_start + column_width / 2., row_start - row_height / 2.),
                    column_width / 2.,
                    DECORATION_SCALE,
                    DECORATION_COLOR,
                    DECORATION_BORDER_WIDTH,
                    LINE_COLOR,
                );
            }
        }
    }

    // Column edge lines
    for i in 0..=pattern.columns {
        let x = origin.x + i as f32 * column_width;
        batch.draw_line(glam::vec2(x, origin.y), glam::vec2(x, origin.y + size.y), LINE_COLOR);
    }

    // Row edge lines
    for i in 0..=pattern.rows {
        let y = origin.y + i as f32 * row_height;
        batch.draw_line(glam::vec2(origin.x, y), glam::vec2(origin.x + size.x, y), LINE_COLOR);
    }
}

//====================================================================

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn pattern_covers_every_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let pattern = GridPattern::roll(GRID_COLUMNS, GRID_ROWS, &mut rng);

        assert_eq!(pattern.decorated.len(), 64);
        assert!(pattern.decoration_count() <= 64);
    }

    #[test]
    fn pattern_is_deterministic_for_a_seed() {
        let roll = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            GridPattern::roll(GRID_COLUMNS, GRID_ROWS, &mut rng).decorated
        };

        assert_eq!(roll(42), roll(42));
    }

    #[test]
    fn roughly_one_third_of_cells_are_decorated() {
        let mut rng = StdRng::seed_from_u64(3);
        let pattern = GridPattern::roll(100, 100, &mut rng);

        let ratio = pattern.decoration_count() as f32 / 10000.;
        assert!(ratio > 0.25 && ratio < 0.42, "ratio was {}", ratio);
    }

    #[test]
    fn paint_issues_cells_decorations_then_lines() {
        let mut rng = StdRng::seed_from_u64(11);
        let pattern = GridPattern::roll(GRID_COLUMNS, GRID_ROWS, &mut rng);

        let mut batch = ShapeBatch::new();
        paint(&pattern, glam::Vec2::ZERO, glam::vec2(400., 400.), &mut batch);

        let expected = 64 + pattern.decoration_count() + 9 + 9;
        assert_eq!(batch.len(), expected);
    }

    #[test]
    fn painted_shapes_stay_inside_the_grid_area() {
        let mut rng = StdRng::seed_from_u64(5);
        let pattern = GridPattern::roll(GRID_COLUMNS, GRID_ROWS, &mut rng);

        let origin = glam::vec2(50., 50.);
        let size = glam::vec2(400., 400.);

        let mut batch = ShapeBatch::new();
        paint(&pattern, origin, size, &mut batch);

        batch.instances().iter().for_each(|instance| {
            let centre = instance.transform.w_axis.truncate().truncate();
            assert!(centre.x >= origin.x && centre.x <= origin.x + size.x);
            assert!(centre.y >= origin.y && centre.y <= origin.y + size.y);
        });
    }

    #[test]
    fn first_cell_is_painted_at_the_top_left() {
        let pattern = GridPattern {
            columns: GRID_COLUMNS,
            rows: GRID_ROWS,
            decorated: vec![false; 64],
        };

        let mut batch = ShapeBatch::new();
        paint(&pattern, glam::Vec2::ZERO, glam::vec2(400., 400.), &mut batch);

        // Cell quads are 50x50; the first one sits in the top left corner
        let first = &batch.instances()[0];
        let centre = first.transform.w_axis.truncate().truncate();
        assert_eq!(centre, glam::vec2(25., 375.));
    }
}
