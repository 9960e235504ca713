use crate::point::Point;

/// Braille patterns start here; the low eight bits select the raised dots
const BRAILLE_BASE: u32 = 0x2800;

/// Dot bit for column `x` (0..2) and row `y` (0..4) inside a Braille cell
const BRAILLE_DOTS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

pub const DOTS_PER_CELL_X: usize = 2;
pub const DOTS_PER_CELL_Y: usize = 4;

/// 24-bit color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// 2D drawing surface the renderer paints onto, in logical units
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    /// Erases all geometry and text
    fn clear(&mut self);
    fn background(&mut self, color: Rgb);
    fn stroke(&mut self, color: Rgb);
    fn stroke_weight(&mut self, weight: f64);
    fn line(&mut self, from: Point, to: Point);
    fn fill(&mut self, color: Rgb);
    /// Terminal cells have a fixed glyph size, so most surfaces ignore this
    fn text_size(&mut self, _size: f64) {}
    /// Draws `text` horizontally centered with its bottom edge on `at`
    fn text(&mut self, text: &str, at: Point);
}

/// One terminal cell of a [`BrailleCanvas`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell {
    Blank,
    Dots { mask: u8, color: Rgb },
    Glyph { ch: char, color: Rgb },
}

impl Cell {
    pub fn symbol(&self) -> char {
        match *self {
            Cell::Blank => ' ',
            Cell::Dots { mask, .. } => char::from_u32(BRAILLE_BASE + mask as u32).unwrap_or(' '),
            Cell::Glyph { ch, .. } => ch,
        }
    }

    pub fn color(&self) -> Option<Rgb> {
        match *self {
            Cell::Blank => None,
            Cell::Dots { color, .. } | Cell::Glyph { color, .. } => Some(color),
        }
    }
}

/// Terminal-sized pixel buffer where every cell holds a 2x4 block of Braille dots
pub struct BrailleCanvas {
    columns: usize,
    rows: usize,
    units_per_dot: f64,
    cells: Vec<Cell>,
    background: Rgb,
    stroke: Rgb,
    stroke_radius: isize,
    fill: Rgb,
}

impl BrailleCanvas {
    /// Creates a canvas of `columns` x `rows` cells whose shorter side spans
    /// `extent` logical units
    pub fn new(columns: u16, rows: u16, extent: f64) -> Self {
        let mut canvas = BrailleCanvas {
            columns: 0,
            rows: 0,
            units_per_dot: 1.0,
            cells: Vec::new(),
            background: Rgb::BLACK,
            stroke: Rgb::WHITE,
            stroke_radius: 0,
            fill: Rgb::WHITE,
        };
        canvas.resize(columns, rows, extent);
        canvas
    }

    /// Resizes the cell grid, dropping its contents
    pub fn resize(&mut self, columns: u16, rows: u16, extent: f64) {
        self.columns = columns.max(1) as usize;
        self.rows = rows.max(1) as usize;
        let shorter_side = self.dot_width().min(self.dot_height()) as f64;
        self.units_per_dot = extent / shorter_side;
        self.cells = vec![Cell::Blank; self.columns * self.rows];
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn units_per_dot(&self) -> f64 {
        self.units_per_dot
    }

    pub fn background_color(&self) -> Rgb {
        self.background
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.columns..(row + 1) * self.columns]
    }

    /// Plain-text rendition, one string per row
    pub fn to_lines(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| self.row(row).iter().map(Cell::symbol).collect())
            .collect()
    }

    fn dot_width(&self) -> usize {
        self.columns * DOTS_PER_CELL_X
    }

    fn dot_height(&self) -> usize {
        self.rows * DOTS_PER_CELL_Y
    }

    fn to_dots(&self, point: Point) -> (isize, isize) {
        (
            (point.x / self.units_per_dot).round() as isize,
            (point.y / self.units_per_dot).round() as isize,
        )
    }

    /// Raises a square of dots centred on `(x, y)` using the current stroke
    fn stamp(&mut self, x: isize, y: isize) {
        for dy in -self.stroke_radius..=self.stroke_radius {
            for dx in -self.stroke_radius..=self.stroke_radius {
                self.set_dot(x + dx, y + dy);
            }
        }
    }

    fn set_dot(&mut self, x: isize, y: isize) {
        if x < 0 || y < 0 || x >= self.dot_width() as isize || y >= self.dot_height() as isize {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let index = (y / DOTS_PER_CELL_Y) * self.columns + x / DOTS_PER_CELL_X;
        let bit = BRAILLE_DOTS[x % DOTS_PER_CELL_X][y % DOTS_PER_CELL_Y];
        self.cells[index] = match self.cells[index] {
            Cell::Dots { mask, .. } => Cell::Dots {
                mask: mask | bit,
                color: self.stroke,
            },
            // Text stays readable on top of the curves
            glyph @ Cell::Glyph { .. } => glyph,
            Cell::Blank => Cell::Dots {
                mask: bit,
                color: self.stroke,
            },
        };
    }
}

impl Surface for BrailleCanvas {
    fn width(&self) -> f64 {
        self.dot_width() as f64 * self.units_per_dot
    }

    fn height(&self) -> f64 {
        self.dot_height() as f64 * self.units_per_dot
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::Blank);
    }

    fn background(&mut self, color: Rgb) {
        self.background = color;
    }

    fn stroke(&mut self, color: Rgb) {
        self.stroke = color;
    }

    fn stroke_weight(&mut self, weight: f64) {
        let side = (weight / self.units_per_dot).round().max(1.0) as isize;
        self.stroke_radius = (side - 1) / 2;
    }

    fn line(&mut self, from: Point, to: Point) {
        let from = from * (1.0 / self.units_per_dot);
        let to = to * (1.0 / self.units_per_dot);
        // Keep dots whose stamp still reaches the canvas
        let margin = self.stroke_radius as f64;
        let min = Point::new(-margin, -margin);
        let max = Point::new(
            self.dot_width() as f64 - 1.0 + margin,
            self.dot_height() as f64 - 1.0 + margin,
        );
        let Some((from, to)) = clip_segment(from, to, min, max) else {
            return;
        };
        draw_line(
            from.x.round() as isize,
            from.y.round() as isize,
            to.x.round() as isize,
            to.y.round() as isize,
            |x, y| self.stamp(x, y),
        );
    }

    fn fill(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn text(&mut self, text: &str, at: Point) {
        if !(at.x.is_finite() && at.y.is_finite()) {
            return;
        }
        let (x, y) = self.to_dots(at);
        let length = text.chars().count() as isize;
        // Bottom-aligned text sits on the cell row just above the anchor's dot row
        let row = (y - 1).div_euclid(DOTS_PER_CELL_Y as isize);
        let first_column = x.div_euclid(DOTS_PER_CELL_X as isize) - length / 2;
        if row < 0 || row >= self.rows as isize {
            return;
        }
        for (offset, ch) in text.chars().enumerate() {
            let column = first_column + offset as isize;
            if column < 0 || column >= self.columns as isize {
                continue;
            }
            self.cells[row as usize * self.columns + column as usize] = Cell::Glyph {
                ch,
                color: self.fill,
            };
        }
    }
}

/// Part of the segment inside the rectangle `min..=max` (Liang-Barsky).
///
/// Returns `None` when the segment misses the rectangle or has a non-finite
/// coordinate.
pub fn clip_segment(from: Point, to: Point, min: Point, max: Point) -> Option<(Point, Point)> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if !(dx.is_finite() && dy.is_finite() && from.x.is_finite() && from.y.is_finite()) {
        return None;
    }
    let mut enter = 0.0_f64;
    let mut leave = 1.0_f64;
    let edges = [
        (-dx, from.x - min.x),
        (dx, max.x - from.x),
        (-dy, from.y - min.y),
        (dy, max.y - from.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            enter = enter.max(r);
        } else {
            leave = leave.min(r);
        }
        if enter > leave {
            return None;
        }
    }
    Some((
        Point::new(from.x + enter * dx, from.y + enter * dy),
        Point::new(from.x + leave * dx, from.y + leave * dy),
    ))
}

/// Visits every dot on the segment between two dots, endpoints included
pub fn draw_line(x0: isize, y0: isize, x1: isize, y1: isize, mut plot: impl FnMut(isize, isize)) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    loop {
        plot(x0, y0);

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_visits_both_endpoints() {
        let mut visited = Vec::new();
        draw_line(0, 0, 5, 2, |x, y| visited.push((x, y)));
        assert_eq!(visited.first(), Some(&(0, 0)));
        assert_eq!(visited.last(), Some(&(5, 2)));
        assert_eq!(visited.len(), 6);
    }

    #[test]
    fn clipping_keeps_inside_segments() {
        let min = Point::new(0.0, 0.0);
        let max = Point::new(10.0, 10.0);
        let inside = (Point::new(1.0, 2.0), Point::new(8.0, 9.0));
        assert_eq!(clip_segment(inside.0, inside.1, min, max), Some(inside));
    }

    #[test]
    fn clipping_trims_crossing_segments() {
        let clipped = clip_segment(
            Point::new(-1e9, 5.0),
            Point::new(1e9, 5.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
        );
        let (from, to) = clipped.unwrap();
        assert!((from.x - 0.0).abs() < 1e-6 && from.y == 5.0);
        assert!((to.x - 10.0).abs() < 1e-6 && to.y == 5.0);
    }

    #[test]
    fn clipping_rejects_missing_and_non_finite_segments() {
        let min = Point::new(0.0, 0.0);
        let max = Point::new(10.0, 10.0);
        assert_eq!(clip_segment(Point::new(-5.0, -1.0), Point::new(20.0, -1.0), min, max), None);
        assert_eq!(clip_segment(Point::new(f64::NAN, 1.0), Point::new(2.0, 2.0), min, max), None);
        assert_eq!(clip_segment(Point::new(-1e308, 1.0), Point::new(1e308, 1.0), min, max), None);
    }

    #[test]
    fn huge_lines_only_touch_visible_dots() {
        let mut canvas = BrailleCanvas::new(80, 24, 96.0);
        let mut visited = 0usize;
        let (from, to) = clip_segment(
            Point::new(-1e9, 10.0),
            Point::new(1e9, 10.0),
            Point::new(0.0, 0.0),
            Point::new(159.0, 95.0),
        )
        .unwrap();
        draw_line(
            from.x.round() as isize,
            from.y.round() as isize,
            to.x.round() as isize,
            to.y.round() as isize,
            |_, _| visited += 1,
        );
        assert_eq!(visited, 160);

        canvas.line(Point::new(-1e9, 10.0), Point::new(1e9, 10.0));
        let row: String = canvas.row(2).iter().map(Cell::symbol).collect();
        assert!(row.chars().all(|ch| ch == '⠤'));
        assert_eq!(row.chars().count(), 80);
    }

    #[test]
    fn degenerate_line_is_a_dot() {
        let mut visited = Vec::new();
        draw_line(3, 3, 3, 3, |x, y| visited.push((x, y)));
        assert_eq!(visited, vec![(3, 3)]);
    }

    #[test]
    fn logical_size_follows_extent() {
        let canvas = BrailleCanvas::new(80, 25, 400.0);
        // 160 x 100 dots, shorter side spans the extent
        assert_eq!(canvas.units_per_dot(), 4.0);
        assert_eq!(canvas.width(), 640.0);
        assert_eq!(canvas.height(), 400.0);
    }

    #[test]
    fn horizontal_line_fills_top_dots() {
        let mut canvas = BrailleCanvas::new(4, 1, 4.0);
        canvas.stroke(Rgb(1, 2, 3));
        canvas.stroke_weight(1.0);
        canvas.line(Point::new(0.0, 0.0), Point::new(7.0, 0.0));
        for column in 0..4 {
            assert_eq!(
                canvas.row(0)[column],
                Cell::Dots {
                    mask: 0x01 | 0x08,
                    color: Rgb(1, 2, 3)
                }
            );
        }
        assert_eq!(canvas.to_lines(), vec!["⠉⠉⠉⠉".to_string()]);
    }

    #[test]
    fn thick_stroke_stamps_neighbours() {
        let mut canvas = BrailleCanvas::new(2, 1, 4.0);
        canvas.stroke_weight(3.0);
        canvas.line(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        // 3x3 block around dot (1, 1)
        assert_eq!(
            canvas.row(0)[0],
            Cell::Dots {
                mask: 0x01 | 0x02 | 0x04 | 0x08 | 0x10 | 0x20,
                color: Rgb::WHITE
            }
        );
        assert_eq!(
            canvas.row(0)[1],
            Cell::Dots {
                mask: 0x01 | 0x02 | 0x04,
                color: Rgb::WHITE
            }
        );
    }

    #[test]
    fn off_canvas_and_non_finite_lines_are_dropped() {
        let mut canvas = BrailleCanvas::new(2, 2, 8.0);
        canvas.line(Point::new(-50.0, -50.0), Point::new(-10.0, -20.0));
        canvas.line(Point::new(f64::NAN, 0.0), Point::new(1.0, 1.0));
        assert!(canvas.to_lines().iter().all(|line| line.trim().is_empty()));
    }

    #[test]
    fn text_is_centered_above_anchor() {
        let mut canvas = BrailleCanvas::new(10, 3, 12.0);
        canvas.fill(Rgb(9, 9, 9));
        // Anchor at dot (10, 8): column 5, bottom of row 1
        canvas.text("abcd", Point::new(10.0, 8.0));
        assert_eq!(canvas.to_lines()[1], "   abcd   ");
        assert_eq!(canvas.row(1)[3].color(), Some(Rgb(9, 9, 9)));
    }

    #[test]
    fn text_survives_later_strokes() {
        let mut canvas = BrailleCanvas::new(4, 1, 4.0);
        canvas.text("hi", Point::new(4.0, 4.0));
        canvas.line(Point::new(0.0, 0.0), Point::new(7.0, 0.0));
        assert_eq!(canvas.row(0)[1].symbol(), 'h');
        assert_eq!(canvas.row(0)[2].symbol(), 'i');
    }

    #[test]
    fn clear_keeps_background() {
        let mut canvas = BrailleCanvas::new(2, 1, 4.0);
        canvas.background(Rgb(236, 111, 24));
        canvas.line(Point::new(0.0, 0.0), Point::new(3.0, 3.0));
        canvas.clear();
        assert_eq!(canvas.row(0)[0], Cell::Blank);
        assert_eq!(canvas.background_color(), Rgb(236, 111, 24));
    }
}
