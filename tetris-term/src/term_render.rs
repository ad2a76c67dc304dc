use tetris_engine::{CellType, Grid};

#[derive(Clone, PartialEq, Debug)]
pub enum TermCell {
    FieldCell(CellType),
    // Cleared row during the line-clear animation
    Flash,
    BorderVertical,
    BorderHorizontal,
    BorderTopLeft,
    BorderTopRight,
    BorderBottomLeft,
    BorderBottomRight,
    Space,
    Message(String),
}

pub trait TermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> &'a str;
    fn width(&self, cell: &TermCell) -> usize;
}

pub trait TermRender {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>>;
    fn render(&self, style: &impl TermStyle) -> Vec<String> {
        let mut lines = Vec::new();
        for row in self.output(style) {
            let mut line = String::new();
            for cell in &row {
                line.push_str(style.display(cell));
            }
            lines.push(line);
        }
        lines
    }
}

// Make all lines in block the same width by padding with TermCell::Space
pub fn pad_block_right(block: &mut [Vec<TermCell>], style: &impl TermStyle) {
    let widths: Vec<usize> = block
        .iter()
        .map(|row| row.iter().map(|cell| style.width(cell)).sum())
        .collect();
    let width = widths.iter().copied().max().unwrap_or(0);
    for (row, line_width) in block.iter_mut().zip(widths) {
        row.extend(std::iter::repeat_n(TermCell::Space, width - line_width));
    }
}

fn block_width(block: &[Vec<TermCell>], style: &impl TermStyle) -> usize {
    block
        .first()
        .map_or(0, |row| row.iter().map(|cell| style.width(cell)).sum())
}

fn border_line(cols: usize, left: TermCell, right: TermCell) -> Vec<TermCell> {
    let mut line = vec![left];
    line.extend(std::iter::repeat_n(TermCell::BorderHorizontal, cols));
    line.push(right);
    line
}

pub struct PlainTermStyle;

impl TermStyle for PlainTermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> &'a str {
        match cell {
            TermCell::FieldCell(CellType::Empty) => "  ",
            TermCell::FieldCell(_) => "[]",
            TermCell::Flash => "**",
            TermCell::BorderVertical => "|",
            TermCell::BorderTopLeft
            | TermCell::BorderTopRight
            | TermCell::BorderBottomLeft
            | TermCell::BorderBottomRight => "+",
            TermCell::BorderHorizontal => "--",
            TermCell::Space => " ",
            TermCell::Message(s) => s.as_str(),
        }
    }
    fn width(&self, cell: &TermCell) -> usize {
        cell_width(cell)
    }
}

pub struct AnsiTermStyle;

impl TermStyle for AnsiTermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> &'a str {
        match cell {
            TermCell::FieldCell(CellType::Empty) => "\x1b[0m  ",
            TermCell::FieldCell(CellType::I) => "\x1b[0;96m[]",
            TermCell::FieldCell(CellType::J) => "\x1b[0;34m[]",
            TermCell::FieldCell(CellType::L) => "\x1b[0;38;5;208m[]",
            TermCell::FieldCell(CellType::O) => "\x1b[0;93m[]",
            TermCell::FieldCell(CellType::S) => "\x1b[0;92m[]",
            TermCell::FieldCell(CellType::T) => "\x1b[0;35m[]",
            TermCell::FieldCell(CellType::Z) => "\x1b[0;91m[]",
            TermCell::Flash => "\x1b[1;97m██",
            TermCell::BorderVertical => "\x1b[0m│",
            TermCell::BorderTopLeft => "\x1b[0m┌",
            TermCell::BorderTopRight => "\x1b[0m┐",
            TermCell::BorderBottomLeft => "\x1b[0m└",
            TermCell::BorderHorizontal => "\x1b[0m──",
            TermCell::BorderBottomRight => "\x1b[0m┘",
            TermCell::Space => "\x1b[0m ",
            TermCell::Message(s) => s.as_str(),
        }
    }
    fn width(&self, cell: &TermCell) -> usize {
        cell_width(cell)
    }
}

fn cell_width(cell: &TermCell) -> usize {
    match cell {
        TermCell::FieldCell(_) | TermCell::Flash | TermCell::BorderHorizontal => 2,
        TermCell::BorderVertical
        | TermCell::BorderTopLeft
        | TermCell::BorderTopRight
        | TermCell::BorderBottomLeft
        | TermCell::BorderBottomRight
        | TermCell::Space => 1,
        TermCell::Message(s) => s.chars().count(),
    }
}

impl TermRender for Grid {
    fn output(&self, _style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        self.iter_rows()
            .map(|row| row.iter().copied().map(TermCell::FieldCell).collect())
            .collect()
    }
}

/// Bordered playfield with optional flashing rows and game-over banner
pub struct WellField {
    grid: Grid,
    game_over: bool,
    flash_rows: Vec<usize>,
}

impl WellField {
    pub fn new(grid: Grid, game_over: bool) -> Self {
        Self {
            grid,
            game_over,
            flash_rows: Vec::new(),
        }
    }

    pub fn with_flash(mut self, rows: &[usize]) -> Self {
        self.flash_rows = rows.to_vec();
        self
    }
}

impl TermRender for WellField {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        let mut lines = self.grid.output(style);
        for y in &self.flash_rows {
            if let Some(line) = lines.get_mut(*y) {
                line.fill(TermCell::Flash);
            }
        }
        if self.game_over {
            let middle = lines.len() / 2;
            let message = "Game Over";
            let inner = self.grid.cols() * 2;
            let indent = inner.saturating_sub(message.len()) / 2;
            lines[middle] = vec![TermCell::Message(format!("{:indent$}{}", "", message))];
            pad_block_right(&mut lines, style);
        }

        for line in &mut lines {
            line.insert(0, TermCell::BorderVertical);
            line.push(TermCell::BorderVertical);
        }
        let cols = self.grid.cols();
        lines.insert(
            0,
            border_line(cols, TermCell::BorderTopLeft, TermCell::BorderTopRight),
        );
        lines.push(border_line(
            cols,
            TermCell::BorderBottomLeft,
            TermCell::BorderBottomRight,
        ));
        lines
    }
}

/// Well on the left, score and help text on the right
pub struct GameView {
    well: WellField,
    message: Vec<String>,
}

impl GameView {
    pub fn new(well: WellField, message: Vec<String>) -> Self {
        Self { well, message }
    }
}

impl TermRender for GameView {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        let mut well_lines = self.well.output(style);
        pad_block_right(&mut well_lines, style);
        let well_width = block_width(&well_lines, style);
        let message_width = self
            .message
            .iter()
            .map(|m| m.chars().count())
            .max()
            .unwrap_or(0);

        let total_lines = well_lines.len().max(self.message.len());
        let mut lines = Vec::with_capacity(total_lines);
        for i in 0..total_lines {
            let mut line = match well_lines.get(i) {
                Some(well_line) => well_line.clone(),
                None => vec![TermCell::Space; well_width],
            };
            line.push(TermCell::Space);
            line.push(TermCell::Space);
            // Pad so stale text from a longer previous frame is overwritten
            let msg = self.message.get(i).map_or("", String::as_str);
            line.push(TermCell::Message(msg.to_string()));
            line.extend(std::iter::repeat_n(
                TermCell::Space,
                message_width - msg.chars().count(),
            ));
            lines.push(line);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_output_dimensions() {
        let grid = Grid::new(10, 20);
        let lines = grid.render(&PlainTermStyle);
        assert_eq!(lines.len(), 20);
        assert!(lines.iter().all(|l| l.len() == 20));
    }

    #[test]
    fn test_well_has_border() {
        let mut grid = Grid::new(4, 3);
        grid.set(0, 2, CellType::T);
        let lines = WellField::new(grid, false).render(&PlainTermStyle);
        assert_eq!(
            lines,
            vec![
                "+--------+",
                "|        |",
                "|        |",
                "|[]      |",
                "+--------+",
            ]
        );
    }

    #[test]
    fn test_flash_rows_replace_cells() {
        let grid = Grid::new(4, 3);
        let lines = WellField::new(grid, false)
            .with_flash(&[1])
            .render(&PlainTermStyle);
        assert_eq!(lines[2], "|********|");
        assert_eq!(lines[1], "|        |");
    }

    #[test]
    fn test_game_over_banner_keeps_width() {
        let grid = Grid::new(10, 20);
        let lines = WellField::new(grid, true).render(&PlainTermStyle);
        let banner = lines.iter().find(|l| l.contains("Game Over")).unwrap();
        assert_eq!(banner.len(), lines[0].len());
    }

    #[test]
    fn test_game_view_places_message_right_of_well() {
        let grid = Grid::new(4, 2);
        let view = GameView::new(
            WellField::new(grid, false),
            vec!["Score: 7".to_string(), "q quit".to_string()],
        );
        let lines = view.render(&PlainTermStyle);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "+--------+  Score: 7");
        assert_eq!(lines[1], "|        |  q quit  ");
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn test_pad_block_right() {
        let mut block = vec![
            vec![TermCell::Message("abc".to_string())],
            vec![TermCell::Space],
        ];
        pad_block_right(&mut block, &PlainTermStyle);
        assert_eq!(block[1].len(), 3);
    }
}
