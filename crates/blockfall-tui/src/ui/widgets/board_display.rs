use std::iter;

use blockfall_engine::{COLS, RenderView, ROWS, Tile};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, BlockExt as _, Widget},
};

use crate::ui::widgets::TileDisplay;

/// The playfield grid with the active piece and its landing preview.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    view: &'a RenderView,
    show_ghost: bool,
    block: Option<Block<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(view: &'a RenderView) -> Self {
        Self {
            view,
            show_ghost: true,
            block: None,
        }
    }

    pub fn show_ghost(self, show_ghost: bool) -> Self {
        Self { show_ghost, ..self }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        COLS as u16 * TileDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS as u16 * TileDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..COLS).map(|_| Constraint::Length(TileDisplay::width()));
        let row_constraints = (0..ROWS).map(|_| Constraint::Length(TileDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_rows = area
            .layout::<{ ROWS }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ COLS }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_rows, self.view.rows()) {
            for (grid_cell, &tile) in iter::zip(grid_row, row) {
                let tile = if tile == Tile::Ghost && !self.show_ghost {
                    Tile::Empty
                } else {
                    tile
                };
                TileDisplay::from_tile(tile, true).render(grid_cell, buf);
            }
        }
    }
}
