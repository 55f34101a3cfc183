use std::iter;

use blockfall_engine::{PieceKind, Rotation, Tile};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, BlockExt as _, Widget},
};

use crate::ui::widgets::TileDisplay;

/// Width of a preview slot in cells; every spawn orientation fits 4×2.
const SLOT_WIDTH: u16 = 4;
const SLOT_HEIGHT: u16 = 2;

/// Upcoming pieces, soonest on top, each drawn in its spawn orientation.
#[derive(Debug)]
pub struct PiecePreview<'a> {
    pieces: &'a [PieceKind],
    block: Option<Block<'a>>,
}

impl<'a> PiecePreview<'a> {
    pub fn new(pieces: &'a [PieceKind]) -> Self {
        Self {
            pieces,
            block: None,
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        SLOT_WIDTH * TileDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        let slots = self.pieces.len() as u16;
        slots * SLOT_HEIGHT * TileDisplay::height()
            + slots.saturating_sub(1)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PiecePreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PiecePreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let slot_constraints = self
            .pieces
            .iter()
            .map(|_| Constraint::Length(SLOT_HEIGHT * TileDisplay::height()));
        let slots = Layout::vertical(slot_constraints).spacing(1).split(area);

        for (slot, &kind) in iter::zip(slots.iter(), self.pieces) {
            render_piece(kind, *slot, buf);
        }
    }
}

/// Draws one piece centered in its slot.
#[expect(clippy::cast_possible_truncation)]
fn render_piece(kind: PieceKind, slot: Rect, buf: &mut Buffer) {
    let rotation = Rotation::default();
    let (width, height) = kind.extent(rotation);
    let piece_width = width as u16 * TileDisplay::width();
    let piece_height = height as u16 * TileDisplay::height();

    let [piece_area] = Layout::horizontal([Constraint::Length(piece_width)])
        .flex(Flex::Center)
        .areas::<1>(slot);
    let [piece_area] = Layout::vertical([Constraint::Length(piece_height)])
        .flex(Flex::Center)
        .areas::<1>(piece_area);

    for (dx, dy) in kind.normalized_offsets(rotation) {
        let cell = Rect::new(
            piece_area.x + dx as u16 * TileDisplay::width(),
            piece_area.y + dy as u16 * TileDisplay::height(),
            TileDisplay::width(),
            TileDisplay::height(),
        );
        TileDisplay::from_tile(Tile::Piece(kind), false).render(cell, buf);
    }
}
