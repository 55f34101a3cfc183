use ratatui::{layout::Rect, widgets::Block};

pub use self::{
    board_display::*, game_display::*, piece_preview::*, stats_display::*, tile_display::*,
};

mod board_display;
mod game_display;
mod piece_preview;
mod stats_display;
mod tile_display;

mod color {
    use ratatui::style::Color;

    // Piece palette carried over from the original browser build.
    pub const I_CYAN: Color = Color::Rgb(91, 209, 255);
    pub const J_BLUE: Color = Color::Rgb(107, 140, 255);
    pub const L_ORANGE: Color = Color::Rgb(247, 164, 74);
    pub const O_YELLOW: Color = Color::Rgb(242, 233, 78);
    pub const S_GREEN: Color = Color::Rgb(108, 239, 138);
    pub const T_PURPLE: Color = Color::Rgb(199, 125, 255);
    pub const Z_RED: Color = Color::Rgb(255, 107, 107);

    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
}

pub(crate) mod style {
    use blockfall_engine::PieceKind;
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const GHOST: Style = fg_bg(color::GRAY, color::BLACK);

    #[must_use]
    pub const fn piece(kind: PieceKind) -> Style {
        match kind {
            PieceKind::I => bg_only(color::I_CYAN),
            PieceKind::J => bg_only(color::J_BLUE),
            PieceKind::L => bg_only(color::L_ORANGE),
            PieceKind::O => bg_only(color::O_YELLOW),
            PieceKind::S => bg_only(color::S_GREEN),
            PieceKind::T => bg_only(color::T_PURPLE),
            PieceKind::Z => bg_only(color::Z_RED),
        }
    }
}

fn block_vertical_margin(block: Option<&Block>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&Block>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
