use blockfall_engine::{GameSession, SessionState};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Widget},
};

use crate::ui::widgets::{
    BoardDisplay, PiecePreview, StatsDisplay, StatsView, color, style,
};

/// Full game screen: stats panel, board, and next-piece stack, with a
/// status popup over the board whenever the game is not running.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    session: &'a GameSession,
    best_score: usize,
    show_ghost: bool,
}

impl<'a> GameDisplay<'a> {
    pub fn new(session: &'a GameSession, best_score: usize) -> Self {
        Self {
            session,
            best_score,
            show_ghost: true,
        }
    }

    pub fn show_ghost(self, show_ghost: bool) -> Self {
        Self { show_ghost, ..self }
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = match self.session.state() {
            SessionState::Ready => color::GRAY,
            SessionState::Running => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };

        let view = self.session.render_view();
        let snapshot = self.session.progression().snapshot();
        let stats = StatsView {
            score: snapshot.score,
            best_score: self.best_score,
            cleared_lines: snapshot.cleared_lines,
            level: snapshot.level,
        };

        let board = BoardDisplay::new(&view).show_ghost(self.show_ghost).block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let preview = PiecePreview::new(view.next_pieces()).block(
            Block::bordered()
                .title(Line::from("NEXT").centered())
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let stats_panel = StatsDisplay::new(stats).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats_panel.width()),
            Constraint::Length(board.width()),
            Constraint::Length(preview.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas::<3>(area);

        let [stats_area] = Layout::vertical([Constraint::Length(stats_panel.height())])
            .areas::<1>(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas::<1>(center_column);
        let [preview_area] =
            Layout::vertical([Constraint::Length(preview.height())]).areas::<1>(right_column);

        let board_width = board.width();
        stats_panel.render(stats_area, buf);
        board.render(board_area, buf);
        preview.render(preview_area, buf);

        let popup = match self.session.state() {
            SessionState::Running => None,
            SessionState::Ready => Some((
                "PRESS ENTER",
                Style::new().fg(color::BLACK).bg(color::WHITE),
            )),
            SessionState::Paused => {
                Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
            }
            SessionState::GameOver => {
                Some(("GAME OVER", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        };

        if let Some((message, popup_style)) = popup {
            let block = Block::new().style(popup_style);
            let text = Text::styled(message, popup_style).centered();
            let [popup_area] = Layout::horizontal([Constraint::Length(board_width)])
                .flex(Flex::Center)
                .areas::<1>(board_area);
            let [popup_area] = Layout::vertical([Constraint::Length(3)])
                .flex(Flex::Center)
                .areas::<1>(popup_area);
            let inner = block.inner(popup_area);
            Clear.render(popup_area, buf);
            block.render(popup_area, buf);
            let [text_area] = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .areas::<1>(inner);
            text.render(text_area, buf);
        }
    }
}
