use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::modules::theme::Theme;
use crate::modules::toast::{
    Announcement, BASE_Z, ExitToken, PresentationAdapter, Slot, ToastState, ToastView,
};

/// Frames an entering card takes to settle.
pub const ENTER_FRAMES: u8 = 3;
/// Frames an exiting card takes to disappear.
pub const EXIT_FRAMES: u8 = 3;

const CARD_WIDTH: u16 = 42;
const CARD_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering(u8),
    Shown,
    Leaving(u8),
}

struct Card {
    view: ToastView,
    slot: Option<Slot>,
    phase: Phase,
    exit: Option<ExitToken>,
}

/// What the frame needs to draw one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub view: ToastView,
    pub index: usize,
    pub z: i32,
    pub phase: Phase,
}

/// Terminal presentation root for the toast stack.
///
/// Clones share the same cards: one clone is mounted into the stack, another
/// is kept by the app to advance animations and draw.
#[derive(Clone, Default)]
pub struct ToastLayer {
    cards: Rc<RefCell<Vec<Card>>>,
}

impl ToastLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps every animation by one frame and reports finished exits.
    /// Returns whether anything is still moving.
    pub fn advance(&self) -> bool {
        let finished: Vec<ExitToken> = {
            let mut cards = self.cards.borrow_mut();
            let mut finished = Vec::new();
            cards.retain_mut(|card| {
                card.phase = match card.phase {
                    Phase::Entering(_) if card.view.state == ToastState::Entrance => card.phase,
                    Phase::Entering(n) if n > 1 => Phase::Entering(n - 1),
                    Phase::Entering(_) => Phase::Shown,
                    Phase::Shown => Phase::Shown,
                    Phase::Leaving(n) if n > 1 => Phase::Leaving(n - 1),
                    Phase::Leaving(_) => {
                        finished.extend(card.exit.take());
                        return false;
                    }
                };
                true
            });
            finished
        };

        // The stack calls back into this layer, so the borrow must be released first.
        for exit in finished {
            exit.complete();
        }
        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        self.cards
            .borrow()
            .iter()
            .any(|card| card.phase != Phase::Shown)
    }

    /// Cards in paint order: lowest stacking priority first.
    pub fn cards(&self) -> Vec<CardView> {
        let mut views: Vec<CardView> = self
            .cards
            .borrow()
            .iter()
            .filter_map(|card| {
                let slot = card.slot?;
                Some(CardView {
                    view: card.view.clone(),
                    index: slot.index,
                    z: slot.z,
                    phase: card.phase,
                })
            })
            .collect();
        views.sort_by_key(|card| {
            let leaving = matches!(card.phase, Phase::Leaving(_));
            (!leaving, card.z)
        });
        views
    }

    pub fn len(&self) -> usize {
        self.cards.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PresentationAdapter for ToastLayer {
    fn render(&mut self, view: &ToastView) {
        let mut cards = self.cards.borrow_mut();
        if view.state == ToastState::Removed {
            cards.retain(|card| card.view.id != view.id);
            return;
        }
        match cards.iter_mut().find(|card| card.view.id == view.id) {
            Some(card) => card.view = view.clone(),
            None => cards.push(Card {
                view: view.clone(),
                slot: None,
                phase: Phase::Entering(ENTER_FRAMES),
                exit: None,
            }),
        }
    }

    fn begin_exit(&mut self, exit: ExitToken) {
        let unknown = {
            let mut cards = self.cards.borrow_mut();
            match cards.iter_mut().find(|card| card.view.id == exit.id()) {
                Some(card) => {
                    card.phase = Phase::Leaving(EXIT_FRAMES);
                    card.exit = Some(exit);
                    None
                }
                None => Some(exit),
            }
        };
        // Nothing on screen to animate.
        if let Some(exit) = unknown {
            exit.complete();
        }
    }

    fn reposition(&mut self, slots: &[Slot]) {
        let mut cards = self.cards.borrow_mut();
        let mut leaving = Vec::new();
        for (i, card) in cards.iter_mut().enumerate() {
            match slots.iter().find(|slot| slot.id == card.view.id) {
                Some(slot) => card.slot = Some(*slot),
                None => leaving.push(i),
            }
        }

        // Leaving cards keep their relative order below the live ones.
        leaving.sort_by_key(|&i| cards[i].slot.map(|slot| slot.index));
        for (offset, i) in leaving.into_iter().enumerate() {
            let card = &mut cards[i];
            let index = slots.len() + offset;
            card.slot = Some(Slot {
                id: card.view.id,
                index,
                z: BASE_Z - index as i32,
            });
        }
    }
}

/// Draws the stack in the top-right corner of `area`, newest on top.
pub fn draw_toasts(f: &mut Frame, area: Rect, layer: &ToastLayer, theme: Theme) {
    let palette = theme.palette();
    let width = CARD_WIDTH.min(area.width.saturating_sub(2));
    if width < 12 {
        return;
    }
    let x = area.x + area.width - width - 1;

    for card in layer.cards() {
        let offset = match card.phase {
            Phase::Entering(n) | Phase::Leaving(n) => u16::from(n),
            Phase::Shown => 0,
        };
        let y = area.y + 1 + card.index as u16 * CARD_HEIGHT + offset;
        if y + CARD_HEIGHT > area.y + area.height {
            continue;
        }
        let rect = Rect { x, y, width, height: CARD_HEIGHT };

        let presentation = card.view.variant.presentation();
        let accent = card.view.variant.accent(theme);
        let mut title_style = Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD);
        let mut body_style = Style::default().fg(palette.muted);
        if card.phase != Phase::Shown {
            title_style = title_style.add_modifier(Modifier::DIM);
            body_style = body_style.add_modifier(Modifier::DIM);
        }

        let mut lines = vec![Line::from(vec![
            Span::styled(format!("{} ", presentation.glyph), Style::default().fg(accent)),
            Span::styled(card.view.title.clone(), title_style),
        ])];
        if let Some(message) = &card.view.message {
            lines.push(Line::from(Span::styled(message.clone(), body_style)));
        }

        let border_type = match card.view.announcement() {
            Announcement::Alert => BorderType::Thick,
            Announcement::Status => BorderType::Rounded,
        };
        let block = Block::default()
            .title(presentation.label)
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(palette.surface));

        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            rect,
        );
    }
}
