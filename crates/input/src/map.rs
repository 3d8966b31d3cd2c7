//! Key mapping from terminal events to game actions.
//!
//! The mapping is a static table rather than nested matches: each row names
//! the phase it applies to, the key, and the edge (press or release). `None`
//! in the phase or key column matches anything. The first matching row wins.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{Action, Edge, GamePhase};

/// One row of the key table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub phase: Option<GamePhase>,
    pub key: Option<KeyCode>,
    pub edge: Edge,
    pub action: Action,
}

impl Binding {
    const fn new(phase: Option<GamePhase>, key: Option<KeyCode>, edge: Edge, action: Action) -> Self {
        Self {
            phase,
            key,
            edge,
            action,
        }
    }

    pub fn matches(&self, phase: GamePhase, key: KeyCode, edge: Edge) -> bool {
        self.edge == edge
            && self.phase.map_or(true, |p| p == phase)
            && self.key.map_or(true, |k| k == key)
    }
}

use Edge::{Press, Release};
use GamePhase::{GameOver, Paused, Playing, Starting, Winning};

/// Key table, in priority order.
pub static BINDINGS: &[Binding] = &[
    Binding::new(None, Some(KeyCode::Char('q')), Press, Action::Exit),
    Binding::new(None, Some(KeyCode::Esc), Press, Action::Exit),
    Binding::new(Some(Starting), None, Press, Action::Play),
    Binding::new(Some(GameOver), Some(KeyCode::Enter), Press, Action::Play),
    Binding::new(Some(Winning), Some(KeyCode::Enter), Press, Action::Play),
    Binding::new(Some(Paused), Some(KeyCode::Char('p')), Press, Action::Resume),
    Binding::new(Some(Playing), Some(KeyCode::Char('p')), Press, Action::Pause),
    Binding::new(Some(Playing), Some(KeyCode::Up), Press, Action::Rotate),
    Binding::new(Some(Playing), Some(KeyCode::Left), Press, Action::ShiftLeft),
    Binding::new(Some(Playing), Some(KeyCode::Right), Press, Action::ShiftRight),
    Binding::new(Some(Playing), Some(KeyCode::Down), Press, Action::FallFast(Press)),
    Binding::new(Some(Playing), Some(KeyCode::Down), Release, Action::FallFast(Release)),
    Binding::new(Some(Playing), Some(KeyCode::Char(' ')), Press, Action::Drop),
];

/// Look up the action for a key edge in the given phase.
pub fn decode(phase: GamePhase, key: KeyCode, edge: Edge) -> Option<Action> {
    BINDINGS
        .iter()
        .find(|b| b.matches(phase, key, edge))
        .map(|b| b.action)
}

/// Edge of a crossterm key event. Auto-repeat has no edge.
pub fn edge_of(kind: KeyEventKind) -> Option<Edge> {
    match kind {
        KeyEventKind::Press => Some(Edge::Press),
        KeyEventKind::Release => Some(Edge::Release),
        KeyEventKind::Repeat => None,
    }
}

/// Decode a full crossterm key event: Ctrl-C always exits, repeats are dropped.
pub fn decode_event(phase: GamePhase, key: KeyEvent) -> Option<Action> {
    let edge = edge_of(key.kind)?;
    if should_quit(key) {
        return Some(Action::Exit);
    }
    decode(phase, key.code, edge)
}

/// Ctrl-C press.
pub fn should_quit(key: KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && key.code == KeyCode::Char('c')
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(decode(Playing, KeyCode::Left, Press), Some(Action::ShiftLeft));
        assert_eq!(decode(Playing, KeyCode::Right, Press), Some(Action::ShiftRight));
        assert_eq!(decode(Playing, KeyCode::Up, Press), Some(Action::Rotate));
        assert_eq!(decode(Playing, KeyCode::Char(' '), Press), Some(Action::Drop));
    }

    #[test]
    fn test_down_edges() {
        assert_eq!(
            decode(Playing, KeyCode::Down, Press),
            Some(Action::FallFast(Press))
        );
        assert_eq!(
            decode(Playing, KeyCode::Down, Release),
            Some(Action::FallFast(Release))
        );
        assert_eq!(decode(Playing, KeyCode::Left, Release), None);
    }

    #[test]
    fn test_pause_depends_on_phase() {
        assert_eq!(decode(Playing, KeyCode::Char('p'), Press), Some(Action::Pause));
        assert_eq!(decode(Paused, KeyCode::Char('p'), Press), Some(Action::Resume));
        assert_eq!(decode(Paused, KeyCode::Left, Press), None);
    }

    #[test]
    fn test_any_key_starts() {
        assert_eq!(decode(Starting, KeyCode::Char('x'), Press), Some(Action::Play));
        assert_eq!(decode(Starting, KeyCode::Down, Press), Some(Action::Play));
        assert_eq!(decode(Starting, KeyCode::Down, Release), None);
    }

    #[test]
    fn test_quit_wins_over_any_key() {
        assert_eq!(decode(Starting, KeyCode::Char('q'), Press), Some(Action::Exit));
        assert_eq!(decode(Winning, KeyCode::Esc, Press), Some(Action::Exit));
    }

    #[test]
    fn test_event_filters() {
        let repeat = KeyEvent {
            kind: KeyEventKind::Repeat,
            ..KeyEvent::from(KeyCode::Left)
        };
        assert_eq!(decode_event(Playing, repeat), None);
        assert_eq!(
            decode_event(Playing, release(KeyCode::Down)),
            Some(Action::FallFast(Release))
        );
        assert_eq!(
            decode_event(Paused, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Exit)
        );
        assert_eq!(decode_event(Paused, release(KeyCode::Char('c'))), None);
    }
}
