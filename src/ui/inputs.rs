use super::AppAction;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;

/// Convert a raw `KeyEvent` from crossterm into a high-level [`AppAction`].
/// Applies to browse mode only; search editing consumes keys directly in the
/// event loop. Returns `None` for keys that are not handled.
pub fn key_event_to_action(ev: &KeyEvent) -> Option<AppAction> {
    use KeyCode::*;
    match ev.code {
        Char('q') | Esc => Some(AppAction::Quit),
        Up | Char('k') => Some(AppAction::Up),
        Down | Char('j') => Some(AppAction::Down),
        Char('/') => Some(AppAction::EditSearch),
        Char('c') => Some(AppAction::NextCategory),
        Char('s') => Some(AppAction::NextSort),
        Enter | Char('a') => Some(AppAction::AddToCart),
        Char('o') => Some(AppAction::ToggleCart),
        Char('+') => Some(AppAction::IncrementQuantity),
        Char('-') => Some(AppAction::DecrementQuantity),
        Char('t') => Some(AppAction::ToggleTheme),
        Char('r') => Some(AppAction::Retry),
        Char('?') => Some(AppAction::Help),
        _ => None,
    }
}
