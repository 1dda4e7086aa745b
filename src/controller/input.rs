//! Key event handling

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, Direction};

use super::AppController;

impl AppController {
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // The track dialog is modal
        if self.model.is_dialog_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.dismiss_dialog();
            }
            return;
        }

        if self.model.is_help_popup_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                self.model.toggle_help_popup();
            }
            return;
        }

        match self.model.active_section() {
            ActiveSection::Search => self.handle_search_key(key, now),
            ActiveSection::Results => self.handle_results_key(key, now),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.model.set_active_section(ActiveSection::Results);
            }
            KeyCode::Esc => {
                if self.model.clear_search() {
                    self.query_changed(now);
                }
            }
            KeyCode::Backspace => {
                if self.model.backspace_search() {
                    self.query_changed(now);
                }
            }
            KeyCode::Char(c) => {
                // Ctrl+Alt is AltGr on some layouts and still types text
                let ctrl_combo = key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT);
                if ctrl_combo {
                    if c == 'q' || c == 'Q' {
                        self.model.set_should_quit(true);
                    }
                    return;
                }
                self.model.append_to_search(c);
                self.query_changed(now);
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Up => self.model.move_selection(Direction::Up),
            KeyCode::Down => self.model.move_selection(Direction::Down),
            KeyCode::Left => self.model.move_selection(Direction::Left),
            KeyCode::Right => self.model.move_selection(Direction::Right),
            KeyCode::Enter => self.play_selected(now),
            KeyCode::Tab | KeyCode::Esc | KeyCode::Char('/') => {
                self.model.set_active_section(ActiveSection::Search);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.model.set_should_quit(true),
            KeyCode::Char('h') | KeyCode::Char('H') => self.model.toggle_help_popup(),
            _ => {}
        }
    }
}
