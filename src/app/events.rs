// Terminal event dispatch.
// - Maps key presses to form actions based on popups and the focused region.
// - Routes bracketed paste to the focused text field or the drop target.
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::Focus;

use super::App;

const KEYBINDS_PAGE_STEP: isize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

impl App {
    pub fn handle_event(&mut self, event: Event) -> Control {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Paste(text) => {
                self.handle_paste(&text);
                Control::Continue
            }
            _ => Control::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Control {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        // Windows reports AltGr characters as Ctrl+Alt.
        let alt_gr_char = ctrl && alt && matches!(key.code, KeyCode::Char(_));

        if ctrl && !alt_gr_char && matches!(key.code, KeyCode::Char('c' | 'q')) {
            return Control::Quit;
        }

        if self.show_keybinds {
            match key.code {
                KeyCode::Esc | KeyCode::F(1) => self.hide_keybinds(),
                KeyCode::Down | KeyCode::Char('j') => self.scroll_keybinds_by(1),
                KeyCode::Up | KeyCode::Char('k') => self.scroll_keybinds_by(-1),
                KeyCode::PageDown => self.scroll_keybinds_by(KEYBINDS_PAGE_STEP),
                KeyCode::PageUp => self.scroll_keybinds_by(-KEYBINDS_PAGE_STEP),
                _ => {}
            }
            return Control::Continue;
        }

        if key.code == KeyCode::F(1) {
            self.toggle_keybinds();
            return Control::Continue;
        }

        if self.picker.is_some() {
            self.handle_picker_key(key);
            return Control::Continue;
        }

        if ctrl && !alt_gr_char {
            match key.code {
                KeyCode::Char('n') => self.select_next_tab(),
                KeyCode::Char('p') => self.select_previous_tab(),
                KeyCode::Char('r') => self.analyze(),
                _ => {}
            }
            return Control::Continue;
        }

        if alt && !alt_gr_char {
            if let KeyCode::Char(digit) = key.code
                && let Some(number) = digit.to_digit(10)
            {
                self.select_tab_by_number(number as usize);
            }
            return Control::Continue;
        }

        match key.code {
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_previous(),
            _ => match self.focus {
                Focus::CodeInput | Focus::GithubUrl => self.handle_text_key(key),
                Focus::DropZone => {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                        self.open_picker();
                    }
                }
                Focus::Activity => self.handle_activity_key(key),
            },
        }
        Control::Continue
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(ch) => self.insert_char(ch),
            KeyCode::Enter if self.focus == Focus::GithubUrl => self.analyze(),
            KeyCode::Enter => self.insert_newline(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Up => self.move_cursor_up(),
            KeyCode::Down => self.move_cursor_down(),
            KeyCode::Home => self.move_cursor_home(),
            KeyCode::End => self.move_cursor_end(),
            _ => {}
        }
    }

    fn handle_activity_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.activity.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.activity.scroll_up(),
            KeyCode::PageDown => self.activity.page_down(),
            KeyCode::PageUp => self.activity.page_up(),
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.close_picker(),
            KeyCode::Enter => self.activate_picker_selection(),
            KeyCode::Char(' ') => self.with_picker(|picker| {
                picker.toggle_mark_selected();
                Ok(())
            }),
            KeyCode::Down | KeyCode::Char('j') => self.with_picker(|picker| {
                picker.next();
                Ok(())
            }),
            KeyCode::Up | KeyCode::Char('k') => self.with_picker(|picker| {
                picker.previous();
                Ok(())
            }),
            KeyCode::PageDown => self.with_picker(|picker| {
                picker.page_down();
                Ok(())
            }),
            KeyCode::PageUp => self.with_picker(|picker| {
                picker.page_up();
                Ok(())
            }),
            KeyCode::Right | KeyCode::Char('l') => self.with_picker(|picker| picker.enter_selected_dir()),
            KeyCode::Left | KeyCode::Backspace | KeyCode::Char('h' | '-') => {
                self.with_picker(|picker| picker.go_parent_dir())
            }
            KeyCode::Char('_') => self.with_picker(|picker| picker.go_initial_dir()),
            KeyCode::Char('r') => self.with_picker(|picker| picker.reload()),
            _ => {}
        }
    }

    fn handle_paste(&mut self, text: &str) {
        if self.show_keybinds || self.picker.is_some() {
            return;
        }
        match self.focus {
            Focus::CodeInput | Focus::GithubUrl => self.insert_text(text),
            Focus::DropZone => self.drop_payload(text),
            Focus::Activity => {}
        }
    }
}
