use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use report_core::{AppViewModel, Column, Msg};

/// Which widget receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFocus {
    #[default]
    Table,
    Search,
    Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Dispatch(Msg),
    Quit,
}

/// Maps key presses to messages. Owns only the input focus; everything else
/// is read from the current view model.
#[derive(Debug, Default)]
pub struct Controller {
    focus: InputFocus,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> InputFocus {
        self.focus
    }

    pub fn handle_key(&mut self, key: KeyEvent, view: &AppViewModel) -> Option<Intent> {
        // crossterm also emits release and repeat events on some platforms.
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Intent::Quit);
        }
        match self.focus {
            InputFocus::Table => self.table_key(key.code, view),
            InputFocus::Search => self.search_key(key.code, view),
            InputFocus::Url => self.url_key(key.code, view),
        }
    }

    fn table_key(&mut self, code: KeyCode, view: &AppViewModel) -> Option<Intent> {
        let msg = match code {
            KeyCode::Char('q') => return Some(Intent::Quit),
            KeyCode::Char('/') => {
                self.focus = InputFocus::Search;
                return None;
            }
            KeyCode::Char('u') => {
                self.focus = InputFocus::Url;
                return None;
            }
            KeyCode::Char(digit @ '1'..='4') => {
                Msg::SortToggled(column_at(digit as usize - '1' as usize)?)
            }
            KeyCode::F(n @ 1..=4) => Msg::ColumnToggled(column_at(usize::from(n) - 1)?),
            KeyCode::Left => Msg::PrevPage,
            KeyCode::Right => Msg::NextPage,
            KeyCode::Home => Msg::PageChanged(1),
            KeyCode::End => Msg::PageChanged(view.pager.total),
            KeyCode::Char('e') => Msg::ExportClicked,
            KeyCode::Char('r') => Msg::RefreshRequested,
            KeyCode::Char('t') => Msg::ThemeToggled,
            KeyCode::Esc => Msg::DismissNotice,
            _ => return None,
        };
        Some(Intent::Dispatch(msg))
    }

    fn search_key(&mut self, code: KeyCode, view: &AppViewModel) -> Option<Intent> {
        let mut text = view.search_text.clone();
        match code {
            KeyCode::Enter | KeyCode::Esc => {
                self.focus = InputFocus::Table;
                return None;
            }
            KeyCode::Backspace => {
                text.pop()?;
            }
            KeyCode::Char(c) => text.push(c),
            _ => return None,
        }
        Some(Intent::Dispatch(Msg::SearchChanged(text)))
    }

    fn url_key(&mut self, code: KeyCode, view: &AppViewModel) -> Option<Intent> {
        let mut text = view.url_input.clone();
        match code {
            KeyCode::Enter => {
                self.focus = InputFocus::Table;
                return Some(Intent::Dispatch(Msg::UrlSubmitted));
            }
            KeyCode::Esc => {
                self.focus = InputFocus::Table;
                return Some(Intent::Dispatch(Msg::UrlInputChanged(
                    view.source_url.clone(),
                )));
            }
            KeyCode::Backspace => {
                text.pop()?;
            }
            KeyCode::Char(c) => text.push(c),
            _ => return None,
        }
        Some(Intent::Dispatch(Msg::UrlInputChanged(text)))
    }
}

fn column_at(index: usize) -> Option<Column> {
    Column::ALL.get(index).copied()
}
