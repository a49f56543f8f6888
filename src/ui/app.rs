use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::application::todo_store::{StoreError, TodoStore};
use crate::domain::slot::PersistenceSlot;
use crate::domain::todo::{normalize_text, FilterType, Todo, TodoId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    View,
    Create { draft: String },
    /// Editing is tied to the todo's id, not its row, so it survives filtering.
    Edit { id: TodoId, draft: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control { Continue, Quit }

/// Presentation state around a [`TodoStore`]: filter, selection, input mode.
/// None of this is persisted.
pub struct App<S: PersistenceSlot> {
    store: TodoStore<S>,
    filter: FilterType,
    selected: usize,
    mode: Mode,
    notice: Option<String>,
}

impl<S: PersistenceSlot> App<S> {
    pub fn new(store: TodoStore<S>) -> Self {
        Self { store, filter: FilterType::All, selected: 0, mode: Mode::View, notice: None }
    }

    pub fn store(&self) -> &TodoStore<S> { &self.store }
    pub fn filter(&self) -> FilterType { self.filter }
    pub fn mode(&self) -> &Mode { &self.mode }
    pub fn selected(&self) -> usize { self.selected }
    pub fn notice(&self) -> Option<&str> { self.notice.as_deref() }

    pub fn visible(&self) -> Vec<&Todo> { self.store.filtered_view(self.filter) }

    pub fn selected_todo(&self) -> Option<&Todo> { self.visible().get(self.selected).copied() }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        // Only act on presses; repeats and releases would duplicate input.
        if key.kind != KeyEventKind::Press { return Control::Continue; }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }
        self.notice = None;

        if self.mode == Mode::View { return self.handle_view_key(key.code); }
        match key.code {
            KeyCode::Esc => self.mode = Mode::View,
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                if let Some(draft) = self.draft_mut() { draft.pop(); }
            }
            KeyCode::Char(c) => {
                if let Some(draft) = self.draft_mut() { draft.push(c); }
            }
            _ => {}
        }
        Control::Continue
    }

    fn draft_mut(&mut self) -> Option<&mut String> {
        match &mut self.mode {
            Mode::View => None,
            Mode::Create { draft } | Mode::Edit { draft, .. } => Some(draft),
        }
    }

    fn handle_view_key(&mut self, code: KeyCode) -> Control {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.visible().len() { self.selected += 1; }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.selected_todo().map(|t| t.id.clone()) {
                    let result = self.store.toggle(&id);
                    self.report(result);
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_todo().map(|t| t.id.clone()) {
                    let result = self.store.delete(&id);
                    self.report(result);
                }
            }
            KeyCode::Char('n') => self.mode = Mode::Create { draft: String::new() },
            KeyCode::Char('e') => {
                if let Some((id, draft)) = self.selected_todo().map(|t| (t.id.clone(), t.text.clone())) {
                    self.mode = Mode::Edit { id, draft };
                }
            }
            KeyCode::Char('f') => self.filter = self.filter.next(),
            _ => {}
        }
        self.clamp_selection();
        Control::Continue
    }

    /// Enter in create/edit mode. A blank draft keeps the input open.
    fn submit(&mut self) {
        let mode = std::mem::replace(&mut self.mode, Mode::View);
        match mode {
            Mode::Create { draft } if normalize_text(&draft).is_some() => {
                let result = self.store.add(&draft);
                if let Some(Some(id)) = self.report(result) {
                    self.select_id(id);
                }
            }
            Mode::Edit { id, draft } if normalize_text(&draft).is_some() => {
                let result = self.store.edit(&id, &draft);
                self.report(result);
            }
            unchanged => self.mode = unchanged,
        }
        self.clamp_selection();
    }

    fn report<T>(&mut self, result: Result<T, StoreError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::error!(error = %err, "change kept in memory but not saved");
                self.notice = Some(format!("Not saved: {err}"));
                None
            }
        }
    }

    fn select_id(&mut self, id: TodoId) {
        if let Some(idx) = self.visible().iter().position(|t| t.id == id) {
            self.selected = idx;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if len == 0 { self.selected = 0; } else if self.selected >= len { self.selected = len - 1; }
    }
}
