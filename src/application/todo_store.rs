use thiserror::Error;

use crate::domain::slot::{PersistenceSlot, SlotError};
use crate::domain::todo::{normalize_text, FilterType, Stats, Todo, TodoId};
use crate::infrastructure::snapshot;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode todos")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Slot(#[from] SlotError),
}

/// Owner of the todo collection.
///
/// Every mutation is applied in memory first and then the whole collection is
/// written to the slot. A failed write is returned as `Err`, but the in-memory
/// change stays: the next successful persist catches the slot up.
pub struct TodoStore<S: PersistenceSlot> {
    slot: S,
    todos: Vec<Todo>,
}

impl<S: PersistenceSlot> TodoStore<S> {
    pub fn new(slot: S) -> Self { Self { slot, todos: Vec::new() } }

    /// Creates a store hydrated from whatever the slot currently holds.
    pub fn open(slot: S) -> Self {
        let mut store = Self::new(slot);
        store.load();
        store
    }

    pub fn slot(&self) -> &S { &self.slot }

    /// Replaces the collection with the slot's contents. Never fails: an absent,
    /// unreadable or unparsable value leaves the collection empty.
    pub fn load(&mut self) {
        self.todos.clear();
        let key = self.slot.key().to_string();
        let raw = match self.slot.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!(%key, "no saved todos");
                return;
            }
            Err(err) => {
                tracing::warn!(%key, error = %err, "failed to read saved todos");
                return;
            }
        };
        match snapshot::decode(&raw) {
            Ok(decoded) => {
                if decoded.skipped > 0 {
                    tracing::warn!(%key, skipped = decoded.skipped, "ignored malformed saved todos");
                }
                self.todos = decoded.todos;
                tracing::info!(%key, count = self.todos.len(), "loaded todos");
            }
            Err(err) => tracing::warn!(%key, error = %err, "failed to parse saved todos"),
        }
    }

    pub fn persist(&self) -> Result<(), StoreError> {
        let value = snapshot::encode(&self.todos)?;
        self.slot.write(&value).map_err(|err| {
            tracing::error!(key = %self.slot.key(), error = %err, "failed to save todos");
            err
        })?;
        Ok(())
    }

    /// Prepends a new todo. Blank text is ignored and nothing is written.
    pub fn add(&mut self, text: &str) -> Result<Option<TodoId>, StoreError> {
        let Some(text) = normalize_text(text) else { return Ok(None) };
        let todo = Todo::new(text);
        let id = todo.id.clone();
        self.todos.insert(0, todo);
        tracing::debug!(%id, "todo added");
        self.persist()?;
        Ok(Some(id))
    }

    pub fn toggle(&mut self, id: &TodoId) -> Result<bool, StoreError> {
        let changed = match self.position(id) {
            Some(idx) => {
                let todo = &mut self.todos[idx];
                todo.completed = !todo.completed;
                tracing::debug!(%id, completed = todo.completed, "todo toggled");
                true
            }
            None => false,
        };
        self.persist()?;
        Ok(changed)
    }

    pub fn delete(&mut self, id: &TodoId) -> Result<bool, StoreError> {
        let changed = match self.position(id) {
            Some(idx) => {
                self.todos.remove(idx);
                tracing::debug!(%id, "todo deleted");
                true
            }
            None => false,
        };
        self.persist()?;
        Ok(changed)
    }

    /// Replaces the text of `id`. Blank text is ignored and nothing is written.
    pub fn edit(&mut self, id: &TodoId, new_text: &str) -> Result<bool, StoreError> {
        let Some(text) = normalize_text(new_text) else { return Ok(false) };
        let changed = match self.position(id) {
            Some(idx) => {
                self.todos[idx].text = text;
                tracing::debug!(%id, "todo edited");
                true
            }
            None => false,
        };
        self.persist()?;
        Ok(changed)
    }

    pub fn todos(&self) -> &[Todo] { &self.todos }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> { self.todos.iter().find(|t| &t.id == id) }

    pub fn len(&self) -> usize { self.todos.len() }

    pub fn is_empty(&self) -> bool { self.todos.is_empty() }

    pub fn filtered_view(&self, filter: FilterType) -> Vec<&Todo> {
        self.todos.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn active_count(&self) -> usize { self.todos.iter().filter(|t| !t.completed).count() }

    pub fn stats(&self) -> Stats {
        let total = self.todos.len();
        let active = self.active_count();
        Stats { active, completed: total - active, total }
    }

    fn position(&self, id: &TodoId) -> Option<usize> { self.todos.iter().position(|t| &t.id == id) }
}
