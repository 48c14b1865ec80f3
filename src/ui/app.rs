use crate::config::Context;
use crate::store::{ContextStore, StoreError};
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Discrete input events consumed by the selection model. One event is fully
/// processed (including any blocking subprocess) before the next is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    MoveUp,
    MoveDown,
    Execute,
    Resize(u16, u16),
    Quit,
}

impl AppEvent {
    /// Map a key press to a selection-model event, if it is bound.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Self::Quit),
            KeyCode::Up | KeyCode::Char('k') => Some(Self::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Self::MoveDown),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Self::Execute),
            _ => None,
        }
    }
}

/// Interactive state: a name-sorted snapshot of the store, a cursor into it,
/// the last execution report, and the viewport dimensions.
///
/// The snapshot is not live. It is re-pulled from the store after every
/// mutating action, and the cursor is re-anchored to the same context name
/// when possible.
pub struct App {
    store: ContextStore,
    pub contexts: Vec<Context>,
    pub cursor: usize,
    pub last_output: String,
    pub width: u16,
    pub height: u16,
    pub should_quit: bool,
    pub theme: Theme,
}

impl App {
    pub fn new(store: ContextStore) -> Self {
        let contexts = store.list();
        let theme = Theme::from_colors(&store.config().theme);
        Self {
            store,
            contexts,
            cursor: 0,
            last_output: String::new(),
            width: 80,
            height: 24,
            should_quit: false,
            theme,
        }
    }

    /// The context under the cursor.
    pub fn selected(&self) -> Option<&Context> {
        self.contexts.get(self.cursor)
    }

    /// Name of the active context, if any.
    pub fn current_name(&self) -> &str {
        self.store.current_name()
    }

    /// Apply one event. Only a persistence failure during `Execute` is an
    /// error; lookup failures are rendered into the output buffer and the
    /// loop continues.
    pub fn handle(&mut self, event: AppEvent) -> Result<(), StoreError> {
        match event {
            AppEvent::MoveUp => {
                self.cursor = self.cursor.saturating_sub(1);
                // Back to the detail view of the newly selected context.
                self.last_output.clear();
            }
            AppEvent::MoveDown => {
                if self.cursor + 1 < self.contexts.len() {
                    self.cursor += 1;
                }
                self.last_output.clear();
            }
            AppEvent::Resize(width, height) => {
                self.width = width;
                self.height = height;
            }
            AppEvent::Execute => return self.execute_selected(),
            AppEvent::Quit => self.should_quit = true,
        }
        Ok(())
    }

    fn execute_selected(&mut self) -> Result<(), StoreError> {
        // Look up by name, not index, so the cursor survives reordering.
        let Some(name) = self.selected().map(|ctx| ctx.name.clone()) else {
            return Ok(());
        };
        let previous = self.cursor;

        match self.store.execute_job(&name) {
            Ok(result) => self.last_output = result.output,
            Err(err @ StoreError::Persistence(_)) => return Err(err),
            Err(err) => self.last_output = err.to_string(),
        }

        self.refresh(&name, previous);
        Ok(())
    }

    /// Re-pull the snapshot and re-anchor the cursor: same name if it still
    /// exists, else the previous index clamped to the last valid entry.
    fn refresh(&mut self, anchor: &str, previous: usize) {
        self.contexts = self.store.list();
        self.cursor = self
            .contexts
            .iter()
            .position(|ctx| ctx.name == anchor)
            .unwrap_or_else(|| previous.min(self.contexts.len().saturating_sub(1)));
    }
}
