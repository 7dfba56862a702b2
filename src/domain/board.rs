//! Board state machine
//!
//! A [`TaskBoard`] owns two newest-first lists, pending and completed, plus
//! the draft text of the add-task input. Every mutating operation either
//! applies fully and returns a [`Transition`], or leaves the board untouched
//! and returns `None`. There are no error paths: unknown IDs and blank text
//! are silent no-ops.
//!
//! Subscribers registered with [`TaskBoard::subscribe`] run synchronously
//! after each effective transition, in registration order.

use std::fmt;

use serde::Serialize;

use super::id::{IdGenerator, TaskId};
use super::task::Task;

/// Which list a task lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Pending,
    Completed,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Pending => "pending",
            Column::Completed => "completed",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An effective change to the board
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// A task was created at the front of pending
    Added(TaskId),
    /// A task moved from pending to the front of completed
    Completed(TaskId),
    /// A task moved from completed to the front of pending
    Restored(TaskId),
    /// A completed task was removed for good
    Deleted(Task),
    /// The draft text was replaced
    DraftChanged,
}

impl Transition {
    /// The task this transition concerns, if any
    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            Transition::Added(id) | Transition::Completed(id) | Transition::Restored(id) => {
                Some(*id)
            }
            Transition::Deleted(task) => Some(task.id),
            Transition::DraftChanged => None,
        }
    }
}

/// Snapshot of everything the board holds
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoardState {
    pending: Vec<Task>,
    completed: Vec<Task>,
    draft: String,
}

impl BoardState {
    pub fn pending(&self) -> &[Task] {
        &self.pending
    }

    pub fn completed(&self) -> &[Task] {
        &self.completed
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Tasks in the given column
    pub fn column(&self, column: Column) -> &[Task] {
        match column {
            Column::Pending => &self.pending,
            Column::Completed => &self.completed,
        }
    }

    /// Finds a task in either column
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.pending
            .iter()
            .chain(self.completed.iter())
            .find(|t| t.id == id)
    }

    /// Returns the column holding the task, or None if it does not exist
    pub fn column_of(&self, id: TaskId) -> Option<Column> {
        if self.pending.iter().any(|t| t.id == id) {
            Some(Column::Pending)
        } else if self.completed.iter().any(|t| t.id == id) {
            Some(Column::Completed)
        } else {
            None
        }
    }

    /// Total number of live tasks
    pub fn len(&self) -> usize {
        self.pending.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.completed.is_empty()
    }
}

/// Handle returned by [`TaskBoard::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&Transition, &BoardState)>;

/// The task board: state plus the transitions that mutate it
pub struct TaskBoard {
    state: BoardState,
    ids: IdGenerator,
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_subscription: u64,
}

impl TaskBoard {
    /// Creates an empty board
    pub fn new() -> Self {
        Self {
            state: BoardState::default(),
            ids: IdGenerator::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Adds a task from raw text, prepending it to pending and clearing the draft
    pub fn add_task(&mut self, text: &str) -> Option<Transition> {
        // Validate before taking an ID so blank input never consumes one
        let text = super::task::normalize_text(text).ok()?.to_string();
        let task = Task::new(self.ids.next_id(), &text).ok()?;
        let id = task.id;

        self.state.pending.insert(0, task);
        self.state.draft.clear();

        Some(self.emit(Transition::Added(id)))
    }

    /// Adds the current draft as a task
    pub fn submit_draft(&mut self) -> Option<Transition> {
        let draft = self.state.draft.clone();
        self.add_task(&draft)
    }

    /// Moves a pending task to the front of completed
    pub fn complete_task(&mut self, id: TaskId) -> Option<Transition> {
        let task = take(&mut self.state.pending, id)?;
        self.state.completed.insert(0, task);
        Some(self.emit(Transition::Completed(id)))
    }

    /// Moves a completed task back to the front of pending
    pub fn restore_task(&mut self, id: TaskId) -> Option<Transition> {
        let task = take(&mut self.state.completed, id)?;
        self.state.pending.insert(0, task);
        Some(self.emit(Transition::Restored(id)))
    }

    /// Permanently removes a completed task
    pub fn delete_task(&mut self, id: TaskId) -> Option<Transition> {
        let task = take(&mut self.state.completed, id)?;
        Some(self.emit(Transition::Deleted(task)))
    }

    /// Replaces the draft text
    ///
    /// Returns `None` when the text is unchanged.
    pub fn set_draft(&mut self, text: impl Into<String>) -> Option<Transition> {
        let text = text.into();
        if text == self.state.draft {
            return None;
        }
        self.state.draft = text;
        Some(self.emit(Transition::DraftChanged))
    }

    /// Registers a callback that runs after every effective transition
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Transition, &BoardState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscription, returning false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != len_before
    }

    // Queries

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn pending(&self) -> &[Task] {
        &self.state.pending
    }

    pub fn completed(&self) -> &[Task] {
        &self.state.completed
    }

    pub fn draft(&self) -> &str {
        &self.state.draft
    }

    pub fn pending_len(&self) -> usize {
        self.state.pending.len()
    }

    pub fn completed_len(&self) -> usize {
        self.state.completed.len()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.state.get(id)
    }

    pub fn column_of(&self, id: TaskId) -> Option<Column> {
        self.state.column_of(id)
    }

    fn emit(&mut self, transition: Transition) -> Transition {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&transition, &self.state);
        }
        transition
    }
}

impl Default for TaskBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TaskBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskBoard")
            .field("state", &self.state)
            .field("next_id", &self.ids.peek())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Removes the task with the given ID from a list
fn take(list: &mut Vec<Task>, id: TaskId) -> Option<Task> {
    let index = list.iter().position(|t| t.id == id)?;
    Some(list.remove(index))
}
