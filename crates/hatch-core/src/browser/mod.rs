//! State machine behind the interactive project browser.
//!
//! [`Browser`] owns the view state of one session. The front end maps raw
//! terminal input to an [`Action`], feeds it to [`Browser::update`], and
//! redraws from the resulting state; rendering never mutates it. Filesystem
//! work triggered by a transition (create, archive, remove, refresh) runs
//! synchronously inside that transition.

mod update;

use std::path::PathBuf;

use tracing::debug;

use crate::clock::Clock;
use crate::fuzzy::{NO_MATCH, fuzzy_score};
use crate::project::{Project, list_projects};
use crate::{HatchError, Result};

/// Initial hint shown in the status line.
pub const INITIAL_STATUS: &str = "Use arrows to move, Enter to open/create";

/// Input to the browser, already decoupled from any terminal library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Esc or Ctrl+C.
    Cancel,
    MoveUp,
    MoveDown,
    /// A printable character (space included) typed into the filter.
    Input(char),
    Backspace,
    /// Enter.
    Accept,
    RequestArchive,
    RequestRemove,
    Resize(u16, u16),
}

/// Destructive action waiting for a yes/no.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Archive,
    Remove,
}

impl ConfirmAction {
    pub fn label(self) -> &'static str {
        match self {
            ConfirmAction::Archive => "Archive",
            ConfirmAction::Remove => "Remove",
        }
    }
}

/// How a session ended.
#[derive(Debug)]
pub enum Outcome {
    Selected(PathBuf),
    /// Ended on purpose without picking anything.
    Cancelled,
    Failed(HatchError),
}

/// State of one interactive browsing session.
pub struct Browser {
    pub root: PathBuf,
    /// Full listing, newest first.
    pub projects: Vec<Project>,
    /// Indices into `projects` that match the query, best first.
    pub filtered: Vec<usize>,
    /// Row under the cursor; `filtered.len()` is the create row when shown.
    pub cursor: usize,
    pub query: String,
    pub confirm: Option<ConfirmAction>,
    pub selected_path: Option<PathBuf>,
    pub status: String,
    pub should_quit: bool,
    pub error: Option<HatchError>,
    pub width: u16,
    pub height: u16,
    clock: Box<dyn Clock>,
}

impl Browser {
    pub fn new(root: PathBuf, projects: Vec<Project>, clock: Box<dyn Clock>) -> Self {
        let mut browser = Self {
            root,
            projects,
            filtered: Vec::new(),
            cursor: 0,
            query: String::new(),
            confirm: None,
            selected_path: None,
            status: INITIAL_STATUS.to_string(),
            should_quit: false,
            error: None,
            width: 100,
            height: 28,
            clock,
        };
        browser.refresh_filter();
        browser
    }

    /// Start a session from a fresh listing of `root`.
    pub fn open(root: PathBuf, clock: Box<dyn Clock>) -> Result<Self> {
        let projects = list_projects(&root)?;
        Ok(Self::new(root, projects, clock))
    }

    /// Query with surrounding whitespace removed; names the create row.
    pub fn create_input(&self) -> &str {
        self.query.trim()
    }

    pub fn has_create_row(&self) -> bool {
        !self.create_input().is_empty()
    }

    pub fn is_create_row(&self, row: usize) -> bool {
        self.has_create_row() && row == self.filtered.len()
    }

    pub fn row_count(&self) -> usize {
        self.filtered.len() + usize::from(self.has_create_row())
    }

    /// Project under the cursor, if the cursor is on a real project row.
    pub fn current_project(&self) -> Option<&Project> {
        if self.is_create_row(self.cursor) {
            return None;
        }
        self.filtered
            .get(self.cursor)
            .and_then(|&i| self.projects.get(i))
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Local> {
        self.clock.now()
    }

    /// Re-rank every project against the query and clamp the cursor.
    ///
    /// Ties on score keep the listing order (name descending).
    pub fn refresh_filter(&mut self) {
        let mut scored: Vec<(usize, i32)> = self
            .projects
            .iter()
            .enumerate()
            .map(|(i, project)| (i, fuzzy_score(&project.name, &self.query)))
            .filter(|&(_, score)| score != NO_MATCH)
            .collect();

        scored.sort_by(|&(a, score_a), &(b, score_b)| {
            score_b
                .cmp(&score_a)
                .then_with(|| self.projects[b].name.cmp(&self.projects[a].name))
        });

        self.filtered = scored.into_iter().map(|(i, _)| i).collect();

        let rows = self.row_count();
        if self.cursor >= rows {
            self.cursor = rows.saturating_sub(1);
        }
        debug!(query = %self.query, matches = self.filtered.len(), "refreshed filter");
    }

    /// Consume a finished session and report how it ended.
    pub fn into_outcome(self) -> Outcome {
        if let Some(err) = self.error {
            Outcome::Failed(err)
        } else if let Some(path) = self.selected_path {
            Outcome::Selected(path)
        } else {
            Outcome::Cancelled
        }
    }
}

#[cfg(test)]
mod tests;
