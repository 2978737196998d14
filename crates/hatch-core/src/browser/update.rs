use unicode_segmentation::UnicodeSegmentation;

use super::{Action, Browser, ConfirmAction};
use crate::project::{archive_project, create_project, list_projects, remove_project};

impl Browser {
    /// Apply one action. Returns true once the session has ended.
    pub fn update(&mut self, action: Action) -> bool {
        if self.should_quit {
            return true;
        }

        if let Action::Resize(w, h) = action {
            self.width = w;
            self.height = h;
            return false;
        }

        if self.confirm.is_some() {
            self.handle_confirm_action(action);
        } else {
            self.handle_browse_action(action);
        }
        self.should_quit
    }

    fn handle_browse_action(&mut self, action: Action) {
        match action {
            Action::Cancel => {
                self.should_quit = true;
            }
            Action::MoveUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Action::MoveDown => {
                if self.cursor + 1 < self.row_count() {
                    self.cursor += 1;
                }
            }
            Action::Input(ch) => {
                self.query.push(ch);
                self.refresh_filter();
            }
            Action::Backspace => {
                if let Some((idx, _)) = self.query.grapheme_indices(true).next_back() {
                    self.query.truncate(idx);
                    self.refresh_filter();
                }
            }
            Action::Accept => self.accept(),
            Action::RequestArchive => {
                if self.current_project().is_some() {
                    self.confirm = Some(ConfirmAction::Archive);
                }
            }
            Action::RequestRemove => {
                if self.current_project().is_some() {
                    self.confirm = Some(ConfirmAction::Remove);
                }
            }
            Action::Resize(..) => {}
        }
    }

    fn handle_confirm_action(&mut self, action: Action) {
        match action {
            Action::Cancel | Action::Input('n' | 'N') => {
                self.confirm = None;
                self.status = "Action cancelled".to_string();
            }
            Action::Accept | Action::Input('y' | 'Y') => self.apply_confirm(),
            _ => {}
        }
    }

    fn accept(&mut self) {
        if self.is_create_row(self.cursor) {
            self.create_from_query();
            return;
        }
        match self.current_project().map(|p| p.path.clone()) {
            Some(path) => {
                self.selected_path = Some(path);
                self.should_quit = true;
            }
            None => {
                self.status = "No matching project".to_string();
            }
        }
    }

    /// Create a project named after the query. Failures stay in-session.
    fn create_from_query(&mut self) {
        let name = self.create_input().to_string();
        if name.is_empty() {
            self.status = "Type a project name to create".to_string();
            return;
        }

        match create_project(&self.root, &name, &self.now()) {
            Ok(path) => {
                self.selected_path = Some(path);
                self.should_quit = true;
            }
            Err(err) => {
                tracing::warn!(error = %err, "create from query failed");
                self.status = format!("Create failed: {err}");
            }
        }
    }

    /// Run the pending destructive action. Any filesystem failure here,
    /// including the refresh afterwards, ends the session.
    fn apply_confirm(&mut self) {
        let Some(action) = self.confirm.take() else {
            return;
        };
        let Some(project) = self.current_project().cloned() else {
            self.status = "No matching project".to_string();
            return;
        };

        let result = match action {
            ConfirmAction::Archive => archive_project(&self.root, &project.path).map(|target| {
                let archived = target
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!("Archived {} -> {}", project.name, archived)
            }),
            ConfirmAction::Remove => {
                remove_project(&project.path).map(|()| format!("Removed {}", project.name))
            }
        };

        let status = match result {
            Ok(status) => status,
            Err(err) => return self.fail(err),
        };

        match list_projects(&self.root) {
            Ok(projects) => {
                self.projects = projects;
                self.refresh_filter();
                self.status = status;
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: crate::HatchError) {
        tracing::error!(error = %err, "browser session failed");
        self.error = Some(err);
        self.should_quit = true;
    }
}
