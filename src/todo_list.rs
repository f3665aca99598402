use crate::error::{StoreError, TodoError, ValidationError};
use crate::store::Store;
use crate::task::{Filter, Task, TaskStatus};
use std::time::{Duration, Instant};
use tracing::{error, info};

/// How long a notice stays in the footer.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub expires: Instant,
}

/// Controller state behind the task list: the store, the active filter and
/// the rows of the last query.
pub struct TodoList {
    store: Store,
    filter: Filter,
    tasks: Vec<Task>,
    selected: usize,
    input: String,
    notice: Option<Notice>,
}

impl TodoList {
    pub fn new(store: Store) -> Self {
        let mut list = Self {
            store,
            filter: Filter::All,
            tasks: Vec::new(),
            selected: 0,
            input: String::new(),
            notice: None,
        };
        list.refresh();
        list
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn selected(&self) -> Option<usize> {
        if self.tasks.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Add the task typed in the input field as incomplete.
    pub fn add(&mut self) -> Result<i64, TodoError> {
        if self.input.is_empty() {
            let err = ValidationError::EmptyName;
            self.raise(err.to_string(), NoticeKind::Warning);
            return Err(err.into());
        }

        let id = self
            .store
            .insert(&self.input, TaskStatus::Incomplete)
            .map_err(|err| self.store_failed("add task", err))?;
        info!(id, name = %self.input, "task added");
        self.input.clear();
        self.refresh();
        Ok(id)
    }

    /// Flip the checkbox of the row at `index`.
    ///
    /// The new status is written to every task sharing the row's name.
    pub fn toggle(&mut self, index: usize) -> Result<(), TodoError> {
        let Some(task) = self.tasks.get(index) else {
            return Ok(());
        };
        let status = TaskStatus::from_checked(!task.status.is_complete());
        let name = task.name.clone();

        self.store
            .update_status_by_name(&name, status)
            .map_err(|err| self.store_failed("update task", err))?;
        info!(name = %name, %status, "task toggled");
        self.refresh();
        Ok(())
    }

    pub fn toggle_selected(&mut self) -> Result<(), TodoError> {
        self.toggle(self.selected)
    }

    /// Delete the row at `index` by its id.
    pub fn delete(&mut self, index: usize) -> Result<(), TodoError> {
        let Some(id) = self.tasks.get(index).map(|t| t.id) else {
            return Ok(());
        };

        self.store
            .delete_by_id(id)
            .map_err(|err| self.store_failed("delete task", err))?;
        info!(id, "task deleted");
        self.refresh();
        Ok(())
    }

    pub fn delete_selected(&mut self) -> Result<(), TodoError> {
        self.delete(self.selected)
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.selected = 0;
        self.refresh();
    }

    pub fn next_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    pub fn previous_filter(&mut self) {
        self.set_filter(self.filter.previous());
    }

    /// Re-query under the current filter. On failure the previous rows stay.
    pub fn refresh(&mut self) -> bool {
        match self.store.select(self.filter) {
            Ok(tasks) => {
                self.tasks = tasks;
                if self.selected >= self.tasks.len() {
                    self.selected = self.tasks.len().saturating_sub(1);
                }
                true
            }
            Err(err) => {
                self.store_failed("load tasks", err);
                false
            }
        }
    }

    /// Drop the notice once it has expired.
    pub fn tick(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| now >= n.expires) {
            self.notice = None;
        }
    }

    fn raise(&mut self, message: impl Into<String>, kind: NoticeKind) {
        self.notice = Some(Notice {
            message: message.into(),
            kind,
            expires: Instant::now() + NOTICE_TTL,
        });
    }

    fn store_failed(&mut self, action: &str, err: StoreError) -> StoreError {
        error!(action, error = %err, "store operation failed");
        self.raise(format!("Could not {action}: {err}"), NoticeKind::Error);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_list(tasks: &[(&str, TaskStatus)]) -> TodoList {
        let store = Store::open_in_memory().unwrap();
        for (name, status) in tasks {
            store.insert(name, *status).unwrap();
        }
        TodoList::new(store)
    }

    fn type_name(list: &mut TodoList, name: &str) {
        name.chars().for_each(|c| list.push_char(c));
    }

    #[test]
    fn add_inserts_incomplete_task_and_clears_input() {
        let mut list = test_list(&[("Item 1", TaskStatus::Complete)]);
        assert_eq!(list.tasks().len(), 1);

        type_name(&mut list, "Item 2");
        list.add().unwrap();

        assert_eq!(list.tasks().len(), 2);
        assert_eq!(list.tasks()[1].name, "Item 2");
        assert_eq!(list.tasks()[1].status, TaskStatus::Incomplete);
        assert_eq!(list.input(), "");
        assert!(list.notice().is_none());
    }

    #[test]
    fn add_with_empty_name_raises_notice() {
        let mut list = test_list(&[]);

        let err = list.add().unwrap_err();
        assert!(matches!(err, TodoError::Validation(ValidationError::EmptyName)));
        assert!(list.tasks().is_empty());
        assert!(list.store().select(Filter::All).unwrap().is_empty());

        let notice = list.notice().expect("notice raised");
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert_eq!(notice.message, "Task name cannot be empty");
    }

    #[test]
    fn add_with_whitespace_name_is_stored_as_typed() {
        let mut list = test_list(&[]);
        type_name(&mut list, "   ");

        let id = list.add().unwrap();

        assert_eq!(list.tasks().len(), 1);
        assert_eq!(list.tasks()[0].id, id);
        assert_eq!(list.tasks()[0].name, "   ");
        assert_eq!(list.tasks()[0].status, TaskStatus::Incomplete);
        assert!(list.notice().is_none());
    }

    #[test]
    fn toggle_flips_every_task_with_the_same_name() {
        let mut list = test_list(&[
            ("Buy milk", TaskStatus::Incomplete),
            ("Walk dog", TaskStatus::Incomplete),
            ("Buy milk", TaskStatus::Incomplete),
        ]);

        list.toggle(0).unwrap();

        let statuses: Vec<_> = list.tasks().iter().map(|t| t.status).collect();
        assert_eq!(
            statuses,
            vec![
                TaskStatus::Complete,
                TaskStatus::Incomplete,
                TaskStatus::Complete
            ]
        );

        list.toggle(2).unwrap();
        assert!(list.tasks().iter().all(|t| t.status == TaskStatus::Incomplete));
    }

    #[test]
    fn toggle_under_filter_drops_row_from_view() {
        let mut list = test_list(&[
            ("a", TaskStatus::Incomplete),
            ("b", TaskStatus::Incomplete),
        ]);
        list.set_filter(Filter::Incomplete);
        list.toggle(0).unwrap();

        assert_eq!(list.tasks().len(), 1);
        assert_eq!(list.tasks()[0].name, "b");
    }

    #[test]
    fn delete_removes_only_that_row() {
        let mut list = test_list(&[
            ("a", TaskStatus::Incomplete),
            ("a", TaskStatus::Incomplete),
        ]);
        let survivor = list.tasks()[1].id;

        list.delete(0).unwrap();

        assert_eq!(list.tasks().len(), 1);
        assert_eq!(list.tasks()[0].id, survivor);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut list = test_list(&[("a", TaskStatus::Incomplete)]);
        list.toggle(5).unwrap();
        list.delete(5).unwrap();
        assert_eq!(list.tasks().len(), 1);
        assert_eq!(list.tasks()[0].status, TaskStatus::Incomplete);
    }

    #[test]
    fn filter_change_requeries() {
        let mut list = test_list(&[
            ("a", TaskStatus::Incomplete),
            ("b", TaskStatus::Complete),
            ("c", TaskStatus::Incomplete),
        ]);

        list.set_filter(Filter::Complete);
        assert_eq!(list.tasks().len(), 1);
        list.next_filter();
        assert_eq!(list.filter(), Filter::All);
        assert_eq!(list.tasks().len(), 3);
        list.previous_filter();
        list.previous_filter();
        assert_eq!(list.filter(), Filter::Incomplete);
        assert_eq!(list.tasks().len(), 2);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut list = test_list(&[
            ("a", TaskStatus::Incomplete),
            ("b", TaskStatus::Incomplete),
        ]);
        list.select_next();
        list.select_next();
        assert_eq!(list.selected(), Some(1));

        list.delete_selected().unwrap();
        assert_eq!(list.selected(), Some(0));
        list.delete_selected().unwrap();
        assert_eq!(list.selected(), None);
        list.select_previous();
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn end_to_end_buy_milk() {
        let mut list = test_list(&[]);

        type_name(&mut list, "Buy milk");
        let id = list.add().unwrap();
        assert_eq!(
            list.tasks(),
            &[Task {
                id,
                name: "Buy milk".into(),
                status: TaskStatus::Incomplete,
            }]
        );

        list.toggle_selected().unwrap();
        list.set_filter(Filter::Complete);
        assert_eq!(
            list.tasks(),
            &[Task {
                id,
                name: "Buy milk".into(),
                status: TaskStatus::Complete,
            }]
        );
        list.set_filter(Filter::Incomplete);
        assert!(list.tasks().is_empty());

        list.set_filter(Filter::All);
        list.delete_selected().unwrap();
        assert!(list.tasks().is_empty());
    }

    #[test]
    fn unavailable_store_keeps_state_and_reports() {
        let mut list = TodoList::new(Store::unavailable());
        assert!(list.notice().is_some());

        type_name(&mut list, "Buy milk");
        let err = list.add().unwrap_err();
        assert!(matches!(err, TodoError::Store(StoreError::Unavailable)));
        assert_eq!(list.input(), "Buy milk");
        assert!(list.tasks().is_empty());
        assert_eq!(list.notice().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn notice_expires() {
        let mut list = test_list(&[]);
        let _ = list.add();
        let expires = list.notice().unwrap().expires;

        list.tick(expires - Duration::from_millis(1));
        assert!(list.notice().is_some());
        list.tick(expires);
        assert!(list.notice().is_none());
    }
}
