//! Interactive command loop.
//!
//! Generic over its input, output and storage so sessions can be scripted
//! in tests. Every mutating command saves immediately and reports the
//! outcome; a failed save never undoes the change in memory.

use crate::cli::args::{
    parse_column, parse_confirmation, parse_priority, parse_task_id, validate_new_board_name,
    Confirmation, FindQuery, ListQuery, ListTarget,
};
use crate::cli::help;
use crate::domain::{Board, Column, TaskId};
use crate::error::{Result, TaskboardError};
use crate::storage::{load_board, save_board, Storage};
use crate::views::{format_task_detailed, format_task_line, render_all, render_column};
use std::io::{BufRead, Write};

/// Whether the loop keeps reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Repl<R, W, S> {
    board: Board,
    storage: S,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write, S: Storage> Repl<R, W, S> {
    pub fn new(board: Board, storage: S, input: R, output: W) -> Self {
        Self {
            board,
            storage,
            input,
            output,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_parts(self) -> (Board, W) {
        (self.board, self.output)
    }

    /// Loads the board once at startup. Any failure leaves an empty board.
    pub async fn load_on_startup(&mut self) -> Result<()> {
        match load_board(&mut self.board, &self.storage).await {
            Ok(path) => writeln!(
                self.output,
                "Board '{}' successfully loaded from {}",
                self.board.name(),
                path.display()
            )?,
            Err(TaskboardError::BoardNotFound(_)) => {
                writeln!(self.output, "No board found. Starting a new board")?
            }
            Err(err) => writeln!(
                self.output,
                "Could not read {}: {}. Starting a new board",
                self.board.save_file_path().display(),
                err
            )?,
        }
        writeln!(self.output)?;
        Ok(())
    }

    /// Reads and executes commands until `quit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", help::menu())?;
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                self.quit().await?;
                return Ok(());
            };

            if self.execute(&line).await? == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Runs one command line such as `list todo --by p`
    pub async fn execute(&mut self, line: &str) -> Result<Flow> {
        let trimmed = line.trim();
        let (command, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(cmd, rest)| (cmd, rest.trim()));
        log::debug!("command '{}' args '{}'", command, rest);

        match command.to_lowercase().as_str() {
            "" => {}
            "add" => self.handle_add().await?,
            "list" => self.handle_list(rest)?,
            "find" => self.handle_find(rest)?,
            "move" => self.handle_move().await?,
            "edit" => self.handle_edit().await?,
            "del" | "delete" => self.handle_delete().await?,
            "rename-board" => self.handle_rename().await?,
            "save" => {
                self.save_and_report().await?;
            }
            "load" => self.handle_load().await?,
            "help" => self.handle_help(rest)?,
            "version" => writeln!(
                self.output,
                "Taskboard - Version {}",
                env!("CARGO_PKG_VERSION")
            )?,
            "quit" | "exit" => {
                self.quit().await?;
                return Ok(Flow::Quit);
            }
            _ => writeln!(self.output, "Command not found. Choose a valid command.")?,
        }
        Ok(Flow::Continue)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string()))
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        writeln!(self.output, "{message}")?;
        write!(self.output, "> ")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Asks until the answer is y, n or q. End of input counts as quit.
    fn confirm(&mut self, message: &str) -> Result<Confirmation> {
        loop {
            let Some(answer) = self.prompt(message)? else {
                return Ok(Confirmation::Quit);
            };
            match parse_confirmation(&answer) {
                Some(confirmation) => return Ok(confirmation),
                None => writeln!(self.output, "Enter y or n | q to quit")?,
            }
        }
    }

    fn read_priority(&mut self, message: &str, current: Option<u8>) -> Result<Option<u8>> {
        loop {
            let Some(input) = self.prompt(message)? else {
                return Ok(None);
            };
            if input.trim().is_empty() {
                if let Some(current) = current {
                    return Ok(Some(current));
                }
            }
            match parse_priority(&input) {
                Ok(priority) => return Ok(Some(priority)),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    /// Prompts for an id and returns it with the task's column
    fn read_existing_task(&mut self, message: &str) -> Result<Option<(TaskId, Column)>> {
        let Some(input) = self.prompt(message)? else {
            return Ok(None);
        };
        let id = match parse_task_id(&input) {
            Ok(id) => id,
            Err(_) => {
                writeln!(self.output, "Enter a valid number")?;
                return Ok(None);
            }
        };
        match self.board.column_of(id) {
            Some(column) => Ok(Some((id, column))),
            None => {
                writeln!(self.output, "Task not found")?;
                Ok(None)
            }
        }
    }

    fn show_task(&mut self, id: TaskId, column: Column) -> Result<()> {
        if let Some(task) = self.board.find(id) {
            writeln!(self.output, "{}", format_task_line(task, column))?;
        }
        Ok(())
    }

    async fn save_and_report(&mut self) -> Result<bool> {
        match save_board(&self.board, &self.storage).await {
            Ok(path) => {
                writeln!(
                    self.output,
                    "Board '{}' successfully saved to {}",
                    self.board.name(),
                    path.display()
                )?;
                Ok(true)
            }
            Err(err) => {
                writeln!(
                    self.output,
                    "Failed to save board to {}: {}",
                    self.board.save_file_path().display(),
                    err
                )?;
                Ok(false)
            }
        }
    }

    async fn handle_add(&mut self) -> Result<()> {
        writeln!(self.output, "Add a task to a list")?;

        let Some(title) = self.prompt("Enter title:")? else {
            return Ok(());
        };
        let Some(description) = self.prompt("Enter description:")? else {
            return Ok(());
        };
        let Some(priority) = self.read_priority("Enter priority (1-3):", None)? else {
            return Ok(());
        };
        let Some(selection) = self.prompt("Add task to which list: TODO | DOING | DONE")? else {
            return Ok(());
        };

        let column = match parse_column(&selection) {
            Ok(column) => column,
            Err(_) => {
                writeln!(self.output, "List not found. Defaulting to TODO")?;
                Column::Todo
            }
        };

        let id = self.board.create_task(
            title.trim().to_string(),
            description.trim().to_string(),
            priority,
            column,
        );
        writeln!(self.output, "New task with ID {id} added to {column} successfully!")?;
        self.show_task(id, column)?;
        self.save_and_report().await?;
        Ok(())
    }

    fn handle_list(&mut self, args: &str) -> Result<()> {
        let input = if args.is_empty() {
            let prompt = format!(
                "Select list: todo, doing, done, or 'all'\n{}",
                ListQuery::USAGE
            );
            match self.prompt(&prompt)? {
                Some(input) => input,
                None => return Ok(()),
            }
        } else {
            args.to_string()
        };

        let query = match ListQuery::parse(&input) {
            Ok(query) => query,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                writeln!(self.output, "{}", ListQuery::USAGE)?;
                return Ok(());
            }
        };

        for flag in &query.ignored {
            writeln!(self.output, "Ignoring unknown flag {flag}")?;
        }

        let text = match query.target {
            ListTarget::All => render_all(&self.board, query.sort),
            ListTarget::Column(column) => render_column(&self.board, column, query.sort),
        };
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn handle_find(&mut self, args: &str) -> Result<()> {
        let input = if args.is_empty() {
            match self.prompt("Enter: <id> [--detailed|--v] (q to quit)")? {
                Some(input) => input,
                None => return Ok(()),
            }
        } else {
            args.to_string()
        };

        if input.trim().eq_ignore_ascii_case("q") {
            writeln!(self.output, "Returning to main menu")?;
            return Ok(());
        }

        let query = match FindQuery::parse(&input) {
            Ok(query) => query,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(());
            }
        };
        for flag in &query.ignored {
            writeln!(self.output, "Ignoring unknown flag {flag}")?;
        }

        let found = self
            .board
            .find(query.id)
            .zip(self.board.column_of(query.id));
        let text = match found {
            Some((task, column)) if query.detailed => format_task_detailed(task, column),
            Some((task, column)) => format_task_line(task, column),
            None => "Task not found".to_string(),
        };
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    async fn handle_move(&mut self) -> Result<()> {
        let Some((id, from)) = self.read_existing_task("Enter the id of the task to move:")? else {
            return Ok(());
        };
        self.show_task(id, from)?;

        let Some(selection) = self.prompt("Move to which list: TODO | DOING | DONE")? else {
            return Ok(());
        };
        let to = match parse_column(&selection) {
            Ok(column) => column,
            Err(_) => {
                writeln!(self.output, "Enter a valid list")?;
                return Ok(());
            }
        };
        if to == from {
            writeln!(self.output, "The task is already in that list")?;
            return Ok(());
        }

        match self.board.move_task(id, to) {
            Ok(from) => {
                writeln!(self.output, "Task moved from {from} to {to}")?;
                self.save_and_report().await?;
            }
            Err(err) => writeln!(self.output, "Task move failed: {err}")?,
        }
        Ok(())
    }

    async fn handle_edit(&mut self) -> Result<()> {
        let Some((id, column)) = self.read_existing_task("Enter id of task to edit:")? else {
            return Ok(());
        };
        let Some(current) = self.board.find(id).cloned() else {
            return Ok(());
        };
        writeln!(self.output, "{}", format_task_line(&current, column))?;
        writeln!(self.output, "Leave a field blank to keep its current value")?;

        let Some(title) = self.prompt(&format!("Title [{}]:", current.title))? else {
            return Ok(());
        };
        let Some(description) = self.prompt(&format!("Description [{}]:", current.description))?
        else {
            return Ok(());
        };
        let Some(priority) = self.read_priority(
            &format!("Priority (1-3) [{}]:", current.priority),
            Some(current.priority),
        )?
        else {
            return Ok(());
        };

        let title = keep_if_blank(title, &current.title);
        let description = keep_if_blank(description, &current.description);

        if title == current.title && description == current.description && priority == current.priority {
            writeln!(self.output, "No changes detected. Task not edited")?;
            return Ok(());
        }

        self.board.edit(id, title, description, priority)?;
        writeln!(self.output, "Task edited successfully")?;
        self.show_task(id, column)?;
        self.save_and_report().await?;
        Ok(())
    }

    async fn handle_delete(&mut self) -> Result<()> {
        let Some((id, column)) = self.read_existing_task("Enter id of task to delete:")? else {
            return Ok(());
        };
        writeln!(self.output, "You have selected this task to delete:")?;
        self.show_task(id, column)?;

        match self.confirm("Are you sure you want to delete this task? (y or n | q to quit)")? {
            Confirmation::Yes => {
                if self.board.remove(id).is_some() {
                    writeln!(
                        self.output,
                        "Task removed successfully. {} currently has {} tasks.",
                        column,
                        self.board.get(column).len()
                    )?;
                    self.save_and_report().await?;
                } else {
                    writeln!(self.output, "Task not found")?;
                }
            }
            Confirmation::No | Confirmation::Quit => {
                writeln!(self.output, "Delete aborted. Returning to main menu")?
            }
        }
        Ok(())
    }

    async fn handle_rename(&mut self) -> Result<()> {
        writeln!(self.output, "Current board name: {}", self.board.name())?;
        let Some(input) = self.prompt("Enter a new board name ('q' to cancel):")? else {
            return Ok(());
        };
        if input.trim().eq_ignore_ascii_case("q") {
            writeln!(self.output, "Returning to main menu")?;
            return Ok(());
        }

        let name = match validate_new_board_name(&input) {
            Ok(name) => name.to_string(),
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(());
            }
        };
        if name == self.board.name() {
            writeln!(self.output, "Name unchanged")?;
            return Ok(());
        }

        if let Err(err) = self.board.set_name(&name) {
            log::info!("rejected board name '{}'", name);
            writeln!(self.output, "{err}. Names may not contain '/', '\\' or '..'")?;
            return Ok(());
        }

        writeln!(self.output, "Board renamed to: {}", self.board.name())?;
        self.save_and_report().await?;
        Ok(())
    }

    async fn handle_load(&mut self) -> Result<()> {
        match load_board(&mut self.board, &self.storage).await {
            Ok(path) => writeln!(
                self.output,
                "Board '{}' data successfully loaded from {}",
                self.board.name(),
                path.display()
            )?,
            Err(err) => writeln!(
                self.output,
                "Loading data from {} failed: {}",
                self.board.save_file_path().display(),
                err
            )?,
        }
        Ok(())
    }

    fn handle_help(&mut self, args: &str) -> Result<()> {
        if args.is_empty() {
            writeln!(self.output, "{}", help::command_list())?;
            writeln!(self.output, "Type 'help <command>' for details on one command.")?;
            return Ok(());
        }
        match help::command_help(args) {
            Some(text) => writeln!(self.output, "{text}")?,
            None => writeln!(self.output, "No help for '{args}'.\n{}", help::command_list())?,
        }
        Ok(())
    }

    async fn quit(&mut self) -> Result<()> {
        self.save_and_report().await?;
        writeln!(self.output, "Thanks for using this program!")?;
        self.output.flush()?;
        Ok(())
    }
}

fn keep_if_blank(input: String, current: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        current.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::storage::FileStorage;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    fn new_board(dir: &Path) -> Board {
        Board::new(BoardConfig {
            save_dir: dir.to_path_buf(),
            ..BoardConfig::default()
        })
    }

    async fn run_session(board: Board, script: &str) -> (Board, String) {
        let mut repl = Repl::new(
            board,
            FileStorage::new(),
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
        );
        repl.run().await.unwrap();
        let (board, output) = repl.into_parts();
        (board, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn test_add_reprompts_priority_and_saves() {
        let temp_dir = TempDir::new().unwrap();
        let board = new_board(temp_dir.path());

        let (board, output) =
            run_session(board, "add\nWrite\nquarterly report\n5\n2\ndoing\nquit\n").await;

        let task = board.find(TaskId::new(0)).unwrap();
        assert_eq!(task.title, "Write");
        assert_eq!(task.priority, 2);
        assert_eq!(board.column_of(task.id), Some(Column::Doing));
        assert!(output.contains("Invalid priority '5'"));
        assert!(output.contains("New task with ID 0 added to DOING successfully!"));
        assert!(temp_dir.path().join("board.json").exists());
    }

    #[tokio::test]
    async fn test_add_unknown_list_defaults_to_todo() {
        let temp_dir = TempDir::new().unwrap();
        let board = new_board(temp_dir.path());

        let (board, output) = run_session(board, "add\nT\n\n1\nsomeday\nquit\n").await;

        assert_eq!(board.get(Column::Todo).len(), 1);
        assert!(output.contains("List not found. Defaulting to TODO"));
    }

    #[tokio::test]
    async fn test_list_sorted_inline_args() {
        let temp_dir = TempDir::new().unwrap();
        let mut board = new_board(temp_dir.path());
        board.create_task("b".to_string(), String::new(), 1, Column::Todo);
        board.create_task("a".to_string(), String::new(), 2, Column::Todo);
        board.create_task("a".to_string(), String::new(), 3, Column::Todo);

        let (board, output) = run_session(board, "list todo --by t --desc\nquit\n").await;

        assert!(output.contains("[TODO] #0 b (P1)\n[TODO] #2 a (P3)\n[TODO] #1 a (P2)"));
        assert_eq!(board.get(Column::Todo)[0].id, TaskId::new(0));
    }

    #[tokio::test]
    async fn test_list_reports_bad_sort_key() {
        let temp_dir = TempDir::new().unwrap();
        let board = new_board(temp_dir.path());

        let (_, output) = run_session(board, "list\ntodo --by colour\nquit\n").await;

        assert!(output.contains("Invalid sort type 'colour'"));
        assert!(output.contains(ListQuery::USAGE));
    }

    #[tokio::test]
    async fn test_find_detailed() {
        let temp_dir = TempDir::new().unwrap();
        let mut board = new_board(temp_dir.path());
        board.create_task("Plan".to_string(), "the week".to_string(), 2, Column::Done);

        let (_, output) = run_session(board, "find 0 --v\nfind 9\nquit\n").await;

        assert!(output.contains("Description: the week"));
        assert!(output.contains("Column:      DONE"));
        assert!(output.contains("Task not found"));
    }

    #[tokio::test]
    async fn test_move_rejects_same_column() {
        let temp_dir = TempDir::new().unwrap();
        let mut board = new_board(temp_dir.path());
        board.create_task("T".to_string(), String::new(), 1, Column::Todo);

        let (board, output) = run_session(board, "move\n0\ntodo\nmove\n0\ndone\nquit\n").await;

        assert!(output.contains("The task is already in that list"));
        assert!(output.contains("Task moved from TODO to DONE"));
        assert_eq!(board.column_of(TaskId::new(0)), Some(Column::Done));
    }

    #[tokio::test]
    async fn test_edit_blank_keeps_fields() {
        let temp_dir = TempDir::new().unwrap();
        let mut board = new_board(temp_dir.path());
        board.create_task("Old".to_string(), "desc".to_string(), 1, Column::Doing);

        let (board, output) = run_session(board, "edit\n0\n\n\n\nedit\n0\nNew\n\n3\nquit\n").await;

        assert!(output.contains("No changes detected. Task not edited"));
        assert!(output.contains("Task edited successfully"));
        let task = board.find(TaskId::new(0)).unwrap();
        assert_eq!(task.title, "New");
        assert_eq!(task.description, "desc");
        assert_eq!(task.priority, 3);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let temp_dir = TempDir::new().unwrap();
        let mut board = new_board(temp_dir.path());
        board.create_task("a".to_string(), String::new(), 1, Column::Todo);
        board.create_task("b".to_string(), String::new(), 1, Column::Todo);

        let (board, output) = run_session(board, "del\n0\nn\ndel\n1\nmaybe\ny\nquit\n").await;

        assert!(output.contains("Delete aborted"));
        assert!(output.contains("Enter y or n | q to quit"));
        assert!(output.contains("TODO currently has 1 tasks."));
        assert!(board.find(TaskId::new(0)).is_some());
        assert!(board.find(TaskId::new(1)).is_none());
    }

    #[tokio::test]
    async fn test_rename_board() {
        let temp_dir = TempDir::new().unwrap();
        let board = new_board(temp_dir.path());

        let (board, output) = run_session(
            board,
            "rename-board\na/b\nrename-board\nthis name is much too long\nrename-board\nWork\nquit\n",
        )
        .await;

        assert!(output.contains("Invalid board name"));
        assert!(output.contains("Name must be less than 20 characters"));
        assert!(output.contains("Board renamed to: Work"));
        assert_eq!(board.name(), "Work");
        assert!(temp_dir.path().join("Work.json").exists());
    }

    #[tokio::test]
    async fn test_end_of_input_saves() {
        let temp_dir = TempDir::new().unwrap();
        let mut board = new_board(temp_dir.path());
        board.create_task("t".to_string(), String::new(), 1, Column::Todo);

        let (_, output) = run_session(board, "version\n").await;

        assert!(output.contains(&format!("Taskboard - Version {}", env!("CARGO_PKG_VERSION"))));
        assert!(output.contains("Thanks for using this program!"));
        assert!(temp_dir.path().join("board.json").exists());
    }

    #[tokio::test]
    async fn test_failed_save_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("boards");
        std::fs::write(&blocker, "").unwrap();
        let board = new_board(&blocker);

        let (board, output) = run_session(board, "add\nT\n\n1\ntodo\nquit\n").await;

        assert!(output.contains("Failed to save board to"));
        assert_eq!(board.task_count(), 1);
    }

    #[tokio::test]
    async fn test_startup_load_and_id_continuity() {
        let temp_dir = TempDir::new().unwrap();
        let board = new_board(temp_dir.path());
        let (_, _) = run_session(board, "add\nfirst\n\n1\ntodo\nadd\nsecond\n\n2\ndone\nquit\n").await;

        let mut repl = Repl::new(
            new_board(temp_dir.path()),
            FileStorage::new(),
            Cursor::new(b"add\nthird\n\n3\ndoing\nquit\n".to_vec()),
            Vec::new(),
        );
        repl.load_on_startup().await.unwrap();
        repl.run().await.unwrap();
        let (board, output) = repl.into_parts();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("Board 'board' successfully loaded from"));
        assert_eq!(board.task_count(), 3);
        assert_eq!(board.column_of(TaskId::new(2)), Some(Column::Doing));
    }

    #[tokio::test]
    async fn test_startup_without_save_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut repl = Repl::new(
            new_board(temp_dir.path()),
            FileStorage::new(),
            Cursor::new(Vec::new()),
            Vec::new(),
        );

        repl.load_on_startup().await.unwrap();

        assert_eq!(repl.board().task_count(), 0);
        let (_, output) = repl.into_parts();
        assert!(String::from_utf8(output)
            .unwrap()
            .contains("No board found. Starting a new board"));
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let temp_dir = TempDir::new().unwrap();
        let (_, output) = run_session(new_board(temp_dir.path()), "fly\nquit\n").await;
        assert!(output.contains("Command not found. Choose a valid command."));
    }
}
