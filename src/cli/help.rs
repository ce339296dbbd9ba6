//! Static help text for the interactive prompt.

pub const COMMANDS: &[(&str, &str)] = &[
    ("add", "Add a new task to a list"),
    ("list", "List tasks in a specific list, or all lists"),
    ("find", "Find a task by id"),
    ("move", "Move a task between lists"),
    ("edit", "Edit a task by entering its id"),
    ("del", "Delete a task by entering its id"),
    ("rename-board", "Rename the current board"),
    ("save", "Save the current board"),
    ("load", "Load the board from its save file"),
    ("help", "Show help, or help for one command"),
    ("version", "Show the current version"),
    ("quit", "Save and exit"),
];

pub fn menu() -> String {
    let names: Vec<&str> = COMMANDS.iter().map(|(name, _)| *name).collect();
    format!("Available commands: {}", names.join(" | "))
}

pub fn command_list() -> String {
    let mut out = String::from("Commands:");
    for (name, summary) in COMMANDS {
        out.push_str(&format!("\n  {name:<12} - {summary}"));
    }
    out
}

pub fn command_help(command: &str) -> Option<&'static str> {
    let text = match command.trim().to_lowercase().as_str() {
        "add" => {
            "Usage: add\n\
             \n\
             Prompts for a title, a description, a priority between 1 (low) and\n\
             3 (high), and a target list (todo | doing | done). An unknown list\n\
             falls back to TODO. The board is saved afterwards."
        }
        "list" => {
            "Usage: list <todo|doing|done|all> [--by id|title|priority] [--desc]\n\
             \n\
             Options:\n\
             \x20 --by <key>   Sort by id/title/priority (aliases: i, t, p, prio)\n\
             \x20 --desc, --d  Sort in descending order\n\
             \n\
             Examples:\n\
             \x20 list todo\n\
             \x20 list done --by p --d\n\
             \x20 list all --by priority --desc"
        }
        "find" => {
            "Usage: find, then <id> [--detailed|--v]\n\
             \n\
             Shows one task. --detailed (or --v) includes the description."
        }
        "move" => {
            "Usage: move\n\
             \n\
             Prompts for a task id and a target list. Moving a task into the list\n\
             it is already in is refused. The board is saved afterwards."
        }
        "edit" => {
            "Usage: edit\n\
             \n\
             Prompts for a task id, then each field. Leave a field blank to keep\n\
             its current value. The board is saved when something changed."
        }
        "del" => {
            "Usage: del\n\
             \n\
             Prompts for a task id and asks for confirmation before deleting.\n\
             The board is saved afterwards."
        }
        "rename-board" => {
            "Usage: rename-board\n\
             \n\
             Names must be shorter than 20 characters and may not contain '/',\n\
             '\\' or '..'. The board is then saved under its new name."
        }
        "save" => "Usage: save\n\nWrites the board to <dir>/<board name>.json.",
        "load" => "Usage: load\n\nReplaces the board in memory with its save file.",
        "help" => "Usage: help [command]",
        "version" => "Usage: version\n\nShows the current version.",
        "quit" => "Usage: quit\n\nSaves the board and exits.",
        _ => return None,
    };
    Some(text)
}
