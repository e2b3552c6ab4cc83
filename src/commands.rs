use std::io::BufRead;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::conversation::{Conversation, ConversationId};
use crate::error::AppError;
use crate::search::controller::{SearchController, SearchState};
use crate::search::highlight::Segment;
use crate::search::render::render_results;
use crate::session::FileTokenStore;
use crate::sidebar::{DeleteOutcome, SaveOutcome, Sidebar, DELETE_PROMPT};

const MARK_START: &str = "\x1b[1;33m";
const MARK_END: &str = "\x1b[0m";

/// One line of terminal input. Plain lines replace the search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    Rename { id: ConversationId, title: String },
    Delete(ConversationId),
    Confirm,
    Cancel,
    Dismiss,
    List,
    Login(String),
    Logout,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Query(line.to_string());
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim_start()),
        None => (rest, ""),
    };

    match name {
        "rename" => match args.split_once(char::is_whitespace) {
            Some((id, title)) => Command::Rename {
                id: id.into(),
                title: title.to_string(),
            },
            None if !args.trim().is_empty() => Command::Rename {
                id: args.trim().into(),
                title: String::new(),
            },
            None => Command::Unknown(line.to_string()),
        },
        "delete" if !args.trim().is_empty() => Command::Delete(args.trim().into()),
        "yes" => Command::Confirm,
        "no" => Command::Cancel,
        "dismiss" => Command::Dismiss,
        "list" => Command::List,
        "login" if !args.trim().is_empty() => Command::Login(args.trim().to_string()),
        "logout" => Command::Logout,
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Render segments for a terminal, marked runs in bold yellow.
pub fn paint(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| match s {
            Segment::Plain(text) => text.clone(),
            Segment::Mark(text) => format!("{}{}{}", MARK_START, text, MARK_END),
        })
        .collect()
}

/// Drive the sidebar from stdin until EOF or `:quit`.
pub async fn repl(
    client: Arc<ApiClient>,
    tokens: Arc<FileTokenStore>,
    config: &ClientConfig,
) -> Result<(), AppError> {
    let mut search = SearchController::new(client.clone(), tokens.clone(), config.search_debounce());
    let mut sidebar = Sidebar::new(client.clone());
    let mut updates = search.subscribe();
    let mut lines = spawn_stdin_reader();

    let mut conversations = refresh(&client).await.unwrap_or_default();
    print_conversations(&conversations);

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                match parse_command(&line) {
                    Command::Query(query) => search.set_query(query),
                    Command::Rename { id, title } => {
                        let current = conversations
                            .iter()
                            .find(|c| c.id == id)
                            .cloned()
                            .unwrap_or(Conversation {
                                id,
                                title: String::new(),
                                created_at: None,
                                updated_at: None,
                            });
                        sidebar.begin_edit(&current);
                        sidebar.update_edit(title);
                        match sidebar.save_edit().await {
                            SaveOutcome::Renamed => {
                                if let Some(list) = refresh(&client).await {
                                    conversations = list;
                                }
                                print_conversations(&conversations);
                            }
                            SaveOutcome::Skipped => println!("Title is empty, nothing renamed."),
                            SaveOutcome::Failed | SaveOutcome::NotEditing => {}
                        }
                    }
                    Command::Delete(id) => {
                        sidebar.request_delete(id);
                        println!("{} (:yes / :no)", DELETE_PROMPT);
                    }
                    Command::Confirm => {
                        if sidebar.confirm_delete().await == DeleteOutcome::Deleted {
                            if let Some(list) = refresh(&client).await {
                                conversations = list;
                            }
                            print_conversations(&conversations);
                        }
                    }
                    Command::Cancel => sidebar.cancel_delete(),
                    Command::Dismiss => sidebar.dismiss_error(),
                    Command::List => {
                        if let Some(list) = refresh(&client).await {
                            conversations = list;
                        }
                        print_conversations(&conversations);
                    }
                    Command::Login(token) => {
                        tokens.save(&token)?;
                        println!("Token saved.");
                    }
                    Command::Logout => {
                        tokens.clear()?;
                        search.clear();
                        println!("Logged out.");
                    }
                    Command::Quit => break,
                    Command::Unknown(input) => println!("Unknown command: {}", input),
                }
                if let Some(message) = sidebar.error_modal().message() {
                    println!("[Error] {}  (:dismiss to close)", message);
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                print_search_state(&state, &conversations);
            }
        }
    }

    Ok(())
}

async fn refresh(client: &ApiClient) -> Option<Vec<Conversation>> {
    match client.list_conversations().await {
        Ok(list) => Some(list),
        Err(e) => {
            log::warn!("Could not load conversations: {}", e);
            println!("Could not load conversations: {}", e.user_message());
            None
        }
    }
}

fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::warn!("stdin read failed: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

fn print_conversations(conversations: &[Conversation]) {
    if conversations.is_empty() {
        println!("No conversations yet");
        return;
    }
    for conv in conversations {
        println!("{}  {}  [{}]", conv.id, conv.title, conv.date_label());
    }
}

fn print_search_state(state: &SearchState, conversations: &[Conversation]) {
    if !state.is_active() {
        print_conversations(conversations);
        return;
    }
    if state.is_searching {
        println!("Searching...");
        return;
    }
    if state.results.is_empty() {
        println!("No results found");
        return;
    }

    for result in render_results(&state.results, &state.query) {
        println!("{}  -> {}", paint(&result.title), result.route);
        if let Some(snippet) = &result.snippet {
            println!("    ...{}...", paint(snippet));
        }
        println!("    {}", result.date_label);
        for entry in &result.extra_matches {
            println!("      ...{}...  -> {}", paint(&entry.segments), entry.route);
        }
        if let Some(label) = result.more_matches_label() {
            println!("      {}", label);
        }
    }
}
