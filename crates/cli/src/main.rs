use std::io::{BufRead, Read, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use kedb_client::ApiClient;
use kedb_core::{DraftApi, DraftSession, SuggestedEntry, View};
use kedb_export::ExportService;

#[derive(Parser)]
#[command(name = "kedb")]
#[command(about = "KEDB draft generator CLI")]
struct Cli {
    /// API base URL (overrides KEDB_API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch suggested KEDB entries for an incident description
    Suggest {
        /// Incident short description
        description: String,
    },
    /// Generate draft KEDB content for an incident description
    Generate {
        /// Incident short description
        description: String,
        /// Export the draft as a document instead of printing it
        #[arg(long)]
        export: bool,
        /// Directory to write export artifacts into
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Show a single KEDB entry by its identifier
    Show {
        /// Knowledge base entry identifier, e.g. KB0092892
        id: String,
    },
    /// Export a draft buffer (from a file, or stdin) as a document
    Export {
        /// File holding the draft buffer; stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
        /// Directory to write export artifacts into
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Interactive drafting session
    Draft {
        /// Directory to write export artifacts into
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let client = match cli.base_url {
        Some(base_url) => ApiClient::new(base_url),
        None => ApiClient::from_env(),
    };

    match cli.command {
        Some(Commands::Suggest { description }) => {
            let mut session = DraftSession::new();
            session.set_description(&description);
            session.request_suggestions(&client).await?;
            print_banner(&session);
            print_suggestions(session.suggestions());
        }
        Some(Commands::Generate {
            description,
            export,
            out_dir,
        }) => {
            let mut session = DraftSession::new();
            session.set_description(&description);
            session.request_generation(&client).await?;
            print_banner(&session);
            if export {
                let artifact = exporter(out_dir).export(session.document())?;
                println!("Exported to {}", artifact.path.display());
            } else {
                println!("{}", session.document());
            }
        }
        Some(Commands::Show { id }) => {
            let entry = client.entry_by_id(&id).await?;
            println!("ID: {}", entry.id);
            println!("Title: {}", entry.title);
            println!("Recommended: {}", entry.recommended);
            println!("\n{}", entry.content);
        }
        Some(Commands::Export { file, out_dir }) => {
            let content = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            let artifact = exporter(out_dir).export(&content)?;
            println!("Exported to {}", artifact.path.display());
        }
        Some(Commands::Draft { out_dir }) => {
            run_interactive(&client, &exporter(out_dir)).await?;
        }
        None => {
            println!("No command given; try `kedb draft` or `kedb --help`.");
        }
    }

    Ok(())
}

fn exporter(out_dir: Option<PathBuf>) -> ExportService {
    match out_dir {
        Some(dir) => ExportService::new(dir),
        None => ExportService::from_env(),
    }
}

fn print_banner(session: &DraftSession) {
    if let Some(banner) = session.error_message() {
        eprintln!("Warning: {banner}");
    }
}

fn print_suggestions(entries: &[SuggestedEntry]) {
    if entries.is_empty() {
        println!("No suggested KEDBs found.");
        return;
    }
    for (index, entry) in entries.iter().enumerate() {
        let marker = if entry.recommended {
            " [recommended]"
        } else {
            ""
        };
        println!("{}. {}{} - {}", index + 1, entry.id, marker, entry.title);
    }
}

fn view_name(view: View) -> &'static str {
    match view {
        View::Input => "input",
        View::Suggested => "suggested",
        View::Editor => "editor",
    }
}

fn print_interactive_help() {
    println!("Commands:");
    println!("  desc <text>   set the incident description");
    println!("  find          fetch suggested KEDB entries");
    println!("  generate      generate a draft into the editor");
    println!("  open <n>      open suggested entry n in the editor");
    println!("  edit          replace the draft; finish with a single '.' line");
    println!("  show          print the current session state");
    println!("  export        export the draft as a document");
    println!("  cancel        discard the draft and return to suggestions");
    println!("  quit          leave the session");
}

/// Drives one drafting session over stdin, mirroring the form app's
/// button-per-action interaction: one operation at a time, each command
/// fully completed before the next prompt.
async fn run_interactive(client: &ApiClient, exporter: &ExportService) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut session = DraftSession::new();

    println!("KEDB Draft Generator");
    println!("Description: {}", session.description());
    print_interactive_help();

    loop {
        print!("kedb ({})> ", view_name(session.view()));
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "desc" => {
                session.set_description(rest);
                println!("Description set.");
            }
            "find" => match session.request_suggestions(client).await {
                Ok(()) => {
                    print_banner(&session);
                    print_suggestions(session.suggestions());
                }
                Err(e) => eprintln!("{e}"),
            },
            "generate" => match session.request_generation(client).await {
                Ok(()) => {
                    print_banner(&session);
                    println!("{}", session.document());
                }
                Err(e) => eprintln!("{e}"),
            },
            "open" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 && n <= session.suggestions().len() => {
                    let entry = session.suggestions()[n - 1].clone();
                    session.open_entry(&entry);
                    println!("{}", session.document());
                }
                _ => eprintln!("open needs an entry number from the suggested list"),
            },
            "edit" => {
                println!("Enter the new draft; finish with a single '.' line:");
                let mut buffer = String::new();
                loop {
                    let mut edit_line = String::new();
                    if stdin.lock().read_line(&mut edit_line)? == 0 {
                        break;
                    }
                    if edit_line.trim_end() == "." {
                        break;
                    }
                    buffer.push_str(&edit_line);
                }
                session.edit_document(buffer.trim_end().to_owned());
                println!("Draft updated.");
            }
            "show" => {
                println!("View: {}", view_name(session.view()));
                println!("Description: {}", session.description());
                if let Some(entry) = session.selected_entry() {
                    println!("Opened entry: {}", entry.id);
                }
                print_banner(&session);
                if session.view() == View::Suggested {
                    print_suggestions(session.suggestions());
                } else if !session.document().is_empty() {
                    println!("{}", session.document());
                }
            }
            "export" => {
                if session.document().trim().is_empty() {
                    eprintln!("Nothing to export: the draft is empty.");
                } else {
                    match exporter.export(session.document()) {
                        Ok(artifact) => println!("Exported to {}", artifact.path.display()),
                        Err(e) => eprintln!("{e}"),
                    }
                }
            }
            "cancel" => {
                session.cancel_editing();
                println!("Draft discarded.");
            }
            "help" => print_interactive_help(),
            "quit" | "exit" => break,
            other => eprintln!("Unknown command: {other} (try `help`)"),
        }
    }

    Ok(())
}
