pub mod context;
pub mod tree_commands;
pub mod member_commands;
pub mod relationship_commands;
pub mod chart_commands;

use log::{error, info};
use rusqlite::Connection;

use crate::auth::Session;
use crate::config::AppConfig;
use crate::db::{schema, user_repo};
use crate::ops::user_ops;
use crate::state::FamilyTreeState;
use context::CliContext;

/// Run the interactive REPL.
pub fn run(config: &AppConfig) {
    println!("Shajra - Family Tree Keeper");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let conn = match schema::open(&config.db_path) {
        Ok(c) => c,
        Err(e) => {
            error!("event=db_open module=cli status=error error={}", e);
            eprintln!("Error opening database: {}", e);
            return;
        }
    };

    let mut ctx = match load_or_init(conn) {
        Some(ctx) => ctx,
        None => return,
    };

    repl_loop(&mut ctx);
    info!("event=app_exit module=cli status=ok");
}

fn load_or_init(conn: Connection) -> Option<CliContext> {
    let user = match user_repo::find_first(&conn) {
        Ok(Some(user)) => {
            println!("Welcome back, {}.", user.full_name);
            user
        }
        Ok(None) => {
            println!("No profile found.");
            register(&conn)?
        }
        Err(e) => {
            println!("Error loading profile: {}", e);
            return None;
        }
    };

    let session = Session::signed_in(user.id);
    let state = match FamilyTreeState::initialize(&conn, &session) {
        Ok(state) => state,
        Err(e) => {
            println!("Error loading trees: {}", e);
            FamilyTreeState::default()
        }
    };
    if let Some(tree) = state.active_tree() {
        println!("Working on {} ({} members)", tree.name, state.members.len());
    }
    println!();

    Some(CliContext::new(conn, user, state))
}

fn register(conn: &Connection) -> Option<crate::model::User> {
    println!();
    print!("What's your name? ");
    use std::io::Write;
    std::io::stdout().flush().ok();

    let mut name = String::new();
    std::io::stdin().read_line(&mut name).ok()?;
    let name = name.trim().to_string();

    let name_lower = name.to_lowercase();
    if name_lower == "exit" || name_lower == "quit" || name_lower == "q" {
        return None;
    }

    match user_ops::register_user(conn, &name, None) {
        Ok(user) => {
            println!("Welcome, {}! Use 'add-tree' to start your first family tree.", user.full_name);
            Some(user)
        }
        Err(e) => {
            println!("{}. Please restart and try again.", e);
            None
        }
    }
}

fn repl_loop(ctx: &mut CliContext) {
    loop {
        let input = match ctx.read_line("> ") {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,

            // Tree commands
            "trees" => tree_commands::list(ctx),
            "add-tree" => tree_commands::add(ctx, args),
            "use-tree" | "use" => tree_commands::use_tree(ctx, args),
            "edit-tree" => tree_commands::edit(ctx, args),
            "default-tree" => tree_commands::set_default(ctx, args),
            "delete-tree" => tree_commands::delete(ctx, args),

            // Member commands
            "members" | "list" | "ls" => member_commands::list(ctx),
            "add-member" | "add" => member_commands::add(ctx, args),
            "show" | "view" => member_commands::show(ctx, args),
            "edit-member" | "edit" => member_commands::edit(ctx, args),
            "delete-member" => member_commands::delete(ctx, args),

            // Relationship commands
            "link" => relationship_commands::link(ctx, args),
            "unlink" => relationship_commands::unlink(ctx, args),

            // Chart
            "chart" => chart_commands::show(ctx),
            "export-chart" => chart_commands::export_chart(ctx, args),
            "export-tree" => chart_commands::export_tree(ctx, args),

            // Other
            "health" => chart_commands::health(ctx),

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }
    }
}

/// Split input into command and the rest of the line.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(r#"
COMMANDS:

  Trees:
    trees                   List your trees (* marks the active one)
    add-tree [name]         Create a new tree
    use-tree <name>         Switch the active tree
    edit-tree <name>        Rename or describe a tree
    default-tree <name>     Flag a tree as default
    delete-tree <name>      Delete a tree and everything in it

  Members (active tree):
    members                 List members
    add-member [name]       Add a member (interactive)
    show <name>             Show a member and their family
    edit-member <name>      Edit a member
    delete-member <name>    Delete a member and their relationships

  Relationships:
    link <name>             Link a member to another (spouse/parent/child)
    unlink <name>           Remove one of a member's relationships

  Chart:
    chart                   Print the chart data as JSON
    export-chart <path>     Write the chart data to a file
    export-tree <path>      Write the tree snapshot to a file

  Other:
    health                  Check the database
    help                    Show this help
    exit / quit / q         Exit

TIPS:
  - Names are case-insensitive and partial matches work
  - Start shajra with --import <file> to load an exported tree"#);
}
