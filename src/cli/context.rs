use rusqlite::Connection;
use std::io::{self, Write};

use crate::auth::Session;
use crate::error::ShajraError;
use crate::model::*;
use crate::state::FamilyTreeState;

pub struct CliContext {
    pub conn: Connection,
    pub user: User,
    pub session: Session,
    pub state: FamilyTreeState,
}

impl CliContext {
    pub fn new(conn: Connection, user: User, state: FamilyTreeState) -> Self {
        let session = Session::signed_in(user.id);
        Self {
            conn,
            user,
            session,
            state,
        }
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Read an optional year. Blank means no value; `Err` means unparseable.
    pub fn prompt_year(&self, prompt: &str) -> Option<Result<Option<i32>, String>> {
        let raw = self.prompt(prompt)?;
        if raw.is_empty() {
            return Some(Ok(None));
        }
        Some(
            raw.parse::<i32>()
                .map(Some)
                .map_err(|_| format!("'{}' is not a year", raw)),
        )
    }

    /// The active tree, or a hint to pick one.
    pub fn active_tree(&self) -> Option<FamilyTree> {
        match self.state.active_tree() {
            Some(tree) => Some(tree.clone()),
            None => {
                println!("No active tree. Use 'add-tree' or 'use-tree' first.");
                None
            }
        }
    }

    /// Find a tree by name query. Prints error if not found or ambiguous.
    pub fn find_tree(&self, args: &str) -> Option<FamilyTree> {
        let query = args.trim();
        if query.is_empty() {
            println!("Please give a tree name.");
            return None;
        }

        let lower = query.to_lowercase();
        let matches: Vec<&FamilyTree> = self
            .state
            .trees
            .iter()
            .filter(|t| t.name.to_lowercase().contains(&lower))
            .collect();

        match matches.len() {
            0 => {
                println!("No tree found matching '{}'", query);
                None
            }
            1 => Some(matches[0].clone()),
            _ => {
                if let Some(exact) = matches.iter().find(|t| t.name.eq_ignore_ascii_case(query)) {
                    return Some((*exact).clone());
                }
                println!("Multiple matches found:");
                for t in &matches {
                    println!("  {}", t.name);
                }
                println!("Please be more specific.");
                None
            }
        }
    }

    /// Find a member of the active tree by name query.
    pub fn find_member(&self, args: &str) -> Option<Member> {
        let query = args.trim();
        if query.is_empty() {
            println!("Please give a member name.");
            return None;
        }

        let lower = query.to_lowercase();
        let matches: Vec<&Member> = self
            .state
            .members
            .iter()
            .filter(|m| m.name.to_lowercase().contains(&lower))
            .collect();

        match matches.len() {
            0 => {
                println!("No member found matching '{}'", query);
                None
            }
            1 => Some(matches[0].clone()),
            _ => {
                if let Some(exact) = matches.iter().find(|m| m.name.eq_ignore_ascii_case(query)) {
                    return Some((*exact).clone());
                }
                println!("Multiple matches found:");
                for m in &matches {
                    println!("  {}{}", m.name, Self::lifespan(m));
                }
                println!("Please be more specific.");
                None
            }
        }
    }

    /// Display name of a cached member, falling back to the raw id.
    pub fn member_name(&self, member_id: Id<Member>) -> String {
        self.state
            .member_by_id(member_id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| member_id.to_string())
    }

    /// " (1930-2001)", " (b. 1930)", " (d. 2001)" or "".
    pub fn lifespan(member: &Member) -> String {
        match (member.birth_year, member.death_year) {
            (Some(b), Some(d)) => format!(" ({}-{})", b, d),
            (Some(b), None) => format!(" (b. {})", b),
            (None, Some(d)) => format!(" (d. {})", d),
            (None, None) => String::new(),
        }
    }

    /// Print an error.
    pub fn print_error(&self, e: &ShajraError) {
        println!("Error: {}", e);
    }
}
