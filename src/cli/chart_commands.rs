use std::path::Path;

use crate::cli::context::CliContext;
use crate::db::schema;
use crate::migrate;

/// Prints the active tree's chart nodes as JSON.
pub fn show(ctx: &CliContext) {
    if ctx.active_tree().is_none() {
        return;
    }
    match serde_json::to_string_pretty(&ctx.state.chart_data) {
        Ok(json) => println!("{}", json),
        Err(e) => println!("Error: {}", e),
    }
}

pub fn export_chart(ctx: &CliContext, args: &str) {
    let tree = match ctx.active_tree() {
        Some(t) => t,
        None => return,
    };
    if args.is_empty() {
        println!("Usage: export-chart <path>");
        return;
    }
    match migrate::export_chart_json(&ctx.conn, &ctx.session, tree.id, Path::new(args)) {
        Ok(()) => println!("Chart of {} written to {}", tree.name, args),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn export_tree(ctx: &CliContext, args: &str) {
    let tree = match ctx.active_tree() {
        Some(t) => t,
        None => return,
    };
    if args.is_empty() {
        println!("Usage: export-tree <path>");
        return;
    }
    match migrate::export_tree_json(&ctx.conn, &ctx.session, tree.id, Path::new(args)) {
        Ok(()) => println!("{} written to {}", tree.name, args),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn health(ctx: &CliContext) {
    let report = schema::health_check(&ctx.conn);
    println!("Status: {:?}", report.status);
    for (table, ok) in &report.tables {
        println!("  {:<16} {}", table, if *ok { "ok" } else { "MISSING" });
    }
}
