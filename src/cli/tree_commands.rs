use crate::cli::context::CliContext;
use crate::model::*;

pub fn list(ctx: &CliContext) {
    if !ctx.state.has_trees() {
        println!("No family trees yet. Use 'add-tree' to create one.");
        return;
    }

    println!("Your family trees ({}):", ctx.state.trees.len());
    println!();
    for tree in &ctx.state.trees {
        let active = if ctx.state.active_tree_id == Some(tree.id) { "*" } else { " " };
        let default = if tree.is_default { " [default]" } else { "" };
        let description = tree
            .description
            .as_deref()
            .map(|d| format!(" - {}", d))
            .unwrap_or_default();
        println!(" {} {}{}{}", active, tree.name, default, description);
    }
}

pub fn add(ctx: &mut CliContext, args: &str) {
    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Tree name (required): ") {
            Some(s) if !s.is_empty() => s,
            Some(_) => {
                println!("Tree name is required.");
                return;
            }
            None => return,
        }
    };

    let description = match ctx.prompt("Description: ") {
        Some(s) => s,
        None => return,
    };
    let is_default = match ctx.prompt("Make this your default tree? (y/n): ") {
        Some(s) => s.eq_ignore_ascii_case("y"),
        None => return,
    };

    let input = NewTree {
        name,
        description: Some(description),
        is_default,
    };
    match ctx.state.create_tree(&ctx.conn, &ctx.session, &input) {
        Ok((state, tree)) => {
            ctx.state = state;
            println!("Created tree {}", tree.name);
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn use_tree(ctx: &mut CliContext, args: &str) {
    let tree = match ctx.find_tree(args) {
        Some(t) => t,
        None => return,
    };

    match ctx.state.set_active_tree(&ctx.conn, &ctx.session, tree.id) {
        Ok(state) => {
            ctx.state = state;
            println!("Now working on {} ({} members)", tree.name, ctx.state.members.len());
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn edit(ctx: &mut CliContext, args: &str) {
    let tree = match ctx.find_tree(args) {
        Some(t) => t,
        None => return,
    };

    println!("Editing {} (press Enter to keep current value)", tree.name);
    let mut update = TreeUpdate::default();

    match ctx.prompt(&format!("Name [{}]: ", tree.name)) {
        Some(s) if !s.is_empty() => update.name = Some(s),
        Some(_) => {}
        None => return,
    }
    let current = tree.description.clone().unwrap_or_default();
    match ctx.prompt(&format!("Description [{}] ('-' to clear): ", current)) {
        Some(s) if s == "-" => update.description = Some(None),
        Some(s) if !s.is_empty() => update.description = Some(Some(s)),
        Some(_) => {}
        None => return,
    }

    if update.is_empty() {
        println!("Nothing to change.");
        return;
    }
    apply_update(ctx, tree.id, &update);
}

pub fn set_default(ctx: &mut CliContext, args: &str) {
    let tree = match ctx.find_tree(args) {
        Some(t) => t,
        None => return,
    };
    let update = TreeUpdate {
        is_default: Some(true),
        ..TreeUpdate::default()
    };
    apply_update(ctx, tree.id, &update);
}

fn apply_update(ctx: &mut CliContext, tree_id: Id<FamilyTree>, update: &TreeUpdate) {
    match ctx.state.update_tree(&ctx.conn, &ctx.session, tree_id, update) {
        Ok((state, tree)) => {
            ctx.state = state;
            println!("Updated {}", tree.name);
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete(ctx: &mut CliContext, args: &str) {
    let tree = match ctx.find_tree(args) {
        Some(t) => t,
        None => return,
    };

    let confirm = ctx.prompt(&format!(
        "Delete {} with all of its members and relationships? (yes/no): ",
        tree.name
    ));
    if !matches!(confirm.as_deref(), Some("yes")) {
        println!("Cancelled.");
        return;
    }

    match ctx.state.delete_tree(&ctx.conn, &ctx.session, tree.id) {
        Ok(state) => {
            ctx.state = state;
            println!("Deleted {}", tree.name);
        }
        Err(e) => ctx.print_error(&e),
    }
}
