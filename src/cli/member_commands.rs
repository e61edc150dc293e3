use crate::cli::context::CliContext;
use crate::model::*;
use crate::queries::relationship_queries;

pub fn list(ctx: &CliContext) {
    let tree = match ctx.active_tree() {
        Some(t) => t,
        None => return,
    };
    if !ctx.state.has_members() {
        println!("{} has no members yet. Use 'add-member' to add someone.", tree.name);
        return;
    }

    println!(
        "Members of {} ({}, {} men, {} women):",
        tree.name,
        ctx.state.members.len(),
        ctx.state.members_by_gender(Gender::Male).len(),
        ctx.state.members_by_gender(Gender::Female).len()
    );
    println!();
    for member in &ctx.state.members {
        println!("  {} [{}]{}", member.name, member.gender, CliContext::lifespan(member));
    }
}

pub fn add(ctx: &mut CliContext, args: &str) {
    let tree = match ctx.active_tree() {
        Some(t) => t,
        None => return,
    };

    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Name (required): ") {
            Some(s) => s,
            None => return,
        }
    };
    let gender = match ctx.prompt("Gender (M/F): ") {
        Some(s) => s.to_uppercase(),
        None => return,
    };
    let birth_year = match ctx.prompt_year("Birth year: ") {
        Some(Ok(y)) => y,
        Some(Err(msg)) => {
            println!("{}", msg);
            return;
        }
        None => return,
    };
    let death_year = match ctx.prompt_year("Death year: ") {
        Some(Ok(y)) => y,
        Some(Err(msg)) => {
            println!("{}", msg);
            return;
        }
        None => return,
    };
    let notes = match ctx.prompt("Notes: ") {
        Some(s) => s,
        None => return,
    };

    let mut input = NewMember::new(tree.id, &name, &gender).years(birth_year, death_year);
    input.notes = Some(notes);

    match ctx.state.create_member(&ctx.conn, &ctx.session, &input) {
        Ok((state, member)) => {
            ctx.state = state;
            println!("Added {} to {}", member.name, tree.name);
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn show(ctx: &CliContext, args: &str) {
    let member = match ctx.find_member(args) {
        Some(m) => m,
        None => return,
    };

    println!();
    println!("{}{}", member.name, CliContext::lifespan(&member));
    println!("  Gender: {}", member.gender);
    if let Some(img) = &member.img {
        println!("  Image: {}", img);
    }
    if let Some(notes) = &member.notes {
        println!("  Notes: {}", notes);
    }

    if let Some(node) = ctx.state.chart_data.iter().find(|n| n.id == member.id) {
        let names = |ids: &Option<Vec<Id<Member>>>| {
            ids.as_ref()
                .map(|ids| ids.iter().map(|id| ctx.member_name(*id)).collect::<Vec<_>>().join(", "))
        };
        if let Some(parents) = names(&node.rels.parents) {
            println!("  Parents: {}", parents);
        }
        if let Some(spouses) = names(&node.rels.spouses) {
            println!("  Spouses: {}", spouses);
        }
        if let Some(children) = names(&node.rels.children) {
            println!("  Children: {}", children);
        }
    }

    if let Ok(rels) = relationship_queries::relationships_of_member(&ctx.conn, &ctx.session, member.id) {
        println!("  Relationship records: {}", rels.len());
    }
    println!();
}

pub fn edit(ctx: &mut CliContext, args: &str) {
    let member = match ctx.find_member(args) {
        Some(m) => m,
        None => return,
    };

    println!("Editing {} (press Enter to keep, '-' to clear)", member.name);
    let mut update = MemberUpdate::default();

    match ctx.prompt(&format!("Name [{}]: ", member.name)) {
        Some(s) if !s.is_empty() => update.name = Some(s),
        Some(_) => {}
        None => return,
    }
    match ctx.prompt(&format!("Gender [{}]: ", member.gender)) {
        Some(s) if !s.is_empty() => update.gender = Some(s.to_uppercase()),
        Some(_) => {}
        None => return,
    }
    update.birth_year = match edit_year(ctx, "Birth year", member.birth_year) {
        Some(change) => change,
        None => return,
    };
    update.death_year = match edit_year(ctx, "Death year", member.death_year) {
        Some(change) => change,
        None => return,
    };
    match ctx.prompt("Image reference: ") {
        Some(s) if s == "-" => update.img = Some(None),
        Some(s) if !s.is_empty() => update.img = Some(Some(s)),
        Some(_) => {}
        None => return,
    }
    match ctx.prompt("Notes: ") {
        Some(s) if s == "-" => update.notes = Some(None),
        Some(s) if !s.is_empty() => update.notes = Some(Some(s)),
        Some(_) => {}
        None => return,
    }

    match ctx.state.update_member(&ctx.conn, &ctx.session, member.id, &update) {
        Ok((state, updated)) => {
            ctx.state = state;
            println!("Updated {}", updated.name);
        }
        Err(e) => ctx.print_error(&e),
    }
}

/// `Some(None)` keeps the value, `Some(Some(None))` clears it. `None` aborts.
fn edit_year(ctx: &CliContext, label: &str, current: Option<i32>) -> Option<Option<Option<i32>>> {
    let shown = current.map(|y| y.to_string()).unwrap_or_default();
    let raw = ctx.prompt(&format!("{} [{}]: ", label, shown))?;
    match raw.as_str() {
        "" => Some(None),
        "-" => Some(Some(None)),
        s => match s.parse::<i32>() {
            Ok(y) => Some(Some(Some(y))),
            Err(_) => {
                println!("'{}' is not a year, keeping {}.", s, label.to_lowercase());
                Some(None)
            }
        },
    }
}

pub fn delete(ctx: &mut CliContext, args: &str) {
    let member = match ctx.find_member(args) {
        Some(m) => m,
        None => return,
    };

    let confirm = ctx.prompt(&format!(
        "Delete {} and all of their relationships? (y/n): ",
        member.name
    ));
    if !matches!(confirm.as_deref(), Some(s) if s.eq_ignore_ascii_case("y")) {
        println!("Cancelled.");
        return;
    }

    match ctx.state.delete_member(&ctx.conn, &ctx.session, member.id) {
        Ok(state) => {
            ctx.state = state;
            println!("Deleted {}", member.name);
        }
        Err(e) => ctx.print_error(&e),
    }
}
