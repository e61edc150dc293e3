use crate::cli::context::CliContext;
use crate::model::*;

/// `link <name>`: asks for the other member and the kind of link.
pub fn link(ctx: &mut CliContext, args: &str) {
    let tree = match ctx.active_tree() {
        Some(t) => t,
        None => return,
    };
    let member = match ctx.find_member(args) {
        Some(m) => m,
        None => return,
    };

    let other_query = match ctx.prompt("Related member: ") {
        Some(s) => s,
        None => return,
    };
    let related = match ctx.find_member(&other_query) {
        Some(m) => m,
        None => return,
    };

    println!("  spouse  - {} is married to {}", member.name, related.name);
    println!("  parent  - {} is a parent of {}", member.name, related.name);
    println!("  child   - {} is a child of {}", member.name, related.name);
    let kind = match ctx.prompt("Relationship (spouse/parent/child): ") {
        Some(s) => s.to_lowercase(),
        None => return,
    };

    let input = NewRelationship::new(tree.id, member.id, related.id, &kind);
    match ctx.state.create_relationship(&ctx.conn, &ctx.session, &input) {
        Ok((state, rel)) => {
            ctx.state = state;
            println!(
                "Linked {} -> {} ({})",
                member.name, related.name, rel.relationship_type
            );
        }
        Err(e) => ctx.print_error(&e),
    }
}

/// `unlink <name>`: lists the member's relationship records and removes one.
pub fn unlink(ctx: &mut CliContext, args: &str) {
    let member = match ctx.find_member(args) {
        Some(m) => m,
        None => return,
    };

    let rels: Vec<Relationship> = ctx
        .state
        .relationships
        .iter()
        .filter(|r| r.involves(member.id))
        .cloned()
        .collect();
    if rels.is_empty() {
        println!("{} has no relationships.", member.name);
        return;
    }

    for (i, rel) in rels.iter().enumerate() {
        println!(
            "  {}. {} -> {} ({})",
            i + 1,
            ctx.member_name(rel.member_id),
            ctx.member_name(rel.related_member_id),
            rel.relationship_type
        );
    }

    let choice = match ctx.prompt("Remove which? (number): ") {
        Some(s) => s,
        None => return,
    };
    let rel = match choice.parse::<usize>().ok().and_then(|n| n.checked_sub(1)).and_then(|i| rels.get(i)) {
        Some(r) => r.clone(),
        None => {
            println!("Invalid selection.");
            return;
        }
    };

    match ctx.state.delete_relationship(&ctx.conn, &ctx.session, rel.id) {
        Ok(state) => {
            ctx.state = state;
            println!("Removed.");
        }
        Err(e) => ctx.print_error(&e),
    }
}
