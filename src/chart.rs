//! Relationship graph to pedigree chart transform.
//!
//! Relationships are stored as directed, typed edges (one row per fact). The
//! chart renderer needs every member's parents, spouses and children from
//! that member's own point of view, so this module expands each edge into
//! both endpoints' neighbour lists.
//!
//! The transform is a pure fold over its inputs. It never fails: edges that
//! name a member outside `members`, or that carry an unrecognised type, are
//! dropped and the rest of the chart is still produced.

use std::collections::HashMap;

use log::debug;

use crate::model::{ChartMemberData, ChartNode, ChartRels, Id, Member, Relationship, RelationshipType};

#[derive(Default)]
struct Neighbours {
    parents: Vec<Id<Member>>,
    spouses: Vec<Id<Member>>,
    children: Vec<Id<Member>>,
}

fn push_unique(list: &mut Vec<Id<Member>>, id: Id<Member>) {
    if !list.contains(&id) {
        list.push(id);
    }
}

fn non_empty(list: Vec<Id<Member>>) -> Option<Vec<Id<Member>>> {
    if list.is_empty() {
        None
    } else {
        Some(list)
    }
}

/// Builds one chart node per member, in the order of `members`.
pub fn to_chart_nodes(members: &[Member], relationships: &[Relationship]) -> Vec<ChartNode> {
    let mut slots: Vec<Neighbours> = Vec::with_capacity(members.len());
    let mut index: HashMap<Id<Member>, usize> = HashMap::with_capacity(members.len());
    for member in members {
        // A repeated id shares the accumulator of its last occurrence.
        index.insert(member.id, slots.len());
        slots.push(Neighbours::default());
    }

    for rel in relationships {
        let (member_slot, related_slot) =
            match (index.get(&rel.member_id), index.get(&rel.related_member_id)) {
                (Some(&a), Some(&b)) => (a, b),
                _ => {
                    debug!(
                        "event=chart_edge_dropped module=chart reason=dangling relationship_id={}",
                        rel.id
                    );
                    continue;
                }
            };

        match &rel.relationship_type {
            RelationshipType::Spouse => {
                push_unique(&mut slots[member_slot].spouses, rel.related_member_id);
                push_unique(&mut slots[related_slot].spouses, rel.member_id);
            }
            RelationshipType::Parent => {
                push_unique(&mut slots[related_slot].parents, rel.member_id);
                push_unique(&mut slots[member_slot].children, rel.related_member_id);
            }
            RelationshipType::Child => {
                push_unique(&mut slots[member_slot].parents, rel.related_member_id);
                push_unique(&mut slots[related_slot].children, rel.member_id);
            }
            RelationshipType::Unrecognized(kind) => {
                debug!(
                    "event=chart_edge_dropped module=chart reason=unknown_type relationship_id={} type={}",
                    rel.id, kind
                );
            }
        }
    }

    members
        .iter()
        .map(|member| {
            let neighbours = &slots[index[&member.id]];
            ChartNode {
                id: member.id,
                data: ChartMemberData {
                    gender: member.gender,
                    name: member.name.clone(),
                    img: member.img.clone(),
                    birth_year: member.birth_year,
                    death_year: member.death_year,
                },
                rels: ChartRels {
                    parents: non_empty(neighbours.parents.clone()),
                    spouses: non_empty(neighbours.spouses.clone()),
                    children: non_empty(neighbours.children.clone()),
                },
            }
        })
        .collect()
}
