//! Client-side view of the signed-in user's trees.
//!
//! `FamilyTreeState` is a plain value. Every action borrows the current
//! snapshot, performs the store operation, and returns a new snapshot; on
//! error the caller still holds the old one unchanged. The view is advisory
//! and can always be rebuilt with [`FamilyTreeState::initialize`].

use rusqlite::Connection;

use crate::auth::Session;
use crate::chart;
use crate::error::ShajraResult;
use crate::model::{
    ChartNode, FamilyTree, Gender, Id, Member, MemberUpdate, NewMember, NewRelationship, NewTree,
    Relationship, TreeUpdate,
};
use crate::ops::{member_ops, relationship_ops, tree_ops};
use crate::queries::tree_queries;

#[derive(Debug, Clone, Default)]
pub struct FamilyTreeState {
    pub trees: Vec<FamilyTree>,
    pub active_tree_id: Option<Id<FamilyTree>>,
    /// Members of the active tree.
    pub members: Vec<Member>,
    /// Relationships of the active tree.
    pub relationships: Vec<Relationship>,
    pub chart_data: Vec<ChartNode>,
}

impl FamilyTreeState {
    pub fn active_tree(&self) -> Option<&FamilyTree> {
        let active = self.active_tree_id?;
        self.trees.iter().find(|t| t.id == active)
    }

    pub fn default_tree(&self) -> Option<&FamilyTree> {
        tree_queries::pick_default(&self.trees)
    }

    pub fn has_trees(&self) -> bool {
        !self.trees.is_empty()
    }

    pub fn has_members(&self) -> bool {
        !self.members.is_empty()
    }

    pub fn member_by_id(&self, member_id: Id<Member>) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }

    pub fn members_by_gender(&self, gender: Gender) -> Vec<&Member> {
        self.members.iter().filter(|m| m.gender == gender).collect()
    }

    /// Loads the user's trees and activates the default one.
    pub fn initialize(conn: &Connection, session: &Session) -> ShajraResult<Self> {
        let state = FamilyTreeState {
            trees: tree_queries::list_trees(conn, session)?,
            ..FamilyTreeState::default()
        };

        match state.default_tree().map(|t| t.id) {
            Some(tree_id) => state.set_active_tree(conn, session, tree_id),
            None => Ok(state),
        }
    }

    pub fn set_active_tree(
        &self,
        conn: &Connection,
        session: &Session,
        tree_id: Id<FamilyTree>,
    ) -> ShajraResult<Self> {
        let loaded = tree_queries::get_tree(conn, session, tree_id)?;

        let mut next = self.clone();
        next.active_tree_id = Some(tree_id);
        next.members = loaded.members;
        next.relationships = loaded.relationships;
        Ok(next.rechart())
    }

    /// Appends the new tree and activates it when it is flagged default or is
    /// the only tree. A new tree has no members, so activation needs no
    /// further store read and cannot fail after the insert.
    pub fn create_tree(
        &self,
        conn: &Connection,
        session: &Session,
        input: &NewTree,
    ) -> ShajraResult<(Self, FamilyTree)> {
        let tree = tree_ops::create_tree(conn, session, input)?;

        let mut next = self.clone();
        next.trees.push(tree.clone());
        if tree.is_default || next.trees.len() == 1 {
            next.active_tree_id = Some(tree.id);
            next.members.clear();
            next.relationships.clear();
            next = next.rechart();
        }
        Ok((next, tree))
    }

    pub fn update_tree(
        &self,
        conn: &Connection,
        session: &Session,
        tree_id: Id<FamilyTree>,
        update: &TreeUpdate,
    ) -> ShajraResult<(Self, FamilyTree)> {
        let tree = tree_ops::update_tree(conn, session, tree_id, update)?;

        let mut next = self.clone();
        if let Some(slot) = next.trees.iter_mut().find(|t| t.id == tree_id) {
            *slot = tree.clone();
        }
        Ok((next, tree))
    }

    /// Removes the tree; if it was active, switches to the first remaining
    /// tree or clears the member view.
    pub fn delete_tree(
        &self,
        conn: &Connection,
        session: &Session,
        tree_id: Id<FamilyTree>,
    ) -> ShajraResult<Self> {
        tree_ops::delete_tree(conn, session, tree_id)?;

        let mut next = self.clone();
        next.trees.retain(|t| t.id != tree_id);
        if next.active_tree_id != Some(tree_id) {
            return Ok(next);
        }

        match next.trees.first().map(|t| t.id) {
            Some(first) => next.set_active_tree(conn, session, first),
            None => {
                next.active_tree_id = None;
                next.members.clear();
                next.relationships.clear();
                next.chart_data.clear();
                Ok(next)
            }
        }
    }

    pub fn create_member(
        &self,
        conn: &Connection,
        session: &Session,
        input: &NewMember,
    ) -> ShajraResult<(Self, Member)> {
        let member = member_ops::create_member(conn, session, input)?;

        let mut next = self.clone();
        if next.active_tree_id == Some(member.tree_id) {
            next.members.push(member.clone());
        }
        Ok((next.rechart(), member))
    }

    pub fn update_member(
        &self,
        conn: &Connection,
        session: &Session,
        member_id: Id<Member>,
        update: &MemberUpdate,
    ) -> ShajraResult<(Self, Member)> {
        let member = member_ops::update_member(conn, session, member_id, update)?;

        let mut next = self.clone();
        if let Some(slot) = next.members.iter_mut().find(|m| m.id == member_id) {
            *slot = member.clone();
        }
        Ok((next.rechart(), member))
    }

    /// Mirrors the store's cascade: every cached relationship naming the
    /// member is dropped along with it.
    pub fn delete_member(
        &self,
        conn: &Connection,
        session: &Session,
        member_id: Id<Member>,
    ) -> ShajraResult<Self> {
        member_ops::delete_member(conn, session, member_id)?;
        Ok(self.without_member(member_id))
    }

    pub fn create_relationship(
        &self,
        conn: &Connection,
        session: &Session,
        input: &NewRelationship,
    ) -> ShajraResult<(Self, Relationship)> {
        let rel = relationship_ops::create_relationship(conn, session, input)?;

        let mut next = self.clone();
        if next.active_tree_id == Some(rel.tree_id) {
            next.relationships.push(rel.clone());
        }
        Ok((next.rechart(), rel))
    }

    pub fn delete_relationship(
        &self,
        conn: &Connection,
        session: &Session,
        relationship_id: Id<Relationship>,
    ) -> ShajraResult<Self> {
        relationship_ops::delete_relationship(conn, session, relationship_id)?;

        let mut next = self.clone();
        next.relationships.retain(|r| r.id != relationship_id);
        Ok(next.rechart())
    }

    /// Empty view, e.g. after sign-out.
    pub fn clear(&self) -> Self {
        FamilyTreeState::default()
    }

    fn without_member(&self, member_id: Id<Member>) -> Self {
        let mut next = self.clone();
        next.members.retain(|m| m.id != member_id);
        next.relationships.retain(|r| !r.involves(member_id));
        next.rechart()
    }

    fn rechart(mut self) -> Self {
        self.chart_data = chart::to_chart_nodes(&self.members, &self.relationships);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationshipType;

    fn snapshot() -> (FamilyTreeState, Member, Member, Member) {
        let tree = FamilyTree::create(Id::generate(), "Khan".into());
        let ali = Member::create(tree.id, "Ali".into(), Gender::Male);
        let sara = Member::create(tree.id, "Sara".into(), Gender::Female);
        let omar = Member::create(tree.id, "Omar".into(), Gender::Male);
        let rels = vec![
            Relationship::create(tree.id, ali.id, sara.id, RelationshipType::Spouse),
            Relationship::create(tree.id, ali.id, omar.id, RelationshipType::Parent),
            Relationship::create(tree.id, sara.id, omar.id, RelationshipType::Parent),
        ];
        let state = FamilyTreeState {
            active_tree_id: Some(tree.id),
            trees: vec![tree],
            members: vec![ali.clone(), sara.clone(), omar.clone()],
            relationships: rels,
            chart_data: Vec::new(),
        }
        .rechart();
        (state, ali, sara, omar)
    }

    #[test]
    fn without_member_purges_both_endpoints() {
        let (state, ali, sara, omar) = snapshot();
        let next = state.without_member(ali.id);

        assert_eq!(next.members.len(), 2);
        assert!(next.relationships.iter().all(|r| !r.involves(ali.id)));
        assert_eq!(next.relationships.len(), 1);
        assert_eq!(next.chart_data.len(), 2);
        let omar_node = next.chart_data.iter().find(|n| n.id == omar.id).unwrap();
        assert_eq!(omar_node.rels.parents, Some(vec![sara.id]));
        // The original snapshot is untouched.
        assert_eq!(state.members.len(), 3);
    }

    #[test]
    fn getters_read_the_snapshot() {
        let (state, ali, _, _) = snapshot();
        assert!(state.has_trees());
        assert!(state.has_members());
        assert_eq!(state.active_tree().map(|t| t.name.as_str()), Some("Khan"));
        assert_eq!(state.member_by_id(ali.id).map(|m| m.name.as_str()), Some("Ali"));
        assert_eq!(state.members_by_gender(Gender::Male).len(), 2);
        assert_eq!(state.members_by_gender(Gender::Female).len(), 1);
    }

    #[test]
    fn default_tree_falls_back_to_first() {
        let owner = Id::generate();
        let first = FamilyTree::create(owner, "First".into());
        let mut flagged = FamilyTree::create(owner, "Flagged".into());
        let state = FamilyTreeState {
            trees: vec![first.clone()],
            ..FamilyTreeState::default()
        };
        assert_eq!(state.default_tree().map(|t| t.id), Some(first.id));

        flagged.is_default = true;
        let state = FamilyTreeState {
            trees: vec![first, flagged.clone()],
            ..FamilyTreeState::default()
        };
        assert_eq!(state.default_tree().map(|t| t.id), Some(flagged.id));
    }

    #[test]
    fn clear_empties_everything() {
        let (state, _, _, _) = snapshot();
        let cleared = state.clear();
        assert!(!cleared.has_trees());
        assert!(cleared.active_tree_id.is_none());
        assert!(cleared.chart_data.is_empty());
    }
}
