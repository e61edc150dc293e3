use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::member::{Gender, Member};
use super::tree::FamilyTree;

/// Neighbour lists of one chart node. A list is `None` rather than empty so
/// the serialized object carries only the keys that have entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<Id<Member>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouses: Option<Vec<Id<Member>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Id<Member>>>,
}

impl ChartRels {
    pub fn is_empty(&self) -> bool {
        self.parents.is_none() && self.spouses.is_none() && self.children.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartMemberData {
    pub gender: Gender,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}

/// Per-member view consumed by the pedigree chart renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartNode {
    pub id: Id<Member>,
    pub data: ChartMemberData,
    pub rels: ChartRels,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyTreeChartData {
    pub tree: FamilyTree,
    #[serde(rename = "chartData")]
    pub chart_data: Vec<ChartNode>,
}
