//! # Organizational Entities
//!
//! Participants that can be named as potential owners of a task: individual
//! users and the groups they belong to. Entities are compared by `entity_id`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A group of users, identified by its entity id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Group {
    pub entity_id: String,
}

impl Group {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
        }
    }
}

/// Participant reference used in a task's potential owner set
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "entity_id", rename_all = "snake_case")]
pub enum OrganizationalEntity {
    User(String),
    Group(String),
}

impl OrganizationalEntity {
    pub fn user(entity_id: impl Into<String>) -> Self {
        Self::User(entity_id.into())
    }

    pub fn group(entity_id: impl Into<String>) -> Self {
        Self::Group(entity_id.into())
    }

    pub fn entity_id(&self) -> &str {
        match self {
            Self::User(id) | Self::Group(id) => id,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

impl From<&Group> for OrganizationalEntity {
    fn from(group: &Group) -> Self {
        Self::Group(group.entity_id.clone())
    }
}

impl fmt::Display for OrganizationalEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user:{id}"),
            Self::Group(id) => write!(f, "group:{id}"),
        }
    }
}
