//! In-memory list of generated user ids and their roles.

use uuid::Uuid;

use crate::generators::GeneratedUser;
use stays::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: Uuid,
    pub role: Role,
}

/// Users available as foreign-key targets for later stages.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        Self { entries }
    }

    pub fn from_users(users: &[GeneratedUser]) -> Self {
        Self::new(
            users
                .iter()
                .map(|u| RosterEntry {
                    id: u.id,
                    role: u.role,
                })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// All user ids, in generation order.
    pub fn ids(&self) -> Vec<Uuid> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Ids of users holding `role`, in generation order.
    pub fn ids_with_role(&self, role: Role) -> Vec<Uuid> {
        self.entries
            .iter()
            .filter(|e| e.role == role)
            .map(|e| e.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
