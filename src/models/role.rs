//! The three role lenses onto the roster.

use serde::{Deserialize, Serialize};

/// A role screen. Each role keeps its own active-record selection;
/// selecting for one role never moves another role's selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Nurse,
    Student,
}

impl Role {
    /// All roles, in screen order.
    pub const ALL: [Role; 3] = [Role::Doctor, Role::Nurse, Role::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Nurse => "nurse",
            Role::Student => "student",
        }
    }

    /// Index into per-role storage slots.
    pub(crate) fn slot(&self) -> usize {
        match self {
            Role::Doctor => 0,
            Role::Nurse => 1,
            Role::Student => 2,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(Role::Doctor.to_string(), "doctor");
        assert_eq!(Role::Nurse.to_string(), "nurse");
        assert_eq!(Role::Student.to_string(), "student");
    }

    #[test]
    fn slots_are_distinct() {
        let mut slots: Vec<usize> = Role::ALL.iter().map(|r| r.slot()).collect();
        slots.sort_unstable();
        slots.dedup();
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Nurse).unwrap(), "\"nurse\"");
        let back: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(back, Role::Student);
    }
}
