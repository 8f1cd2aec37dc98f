//! Department entity.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Database-generated department key.
pub type DepartmentId = i64;

/// Organizational unit sellers belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Department {
    /// Generated key; `None` before insert.
    pub id: Option<DepartmentId>,
    pub name: String,
}

impl Department {
    /// Creates a not-yet-persisted department.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Creates a department with a known key, e.g. as a lookup handle.
    pub fn with_id(id: DepartmentId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "Department [id={id}, name={}]", self.name),
            None => write!(f, "Department [id=<new>, name={}]", self.name),
        }
    }
}
