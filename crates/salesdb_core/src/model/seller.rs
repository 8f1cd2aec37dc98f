//! Seller entity.
//!
//! # Invariants
//! - `department` is shared: sellers mapped from one list query that have
//!   the same department id point at the same `Rc<Department>`.

use crate::model::department::{Department, DepartmentId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Database-generated seller key.
pub type SellerId = i64;

/// Employee belonging to one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    /// Generated key; `None` before insert.
    pub id: Option<SellerId>,
    pub name: String,
    pub email: String,
    /// Calendar date, no time or zone component.
    pub birth_date: NaiveDate,
    pub base_salary: f64,
    pub department: Rc<Department>,
}

impl Seller {
    /// Creates a not-yet-persisted seller.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        birth_date: NaiveDate,
        base_salary: f64,
        department: Rc<Department>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            birth_date,
            base_salary,
            department,
        }
    }

    /// Key of the referenced department, if it has been persisted.
    pub fn department_id(&self) -> Option<DepartmentId> {
        self.department.id
    }
}

impl Display for Seller {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = self
            .id
            .map_or_else(|| "<new>".to_string(), |id| id.to_string());
        write!(
            f,
            "Seller [id={id}, name={}, email={}, birthDate={}, baseSalary={:.2}, department={}]",
            self.name, self.email, self.birth_date, self.base_salary, self.department
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Seller;
    use crate::model::department::Department;
    use chrono::NaiveDate;
    use std::rc::Rc;

    fn sample() -> Seller {
        Seller::new(
            "Greg",
            "greg@x.com",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            4000.0,
            Rc::new(Department::with_id(1, "IT")),
        )
    }

    #[test]
    fn new_seller_has_no_id_and_exposes_department_id() {
        let seller = sample();
        assert!(seller.id.is_none());
        assert_eq!(seller.department_id(), Some(1));
    }

    #[test]
    fn display_renders_nested_department() {
        let mut seller = sample();
        seller.id = Some(7);
        let rendered = seller.to_string();
        assert!(rendered.starts_with("Seller [id=7, name=Greg"));
        assert!(rendered.contains("birthDate=2024-01-01"));
        assert!(rendered.contains("baseSalary=4000.00"));
        assert!(rendered.contains("Department [id=1, name=IT]"));
    }

    #[test]
    fn serializes_birth_date_as_calendar_date() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["birth_date"], "2024-01-01");
        assert_eq!(json["department"]["name"], "IT");
    }
}
