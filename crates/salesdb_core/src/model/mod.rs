//! Entity model for the department/seller store surface.
//!
//! # Responsibility
//! - Define the plain data holders rows are mapped into.
//!
//! # Invariants
//! - `id` is `None` until the entity has been persisted.
//! - A seller always references exactly one department.

pub mod department;
pub mod seller;
