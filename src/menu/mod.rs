//! Service menu: static catalog plus the browse/edit/run engine.

pub mod catalog;
pub mod engine;

pub use catalog::{FieldId, FieldKind, MenuId};
pub use engine::{FieldAccess, Frame, MenuEngine, MenuHost};
