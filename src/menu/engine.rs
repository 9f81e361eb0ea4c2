//! Fixed-catalog menu engine.
//!
//! Pure state machine: it consumes [`NavAction`]s, talks to a
//! [`MenuHost`] for field values and run actions, and returns the two
//! display rows to draw. It never touches hardware, so the caller owns the
//! display and decides when to draw.
//!
//! ```text
//!   Browse ──Select(value field)──▶ Edit ──Select──▶ host.value(Set) ──▶ Browse
//!     │                              └────Escape────────────────────────▶ Browse
//!     ├──Select(submenu)──▶ push menu
//!     ├──Select(run)──────▶ Confirm ──Select──▶ host.run(id) ──▶ Browse
//!     │                        └────Escape──────────────────────▶ Browse
//!     └──Escape──▶ pop menu, or deactivate at the root
//! ```

use core::fmt::Write as _;

use heapless::{String, Vec};
use log::warn;

use crate::app::navigation::NavAction;
use crate::app::ports::DISPLAY_COLS;

use super::catalog::{self, FieldId, FieldKind, MenuId, ROOT_MENU};

/// Maximum submenu nesting.
const MAX_DEPTH: usize = 4;

/// One display row.
pub type Line = String<DISPLAY_COLS>;

/// Access mode of a [`MenuHost::value`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccess {
    Get,
    Set(i32),
}

/// Callbacks from the engine into the application.
pub trait MenuHost {
    /// Get or set a value field. `None` means the id carries no value or
    /// the value was rejected; the engine then neither renders nor commits.
    fn value(&mut self, id: FieldId, access: FieldAccess) -> Option<i32>;

    /// Run an action field. `false` if the id is not runnable.
    fn run(&mut self, id: FieldId) -> bool;
}

/// Contents of both display rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub top: Line,
    pub bottom: Line,
}

impl Frame {
    fn new(top: &str, bottom: &str) -> Self {
        Self {
            top: fit(top),
            bottom: fit(bottom),
        }
    }
}

/// Copy `text` into a display row, truncating at the row width.
pub fn fit(text: &str) -> Line {
    let mut line = Line::new();
    for ch in text.chars() {
        if line.push(ch).is_err() {
            break;
        }
    }
    line
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Level {
    menu: MenuId,
    item: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edit {
    field: FieldId,
    value: i32,
}

/// What the second row is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Browse,
    Edit(Edit),
    /// A run field waiting for a second select.
    Confirm { field: FieldId },
}

#[derive(Debug, Clone, Default)]
pub struct MenuEngine {
    active: bool,
    stack: Vec<Level, MAX_DEPTH>,
    focus: Focus,
}

impl MenuEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a value field is being edited.
    pub fn is_editing(&self) -> bool {
        matches!(self.focus, Focus::Edit(_))
    }

    /// Whether a run field is waiting for confirmation.
    pub fn is_confirming(&self) -> bool {
        matches!(self.focus, Focus::Confirm { .. })
    }

    /// Current menu, if active.
    pub fn current_menu(&self) -> Option<MenuId> {
        self.stack.last().map(|l| l.menu)
    }

    /// Highlighted item, if active.
    pub fn current_item(&self) -> Option<FieldId> {
        let level = self.stack.last()?;
        catalog::menu(level.menu).items.get(level.item).copied()
    }

    /// Drop all navigation state. The next [`start`](Self::start) redraws
    /// the root menu from scratch.
    pub fn reset(&mut self) {
        self.active = false;
        self.stack.clear();
        self.focus = Focus::Browse;
    }

    /// Enter the root menu at its first item.
    pub fn start(&mut self) -> Frame {
        self.reset();
        self.active = true;
        // Capacity is MAX_DEPTH > 0 and the stack was just cleared.
        let _ = self.stack.push(Level {
            menu: ROOT_MENU,
            item: 0,
        });
        self.browse_frame()
    }

    /// Apply one navigation action. Returns the new frame when the display
    /// needs redrawing.
    pub fn handle(&mut self, action: NavAction, host: &mut dyn MenuHost) -> Option<Frame> {
        if !self.active || action == NavAction::None {
            return None;
        }
        match self.focus {
            Focus::Browse => self.handle_browse(action, host),
            Focus::Edit(edit) => self.handle_edit(edit, action, host),
            Focus::Confirm { field } => self.handle_confirm(field, action, host),
        }
    }

    // -- Browse --------------------------------------------------------------

    fn handle_browse(&mut self, action: NavAction, host: &mut dyn MenuHost) -> Option<Frame> {
        match action {
            NavAction::Increment(n) => {
                self.scroll(i32::from(n));
                Some(self.browse_frame())
            }
            NavAction::Decrement(n) => {
                self.scroll(-i32::from(n));
                Some(self.browse_frame())
            }
            NavAction::Select => self.select(host),
            NavAction::Escape => {
                self.stack.pop();
                if self.stack.is_empty() {
                    self.active = false;
                    None
                } else {
                    Some(self.browse_frame())
                }
            }
            NavAction::None => None,
        }
    }

    /// Move the highlight, wrapping at both ends.
    fn scroll(&mut self, delta: i32) {
        if let Some(level) = self.stack.last_mut() {
            let count = catalog::menu(level.menu).items.len() as i32;
            level.item = (level.item as i32 + delta).rem_euclid(count) as usize;
        }
    }

    fn select(&mut self, host: &mut dyn MenuHost) -> Option<Frame> {
        let id = self.current_item()?;
        match catalog::field(id).kind {
            FieldKind::Submenu(menu) => {
                if self.stack.push(Level { menu, item: 0 }).is_err() {
                    warn!("menu nesting too deep at item {}", id.raw());
                    return None;
                }
                Some(self.browse_frame())
            }
            FieldKind::Run { prompt } => {
                self.focus = Focus::Confirm { field: id };
                Some(Frame::new(catalog::field(id).label, prompt))
            }
            FieldKind::Int { .. } | FieldKind::Bool | FieldKind::List(_) => {
                let Some(value) = host.value(id, FieldAccess::Get) else {
                    warn!("menu item {} has no value", id.raw());
                    return None;
                };
                let edit = Edit { field: id, value };
                self.focus = Focus::Edit(edit);
                Some(edit_frame(edit))
            }
        }
    }

    fn browse_frame(&self) -> Frame {
        match (self.current_menu(), self.current_item()) {
            (Some(menu), Some(item)) => {
                Frame::new(catalog::menu(menu).title, catalog::field(item).label)
            }
            _ => Frame::default(),
        }
    }

    // -- Edit ----------------------------------------------------------------

    fn handle_edit(
        &mut self,
        mut edit: Edit,
        action: NavAction,
        host: &mut dyn MenuHost,
    ) -> Option<Frame> {
        match action {
            NavAction::Increment(n) => edit.value = step(edit, i32::from(n)),
            NavAction::Decrement(n) => edit.value = step(edit, -i32::from(n)),
            NavAction::Select => {
                self.focus = Focus::Browse;
                if host.value(edit.field, FieldAccess::Set(edit.value)).is_none() {
                    warn!(
                        "menu item {} rejected value {}",
                        edit.field.raw(),
                        edit.value
                    );
                }
                return Some(self.browse_frame());
            }
            NavAction::Escape => {
                self.focus = Focus::Browse;
                return Some(self.browse_frame());
            }
            NavAction::None => return None,
        }
        self.focus = Focus::Edit(edit);
        Some(edit_frame(edit))
    }

    // -- Confirm -------------------------------------------------------------

    /// Select runs the action, Escape backs out. Rotation is ignored.
    fn handle_confirm(
        &mut self,
        field: FieldId,
        action: NavAction,
        host: &mut dyn MenuHost,
    ) -> Option<Frame> {
        match action {
            NavAction::Select => {
                self.focus = Focus::Browse;
                if !host.run(field) {
                    warn!("menu item {} is not runnable", field.raw());
                }
                Some(self.browse_frame())
            }
            NavAction::Escape => {
                self.focus = Focus::Browse;
                Some(self.browse_frame())
            }
            NavAction::Increment(_) | NavAction::Decrement(_) | NavAction::None => None,
        }
    }
}

/// Apply a signed step to the value being edited.
fn step(edit: Edit, delta: i32) -> i32 {
    match catalog::field(edit.field).kind {
        FieldKind::Int { min, max } => edit.value.saturating_add(delta).clamp(min, max),
        FieldKind::Bool => {
            if delta % 2 == 0 {
                edit.value
            } else {
                i32::from(edit.value == 0)
            }
        }
        FieldKind::List(options) => {
            let count = catalog::option_count(options) as i32;
            (edit.value + delta.rem_euclid(count)).rem_euclid(count)
        }
        FieldKind::Run { .. } | FieldKind::Submenu(_) => edit.value,
    }
}

fn edit_frame(edit: Edit) -> Frame {
    let desc = catalog::field(edit.field);
    let mut bottom = Line::new();
    // Formatted values are at most 10 characters; truncation is harmless.
    let _ = match desc.kind {
        FieldKind::Int { .. } => write!(bottom, "[{}]", edit.value),
        FieldKind::Bool => write!(bottom, "[{}]", if edit.value != 0 { "Y" } else { "N" }),
        FieldKind::List(options) => {
            write!(bottom, "[{}]", catalog::option_label(options, edit.value).unwrap_or("?"))
        }
        FieldKind::Run { .. } | FieldKind::Submenu(_) => Ok(()),
    };
    Frame {
        top: fit(desc.label),
        bottom,
    }
}
