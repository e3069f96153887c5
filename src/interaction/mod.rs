//! Contracts with the host's drag-drop capability and edit dialog.

mod dialog;
mod drag_drop;

pub use dialog::{
    DialogInitialValues, DialogPrompt, DialogRequest, DialogResult, DialogStatus, EditDialog,
};
pub use drag_drop::{DIAGRAM_CANVAS_ID, DraggedItem, DropEvent, DropIntent};
