use serde::{Deserialize, Serialize};

use crate::core::sanitize_image_name;

/// Container id of the diagram canvas. Any other id is the icon palette.
pub const DIAGRAM_CANVAS_ID: &str = "map";

/// Element being dragged, as reported by the drag-drop capability.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DraggedItem {
    /// Class list of the element's first child.
    pub class_name: String,
    /// Entry copied into the canvas container when a new icon is placed.
    pub payload: String,
}

impl DraggedItem {
    #[must_use]
    pub fn new(class_name: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            payload: payload.into(),
        }
    }
}

/// Finished drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropEvent {
    pub previous_container_id: String,
    pub container_id: String,
    pub previous_index: usize,
    pub current_index: usize,
    pub item: DraggedItem,
}

impl DropEvent {
    /// Drop of a palette item onto the canvas.
    #[must_use]
    pub fn from_palette(
        palette_id: impl Into<String>,
        current_index: usize,
        item: DraggedItem,
    ) -> Self {
        Self {
            previous_container_id: palette_id.into(),
            container_id: DIAGRAM_CANVAS_ID.to_owned(),
            previous_index: 0,
            current_index,
            item,
        }
    }

    /// Drag of an icon already on the canvas.
    #[must_use]
    pub fn within_canvas(previous_index: usize, current_index: usize, item: DraggedItem) -> Self {
        Self {
            previous_container_id: DIAGRAM_CANVAS_ID.to_owned(),
            container_id: DIAGRAM_CANVAS_ID.to_owned(),
            previous_index,
            current_index,
            item,
        }
    }

    #[must_use]
    pub fn intent(&self) -> DropIntent {
        if self.previous_container_id == DIAGRAM_CANVAS_ID {
            DropIntent::EditExisting
        } else {
            DropIntent::PlaceNew
        }
    }

    /// Intersections get their own dialog validation.
    #[must_use]
    pub fn is_intersection(&self) -> bool {
        self.item.class_name.contains("intersection")
    }

    #[must_use]
    pub fn image_name(&self) -> String {
        sanitize_image_name(&self.item.class_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropIntent {
    /// An icon already on the canvas was moved; the dialog edits it.
    EditExisting,
    /// A palette item was dropped; the dialog creates a new icon.
    PlaceNew,
}
