use tracing::{debug, warn};

use crate::core::{IconList, IconOrientation, PlacedIcon};
use crate::error::{DiagramError, DiagramResult};
use crate::interaction::{
    DialogInitialValues, DialogPrompt, DialogRequest, DialogResult, DialogStatus, DropEvent,
    DropIntent,
};

use super::SurveyDiagram;

impl SurveyDiagram {
    /// Replaces the icon list, e.g. with the first snapshot of the overlay bus.
    pub fn load_icons(&mut self, icons: &[PlacedIcon]) {
        self.icons = icons.to_vec();
        self.canvas_items = icons.iter().map(|icon| icon.image_name.clone()).collect();
        reindex(&mut self.icons);
        debug!(count = self.icons.len(), "loaded placed icons");
    }

    /// Starts handling a drop and returns what the edit dialog should show.
    ///
    /// The event is kept until [`SurveyDiagram::finish_drop`] receives the
    /// dialog's answer.
    pub fn begin_drop(&mut self, event: DropEvent) -> DiagramResult<DialogPrompt> {
        if !self.config.enable_drag {
            return Err(DiagramError::DragDisabled);
        }

        let intent = event.intent();
        let initial_values = match intent {
            DropIntent::EditExisting => {
                DialogInitialValues::from_icon(self.icons.get(event.previous_index))
            }
            DropIntent::PlaceNew => DialogInitialValues::reset(),
        };
        let prompt = DialogPrompt {
            request: DialogRequest {
                form_type: event.item.class_name.clone(),
                is_update_image: intent == DropIntent::EditExisting,
            },
            initial_values,
            intersection: event.is_intersection(),
        };

        debug!(
            ?intent,
            previous_index = event.previous_index,
            current_index = event.current_index,
            intersection = prompt.intersection,
            "drop awaiting dialog"
        );
        if let Some(replaced) = self.pending_drop.replace(event) {
            warn!(
                previous_index = replaced.previous_index,
                "replacing drop that never received a dialog answer"
            );
        }
        Ok(prompt)
    }

    /// Applies the dialog answer to the pending drop.
    ///
    /// `None` means the dialog closed without an answer. Returns the icon list
    /// to publish when the list changed.
    pub fn finish_drop(&mut self, result: Option<&DialogResult>) -> Option<IconList> {
        let event = self.pending_drop.take()?;
        let Some(result) = result else {
            debug!("dialog closed without an answer");
            return None;
        };

        let status = match (result.status, event.intent()) {
            (DialogStatus::Add, DropIntent::EditExisting) => DialogStatus::Update,
            (status, _) => status,
        };

        match status {
            DialogStatus::Add => {
                let icon = build_icon(&event, result);
                let index = event.current_index.min(self.icons.len());
                self.icons.insert(index, icon);
                let canvas_index = event.current_index.min(self.canvas_items.len());
                self.canvas_items
                    .insert(canvas_index, event.item.payload.clone());
            }
            DialogStatus::Update => {
                let icon = build_icon(&event, result);
                self.upsert_icon(&event, icon);
            }
            DialogStatus::Delete => {
                if event.previous_index < self.canvas_items.len() {
                    let removed = self.canvas_items.remove(event.previous_index);
                    self.discarded_items.push(removed);
                }
                if event.previous_index < self.icons.len() {
                    self.icons.remove(event.previous_index);
                } else {
                    warn!(
                        previous_index = event.previous_index,
                        count = self.icons.len(),
                        "delete requested for an icon that is not on the diagram"
                    );
                }
            }
            DialogStatus::Dismissed => {
                debug!("dialog dismissed");
                return None;
            }
        }

        reindex(&mut self.icons);
        debug!(?status, count = self.icons.len(), "placed icons updated");
        Some(IconList::from(self.icons.clone()))
    }

    fn upsert_icon(&mut self, event: &DropEvent, icon: PlacedIcon) {
        let mut target = event.current_index;
        if event.intent() == DropIntent::EditExisting
            && event.previous_index != event.current_index
            && event.previous_index < self.icons.len()
        {
            let moved = self.icons.remove(event.previous_index);
            target = target.min(self.icons.len());
            self.icons.insert(target, moved);
            move_item(
                &mut self.canvas_items,
                event.previous_index,
                event.current_index,
            );
        }

        match self.icons.get_mut(target) {
            Some(slot) => *slot = icon,
            None => self.icons.push(icon),
        }
    }
}

fn build_icon(event: &DropEvent, result: &DialogResult) -> PlacedIcon {
    let orientation = IconOrientation::from_code(result.property_orientation);
    PlacedIcon {
        image_index: event.current_index,
        image_distance: result.property_distance,
        image_orientation: orientation,
        image_width: result.property_width,
        image_margin: orientation.margin_px(),
        image_pos: result.property_position,
        image_name: event.image_name(),
        road_length: result.road_length,
    }
}

fn move_item(items: &mut Vec<String>, from: usize, to: usize) {
    if from >= items.len() {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

fn reindex(icons: &mut [PlacedIcon]) {
    for (index, icon) in icons.iter_mut().enumerate() {
        icon.image_index = index;
    }
}
