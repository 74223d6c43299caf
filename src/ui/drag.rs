// Drag Selection
//
// Pointer-driven range selection over the slot grid.
// - Pointer-down on a free slot starts a single-slot selection
// - Pointer-enter on the same day extends it, unless a reserved slot is in the way
// - Pointer-up over a slot commits, anywhere else cancels

use chrono::{NaiveDate, NaiveTime};

use crate::models::slot::{index_to_time, SlotId};
use crate::services::slot_grid::{grid_duration_minutes, SlotGrid};
use crate::services::submission::StagedSlot;

/// Contiguous run of slots on one day, `start_index <= end_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub date: NaiveDate,
    pub start_index: u8,
    pub end_index: u8,
}

impl Selection {
    pub fn single(slot: SlotId) -> Self {
        Self {
            date: slot.date,
            start_index: slot.index,
            end_index: slot.index,
        }
    }

    /// Selection between two indices in either order.
    pub fn spanning(date: NaiveDate, a: u8, b: u8) -> Self {
        Self {
            date,
            start_index: a.min(b),
            end_index: a.max(b),
        }
    }

    pub fn slot_count(&self) -> usize {
        (self.end_index - self.start_index) as usize + 1
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        index_to_time(self.start_index)
    }

    /// Clamped to the four-hour booking limit.
    pub fn duration_minutes(&self) -> u32 {
        grid_duration_minutes(self.start_index, self.end_index)
    }

    pub fn contains(&self, slot: SlotId) -> bool {
        slot.date == self.date && (self.start_index..=self.end_index).contains(&slot.index)
    }

    pub fn staged(&self) -> Option<StagedSlot> {
        Some(StagedSlot {
            date: self.date,
            start_time: self.start_time()?,
            duration_minutes: self.duration_minutes(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging { anchor: SlotId, selection: Selection },
}

/// Result of feeding one pointer event into the machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing changed
    Ignored,
    /// A new gesture began; its single slot should be staged
    Started(StagedSlot),
    /// The selection grew or shrank; stage the new range
    Extended(StagedSlot),
    /// The range would cover a reserved slot and was refused
    Blocked { reserved: SlotId },
    Committed(Selection),
    /// Gesture dropped; staged form fields are left alone
    Cancelled,
}

/// The single owned drag state of a booking grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSelection {
    phase: DragPhase,
    committed: Option<Selection>,
}

impl Default for DragSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl DragSelection {
    pub fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
            committed: None,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Range to highlight: the live drag, else the last committed one.
    pub fn selection(&self) -> Option<Selection> {
        match self.phase {
            DragPhase::Dragging { selection, .. } => Some(selection),
            DragPhase::Idle => self.committed,
        }
    }

    pub fn committed(&self) -> Option<Selection> {
        self.committed
    }

    pub fn on_pointer_down(&mut self, slot: SlotId, grid: &SlotGrid) -> DragOutcome {
        if self.is_dragging() {
            log::debug!("New pointer-down ends the active drag");
            self.phase = DragPhase::Idle;
        }

        if !grid.is_available(slot) {
            log::debug!("Ignoring pointer-down on unavailable slot {:?}", slot);
            return DragOutcome::Ignored;
        }

        let selection = Selection::single(slot);
        self.committed = None;
        self.phase = DragPhase::Dragging {
            anchor: slot,
            selection,
        };

        match selection.staged() {
            Some(staged) => DragOutcome::Started(staged),
            None => DragOutcome::Ignored,
        }
    }

    pub fn on_pointer_enter(&mut self, slot: SlotId, grid: &SlotGrid) -> DragOutcome {
        let DragPhase::Dragging { anchor, selection } = self.phase else {
            return DragOutcome::Ignored;
        };

        if slot.date != anchor.date {
            return DragOutcome::Ignored;
        }

        let candidate = Selection::spanning(anchor.date, anchor.index, slot.index);
        let reserved = (candidate.start_index..=candidate.end_index)
            .map(|index| SlotId::new(anchor.date, index))
            .find(|id| !grid.is_available(*id));

        if let Some(reserved) = reserved {
            log::debug!(
                "Drag extension to {:?} blocked by {:?}; keeping {:?}",
                slot,
                reserved,
                selection
            );
            return DragOutcome::Blocked { reserved };
        }

        self.phase = DragPhase::Dragging {
            anchor,
            selection: candidate,
        };

        match candidate.staged() {
            Some(staged) => DragOutcome::Extended(staged),
            None => DragOutcome::Ignored,
        }
    }

    /// `over` is the slot under the pointer at release, if any.
    pub fn on_pointer_up(&mut self, over: Option<SlotId>) -> DragOutcome {
        let DragPhase::Dragging { selection, .. } = self.phase else {
            return DragOutcome::Ignored;
        };

        self.phase = DragPhase::Idle;
        match over {
            Some(_) => {
                self.committed = Some(selection);
                DragOutcome::Committed(selection)
            }
            None => DragOutcome::Cancelled,
        }
    }

    /// Drop all selection state, e.g. after submitting or navigating away.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
