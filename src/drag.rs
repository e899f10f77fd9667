//! Pointer gesture state machine.
//!
//! The controller is a plain mutable record: it is read and written
//! synchronously by every pointer handler and is not part of the observed
//! diagram state. Only the coordinates it writes (pan offset, table
//! positions) are observed, and callers learn whether anything changed
//! from the return value of [`DragController::pointer_move`].

use crate::schema::PositionedTable;
use crate::viewport::{Point, Viewport};

/// What a pointer-down landed on.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    Background,
    /// The header (drag handle) of the named table.
    TableHeader(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Panning {
        start: Point,
        initial_pan: Point,
    },
    /// `start`/`initial` are rebased whenever the scale changes mid-drag,
    /// so displacement already applied is never rescaled.
    MovingTable {
        name: String,
        start: Point,
        initial: Point,
        scale: f64,
        last: Point,
    },
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Start a gesture. Ignored while another gesture is in progress, or
    /// when the header belongs to a table that is not on the canvas.
    /// Returns whether a gesture started.
    pub fn pointer_down(
        &mut self,
        target: PointerTarget,
        screen: Point,
        viewport: &Viewport,
        tables: &[PositionedTable],
    ) -> bool {
        if self.is_active() {
            tracing::debug!(state = ?self.state, "pointer down ignored during active drag");
            return false;
        }

        self.state = match target {
            PointerTarget::Background => DragState::Panning {
                start: screen,
                initial_pan: viewport.pan_offset(),
            },
            PointerTarget::TableHeader(name) => {
                let Some(table) = tables.iter().find(|t| t.name() == name) else {
                    tracing::debug!(table = %name, "pointer down on unknown table");
                    return false;
                };
                DragState::MovingTable {
                    start: screen,
                    initial: Point::new(table.x, table.y),
                    scale: viewport.scale(),
                    last: screen,
                    name,
                }
            }
        };
        tracing::debug!(state = ?self.state, "drag started");
        true
    }

    /// Apply the current pointer position. Returns whether any observed
    /// coordinate changed.
    pub fn pointer_move(
        &mut self,
        screen: Point,
        viewport: &mut Viewport,
        tables: &mut [PositionedTable],
    ) -> bool {
        match &mut self.state {
            DragState::Idle => false,
            DragState::Panning { start, initial_pan } => {
                let next = *initial_pan + (screen - *start);
                if next == viewport.pan_offset() {
                    return false;
                }
                viewport.set_pan_offset(next);
                true
            }
            DragState::MovingTable {
                name,
                start,
                initial,
                scale,
                last,
            } => {
                let Some(table) = tables.iter_mut().find(|t| t.name() == name.as_str()) else {
                    return false;
                };

                let current = viewport.scale();
                if *scale != current {
                    tracing::debug!(from = *scale, to = current, "scale changed mid-drag, rebasing");
                    *start = *last;
                    *initial = Point::new(table.x, table.y);
                    *scale = current;
                }
                *last = screen;

                let dx = (screen.x - start.x) / *scale;
                let dy = (screen.y - start.y) / *scale;
                let (x, y) = (initial.x + dx, initial.y + dy);
                if table.x == x && table.y == y {
                    return false;
                }
                table.x = x;
                table.y = y;
                true
            }
        }
    }

    /// End the gesture. Safe to call when no gesture is active.
    pub fn pointer_up(&mut self) {
        if self.is_active() {
            tracing::debug!(state = ?self.state, "drag ended");
        }
        self.state = DragState::Idle;
    }
}
