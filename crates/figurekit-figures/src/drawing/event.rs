use uuid::Uuid;

use figurekit_core::{FigureId, Rect};

use crate::attributes::{AttributeRestoreData, AttributeValue};

/// Notification sent by a [`Drawing`](super::Drawing) after a mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum FigureEvent {
    /// One attribute entry was overwritten or removed
    AttributeChanged {
        figure: FigureId,
        name: String,
        old: Option<AttributeValue>,
        new: Option<AttributeValue>,
    },
    /// The whole attribute map was replaced from a snapshot
    AttributesRestored {
        figure: FigureId,
        old: AttributeRestoreData,
        new: AttributeRestoreData,
    },
    /// Outermost change bracket closed; `area` covers the figure before and after
    Changed { figure: FigureId, area: Rect },
    /// Cached bounds of a composite were dropped
    Invalidated { figure: FigureId },
    /// `parent` is `None` for the top level of the drawing
    FigureAdded {
        parent: Option<FigureId>,
        figure: FigureId,
        index: usize,
    },
    FigureRemoved {
        parent: Option<FigureId>,
        figure: FigureId,
        index: usize,
    },
}

impl FigureEvent {
    pub fn figure(&self) -> FigureId {
        match self {
            FigureEvent::AttributeChanged { figure, .. }
            | FigureEvent::AttributesRestored { figure, .. }
            | FigureEvent::Changed { figure, .. }
            | FigureEvent::Invalidated { figure }
            | FigureEvent::FigureAdded { figure, .. }
            | FigureEvent::FigureRemoved { figure, .. } => *figure,
        }
    }
}

/// Observer of drawing mutations.
///
/// Listeners receive events by shared reference while the drawing is
/// borrowed, so they cannot mutate it from inside a callback.
pub trait FigureListener {
    fn figure_event(&mut self, event: &FigureEvent);
}

impl<F: FnMut(&FigureEvent)> FigureListener for F {
    fn figure_event(&mut self, event: &FigureEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(Uuid);

#[derive(Default)]
pub(crate) struct Listeners {
    entries: Vec<(ListenerHandle, Box<dyn FigureListener>)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Box<dyn FigureListener>) -> ListenerHandle {
        let handle = ListenerHandle(Uuid::new_v4());
        self.entries.push((handle, listener));
        handle
    }

    pub(crate) fn remove(&mut self, handle: ListenerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(h, _)| *h != handle);
        self.entries.len() != before
    }

    pub(crate) fn dispatch(&mut self, event: &FigureEvent) {
        for (_, listener) in &mut self.entries {
            listener.figure_event(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
