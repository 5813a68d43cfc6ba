use std::cell::Cell;

use figurekit_core::{FigureId, Rect};

use crate::attributes::AttributeStore;
use crate::model::Geometry;

/// Lazily computed composite bounds. The inner `None` caches "no children".
#[derive(Debug, Clone, Default)]
pub(crate) struct BoundsCache(Cell<Option<Option<Rect>>>);

impl BoundsCache {
    pub(crate) fn get(&self) -> Option<Option<Rect>> {
        self.0.get()
    }

    pub(crate) fn set(&self, bounds: Option<Rect>) {
        self.0.set(Some(bounds));
    }

    pub(crate) fn invalidate(&self) {
        self.0.set(None);
    }

    fn is_valid(&self) -> bool {
        self.0.get().is_some()
    }
}

#[derive(Debug, Clone)]
pub(crate) enum FigureKind {
    Shape(Geometry),
    Composite {
        /// Z-order, front-most last
        children: Vec<FigureId>,
        bounds: BoundsCache,
    },
}

impl FigureKind {
    pub(crate) fn composite() -> Self {
        FigureKind::Composite {
            children: Vec::new(),
            bounds: BoundsCache::default(),
        }
    }
}

/// Where a figure currently sits in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Detached,
    TopLevel,
    Child(FigureId),
}

impl Slot {
    /// Holding composite, `None` for top-level and detached figures.
    pub(crate) fn parent(self) -> Option<FigureId> {
        match self {
            Slot::Child(parent) => Some(parent),
            Slot::Detached | Slot::TopLevel => None,
        }
    }

    pub(crate) fn of_parent(parent: Option<FigureId>) -> Self {
        match parent {
            Some(p) => Slot::Child(p),
            None => Slot::TopLevel,
        }
    }
}

/// Registry entry for one figure.
#[derive(Debug, Clone)]
pub(crate) struct FigureNode {
    pub(crate) attributes: AttributeStore,
    pub(crate) kind: FigureKind,
    pub(crate) slot: Slot,
    pub(crate) change_depth: usize,
    /// Drawing area captured when the outermost bracket opened
    pub(crate) pending_area: Option<Rect>,
}

impl FigureNode {
    pub(crate) fn new(kind: FigureKind, attributes: AttributeStore) -> Self {
        Self {
            attributes,
            kind,
            slot: Slot::Detached,
            change_depth: 0,
            pending_area: None,
        }
    }

    pub(crate) fn children(&self) -> Option<&[FigureId]> {
        match &self.kind {
            FigureKind::Composite { children, .. } => Some(children),
            FigureKind::Shape(_) => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<FigureId>> {
        match &mut self.kind {
            FigureKind::Composite { children, .. } => Some(children),
            FigureKind::Shape(_) => None,
        }
    }

    pub(crate) fn geometry(&self) -> Option<&Geometry> {
        match &self.kind {
            FigureKind::Shape(g) => Some(g),
            FigureKind::Composite { .. } => None,
        }
    }

    pub(crate) fn invalidate_bounds(&self) {
        if let FigureKind::Composite { bounds, .. } = &self.kind {
            bounds.invalidate();
        }
    }

    pub(crate) fn has_cached_bounds(&self) -> bool {
        match &self.kind {
            FigureKind::Composite { bounds, .. } => bounds.is_valid(),
            FigureKind::Shape(_) => false,
        }
    }
}
