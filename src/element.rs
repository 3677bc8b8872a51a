//! Element kinds and the selected-element inventory.

/// The five element kinds, in the ordinal order used to index
/// [`crate::config::MageConfig::element_colors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Earth,
    Water,
    Air,
    Fire,
    Aether,
}

impl ElementKind {
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Earth,
        ElementKind::Water,
        ElementKind::Air,
        ElementKind::Fire,
        ElementKind::Aether,
    ];

    /// Ordinal position (0 = earth … 4 = aether).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            ElementKind::Earth => 0,
            ElementKind::Water => 1,
            ElementKind::Air => 2,
            ElementKind::Fire => 3,
            ElementKind::Aether => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Earth => "earth",
            ElementKind::Water => "water",
            ElementKind::Air => "air",
            ElementKind::Fire => "fire",
            ElementKind::Aether => "aether",
        }
    }
}

/// Elements currently chosen to empower the next cast or self effect.
///
/// Capacity comes from `max_selected_elements`.  With a capacity of one,
/// selecting a new element replaces the old one; otherwise selections past
/// the capacity are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    elements: Vec<ElementKind>,
}

impl Selection {
    /// Apply a selection request.  `None` clears the selection.
    ///
    /// Returns `true` when `kind` ended up in the selection.
    pub fn select(&mut self, kind: Option<ElementKind>, max: usize) -> bool {
        let Some(kind) = kind else {
            self.clear();
            return false;
        };
        if max == 1 {
            self.clear();
        }
        if self.elements.len() >= max {
            return false;
        }
        self.elements.push(kind);
        true
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// The element that picks the spell.  Only the first one matters.
    #[inline]
    pub fn primary(&self) -> Option<ElementKind> {
        self.elements.first().copied()
    }

    pub fn as_slice(&self) -> &[ElementKind] {
        &self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_slot_selection_replaces_previous() {
        let mut sel = Selection::default();
        assert!(sel.select(Some(ElementKind::Fire), 1));
        assert!(sel.select(Some(ElementKind::Water), 1));
        assert_eq!(sel.as_slice(), &[ElementKind::Water]);
    }

    #[test]
    fn multi_slot_selection_ignores_overflow() {
        let mut sel = Selection::default();
        sel.select(Some(ElementKind::Fire), 2);
        sel.select(Some(ElementKind::Air), 2);
        assert!(!sel.select(Some(ElementKind::Earth), 2));
        assert_eq!(sel.len(), 2);
        assert_eq!(sel.primary(), Some(ElementKind::Fire));
    }

    #[test]
    fn selecting_none_clears() {
        let mut sel = Selection::default();
        sel.select(Some(ElementKind::Earth), 3);
        sel.select(None, 3);
        assert!(sel.is_empty());
        assert_eq!(sel.primary(), None);
    }

    #[test]
    fn indices_match_ordinal_order() {
        for (i, kind) in ElementKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
