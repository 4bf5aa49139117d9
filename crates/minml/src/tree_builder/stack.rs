//! The stack of open elements.

use crate::tree::Element;

/// An element whose start-tag has been seen but whose end-tag has not.
#[derive(Debug)]
pub(crate) struct PendingElement {
    pub(crate) element: Element,
    /// Built after the root closed; dropped instead of attached when popped.
    pub(crate) detached: bool,
}

/// Stack of open elements. The top is the element currently receiving
/// content; read top-to-bottom the entries form an ancestor chain in the
/// final tree.
#[derive(Debug, Default)]
pub(crate) struct OpenStack {
    items: Vec<PendingElement>,
}

impl OpenStack {
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn push(&mut self, pending: PendingElement) {
        self.items.push(pending);
    }

    pub(crate) fn pop(&mut self) -> Option<PendingElement> {
        self.items.pop()
    }

    pub(crate) fn top(&self) -> Option<&PendingElement> {
        self.items.last()
    }

    pub(crate) fn top_mut(&mut self) -> Option<&mut PendingElement> {
        self.items.last_mut()
    }

    /// Depth from the top (0 = top) of the most recently opened element
    /// with the given name.
    pub(crate) fn find_from_top(&self, name: &str) -> Option<usize> {
        self.items
            .iter()
            .rev()
            .position(|pending| pending.element.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::{OpenStack, PendingElement};
    use crate::tree::Element;

    fn pending(name: &str) -> PendingElement {
        PendingElement {
            element: Element::new(name),
            detached: false,
        }
    }

    #[test]
    fn find_from_top_picks_most_recent_match() {
        let mut stack = OpenStack::default();
        stack.push(pending("a"));
        stack.push(pending("b"));
        stack.push(pending("a"));
        assert_eq!(stack.find_from_top("a"), Some(0));
        assert_eq!(stack.find_from_top("b"), Some(1));
        assert_eq!(stack.find_from_top("c"), None);
    }

    #[test]
    fn push_pop_is_lifo() {
        let mut stack = OpenStack::default();
        assert!(stack.is_empty());
        stack.push(pending("x"));
        stack.push(pending("y"));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.top().map(|p| p.element.name()), Some("y"));
        assert_eq!(stack.pop().map(|p| p.element.name().to_string()).as_deref(), Some("y"));
        assert_eq!(stack.pop().map(|p| p.element.name().to_string()).as_deref(), Some("x"));
        assert!(stack.pop().is_none());
    }
}
