use std::sync::Arc;

/// Marker attributes identifying the prompt's affordances.
pub const ACCEPT_MARKER: &str = "data-consent-accept";
pub const REJECT_MARKER: &str = "data-consent-reject";
pub const DISMISS_MARKER: &str = "data-consent-dismiss";

/// What a click on the prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentAction {
    Accept,
    Reject,
    Dismiss,
}

/// A node in the host document's event path.
pub trait EventNode: Send + Sync {
    fn has_marker(&self, attribute: &str) -> bool;
    fn parent(&self) -> Option<Arc<dyn EventNode>>;
}

/// Resolve a click target to an affordance.
///
/// Walks the ancestor chain so a click on an element nested inside a
/// marked control still resolves to that control.
pub fn resolve_action(target: Arc<dyn EventNode>) -> Option<ConsentAction> {
    let mut node = Some(target);
    while let Some(current) = node {
        if current.has_marker(ACCEPT_MARKER) {
            return Some(ConsentAction::Accept);
        }
        if current.has_marker(REJECT_MARKER) {
            return Some(ConsentAction::Reject);
        }
        if current.has_marker(DISMISS_MARKER) {
            return Some(ConsentAction::Dismiss);
        }
        node = current.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestNode {
        markers: Vec<&'static str>,
        parent: Option<Arc<dyn EventNode>>,
    }

    impl TestNode {
        fn new(markers: Vec<&'static str>, parent: Option<Arc<dyn EventNode>>) -> Arc<Self> {
            Arc::new(Self { markers, parent })
        }
    }

    impl EventNode for TestNode {
        fn has_marker(&self, attribute: &str) -> bool {
            self.markers.contains(&attribute)
        }

        fn parent(&self) -> Option<Arc<dyn EventNode>> {
            self.parent.clone()
        }
    }

    #[test]
    fn test_direct_marker_resolves() {
        let node = TestNode::new(vec![ACCEPT_MARKER], None);
        assert_eq!(resolve_action(node), Some(ConsentAction::Accept));
    }

    #[test]
    fn test_nested_click_resolves_to_enclosing_control() {
        let button = TestNode::new(vec![REJECT_MARKER], None);
        let icon = TestNode::new(vec![], Some(button));
        let label = TestNode::new(vec![], Some(icon));

        assert_eq!(resolve_action(label), Some(ConsentAction::Reject));
    }

    #[test]
    fn test_dismiss_marker() {
        let node = TestNode::new(vec![DISMISS_MARKER], None);
        assert_eq!(resolve_action(node), Some(ConsentAction::Dismiss));
    }

    #[test]
    fn test_unmarked_chain_resolves_to_nothing() {
        let root = TestNode::new(vec![], None);
        let child = TestNode::new(vec![], Some(root));
        assert_eq!(resolve_action(child), None);
    }

    #[test]
    fn test_nearest_marker_wins() {
        let outer = TestNode::new(vec![DISMISS_MARKER], None);
        let inner = TestNode::new(vec![ACCEPT_MARKER], Some(outer));
        assert_eq!(resolve_action(inner), Some(ConsentAction::Accept));
    }
}
