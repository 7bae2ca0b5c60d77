use crate::error::InvariantError;
use crate::tree::arena::NodeIndex;
use crate::tree::core::OrderedTree;
use std::fmt::Debug;

/// A balancing strategy plugged into [`OrderedTree`].
///
/// The core performs every raw structural edit (attach, splice, detach, entry
/// swap) and then hands control to the active balancer, which restores its
/// own invariant through rotations and metadata updates. The default hooks do
/// nothing, which is exactly the plain BST variant.
pub trait Balancer<T, U>: Sized {
    /// Per-node bookkeeping maintained by this strategy. `Default` must
    /// produce the metadata of a freshly attached leaf.
    type Meta: Default;

    /// Called after a new leaf has been attached.
    fn on_insert(_tree: &mut OrderedTree<T, U, Self>, _node: NodeIndex) {}

    /// Called after a node has been physically unlinked.
    ///
    /// `removed` is the unlinked node's metadata, `replacement` the possibly
    /// absent child spliced into its position, and `parent` the unlinked
    /// node's former parent.
    fn on_delete(
        _tree: &mut OrderedTree<T, U, Self>,
        _removed: Self::Meta,
        _replacement: Option<NodeIndex>,
        _parent: Option<NodeIndex>,
    ) {
    }

    /// Called after a successful mutating lookup.
    fn on_access(_tree: &mut OrderedTree<T, U, Self>, _node: NodeIndex) {}

    /// Audits every invariant this strategy promises to maintain.
    fn validate(tree: &OrderedTree<T, U, Self>) -> Result<(), InvariantError>
    where
        T: Ord + Debug,
    {
        tree.check_structure()
    }
}
