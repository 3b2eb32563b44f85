//! The node interface shared by in-place processors.

use crate::AudioBuffer;

/// An in-place audio processor.
///
/// Implementations must not allocate, block or panic inside
/// [`process`](AudioNode::process): it runs on the real-time path.
/// Nodes are dispatched statically in the engine; the trait is object
/// safe so heterogeneous chains can still be built where that is useful.
pub trait AudioNode {
    /// Transform `buffer` in place.
    fn process(&mut self, buffer: &mut AudioBuffer<'_>);

    /// Return to the state right after construction. Stateless nodes keep
    /// the default no-op.
    fn reset(&mut self) {}
}

impl<N: AudioNode + ?Sized> AudioNode for &mut N {
    fn process(&mut self, buffer: &mut AudioBuffer<'_>) {
        (**self).process(buffer);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}
