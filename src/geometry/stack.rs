//! Scoped transform stack for nested coordinate contexts.

use crate::geometry::Transform;
use std::ops::{Deref, DerefMut};

/// Ordered transforms whose effective matrix is `T1 · T2 · … · Tn`.
///
/// Each shape conversion owns its own stack; it is never shared between
/// workers.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    frames: Vec<Transform>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a base transform (for example the viewport-to-EMU scale).
    pub fn with_base(base: Transform) -> Self {
        Self { frames: vec![base] }
    }

    pub fn push(&mut self, transform: Transform) {
        self.frames.push(transform);
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Effective matrix, identity when empty.
    pub fn current(&self) -> Transform {
        self.frames
            .iter()
            .fold(Transform::identity(), |acc, t| acc.compose(t))
    }

    /// Drop frames above `depth`. No-op when the stack is already shallower.
    pub fn truncate(&mut self, depth: usize) {
        self.frames.truncate(depth);
    }

    /// Enter a nested context. The stack is truncated back to the current
    /// depth when the returned guard drops, including on `?` returns and
    /// unwinding.
    pub fn scope(&mut self) -> StackScope<'_> {
        let depth = self.depth();
        StackScope { stack: self, depth }
    }

    /// Run `f` inside a scope.
    pub fn with_scope<R>(&mut self, f: impl FnOnce(&mut TransformStack) -> R) -> R {
        let mut scope = self.scope();
        f(&mut *scope)
    }
}

/// Guard returned by [`TransformStack::scope`].
#[derive(Debug)]
pub struct StackScope<'a> {
    stack: &'a mut TransformStack,
    depth: usize,
}

impl StackScope<'_> {
    /// Depth the stack returns to on drop.
    pub fn entry_depth(&self) -> usize {
        self.depth
    }
}

impl Deref for StackScope<'_> {
    type Target = TransformStack;

    fn deref(&self) -> &Self::Target {
        self.stack
    }
}

impl DerefMut for StackScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stack
    }
}

impl Drop for StackScope<'_> {
    fn drop(&mut self) {
        self.stack.truncate(self.depth);
    }
}
