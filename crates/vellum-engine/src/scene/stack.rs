use std::ops::{Deref, DerefMut};

use super::{DrawingFragment, DrawingGroup};

/// Callback run on a pushed group when its scope closes, before the group
/// is handed to its parent.
pub type Finisher = Box<dyn FnOnce(&mut DrawingGroup)>;

struct Frame {
    group: DrawingGroup,
    finisher: Option<Finisher>,
}

/// Stack of open groups routing composed fragments to the right ancestor.
///
/// The bottom frame is the root group and is never popped. Groups are pushed
/// through [`DrawingStack::enter`], which returns a [`GroupScope`]; dropping
/// the scope pops the group, so pushes and pops always pair up, including on
/// early returns.
///
/// ```
/// use vellum_engine::coords::Transform;
/// use vellum_engine::scene::{DrawingGroup, DrawingStack};
///
/// let mut stack = DrawingStack::new();
/// let group = DrawingGroup { transform: Some(Transform::translate(5.0, 0.0)), ..DrawingGroup::new() };
/// {
///     let scope = stack.enter(group, None);
///     assert_eq!(scope.depth(), 1);
///     // ... add children ...
/// }
/// assert_eq!(stack.depth(), 0);
/// ```
pub struct DrawingStack {
    frames: Vec<Frame>,
}

impl Default for DrawingStack {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingStack {
    pub fn new() -> Self {
        Self { frames: vec![Frame { group: DrawingGroup::new(), finisher: None }] }
    }

    /// Number of open groups above the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Group currently receiving fragments.
    #[inline]
    pub fn top(&self) -> &DrawingGroup {
        &self.frames[self.frames.len() - 1].group
    }

    #[inline]
    pub fn top_mut(&mut self) -> &mut DrawingGroup {
        let i = self.frames.len() - 1;
        &mut self.frames[i].group
    }

    /// Appends `fragment` to the group on top of the stack.
    pub fn add_child(&mut self, fragment: DrawingFragment) {
        let kind = match fragment {
            DrawingFragment::Leaf(_) => "leaf",
            DrawingFragment::Group(_) => "group",
        };
        log::trace!("stack[{}]: add {kind}", self.depth());
        self.top_mut().add_child(fragment);
    }

    /// Opens `group` as the new top of the stack.
    ///
    /// A group with no effect and no finisher is never pushed: the returned
    /// scope is inert and children go to the current top directly.
    pub fn enter(&mut self, group: DrawingGroup, finisher: Option<Finisher>) -> GroupScope<'_> {
        let pushed = finisher.is_some() || !group.is_noop();
        if pushed {
            self.frames.push(Frame { group, finisher });
        }
        GroupScope { stack: self, pushed }
    }

    fn pop(&mut self) {
        debug_assert!(self.depth() > 0, "pop without matching enter");
        if self.depth() == 0 {
            return;
        }
        let Some(Frame { mut group, finisher }) = self.frames.pop() else {
            return;
        };
        if let Some(finish) = finisher {
            finish(&mut group);
        }
        if group.children.is_empty() {
            return;
        }
        if group.is_noop() && group.meta.is_empty() {
            self.top_mut().children.append(&mut group.children);
        } else {
            self.add_child(DrawingFragment::Group(group));
        }
    }

    /// Closes any open groups and returns the root.
    pub fn finish(mut self) -> DrawingGroup {
        while self.depth() > 0 {
            self.pop();
        }
        std::mem::take(&mut self.frames[0].group)
    }
}

/// Scoped handle for a group opened with [`DrawingStack::enter`].
///
/// Dereferences to the stack, so children are added through the scope.
pub struct GroupScope<'s> {
    stack: &'s mut DrawingStack,
    pushed: bool,
}

impl GroupScope<'_> {
    /// Whether a group was actually pushed.
    #[inline]
    pub fn is_pushed(&self) -> bool {
        self.pushed
    }
}

impl Deref for GroupScope<'_> {
    type Target = DrawingStack;

    fn deref(&self) -> &DrawingStack {
        self.stack
    }
}

impl DerefMut for GroupScope<'_> {
    fn deref_mut(&mut self) -> &mut DrawingStack {
        self.stack
    }
}

impl Drop for GroupScope<'_> {
    fn drop(&mut self) {
        if self.pushed {
            self.stack.pop();
        }
    }
}
