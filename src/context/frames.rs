use std::fmt::Display;

/// Declarative region the tracker is currently inside.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ContextFrame {
    Global,
    Declarations,
    Functions,
    FunctionParams,
    VariableDecl,
    FunctionDecl,
}

impl Display for ContextFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Stack of frames that always keeps its bottom `Global` frame.
#[derive(Debug, Clone)]
pub struct ContextStack {
    frames: Vec<ContextFrame>,
}

impl Default for ContextStack {
    fn default() -> Self {
        ContextStack {
            frames: vec![ContextFrame::Global],
        }
    }
}

impl ContextStack {
    pub fn top(&self) -> ContextFrame {
        *self.frames.last().unwrap_or(&ContextFrame::Global)
    }

    pub fn push(&mut self, frame: ContextFrame) {
        self.frames.push(frame);
    }

    /// Pops the top frame; returns `None` instead of removing the bottom one.
    pub fn pop(&mut self) -> Option<ContextFrame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    /// Drops frames above `depth`, never below the bottom frame.
    pub fn unwind_to(&mut self, depth: usize) {
        self.frames.truncate(depth.max(1));
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[ContextFrame] {
        &self.frames
    }
}
