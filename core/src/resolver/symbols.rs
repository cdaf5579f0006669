//! Symbol table of function frames.

use hashbrown::{HashMap, HashSet};

use super::ResolveError;
use crate::{String, Vec};

/// Returned by [`Symbols::runtime_index`] for names not declared in any
/// open frame.
pub const NOT_FOUND: i32 = -1;

/// Offset added to enclosing-frame slots when an identifier resolves to a
/// closure variable.
pub const RESERVED_FRAME_SLOTS: i32 = 2;

/// Largest number of slots a single frame may declare.
pub const MAX_FRAME_SLOTS: usize = u16::MAX as usize;

/// What opened a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameKind {
    #[default]
    Function,
    /// A class body; `inherits` when the class names a superclass.
    Class { inherits: bool },
}

#[derive(Debug, Default)]
struct Frame {
    kind: FrameKind,
    slots: HashMap<String, usize>,
}

/// Stack of frames, one per function, closure or class body being resolved,
/// plus the names known to be bound at the top level.
///
/// Slots are numbered in declaration order starting at zero.
#[derive(Debug, Default)]
pub struct Symbols {
    frames: Vec<Frame>,
    globals: HashSet<String>,
}

impl Symbols {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no frame is open, i.e. resolution is at the top level.
    pub fn is_top_level(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push_frame(&mut self) {
        self.push(FrameKind::Function);
    }

    pub fn push(&mut self, kind: FrameKind) {
        self.frames.push(Frame {
            kind,
            slots: HashMap::new(),
        });
    }

    /// Kind of the innermost frame, `None` at the top level.
    pub fn current_kind(&self) -> Option<FrameKind> {
        self.frames.last().map(|frame| frame.kind)
    }

    /// Whether a function frame is nested in the body of a class that has a
    /// superclass. Names such a function assigns may be inherited fields.
    pub fn in_inheriting_method(&self) -> bool {
        let mut frames = self.frames.iter().rev();
        matches!(
            frames.next().map(|frame| frame.kind),
            Some(FrameKind::Function)
        ) && frames.any(|frame| frame.kind == FrameKind::Class { inherits: true })
    }

    /// Record `name` as bound at the top level.
    pub fn declare_global(&mut self, name: &str) {
        if !self.globals.contains(name) {
            self.globals.insert(String::from(name));
        }
    }

    pub fn is_global(&self, name: &str) -> bool {
        self.globals.contains(name)
    }

    /// Close the innermost frame and return its size.
    pub fn pop_frame(&mut self) -> usize {
        self.frames.pop().map_or(0, |frame| frame.slots.len())
    }

    /// Declare `name` in the innermost frame and return its slot.
    ///
    /// Redeclaring a name returns the slot it already has. At the top level
    /// the name becomes a known global and `None` is returned.
    pub fn declare(&mut self, name: &str) -> Result<Option<usize>, ResolveError> {
        let Some(frame) = self.frames.last_mut() else {
            self.declare_global(name);
            return Ok(None);
        };
        if let Some(&slot) = frame.slots.get(name) {
            return Ok(Some(slot));
        }
        let slot = frame.slots.len();
        if slot >= MAX_FRAME_SLOTS {
            return Err(ResolveError::TooManyLocals {
                name: String::from(name),
                limit: MAX_FRAME_SLOTS,
            });
        }
        frame.slots.insert(String::from(name), slot);
        Ok(Some(slot))
    }

    /// Whether any open frame declares `name`.
    pub fn is_declared(&self, name: &str) -> bool {
        self.frames.iter().any(|frame| frame.slots.contains_key(name))
    }

    /// Encoded location of `name` as seen from the innermost frame.
    ///
    /// - `r >= 0`: slot `r` of the innermost frame.
    /// - [`NOT_FOUND`]: not declared in any open frame.
    /// - any other `r < 0`: slot `-r - 2` of the nearest enclosing frame that
    ///   declares the name.
    pub fn runtime_index(&self, name: &str) -> i32 {
        let mut frames = self.frames.iter().rev();
        let Some(current) = frames.next() else {
            return NOT_FOUND;
        };
        if let Some(&slot) = current.slots.get(name) {
            return slot as i32;
        }
        frames
            .find_map(|frame| frame.slots.get(name))
            .map_or(NOT_FOUND, |&slot| -(slot as i32) - 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_declares_nothing() {
        let mut symbols = Symbols::new();
        assert!(symbols.is_top_level());
        assert_eq!(symbols.declare("x").unwrap(), None);
        assert_eq!(symbols.runtime_index("x"), NOT_FOUND);
    }

    #[test]
    fn test_slots_in_declaration_order() {
        let mut symbols = Symbols::new();
        symbols.push_frame();
        assert_eq!(symbols.declare("a").unwrap(), Some(0));
        assert_eq!(symbols.declare("b").unwrap(), Some(1));
        assert_eq!(symbols.declare("a").unwrap(), Some(0));
        assert_eq!(symbols.runtime_index("b"), 1);
        assert_eq!(symbols.pop_frame(), 2);
    }

    #[test]
    fn test_enclosing_frame_encoding() {
        let mut symbols = Symbols::new();
        symbols.push_frame();
        symbols.declare("a").unwrap();
        symbols.declare("b").unwrap();
        symbols.push_frame();
        symbols.declare("c").unwrap();

        assert_eq!(symbols.runtime_index("c"), 0);
        assert_eq!(symbols.runtime_index("a"), -2);
        assert_eq!(symbols.runtime_index("b"), -3);
        assert_eq!(symbols.runtime_index("z"), NOT_FOUND);
        assert!(symbols.is_declared("a"));
    }

    #[test]
    fn test_top_level_declarations_are_known_globals() {
        let mut symbols = Symbols::new();
        symbols.declare("x").unwrap();
        symbols.declare_global("print");
        symbols.push_frame();
        assert!(symbols.is_global("x"));
        assert!(symbols.is_global("print"));
        assert!(!symbols.is_global("y"));
        assert!(!symbols.is_declared("x"));
    }

    #[test]
    fn test_inheriting_method_frames() {
        let mut symbols = Symbols::new();
        symbols.push(FrameKind::Class { inherits: true });
        assert!(!symbols.in_inheriting_method());
        symbols.push_frame();
        assert!(symbols.in_inheriting_method());
        symbols.pop_frame();
        symbols.pop_frame();

        symbols.push(FrameKind::Class { inherits: false });
        symbols.push_frame();
        assert!(!symbols.in_inheriting_method());
    }

    #[test]
    fn test_inner_declaration_shadows() {
        let mut symbols = Symbols::new();
        symbols.push_frame();
        symbols.declare("x").unwrap();
        symbols.push_frame();
        symbols.declare("y").unwrap();
        symbols.declare("x").unwrap();
        assert_eq!(symbols.runtime_index("x"), 1);
    }
}
