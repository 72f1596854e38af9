//! Lexical scope chain
//!
//! Scopes live in an arena of frames. Each frame holds its bindings and the
//! index of its enclosing frame; frame 0 is the global scope and is never
//! discarded. Entering a block pushes a frame, leaving it truncates the
//! arena back to the mark taken on entry.

use crate::token::Token;
use crate::value::{RuntimeError, Value};
use log::trace;
use std::collections::HashMap;

/// Index of a frame in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameId(usize);

impl FrameId {
    pub const GLOBAL: FrameId = FrameId(0);
}

#[derive(Debug, Default)]
struct Frame {
    values: HashMap<String, Value>,
    enclosing: Option<FrameId>,
}

/// Restore point returned by [`Environment::enter_scope`]
#[must_use = "a scope must be exited with the mark it was entered with"]
#[derive(Debug)]
pub struct ScopeMark {
    frames: usize,
    previous: FrameId,
}

/// Chain of scope frames, innermost first on lookup
#[derive(Debug)]
pub struct Environment {
    frames: Vec<Frame>,
    current: FrameId,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Environment holding only the global frame
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
            current: FrameId::GLOBAL,
        }
    }

    /// Push a frame chained to the current one and make it current
    pub fn enter_scope(&mut self) -> ScopeMark {
        let mark = ScopeMark {
            frames: self.frames.len(),
            previous: self.current,
        };
        self.frames.push(Frame {
            values: HashMap::new(),
            enclosing: Some(self.current),
        });
        self.current = FrameId(self.frames.len() - 1);
        trace!("enter scope (depth {})", self.depth());
        mark
    }

    /// Discard every frame created since `mark` and restore the frame that
    /// was current when it was taken
    pub fn exit_scope(&mut self, mark: ScopeMark) {
        self.frames.truncate(mark.frames);
        self.current = mark.previous;
        trace!("exit scope (depth {})", self.depth());
    }

    /// Bind `name` in the current frame, replacing any existing binding there
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.frames[self.current.0].values.insert(name.into(), value);
    }

    /// Nearest binding of `name`, innermost frame first
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        self.resolve(&name.lexeme)
            .and_then(|id| self.frames[id.0].values.get(&name.lexeme))
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone() })
    }

    /// Overwrite the nearest binding of `name`; never creates one
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        match self.resolve(&name.lexeme) {
            Some(id) => {
                self.frames[id.0].values.insert(name.lexeme.clone(), value);
                Ok(())
            }
            None => Err(RuntimeError::UndefinedVariable { name: name.clone() }),
        }
    }

    /// Whether `name` is bound anywhere in the chain
    pub fn is_defined(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Number of frames between the current one and the globals
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut frame = self.current;
        while let Some(enclosing) = self.frames[frame.0].enclosing {
            depth += 1;
            frame = enclosing;
        }
        depth
    }

    /// Global bindings sorted by name
    pub fn globals(&self) -> Vec<(String, Value)> {
        let mut globals: Vec<(String, Value)> = self.frames[FrameId::GLOBAL.0]
            .values
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        globals.sort_by(|a, b| a.0.cmp(&b.0));
        globals
    }

    /// Frame holding the nearest binding of `name`
    fn resolve(&self, name: &str) -> Option<FrameId> {
        let mut frame = Some(self.current);
        while let Some(id) = frame {
            let f = &self.frames[id.0];
            if f.values.contains_key(name) {
                return Some(id);
            }
            frame = f.enclosing;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn name(s: &str) -> Token {
        Token::new(TokenKind::Identifier, s, 1)
    }

    #[test]
    fn test_define_and_get() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        assert_eq!(env.get(&name("a")).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_redefine_overwrites() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        env.define("a", Value::string("again"));
        assert_eq!(env.get(&name("a")).unwrap(), Value::string("again"));
    }

    #[test]
    fn test_undefined_get_and_assign() {
        let mut env = Environment::new();
        let err = env.get(&name("missing")).unwrap_err();
        assert_eq!(err.to_string(), "Undefined variable 'missing'.");

        let err = env.assign(&name("missing"), Value::Nil).unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));
        // Assignment never creates a binding
        assert!(!env.is_defined("missing"));
    }

    #[test]
    fn test_shadowing_and_restore() {
        let mut env = Environment::new();
        env.define("a", Value::string("global"));

        let mark = env.enter_scope();
        env.define("a", Value::string("inner"));
        assert_eq!(env.get(&name("a")).unwrap(), Value::string("inner"));
        assert_eq!(env.depth(), 1);
        env.exit_scope(mark);

        assert_eq!(env.get(&name("a")).unwrap(), Value::string("global"));
        assert_eq!(env.depth(), 0);
    }

    #[test]
    fn test_assign_reaches_enclosing_frame() {
        let mut env = Environment::new();
        env.define("count", Value::Number(0.0));

        let outer = env.enter_scope();
        let inner = env.enter_scope();
        env.assign(&name("count"), Value::Number(2.0)).unwrap();
        env.exit_scope(inner);
        env.exit_scope(outer);

        assert_eq!(env.get(&name("count")).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn test_exit_discards_nested_frames() {
        let mut env = Environment::new();
        let outer = env.enter_scope();
        let _inner = env.enter_scope();
        env.define("deep", Value::Nil);
        // Unwinding straight to the outer mark drops both frames
        env.exit_scope(outer);
        assert_eq!(env.depth(), 0);
        assert!(!env.is_defined("deep"));
    }

    #[test]
    fn test_globals_sorted() {
        let mut env = Environment::new();
        env.define("b", Value::Number(2.0));
        env.define("a", Value::Number(1.0));
        let mark = env.enter_scope();
        env.define("local", Value::Nil);

        let names: Vec<String> = env.globals().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        env.exit_scope(mark);
    }
}
