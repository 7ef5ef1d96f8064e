//! Per-node walk context, threaded by value through the traversal.
//!
//! Each child receives a derived copy, so leaving a declaration, assignment
//! target, or function restores the outer state without explicit pops.

/// Name used for functions with no recoverable name.
pub const ANONYMOUS_FUNCTION: &str = "<anonymous>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanContext<'s> {
    /// Inside the binding-target position of a declaration.
    pub in_declaration_lhs: bool,
    /// Inside the target position of an assignment.
    pub in_assignment_lhs: bool,
    /// Syntactically enclosing function.
    pub function_name: Option<&'s str>,
}

impl<'s> ScanContext<'s> {
    /// Top-level context for a fresh file.
    pub fn root() -> Self {
        Self::default()
    }

    /// Context for a binding target (`const <here> = ...`).
    pub fn declaration(self) -> Self {
        Self {
            in_declaration_lhs: true,
            in_assignment_lhs: false,
            ..self
        }
    }

    /// Context for an assignment target (`<here> = ...`).
    pub fn assignment(self) -> Self {
        Self {
            in_declaration_lhs: false,
            in_assignment_lhs: true,
            ..self
        }
    }

    /// Context for an expression that is read, even inside a pattern
    /// (default values, computed keys, member objects).
    pub fn read(self) -> Self {
        Self {
            in_declaration_lhs: false,
            in_assignment_lhs: false,
            ..self
        }
    }

    /// Context for the body of a function named `name`.
    pub fn entering_function(self, name: &'s str) -> Self {
        Self {
            in_declaration_lhs: false,
            in_assignment_lhs: false,
            function_name: Some(name),
        }
    }

    /// Whether a bare name here is a binding or assignment target rather
    /// than a read.
    pub fn is_binding_position(&self) -> bool {
        self.in_declaration_lhs || self.in_assignment_lhs
    }
}
