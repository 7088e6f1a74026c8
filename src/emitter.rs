//! Output accumulator for generated C code
//!
//! The [`Emitter`] keeps two regions: a header (includes, the `main`
//! prologue and variable declarations) and a body. Parsing appends to either
//! region in any order; [`Emitter::finalize`] joins them header-first.

/// Append-only, two-region output buffer.
#[derive(Debug, Default)]
pub struct Emitter {
    header: String,
    body: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment to the body with no separator.
    pub fn emit(&mut self, code: &str) {
        self.body.push_str(code);
    }

    /// Append a fragment to the body followed by a newline.
    pub fn emit_line(&mut self, code: &str) {
        self.body.push_str(code);
        self.body.push('\n');
    }

    /// Append a line to the header region.
    pub fn header_line(&mut self, code: &str) {
        self.header.push_str(code);
        self.header.push('\n');
    }

    /// Current length of the body, for use with [`Emitter::body_since`].
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Body text emitted since `start` (a value from [`Emitter::body_len`]).
    pub fn body_since(&self, start: usize) -> &str {
        &self.body[start..]
    }

    /// Consume the emitter and return `header ++ body`.
    pub fn finalize(self) -> String {
        let mut out = self.header;
        out.push_str(&self.body);
        out
    }
}
