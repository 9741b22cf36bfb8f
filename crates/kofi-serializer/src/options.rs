/// Which bytes separate emitted lines.
///
/// The grammar mandates a single `\n` between lines (§4.F); this has
/// only one variant so that choice stays an explicit, named constant
/// rather than a literal buried in `serialize`, without offering a
/// knob the parser's own grammar would reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`.
    #[default]
    Lf,
}

impl LineEnding {
    fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
        }
    }
}

/// Serialization knobs with no effect on the element text itself, only
/// on how lines are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SerializerOptions {
    line_ending: LineEnding,
}

impl SerializerOptions {
    /// Set the line ending used to separate elements.
    pub fn line_ending(mut self, value: LineEnding) -> Self {
        self.line_ending = value;
        self
    }

    pub(crate) fn separator(&self) -> &'static str {
        self.line_ending.as_str()
    }
}
