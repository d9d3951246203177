use crate::{Cursor, Line};

/// The span between two cursors over the same source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRange<'a> {
    start: Cursor<'a>,
    end: Cursor<'a>,
}

impl<'a> SourceRange<'a> {
    pub fn new(start: Cursor<'a>, end: Cursor<'a>) -> Self {
        debug_assert!(start.source == end.source);
        debug_assert!(start.offset() <= end.offset());
        Self { start, end }
    }

    pub fn lexeme(&self) -> &'a str {
        self.start.slice_until(&self.end)
    }

    pub fn position(&self) -> usize {
        self.start.offset()
    }

    pub fn length(&self) -> usize {
        self.end.offset() - self.start.offset()
    }

    /// The line the range ends on.
    pub fn line(&self) -> Line {
        self.end.line()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn range_over_newline() {
        let mut end = Cursor::new("\"a\nb\" c");
        let start = end.clone();
        (0..5).for_each(|_| {
            end.next();
        });

        let range = SourceRange::new(start, end);
        assert_eq!(range.lexeme(), "\"a\nb\"");
        assert_eq!((range.position(), range.length()), (0, 5));
        assert_eq!(range.line(), Line(2));
    }
}
