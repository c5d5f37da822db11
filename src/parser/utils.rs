use std::fmt;

/// A zero-based line/column reference into the query source.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SourcePosition {
    index: usize,
    line: usize,
    col: usize,
}

impl SourcePosition {
    /// Constructs a new position out of its byte `index`, `line` and `col`.
    pub fn new(index: usize, line: usize, col: usize) -> Self {
        Self { index, line, col }
    }

    /// Position of the very first character of a source.
    pub fn new_origin() -> Self {
        Self::new(0, 0, 0)
    }

    pub(crate) fn advance_col(&mut self, width: usize) {
        self.index += width;
        self.col += 1;
    }

    pub(crate) fn advance_line(&mut self) {
        self.index += 1;
        self.line += 1;
        self.col = 0;
    }

    /// Byte offset into the source.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Zero-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Zero-based column number.
    pub fn column(&self) -> usize {
        self.col
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

/// Half-open range of source positions.
///
/// `end` points to the first position __after__ the range.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Span {
    /// First position covered.
    pub start: SourcePosition,
    /// First position not covered anymore.
    pub end: SourcePosition,
}

impl Span {
    pub(crate) fn zero_width(pos: SourcePosition) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub(crate) fn unlocated() -> Self {
        Self::zero_width(SourcePosition::new_origin())
    }
}

/// An item tagged with the [`Span`] of source it was parsed from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Spanning<T> {
    /// Wrapped item.
    pub item: T,
    /// Where the item lives in the source.
    pub span: Span,
}

impl<T> Spanning<T> {
    /// Wraps the `item` into the provided [`Span`].
    pub fn new(span: Span, item: T) -> Self {
        Self { item, span }
    }

    /// Wraps the `item` into a zero-width [`Span`] at `pos`.
    pub fn zero_width(pos: SourcePosition, item: T) -> Self {
        Self::new(Span::zero_width(pos), item)
    }

    /// Wraps the `item` into the `start..end` [`Span`].
    pub fn start_end(start: SourcePosition, end: SourcePosition, item: T) -> Self {
        Self::new(Span { start, end }, item)
    }

    /// Wraps the `item` without any meaningful source location.
    pub fn unlocated(item: T) -> Self {
        Self::new(Span::unlocated(), item)
    }

    /// Start position of the item.
    pub fn start(&self) -> SourcePosition {
        self.span.start
    }

    /// First position after the item.
    pub fn end(&self) -> SourcePosition {
        self.span.end
    }

    /// Maps the wrapped item while keeping its [`Span`].
    pub fn map<O>(self, f: impl FnOnce(T) -> O) -> Spanning<O> {
        Spanning::new(self.span, f(self.item))
    }

    /// Spans the whole `items` list, if it's non-empty.
    pub(crate) fn spanning(items: Vec<Spanning<T>>) -> Option<Spanning<Vec<Spanning<T>>>> {
        let start = items.first()?.span.start;
        let end = items.last()?.span.end;
        Some(Spanning::start_end(start, end, items))
    }
}

impl<T: fmt::Display> fmt::Display for Spanning<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. At {}", self.item, self.span.start)
    }
}

impl<T: std::error::Error> std::error::Error for Spanning<T> {}
