use std::str::{FromStr, SplitAsciiWhitespace};

/// Whitespace field reader that keeps count of how many fields were bound.
///
/// Binding stops at the first field that is missing or fails to parse; every
/// later call returns `None` so a short or garbled record can never bind a
/// field out of position.
pub struct FieldCursor<'a> {
    fields: SplitAsciiWhitespace<'a>,
    bound: usize,
    stopped: bool,
}

impl<'a> FieldCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            fields: text.split_ascii_whitespace(),
            bound: 0,
            stopped: false,
        }
    }

    /// Number of fields bound so far, ignored fields included.
    pub fn bound(&self) -> usize {
        self.bound
    }

    pub fn next_parsed<T: FromStr>(&mut self) -> Option<T> {
        if self.stopped {
            return None;
        }
        match self.fields.next().and_then(|raw| raw.parse().ok()) {
            Some(value) => {
                self.bound += 1;
                Some(value)
            }
            None => {
                self.stopped = true;
                None
            }
        }
    }

    /// Binds a field that must be exactly one character.
    pub fn next_char(&mut self) -> Option<char> {
        if self.stopped {
            return None;
        }
        let single = self.fields.next().and_then(|raw| {
            let mut chars = raw.chars();
            let ch = chars.next()?;
            chars.next().is_none().then_some(ch)
        });
        match single {
            Some(ch) => {
                self.bound += 1;
                Some(ch)
            }
            None => {
                self.stopped = true;
                None
            }
        }
    }

    /// Parses and discards `count` fields of type `T`. Returns false if any
    /// of them failed to bind.
    pub fn skip_parsed<T: FromStr>(&mut self, count: usize) -> bool {
        (0..count).all(|_| self.next_parsed::<T>().is_some())
    }
}
