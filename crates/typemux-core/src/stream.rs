use crate::error::MapperError;
use std::iter::{Enumerate, FusedIterator};

///
/// IndexedStream
///
/// Pull-based adaptor that applies a fallible single-item conversion to
/// each input as it is consumed, tagging results with the input position.
///
/// The first error is yielded in place of its element and ends the
/// stream; later inputs are never converted.
///

#[derive(Debug)]
pub struct IndexedStream<I, F> {
    inner: Enumerate<I>,
    convert: F,
    halted: bool,
}

impl<I: Iterator, F> IndexedStream<I, F> {
    pub fn new(items: impl IntoIterator<IntoIter = I>, convert: F) -> Self {
        Self {
            inner: items.into_iter().enumerate(),
            convert,
            halted: false,
        }
    }

    /// Whether an error has ended the stream.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }
}

impl<I, F, T> Iterator for IndexedStream<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> Result<T, MapperError>,
{
    type Item = Result<(usize, T), MapperError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }

        let (index, item) = self.inner.next()?;
        match (self.convert)(item) {
            Ok(value) => Some(Ok((index, value))),
            Err(err) => {
                self.halted = true;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.halted {
            return (0, Some(0));
        }

        // an error may end the stream early
        let (_, upper) = self.inner.size_hint();
        (0, upper)
    }
}

impl<I, F, T> FusedIterator for IndexedStream<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> Result<T, MapperError>,
{
}
