use super::RowSequence;
use crate::{Processor, RfResult, RowCursor};
use serde::de::DeserializeOwned;

/// A lazy, single-pass sequence of rows mapped onto instances of `T`.
///
/// Each row is read into a pooled buffer, transformed, and the buffer is given back
/// before the instance is handed out.
/// The first error ends the sequence.
#[derive(Debug)]
pub struct MappedRows<'a, C, T> {
    rows: RowSequence<'a, C>,
    processor: Processor<T>,
}

impl<'a, C, T> MappedRows<'a, C, T> {
    pub(crate) fn new(rows: RowSequence<'a, C>, processor: Processor<T>) -> Self {
        Self { rows, processor }
    }
}

impl<'a, C: RowCursor, T: DeserializeOwned> Iterator for MappedRows<'a, C, T> {
    type Item = RfResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.rows.next_row() {
            Ok(Some(row)) => {
                let result = self.processor.transform(row);
                if result.is_err() {
                    self.rows.finish();
                } else {
                    self.rows.release();
                }
                Some(result)
            }
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl<'a, C: RowCursor, T: DeserializeOwned> std::iter::FusedIterator for MappedRows<'a, C, T> {}
