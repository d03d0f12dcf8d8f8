use super::{AsyncRowCursor, RowSequence};
use crate::{Processor, RfResult};
use serde::de::DeserializeOwned;

/// A lazy, single-pass sequence of rows mapped onto instances of `T`.
///
/// The first error ends the sequence.
#[derive(Debug)]
pub struct MappedRows<'a, C, T> {
    rows: RowSequence<'a, C>,
    processor: Processor<T>,
}

impl<'a, C: AsyncRowCursor, T: DeserializeOwned> MappedRows<'a, C, T> {
    pub(crate) fn new(rows: RowSequence<'a, C>, processor: Processor<T>) -> Self {
        Self { rows, processor }
    }

    /// Reads and maps the next row; returns `Ok(None)` when the sequence is finished.
    ///
    /// # Errors
    ///
    /// Errors of the cursor or of the mapping.
    pub async fn try_next(&mut self) -> RfResult<Option<T>> {
        let Some(row) = self.rows.next_row().await? else {
            return Ok(None);
        };
        let result = self.processor.transform(row);
        if result.is_err() {
            self.rows.finish();
        } else {
            self.rows.release();
        }
        result.map(Some)
    }

    /// Reads and maps all remaining rows.
    ///
    /// # Errors
    ///
    /// The first error of the cursor or of the mapping.
    pub async fn try_collect(mut self) -> RfResult<Vec<T>> {
        let mut result = Vec::new();
        while let Some(item) = self.try_next().await? {
            result.push(item);
        }
        Ok(result)
    }
}
