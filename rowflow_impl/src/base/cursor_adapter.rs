use crate::{usage_err, ColumnPlan, DbValue, RfResult, RowCursor};

// Uniform "read next row into buffer" on top of a cursor.
//
// Suspension (in the async variant) only happens in the read call;
// extraction of the values with `fill()` is always synchronous.
#[derive(Debug)]
pub(crate) struct CursorAdapter<C> {
    cursor: C,
    exhausted: bool,
    rows_read: usize,
}

impl<C> CursorAdapter<C> {
    pub(crate) fn new(cursor: C) -> Self {
        Self {
            cursor,
            exhausted: false,
            rows_read: 0,
        }
    }

    pub(crate) fn cursor(&self) -> &C {
        &self.cursor
    }

    pub(crate) fn rows_read(&self) -> usize {
        self.rows_read
    }

    pub(crate) fn into_inner(self) -> C {
        self.cursor
    }

    fn check_not_exhausted(&self) -> RfResult<()> {
        if self.exhausted {
            Err(usage_err!(
                "cursor is exhausted after {} rows, no further reads are possible",
                self.rows_read
            ))
        } else {
            Ok(())
        }
    }

    fn register_read(&mut self, has_row: bool) -> bool {
        if has_row {
            self.rows_read += 1;
        } else {
            trace!("CursorAdapter: cursor exhausted after {} rows", self.rows_read);
            self.exhausted = true;
        }
        has_row
    }
}

impl<C: RowCursor> CursorAdapter<C> {
    pub(crate) fn read_next(&mut self) -> RfResult<bool> {
        self.check_not_exhausted()?;
        let has_row = self.cursor.read_next()?;
        Ok(self.register_read(has_row))
    }

    pub(crate) fn read_into(&mut self, plan: &ColumnPlan, buffer: &mut [DbValue]) -> RfResult<bool> {
        if self.read_next()? {
            self.fill(plan, buffer)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    // absent columns get the neutral value, recycled buffers may hold stale values
    pub(crate) fn fill(&self, plan: &ColumnPlan, buffer: &mut [DbValue]) -> RfResult<()> {
        if plan.is_identity(self.cursor.field_count()) {
            self.cursor.values(&mut buffer[..plan.len()])?;
        } else {
            for (slot, column) in buffer.iter_mut().zip(plan) {
                *slot = match column.ordinal() {
                    Some(ordinal) => self.cursor.value(ordinal)?,
                    None => DbValue::NULL,
                };
            }
        }
        Ok(())
    }

    pub(crate) fn value(&self, ordinal: usize) -> RfResult<DbValue> {
        self.cursor.value(ordinal)
    }
}

#[cfg(feature = "async")]
impl<C: crate::a_sync::AsyncRowCursor> CursorAdapter<C> {
    pub(crate) async fn read_next_async(&mut self) -> RfResult<bool> {
        self.check_not_exhausted()?;
        let has_row = self.cursor.read_next_async().await?;
        Ok(self.register_read(has_row))
    }
}

#[cfg(test)]
mod test {
    use super::CursorAdapter;
    use crate::{ColumnPlan, DbValue, RfResult, RowCursor, RowSchema};

    struct TwoRows {
        pos: usize,
    }
    impl RowCursor for TwoRows {
        fn field_count(&self) -> usize {
            2
        }
        fn field_name(&self, ordinal: usize) -> RfResult<String> {
            Ok(["a", "b"][ordinal].to_string())
        }
        fn read_next(&mut self) -> RfResult<bool> {
            self.pos += 1;
            Ok(self.pos <= 2)
        }
        fn value(&self, ordinal: usize) -> RfResult<DbValue> {
            Ok(DbValue::INT(i32::try_from(self.pos * 10 + ordinal).unwrap()))
        }
    }

    #[test]
    fn test_read_into_with_reordered_and_absent_columns() {
        let mut adapter = CursorAdapter::new(TwoRows { pos: 0 });
        let schema = RowSchema::from_cursor(adapter.cursor()).unwrap();
        let plan = ColumnPlan::resolve(&["B", "x", "A"], &schema, true).unwrap();
        let mut buffer = vec![DbValue::from("stale"); 3];

        assert!(adapter.read_into(&plan, &mut buffer).unwrap());
        assert_eq!(buffer, vec![DbValue::INT(11), DbValue::NULL, DbValue::INT(10)]);
        assert!(adapter.read_into(&plan, &mut buffer).unwrap());
        assert!(!adapter.read_into(&plan, &mut buffer).unwrap());
        assert_eq!(adapter.rows_read(), 2);

        // reading beyond the end is a usage error
        assert!(adapter.read_next().is_err());
    }

    #[test]
    fn test_identity_plan() {
        let mut adapter = CursorAdapter::new(TwoRows { pos: 0 });
        let plan = ColumnPlan::all(&RowSchema::from_cursor(adapter.cursor()).unwrap());
        let mut buffer = vec![DbValue::NULL; 16];
        assert!(adapter.read_into(&plan, &mut buffer).unwrap());
        assert_eq!(&buffer[..2], &[DbValue::INT(10), DbValue::INT(11)]);
        assert!(buffer[2].is_null());
    }
}
