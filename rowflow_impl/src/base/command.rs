use crate::{DbValue, RfError, RfResult, RowCursor};
use std::time::Duration;

/// How the text of a [`Command`] is interpreted by the database client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandKind {
    /// A SQL statement.
    #[default]
    Text,
    /// The name of a stored procedure.
    StoredProcedure,
    /// The name of a table, all of whose rows are returned.
    TableDirect,
}

/// Hint for the database client how the cursor of a command is going to be consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandBehavior {
    /// No restrictions.
    #[default]
    Default,
    /// Columns are read in ordinal order, each at most once.
    SequentialAccess,
    /// Only the first result is consumed.
    SingleResult,
    /// Only the first row is consumed.
    SingleRow,
    /// The connection is closed when the cursor is dropped.
    CloseConnection,
}

/// A database command, as handed to a [`CommandExecutor`].
#[derive(Debug, Clone, Default)]
pub struct Command {
    text: String,
    kind: CommandKind,
    parameters: Vec<(String, DbValue)>,
    timeout: Option<Duration>,
}

impl Command {
    /// Creates a text command.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Creates a command that calls a stored procedure.
    pub fn stored_procedure<S: Into<String>>(name: S) -> Self {
        Self::new(name).with_kind(CommandKind::StoredProcedure)
    }

    /// Builder-method for setting the kind of the command.
    #[must_use]
    pub fn with_kind(mut self, kind: CommandKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder-method for adding a named parameter.
    #[must_use]
    pub fn with_parameter<N: Into<String>, V: Into<DbValue>>(mut self, name: N, value: V) -> Self {
        self.parameters.push((name.into(), value.into()));
        self
    }

    /// Builder-method for setting a timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The command text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The kind of the command.
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// The parameters, in the order they were added.
    pub fn parameters(&self) -> &[(String, DbValue)] {
        &self.parameters
    }

    /// The timeout, if one was set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Fails if the command has no text.
    pub fn validate(&self) -> RfResult<()> {
        if self.text.trim().is_empty() {
            Err(RfError::ArgumentInvalid("command text is empty"))
        } else {
            Ok(())
        }
    }
}

/// The capabilities of a database client that the readers of this crate rely on.
///
/// An adapter for a concrete database implements this trait; it is responsible for
/// acquiring and releasing the connection the returned cursor is bound to.
pub trait CommandExecutor {
    /// Executes the command and returns a cursor over its rows.
    fn execute_reader(
        &mut self,
        command: &Command,
        behavior: CommandBehavior,
    ) -> RfResult<Box<dyn RowCursor + Send>>;

    /// Executes the command and returns the number of affected rows.
    fn execute_non_query(&mut self, command: &Command) -> RfResult<u64>;

    /// Executes the command and returns the first column of the first row,
    /// or `DbValue::NULL` if there is no row.
    fn execute_scalar(&mut self, command: &Command) -> RfResult<DbValue> {
        trace!("CommandExecutor::execute_scalar()");
        let mut cursor = self.execute_reader(command, CommandBehavior::SingleRow)?;
        if cursor.field_count() > 0 && cursor.read_next()? {
            cursor.value(0)
        } else {
            Ok(DbValue::NULL)
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Command, CommandKind};
    use crate::DbValue;

    #[test]
    fn test_command_builder() {
        let cmd = Command::stored_procedure("load_items")
            .with_parameter("min", 3)
            .with_parameter("label", Some("x"))
            .with_timeout(std::time::Duration::from_secs(5));
        assert_eq!(cmd.kind(), CommandKind::StoredProcedure);
        assert_eq!(cmd.parameters()[0], ("min".to_string(), DbValue::INT(3)));
        assert_eq!(cmd.parameters()[1].1, DbValue::from("x"));
        assert!(cmd.validate().is_ok());
        assert!(Command::new("  ").validate().is_err());
    }
}
