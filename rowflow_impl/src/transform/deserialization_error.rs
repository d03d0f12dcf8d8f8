use thiserror::Error;

/// The errors that can occur while a row is mapped onto a target type.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DeserializationError {
    /// A value could not be converted into the type of the property.
    #[error("{}", _0)]
    Conversion(String),

    /// A property of the target type has no column and no default value.
    #[error("no value for field `{}`", _0)]
    MissingField(&'static str),

    /// Error while reading the value of a specific property.
    #[error("cannot read value for field `{property}`: {source}")]
    Property {
        /// Name of the property.
        property: &'static str,
        /// The causing Error.
        source: Box<DeserializationError>,
    },

    /// The target type cannot be introspected, because it is not deserialized
    /// as a struct with named fields.
    #[error("the target type is not a struct with named fields")]
    NotAStruct,
}

impl serde::de::Error for DeserializationError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Self::Conversion(msg.to_string())
    }

    fn missing_field(field: &'static str) -> Self {
        Self::MissingField(field)
    }
}
