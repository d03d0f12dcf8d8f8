mod deserialization_error;
mod property_cache;
mod row_deserializer;
mod transformer;

pub use {
    deserialization_error::DeserializationError,
    transformer::{Processor, Transformer},
};
