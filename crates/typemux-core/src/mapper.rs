use crate::{error::MapperError, payload::Payload, record::Record};
use std::borrow::Borrow;

///
/// ObjectMapper
///
/// Single-item decode/encode contract shared by group converters and by
/// the composite dispatcher that routes between them.
///

pub trait ObjectMapper {
    fn decode_one(&self, type_name: &str, record: Record) -> Result<Box<dyn Payload>, MapperError>;

    /// Encode `object` as `type_name`, which may differ from the object's
    /// own dynamic type name.
    fn encode_one_as(&self, object: &dyn Payload, type_name: &str) -> Result<Record, MapperError>;

    fn encode_one(&self, object: &dyn Payload) -> Result<Record, MapperError> {
        self.encode_one_as(object, object.type_name())
    }
}

impl<M: ObjectMapper + ?Sized> ObjectMapper for Box<M> {
    fn decode_one(&self, type_name: &str, record: Record) -> Result<Box<dyn Payload>, MapperError> {
        (**self).decode_one(type_name, record)
    }

    fn encode_one_as(&self, object: &dyn Payload, type_name: &str) -> Result<Record, MapperError> {
        (**self).encode_one_as(object, type_name)
    }

    fn encode_one(&self, object: &dyn Payload) -> Result<Record, MapperError> {
        (**self).encode_one(object)
    }
}

///
/// BatchMapper
///
/// Lazy batch operations. Each produced item is `(input index, result)`;
/// elements are converted only when pulled, and the sequence ends after
/// the first error it yields.
///

pub trait BatchMapper: ObjectMapper {
    fn decode_many<'a, I>(
        &'a self,
        type_name: &'a str,
        records: I,
    ) -> impl Iterator<Item = Result<(usize, Box<dyn Payload>), MapperError>> + 'a
    where
        I: IntoIterator<Item = Record> + 'a,
        I::IntoIter: 'a;

    fn encode_many<'a, I>(
        &'a self,
        objects: I,
    ) -> impl Iterator<Item = Result<(usize, Record), MapperError>> + 'a
    where
        I: IntoIterator + 'a,
        I::IntoIter: 'a,
        I::Item: Borrow<dyn Payload>;
}
