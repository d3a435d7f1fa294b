use crate::error::MapperError;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

///
/// Record
///
/// Wire representation of a single schema object.
///

pub type Record = Map<String, Value>;

///
/// Fields
///
/// Consuming reader over a record, used by generated decode arms to pull
/// one constructor parameter at a time. A missing field reads as `null`, so
/// optional parameters decode to `None`.
///

#[derive(Debug)]
pub struct Fields<'a> {
    type_name: &'a str,
    record: Record,
}

impl<'a> Fields<'a> {
    #[must_use]
    pub const fn new(type_name: &'a str, record: Record) -> Self {
        Self { type_name, record }
    }

    pub fn take<T: DeserializeOwned>(&mut self, field: &str) -> Result<T, MapperError> {
        let value = self.record.remove(field).unwrap_or(Value::Null);

        serde_json::from_value(value)
            .map_err(|source| MapperError::field(self.type_name, field, source))
    }

    /// Fields that no constructor parameter consumed.
    #[must_use]
    pub fn into_rest(self) -> Record {
        self.record
    }
}

///
/// RecordBuilder
///
/// Writer used by generated encode arms.
///

#[derive(Debug)]
pub struct RecordBuilder<'a> {
    type_name: &'a str,
    record: Record,
}

impl<'a> RecordBuilder<'a> {
    #[must_use]
    pub fn new(type_name: &'a str) -> Self {
        Self {
            type_name,
            record: Record::new(),
        }
    }

    pub fn put<T: Serialize + ?Sized>(&mut self, field: &str, value: &T) -> Result<(), MapperError> {
        let value = serde_json::to_value(value)
            .map_err(|source| MapperError::field(self.type_name, field, source))?;
        self.record.insert(field.to_string(), value);

        Ok(())
    }

    #[must_use]
    pub fn finish(self) -> Record {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("test record must be an object, got {other}"),
        }
    }

    #[test]
    fn take_reads_and_consumes_fields() {
        let mut fields = Fields::new(
            "record_tests::Pet",
            record(json!({ "id": 7, "name": "rex", "extra": true })),
        );

        let id: u64 = fields.take("id").expect("id should decode");
        let name: String = fields.take("name").expect("name should decode");

        assert_eq!(id, 7);
        assert_eq!(name, "rex");
        assert_eq!(fields.into_rest(), record(json!({ "extra": true })));
    }

    #[test]
    fn missing_field_reads_as_null() {
        let mut fields = Fields::new("record_tests::Pet", Record::new());

        let tag: Option<String> = fields.take("tag").expect("optional field should decode");
        assert_eq!(tag, None);

        let err = fields
            .take::<String>("name")
            .expect_err("required field should fail");
        assert!(err.to_string().contains("field 'name' of 'record_tests::Pet'"));
    }

    #[test]
    fn builder_writes_serialized_fields() {
        let mut builder = RecordBuilder::new("record_tests::Pet");
        builder.put("id", &7_u64).expect("id should encode");
        builder.put("name", "rex").expect("name should encode");

        assert_eq!(builder.finish(), record(json!({ "id": 7, "name": "rex" })));
    }
}
