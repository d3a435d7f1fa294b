use crate::error::MapperError;
use std::{any::Any, fmt::Debug};

///
/// Path
///
/// Fully-qualified schema path of a payload type. This is the key the
/// dispatch tables are built over, so it must match the path the type was
/// claimed under in the generator's input model.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// Payload
///
/// Object-safe view over any decoded schema object. The dynamic
/// `type_name` drives encode-side dispatch.
///

pub trait Payload: Any + Debug + Send + Sync {
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T> Payload for T
where
    T: Path + Any + Debug + Send + Sync,
{
    fn type_name(&self) -> &'static str {
        T::PATH
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn Payload {
    #[must_use]
    pub fn is<T: Payload>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: Payload>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Recover the concrete type from a boxed payload.
    #[must_use]
    pub fn downcast<T: Payload>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }
}

/// Borrow `object` as the concrete type an encode arm was routed to.
/// `type_name` is the routed name, reported when the object is something else.
pub fn downcast_payload<'a, T: Payload>(
    object: &'a dyn Payload,
    type_name: &str,
) -> Result<&'a T, MapperError> {
    object
        .downcast_ref::<T>()
        .ok_or_else(|| MapperError::type_mismatch(type_name, object.type_name()))
}
