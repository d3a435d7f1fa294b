use crate::{
    dispatch::{DispatchTable, DispatchTableError},
    error::MapperError,
    mapper::{BatchMapper, ObjectMapper},
    payload::Payload,
    record::Record,
    slot::ConverterSlot,
    stream::IndexedStream,
};
use std::{borrow::Borrow, fmt, sync::Arc};

/// Constructor for one group's converter.
pub type MapperFactory = Box<dyn Fn() -> Box<dyn ObjectMapper + Send + Sync> + Send + Sync>;

type BoxedMapper = Box<dyn ObjectMapper + Send + Sync>;

///
/// DispatchPlan
///
/// Immutable routing description shared by any number of
/// `DynamicDispatcher` instances: a dispatch table plus one named converter
/// factory per group, in group order.
///

pub struct DispatchPlan {
    table: DispatchTable,
    groups: Vec<(String, MapperFactory)>,
}

impl DispatchPlan {
    #[must_use]
    pub const fn new(table: DispatchTable) -> Self {
        Self {
            table,
            groups: Vec::new(),
        }
    }

    /// Register the next group. Groups owning no types are still accepted.
    #[must_use]
    pub fn with_group<F, M>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> M + Send + Sync + 'static,
        M: ObjectMapper + Send + Sync + 'static,
    {
        let factory: MapperFactory = Box::new(move || Box::new(factory()));
        self.groups.push((name.into(), factory));
        self
    }

    #[must_use]
    pub const fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    fn validate(&self) -> Result<(), DispatchTableError> {
        let groups = self.groups.len();
        match self.table.groups().find(|group| *group >= groups) {
            Some(group) => Err(DispatchTableError::UnknownGroup { group, groups }),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for DispatchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchPlan")
            .field("table", &self.table)
            .field("groups", &self.group_names().collect::<Vec<_>>())
            .finish()
    }
}

///
/// DynamicDispatcher
///
/// Runtime composite dispatcher driven by a `DispatchPlan`. Each instance
/// owns its own converter slots; a group's converter is built on first use
/// through that instance and reused afterwards.
///

pub struct DynamicDispatcher {
    plan: Arc<DispatchPlan>,
    slots: Vec<ConverterSlot<BoxedMapper>>,
}

impl DynamicDispatcher {
    pub fn new(plan: Arc<DispatchPlan>) -> Result<Self, DispatchTableError> {
        plan.validate()?;
        let slots = plan.groups.iter().map(|_| ConverterSlot::new()).collect();

        Ok(Self { plan, slots })
    }

    #[must_use]
    pub fn plan(&self) -> &DispatchPlan {
        &self.plan
    }

    /// Lazy accessor for the converter of `group`.
    #[must_use]
    pub fn mapper(&self, group: usize) -> Option<&(dyn ObjectMapper + Send + Sync)> {
        let slot = self.slots.get(group)?;
        let (_, factory) = &self.plan.groups[group];

        Some(slot.get_or_init(|| factory()).as_ref())
    }

    #[must_use]
    pub fn mapper_named(&self, name: &str) -> Option<&(dyn ObjectMapper + Send + Sync)> {
        let group = self.plan.group_names().position(|n| n == name)?;

        self.mapper(group)
    }

    /// Whether the converter of `group` has been built on this instance.
    #[must_use]
    pub fn is_constructed(&self, group: usize) -> bool {
        self.slots.get(group).is_some_and(ConverterSlot::is_initialized)
    }

    fn route(&self, type_name: &str) -> Result<&(dyn ObjectMapper + Send + Sync), MapperError> {
        let group = self.plan.table.route(type_name)?;

        self.mapper(group)
            .ok_or_else(|| MapperError::unmatched(type_name))
    }
}

impl ObjectMapper for DynamicDispatcher {
    fn decode_one(&self, type_name: &str, record: Record) -> Result<Box<dyn Payload>, MapperError> {
        self.route(type_name)?.decode_one(type_name, record)
    }

    fn encode_one_as(&self, object: &dyn Payload, type_name: &str) -> Result<Record, MapperError> {
        self.route(type_name)?.encode_one_as(object, type_name)
    }
}

impl BatchMapper for DynamicDispatcher {
    fn decode_many<'a, I>(
        &'a self,
        type_name: &'a str,
        records: I,
    ) -> impl Iterator<Item = Result<(usize, Box<dyn Payload>), MapperError>> + 'a
    where
        I: IntoIterator<Item = Record> + 'a,
        I::IntoIter: 'a,
    {
        IndexedStream::new(records, move |record: Record| {
            self.decode_one(type_name, record)
        })
    }

    fn encode_many<'a, I>(
        &'a self,
        objects: I,
    ) -> impl Iterator<Item = Result<(usize, Record), MapperError>> + 'a
    where
        I: IntoIterator + 'a,
        I::IntoIter: 'a,
        I::Item: Borrow<dyn Payload>,
    {
        IndexedStream::new(objects, move |object: I::Item| {
            self.encode_one(object.borrow())
        })
    }
}

impl fmt::Debug for DynamicDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicDispatcher")
            .field("plan", &self.plan)
            .field("slots", &self.slots)
            .finish()
    }
}
