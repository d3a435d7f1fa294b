//! Build-time generator for composite object-mapper dispatchers.
//!
//! Given groups that claim schema types, the generator assigns every type
//! to exactly one group (first claim wins), filters each group's types by
//! constructor arity, and emits one converter per group plus a dispatcher
//! that routes by fully-qualified type name to lazily built converters.

mod accessor;
mod arity;
mod config;
mod converter;
mod dispatch;
mod dispatcher;
mod error;
mod file;
mod macros;
mod ownership;
mod stream;

pub use arity::ArityFilter;
pub use config::{BuildConfig, ConfigError, ConflictLevel};
pub use converter::{ConverterEmitter, ConverterFile, FieldMapper, MappedType};
pub use dispatch::DispatchTables;
pub use error::BuildError;
pub use file::{
    DISPATCHER_FILE, GeneratedFile, GeneratedFileSet, INDEX_FILE, IncludeBase, MAPPER_DIR,
};
pub use ownership::{DroppedClaim, OwnershipMap};

use tracing::{debug, info, warn};
use typemux_schema::{introspect::Introspect, model::Group, model::Model, validate::validate_model};

/// Run the whole pipeline with the default field-mapping emitter.
pub fn generate(
    model: &Model,
    introspector: &dyn Introspect,
    config: &BuildConfig,
) -> Result<GeneratedFileSet, BuildError> {
    Generator::new(model, introspector, config).generate()
}

///
/// Plan
///
/// Everything decided before any code is emitted.
///

#[derive(Clone, Debug)]
pub struct Plan {
    pub groups: Vec<Group>,
    pub ownership: OwnershipMap,
    pub files: Vec<ConverterFile>,
    pub tables: DispatchTables,
}

///
/// Generator
///

pub struct Generator<'a> {
    model: &'a Model,
    introspector: &'a dyn Introspect,
    config: &'a BuildConfig,
    emitter: &'a dyn ConverterEmitter,
}

impl<'a> Generator<'a> {
    #[must_use]
    pub fn new(
        model: &'a Model,
        introspector: &'a dyn Introspect,
        config: &'a BuildConfig,
    ) -> Self {
        Self {
            model,
            introspector,
            config,
            emitter: &FieldMapper,
        }
    }

    /// Replace the converter body emitter.
    #[must_use]
    pub fn with_emitter(mut self, emitter: &'a dyn ConverterEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    /// Validate, resolve ownership, introspect and build both tables.
    pub fn plan(&self) -> Result<Plan, BuildError> {
        self.config.validate()?;
        validate_model(self.model).map_err(BuildError::Validation)?;

        let groups = &self.model.groups;
        let ownership = OwnershipMap::resolve(groups);
        report_dropped(groups, &ownership, self.config.conflicts);

        let mut filter = ArityFilter::new(self.introspector);
        let files = groups
            .iter()
            .enumerate()
            .map(|(index, group)| filter.converter_file(index, group, ownership.owned_by(index)))
            .collect::<Result<Vec<_>, _>>()?;

        let tables = DispatchTables::build(&ownership)?;
        debug!(
            groups = groups.len(),
            types = ownership.len(),
            introspected = filter.introspected(),
            routed = tables.decode.len(),
            "planned dispatcher"
        );

        Ok(Plan {
            groups: groups.clone(),
            ownership,
            files,
            tables,
        })
    }

    /// Plan and render. Nothing touches the filesystem here.
    pub fn generate(&self) -> Result<GeneratedFileSet, BuildError> {
        let plan = self.plan()?;

        let converters = plan
            .files
            .iter()
            .map(|file| {
                let tokens = self.emitter.emit(file)?;

                Ok(GeneratedFile::new(
                    file.relative_path(),
                    Some(file.module.clone()),
                    &tokens,
                ))
            })
            .collect::<Result<Vec<_>, BuildError>>()?;

        let tokens = dispatcher::generate(&plan, self.config)?;
        let dispatcher = GeneratedFile::new(DISPATCHER_FILE, None, &tokens);

        info!(
            dispatcher = %self.config.dispatcher,
            converters = converters.len(),
            "generated dispatcher"
        );

        Ok(GeneratedFileSet::new(converters, dispatcher))
    }
}

fn report_dropped(groups: &[Group], ownership: &OwnershipMap, level: ConflictLevel) {
    for claim in ownership.dropped() {
        let group = &groups[claim.group].name;
        let owner = &groups[claim.owner].name;

        match level {
            ConflictLevel::Silent => {}
            ConflictLevel::Debug => {
                debug!(path = %claim.path, %group, %owner, "claim dropped, type already owned");
            }
            ConflictLevel::Warn => {
                warn!(path = %claim.path, %group, %owner, "claim dropped, type already owned");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typemux_schema::{
        introspect::IntrospectionError,
        model::{Constructor, SchemaPath, TypeTable},
    };

    fn named(fields: &[&str]) -> Constructor {
        Constructor::Named(fields.iter().map(ToString::to_string).collect())
    }

    fn model(groups: Vec<Group>) -> Model {
        let types = TypeTable::new()
            .with("app::X", named(&["x"]))
            .with("app::Y", named(&["y"]))
            .with("app::Z", named(&["z"]))
            .with("app::W", Constructor::Unit);

        Model::new(groups).with_types(types)
    }

    fn run(model: &Model) -> Result<GeneratedFileSet, BuildError> {
        generate(model, &model.types, &BuildConfig::default())
    }

    #[test]
    fn overlapping_groups_split_ownership() {
        let model = model(vec![
            Group::new("a", ["app::X", "app::Y"]),
            Group::new("b", ["app::Y", "app::Z"]),
        ]);
        let config = BuildConfig::default();
        let plan = Generator::new(&model, &model.types, &config)
            .plan()
            .expect("plan");

        assert_eq!(plan.tables.decode.group_of("app::Y"), Some(0));
        assert_eq!(plan.tables.encode.group_of("app::Y"), Some(0));
        assert_eq!(plan.tables.decode.group_of("app::Z"), Some(1));

        let a: Vec<_> = plan.files[0].mapped_names().collect();
        let b: Vec<_> = plan.files[1].mapped_names().collect();
        assert_eq!(a, ["app::X", "app::Y"]);
        assert_eq!(b, ["app::Z"]);
    }

    #[test]
    fn zero_arity_type_is_routed_without_field_mapping() {
        let model = model(vec![Group::new("c", ["app::W"])]);
        let files = run(&model).expect("generates");

        assert_eq!(files.converters().len(), 1);
        let converter = &files.converters()[0].contents;
        assert!(converter.contains("pub struct CMapper"));
        assert!(converter.contains("app :: W { }"));
        assert!(!converter.contains("Fields"));
        assert!(!converter.contains("RecordBuilder"));

        let dispatcher = &files.dispatcher().contents;
        assert!(dispatcher.contains("pub fn mapper_c"));
        assert!(dispatcher.contains("\"app::W\" =>"));
    }

    #[test]
    fn fully_shadowed_group_is_not_routed() {
        let model = model(vec![
            Group::new("a", ["app::X"]),
            Group::new("shadow", ["app::X"]),
        ]);
        let files = run(&model).expect("generates");
        let dispatcher = &files.dispatcher().contents;

        assert!(dispatcher.contains("pub fn mapper_shadow"));
        assert!(!dispatcher.contains("self . mapper_shadow ()"));
        assert_eq!(files.converters().len(), 2);
        assert!(files.get("internal/mapper/shadow.rs").is_some());
    }

    #[test]
    fn generated_files_parse() {
        let model = model(vec![
            Group::new("a", ["app::X", "app::Y"]),
            Group::new("b", ["app::Y", "app::Z", "app::W"]),
            Group::new("empty", Vec::<String>::new()),
        ]);
        let files = run(&model).expect("generates");

        for file in files.iter() {
            syn::parse_file(&file.contents)
                .unwrap_or_else(|e| panic!("{} does not parse: {e}", file.path));
        }
    }

    #[test]
    fn accessors_construct_once_through_their_slot() {
        let model = model(vec![
            Group::new("a", ["app::X"]),
            Group::new("shadow", ["app::X"]),
        ]);
        let files = run(&model).expect("generates");
        let dispatcher = &files.dispatcher().contents;

        for group in ["a", "shadow"] {
            assert!(dispatcher.contains(&format!("{group} : :: typemux :: core :: ConverterSlot <")));
            assert!(dispatcher.contains(&format!("{group} : :: typemux :: core :: ConverterSlot :: new ()")));
            assert!(dispatcher.contains(&format!("self . {group} . get_or_init (")));
        }
        assert_eq!(dispatcher.matches("get_or_init").count(), 2);
    }

    #[test]
    fn no_groups_still_yield_a_dispatcher() {
        let model = Model::default();
        let files = run(&model).expect("generates");

        assert!(files.converters().is_empty());
        assert!(files.dispatcher().contents.contains("pub struct Dispatcher"));
    }

    #[test]
    fn introspection_failure_aborts_generation() {
        let model = model(vec![Group::new("a", ["app::X", "app::Ghost"])]);
        let err = run(&model).expect_err("unknown type aborts");

        assert!(matches!(
            err,
            BuildError::Introspection(IntrospectionError::UnknownType(ref path))
                if path == &SchemaPath::new("app::Ghost")
        ));
    }

    #[test]
    fn invalid_model_is_rejected_before_introspection() {
        let model = model(vec![Group::new("", ["app::X"])]);
        let err = run(&model).expect_err("empty name is invalid");

        assert!(matches!(err, BuildError::Validation(_)));
    }

    #[test]
    fn custom_dispatcher_name_and_namespace() {
        let model = model(vec![Group::new("a", ["app::X"])]);
        let config = BuildConfig {
            namespace: "crate::generated".to_string(),
            dispatcher: "Hub".to_string(),
            ..BuildConfig::default()
        };
        let files = generate(&model, &model.types, &config).expect("generates");
        let dispatcher = &files.dispatcher().contents;

        assert!(dispatcher.contains("pub struct Hub"));
        assert!(dispatcher.contains("crate :: generated :: mapper :: a :: AMapper"));
    }

    #[test]
    fn custom_emitter_replaces_converter_bodies() {
        struct Stub;

        impl ConverterEmitter for Stub {
            fn emit(&self, file: &ConverterFile) -> Result<proc_macro2::TokenStream, BuildError> {
                let name = quote::format_ident!("{}", file.mapper);
                Ok(quote::quote!(pub struct #name;))
            }
        }

        let model = model(vec![Group::new("a", ["app::X"])]);
        let config = BuildConfig::default();
        let files = Generator::new(&model, &model.types, &config)
            .with_emitter(&Stub)
            .generate()
            .expect("generates");

        assert!(files.converters()[0].contents.contains("pub struct AMapper ;"));
        assert!(!files.converters()[0].contents.contains("ObjectMapper"));
    }
}
