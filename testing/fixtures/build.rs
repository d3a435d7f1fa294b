use std::error::Error;
use typemux_build::build;
use typemux_schema::{introspect::SourceIntrospector, model::Model};

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=schema/model.json");
    println!("cargo:rerun-if-changed=src/schema.rs");

    let model = Model::from_path("schema/model.json")?;
    let mut introspector = SourceIntrospector::new();
    introspector.add_file("typemux_testing_fixtures::schema", "src/schema.rs")?;

    build!(model, introspector);

    Ok(())
}
