//! Build-script entry point.
//!
//! Reads `typemux.toml` from the package root when present, generates the
//! converter and dispatcher files and writes them to `OUT_DIR`, where the
//! crate mounts them with `include!(concat!(env!("OUT_DIR"), "/internal.rs"))`.
#[macro_export]
macro_rules! build {
    ($model:expr, $introspector:expr) => {{
        println!("cargo:rerun-if-changed=build.rs");
        if ::std::path::Path::new($crate::BuildConfig::FILE_NAME).exists() {
            println!("cargo:rerun-if-changed={}", $crate::BuildConfig::FILE_NAME);
        }

        // Get the output directory set by Cargo
        let out_dir = ::std::env::var("OUT_DIR").expect("OUT_DIR not set");

        let config = $crate::BuildConfig::load_or_default($crate::BuildConfig::FILE_NAME)?;
        let files = $crate::generate(&$model, &$introspector, &config)?;

        files.write_to(
            ::std::path::Path::new(&out_dir),
            $crate::IncludeBase::OutDir,
        )?;
    }};
}
