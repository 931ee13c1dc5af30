//! Build script for echolot-firmware
//!
//! - Links against the cortex-m-rt and defmt linker scripts
//!
//! The memory layout itself comes from embassy-stm32's `memory-x` feature.

fn main() {
    setup_linker();
}

/// Pass linker scripts to the binary
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    if std::env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    println!("cargo:rerun-if-changed=build.rs");
}
