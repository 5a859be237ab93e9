use std::{env, fs, path::PathBuf};

fn main() {
    // Pico 1: copy memory.x to OUT_DIR so cortex-m-rt's link.x can find it.
    let Ok(target) = env::var("TARGET") else {
        return;
    };
    if !target.starts_with("thumbv6m") {
        return;
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let memory_x = fs::read_to_string("memory.x").expect("Failed to read memory.x");
    fs::write(out_dir.join("memory.x"), memory_x).expect("Failed to write memory.x");
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");

    // Linker scripts for the firmware binary only.
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}
