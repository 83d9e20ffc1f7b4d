use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    // Channel layout for the ppg_stream firmware (optional)
    // "single" streams IR only, "dual" streams IR and red

    let channels = env::var("PPG_CHANNELS").unwrap_or_else(|_| "single".to_string());
    match channels.as_str() {
        "single" | "dual" => {
            if channels == "dual" {
                println!("cargo:warning=Using PPG_CHANNELS from environment: dual");
            }
        }
        other => panic!("PPG_CHANNELS must be \"single\" or \"dual\", got {:?}", other),
    }
    println!("cargo:rustc-env=PPG_CHANNELS={}", channels);

    // Linker script for the RP2350 firmware; host builds skip this
    let target = env::var("TARGET").unwrap_or_default();
    if target.starts_with("thumbv8m") {
        let out = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
        fs::write(out.join("memory.x"), include_bytes!("memory.x"))
            .expect("failed to write memory.x");
        println!("cargo:rustc-link-search={}", out.display());
        println!("cargo:rustc-link-arg-examples=--nmagic");
        println!("cargo:rustc-link-arg-examples=-Tlink.x");
        println!("cargo:rustc-link-arg-examples=-Tdefmt.x");
    }

    // Rerun if environment variables change
    println!("cargo:rerun-if-env-changed=PPG_CHANNELS");
    println!("cargo:rerun-if-changed=memory.x");
}
