fn main() {
    // Tell cargo to recompile when the embedded frontend changes.
    // The include_dir! macro embeds static/ at compile time, but cargo
    // doesn't track non-Rust files automatically.
    println!("cargo:rerun-if-changed=static");
}
