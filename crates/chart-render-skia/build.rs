// File: crates/chart-render-skia/build.rs
// Summary: Links the Windows system library Skia's font manager pulls registry calls from.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW, RegQueryInfoKeyW used by the Skia font manager.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
