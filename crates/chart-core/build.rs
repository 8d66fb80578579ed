// File: crates/chart-core/build.rs
// Summary: Links the Windows system libraries Skia's textlayout (ICU) needs for the axis labels.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // ICU data lookup goes through the registry (RegOpenKeyExW and friends).
        println!("cargo:rustc-link-lib=advapi32");
    }
}
