// build.rs

/// This build script determines which display backend to compile in based on:
/// 1. DISPLAY_BACKEND environment variable (highest priority)
/// 2. The `x11` Cargo feature
/// 3. Target OS defaults (fallback)
///
/// It emits a cfg flag for conditional compilation and sets up X11 linking.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=DISPLAY_BACKEND");

    // Declare custom cfg names to avoid warnings
    println!("cargo::rustc-check-cfg=cfg(use_x11_backend)");

    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let target_family = std::env::var("CARGO_CFG_TARGET_FAMILY").unwrap_or_default();
    let x11_capable = target_family.split(',').any(|f| f == "unix") && target_os != "macos";
    let has_x11_feature = std::env::var("CARGO_FEATURE_X11").is_ok();

    let backend = determine_backend(x11_capable, has_x11_feature);

    match backend {
        "x11" => {
            println!("cargo:rustc-cfg=use_x11_backend");
            link_x11();
        }
        "null" => {
            println!("cargo:warning=Building with the null display backend (no X11)");
        }
        other => panic!("Unknown display backend: {}", other),
    }
}

/// Picks `x11` or `null`. Forcing `x11` where the x11 crate is not available is an error.
fn determine_backend(x11_capable: bool, has_x11_feature: bool) -> &'static str {
    if let Ok(requested) = std::env::var("DISPLAY_BACKEND") {
        match requested.to_lowercase().as_str() {
            "x11" => {
                if !(x11_capable && has_x11_feature) {
                    panic!(
                        "DISPLAY_BACKEND=x11 requires a non-macOS Unix target and the `x11` feature"
                    );
                }
                println!("cargo:warning=Using display backend from DISPLAY_BACKEND env: x11");
                return "x11";
            }
            "null" => return "null",
            _ => panic!(
                "Invalid DISPLAY_BACKEND value: '{}'. Must be one of: x11, null",
                requested
            ),
        }
    }

    if x11_capable && has_x11_feature {
        "x11"
    } else {
        "null"
    }
}

/// Links libX11, preferring pkg-config and falling back to the standard search path.
fn link_x11() {
    if let Err(e) = pkg_config::probe_library("x11") {
        eprintln!(
            "pkg-config failed for library 'x11': {}. Falling back to manual linking.",
            e
        );
        println!("cargo:rustc-link-lib=X11");
        println!("cargo:rustc-link-search=/usr/lib");
    }
}
