// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use std::env;
use std::fs;
use std::path::Path;

/// True if `feature` is listed in comma-separated `CARGO_CFG_TARGET_FEATURE`
fn has_feature(list: &str, feature: &str) -> bool {
    list.split(',').any(|f| f == feature)
}

/// Lane counts for (8, 16, 32, 64)-bit elements at a given register width in bits.
fn lanes_for_register(bits: usize) -> (usize, usize, usize, usize) {
    (bits / 8, bits / 16, bits / 32, (bits / 64).max(1))
}

/// Parses `SIMD_LANES_OVERRIDE="64,32,16,8"`.
///
/// The vector comparison kernels pack one 64-row block into a single `u64`,
/// so every lane count has to be a power of two no larger than 64.
fn parse_override(val: &str) -> (usize, usize, usize, usize) {
    let parts: Vec<usize> = val
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<usize>()
                .unwrap_or_else(|_| panic!("Invalid SIMD_LANES_OVERRIDE entry {s:?}"))
        })
        .collect();
    if parts.len() != 4 {
        panic!("Invalid SIMD_LANES_OVERRIDE. Expected 4 comma-separated integers, e.g., \"64,32,16,8\"");
    }
    for &lanes in &parts {
        if !lanes.is_power_of_two() || lanes > 64 {
            panic!("Invalid SIMD_LANES_OVERRIDE. Lane counts must be powers of two <= 64, got {lanes}");
        }
    }
    println!("cargo:warning=SIMD_LANES_OVERRIDE applied: {:?}", parts);
    (parts[0], parts[1], parts[2], parts[3])
}

fn main() {
    // Target triple features supplied by `cargo` (`--print cfg`)
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let feats = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();

    // Lane counts per element width, consumed by the vector comparison kernels:
    // W8 => i8/u8, W16 => i16/u16, W32 => i32/u32/f32, W64 => i64/u64/f64/Timestamp.
    let (w8, w16, w32, w64) = match env::var("SIMD_LANES_OVERRIDE") {
        Ok(val) => parse_override(&val),
        Err(_) => match arch.as_str() {
            "x86_64" | "x86" => {
                if has_feature(&feats, "avx512f") {
                    lanes_for_register(512)
                } else if has_feature(&feats, "avx2") {
                    lanes_for_register(256)
                } else if has_feature(&feats, "sse2") {
                    lanes_for_register(128)
                } else {
                    lanes_for_register(64)
                }
            }
            // All aarch64 CPUs have NEON (128-bit) unless explicitly disabled.
            "aarch64" if has_feature(&feats, "neon") => lanes_for_register(128),
            "wasm32" if has_feature(&feats, "simd128") => lanes_for_register(128),
            _ => lanes_for_register(64),
        },
    };

    let out_dir = env::var("OUT_DIR").expect("cargo always sets OUT_DIR for build scripts");
    let out_path = Path::new(&out_dir).join("simd_lanes.rs");

    // Included by `kernels::comparison::simd` via `include!`.
    fs::write(
        &out_path,
        format!(
            "
/// Auto-generated SIMD lane widths from build.rs

/// SIMD lane count for 8-bit elements (u8, i8).
#[allow(non_upper_case_globals, dead_code)]
pub const W8: usize = {w8};

/// SIMD lane count for 16-bit elements (u16, i16).
#[allow(non_upper_case_globals, dead_code)]
pub const W16: usize = {w16};

/// SIMD lane count for 32-bit elements (u32, i32, f32).
#[allow(non_upper_case_globals, dead_code)]
pub const W32: usize = {w32};

/// SIMD lane count for 64-bit elements (u64, i64, f64, Timestamp).
#[allow(non_upper_case_globals, dead_code)]
pub const W64: usize = {w64};
"
        ),
    )
    .expect("failed to write simd_lanes.rs");

    println!("cargo:rerun-if-env-changed=CARGO_CFG_TARGET_ARCH");
    println!("cargo:rerun-if-env-changed=CARGO_CFG_TARGET_FEATURE");
    println!("cargo:rerun-if-env-changed=SIMD_LANES_OVERRIDE");
}
