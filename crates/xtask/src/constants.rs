/// Cross-compilation target for the `no_std` driver crates.
pub const TARGET: &str = "thumbv7em-none-eabihf";

/// Driver crates, in dependency order.
pub const DRIVER_CRATES: &[&str] = &["i2c-dev", "bh1750", "tda74xx"];
