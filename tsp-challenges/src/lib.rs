pub const BUILD_TIME_PATH: &str = env!("CARGO_MANIFEST_DIR");

pub mod travelling_salesman;
