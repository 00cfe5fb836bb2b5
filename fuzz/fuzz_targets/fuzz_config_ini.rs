#![no_main]

use libfuzzer_sys::fuzz_target;
use raptic::config::ini;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    // Parse arbitrary bytes as a configuration file; errors are fine, panics are not
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = ini::parse(s, Path::new("fuzz.raptic")) {
            // Whatever parses must survive a write and read back
            let text = ini::serialize(&config);
            let _ = ini::parse(&text, Path::new("fuzz.raptic"));
        }
    }
});
