#![no_main]

use libfuzzer_sys::fuzz_target;
use themecfg::config::source::{SourceFormat, parse};

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        let _ = parse(source, SourceFormat::ObjectLiteral);
    }
});
