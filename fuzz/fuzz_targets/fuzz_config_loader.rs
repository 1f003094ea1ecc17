#![no_main]

use libfuzzer_sys::fuzz_target;
use themecfg::config::{ConfigLoader, SourceFormat};

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    // Only panics matter; errors are expected.
    for format in [SourceFormat::ObjectLiteral, SourceFormat::Json, SourceFormat::Yaml] {
        let mut loader = ConfigLoader::with_defaults();
        let _ = loader.load_from_str(source, format);
    }
});
