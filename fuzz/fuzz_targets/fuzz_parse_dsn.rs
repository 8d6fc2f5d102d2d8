#![no_main]

use beanstalk_connect::Dsn;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(dsn) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing and interpretation must never panic; errors are fine.
    if let Ok(parsed) = Dsn::parse(dsn) {
        let _ = parsed.to_config();
    }
});
