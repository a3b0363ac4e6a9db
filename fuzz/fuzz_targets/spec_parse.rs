#![no_main]

//! Fuzz target for specification text.
//!
//! Validation and parsing must reject bad input with an error, never a panic.

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fwconv_spec::validate_text("fuzz.csv", s);

    if let Ok(schema) = fwconv_spec::parse_spec(s) {
        // Every detail line became exactly one field.
        assert_eq!(schema.len(), s.lines().count().saturating_sub(1));
        for field in &schema {
            let _ = field.parse_width();
            let _ = field.datatype();
        }
    }
});
