#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(name) = std::str::from_utf8(data) {
        // Derivation must stay total and sanitized for arbitrary filenames
        let ident = webbundle::const_name(name);
        assert!(!ident.is_empty());
        assert!(ident
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));

        let delim = webbundle::delimiter_for(&ident);
        assert!(delim.ends_with("DL"));
        assert!(delim.len() <= 14);
    }
});
