#![no_main]

use libfuzzer_sys::fuzz_target;
use webbundle::{render_header, render_source, BundleEntry, Config};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let config = Config::default();
        let entry = BundleEntry {
            identifier: "INDEX_HTML".to_string(),
            delimiter: "INDEXHTMLDL".to_string(),
            file_name: "index.html".to_string(),
            content: content.to_string(),
        };

        let header = render_header(std::slice::from_ref(&entry), &config);
        let source = render_source(std::slice::from_ref(&entry), &config);

        assert!(header.ends_with('\n'));
        assert!(source.contains("INDEX_HTML"));
    }
});
