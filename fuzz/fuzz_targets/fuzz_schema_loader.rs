#![no_main]

use libfuzzer_sys::fuzz_target;
use sceneschema::config::{SchemaLoader, SchemaSource};

fuzz_target!(|data: &[u8]| {
    // Only UTF-8 input reaches the YAML parser
    if let Ok(text) = std::str::from_utf8(data) {
        let loader = SchemaLoader::with_defaults();
        let source = SchemaSource::Text {
            origin: "<fuzz>".to_string(),
            text: text.to_string(),
        };

        // A loaded schema must answer lookups for every type it defines
        if let Ok(result) = loader.load(&source) {
            for item in result.schema.item_types() {
                let _ = result.schema.effective_defaults(&item.type_name);
                let _ = result.schema.edit_widgets(&item.type_name);
            }
        }
    }
});
