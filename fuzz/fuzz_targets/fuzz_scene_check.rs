#![no_main]

use std::sync::{Arc, OnceLock};

use libfuzzer_sys::fuzz_target;
use sceneschema::config::{Schema, SchemaLoader};

static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let schema = SCHEMA.get_or_init(|| {
        SchemaLoader::with_defaults()
            .load_builtin()
            .expect("builtin schema loads")
            .schema
    });

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(doc) = serde_yaml::from_str::<serde_yaml::Value>(text) {
            let _ = schema.check_scene(&doc);
        }
    }
});
