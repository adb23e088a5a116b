#![no_main]
use libfuzzer_sys::fuzz_target;
use tar_stream::{decode_buffer, DecodeMode, DecodeOptions};

fuzz_target!(|data: &[u8]| {
    let _ = decode_buffer(data, &DecodeOptions::default());

    let names_only = DecodeOptions {
        mode: DecodeMode::NamesOnly {
            patterns_exclude: true,
        },
        ..DecodeOptions::default()
    };
    let _ = decode_buffer(data, &names_only);
});
