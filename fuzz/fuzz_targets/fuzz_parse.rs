#![no_main]
use libfuzzer_sys::fuzz_target;
use tar_stream::parsing::{EntryHeaderParser, ExtendedHeaderParser};
use tar_stream::ByteCursor;

fuzz_target!(|data: &[u8]| {
    // Fuzz header block decoding, both with and without detail
    let mut cursor = ByteCursor::new(data);
    let _ = EntryHeaderParser::parse(&mut cursor, |_| false);
    let mut cursor = ByteCursor::new(data);
    let _ = EntryHeaderParser::parse(&mut cursor, |_| true);

    // Fuzz PAX record streams
    let _ = ExtendedHeaderParser::parse(data);
});
