//! Raw in-memory ustar archives for tests.

/// Build one 512-byte ustar header block.
///
/// Mode is 0644, uid/gid 01750, magic/version POSIX. The checksum field
/// is left blank; decoding does not verify it.
pub(crate) fn header_block(name: &str, size: u64, type_flag: u8) -> Vec<u8> {
    let mut block = vec![0u8; 512];
    let name_len = name.len().min(100);
    block[..name_len].copy_from_slice(&name.as_bytes()[..name_len]);
    block[100..108].copy_from_slice(b"0000644\0");
    block[108..116].copy_from_slice(b"0001750\0");
    block[116..124].copy_from_slice(b"0001750\0");
    let size_field = format!("{:011o}\0", size);
    block[124..136].copy_from_slice(size_field.as_bytes());
    block[136..148].copy_from_slice(b"00000000000\0");
    block[148..156].copy_from_slice(b"        ");
    block[156] = type_flag;
    block[257..263].copy_from_slice(b"ustar\0");
    block[263..265].copy_from_slice(b"00");
    block
}

/// Header plus zero-padded content for an arbitrary type flag.
pub(crate) fn special_entry(name: &str, type_flag: u8, content: &[u8]) -> Vec<u8> {
    let mut bytes = header_block(name, content.len() as u64, type_flag);
    bytes.extend_from_slice(content);
    let padded = content.len().div_ceil(512) * 512;
    bytes.resize(512 + padded, 0);
    bytes
}

/// A regular file entry.
pub(crate) fn file_entry(name: &str, content: &[u8]) -> Vec<u8> {
    special_entry(name, b'0', content)
}

/// Regular file entries followed by the two-block zero trailer.
pub(crate) fn archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for (name, content) in entries {
        bytes.extend_from_slice(&file_entry(name, content));
    }
    bytes.extend_from_slice(&[0u8; 1024]);
    bytes
}

/// One `<length> <key>=<value>\n` record; the length counts itself.
pub(crate) fn pax_record(key: &str, value: &str) -> Vec<u8> {
    let payload = key.len() + value.len() + 3;
    let mut len = payload + 1;
    loop {
        let candidate = payload + len.to_string().len();
        if candidate == len {
            break;
        }
        len = candidate;
    }
    format!("{} {}={}\n", len, key, value).into_bytes()
}

/// Concatenated records forming a PAX header's content.
pub(crate) fn pax_content(records: &[(&str, &str)]) -> Vec<u8> {
    records
        .iter()
        .flat_map(|(key, value)| pax_record(key, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pax_record_length_counts_itself() {
        assert_eq!(pax_record("path", "a.txt"), b"14 path=a.txt\n");
        // Crossing a digit-count boundary still converges.
        let record = pax_record("path", &"x".repeat(90));
        let text = String::from_utf8(record).unwrap();
        let declared: usize = text.split(' ').next().unwrap().parse().unwrap();
        assert_eq!(declared, text.len());
    }

    #[test]
    fn test_entry_layout() {
        let bytes = file_entry("f.bin", &[1u8; 513]);
        assert_eq!(bytes.len(), 512 + 1024);
        assert_eq!(bytes[156], b'0');
    }
}
