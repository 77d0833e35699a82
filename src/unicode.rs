/// Decode UTF-16 up to the first NUL. Unpaired surrogates become U+FFFD.
pub fn utf16_to_string(units: &[u16]) -> String {
    let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
    return String::from_utf16_lossy(&units[..end]);
}

/// `Length` is in bytes and excludes any terminator.
///
/// # Safety
/// `Buffer` must point to at least `Length` readable bytes.
#[cfg(windows)]
pub unsafe fn lsa_unicode_string_to_string(
    lus: &windows::Win32::Security::Authentication::Identity::LSA_UNICODE_STRING,
) -> String {
    if lus.Buffer.0.is_null() || lus.Length == 0 {
        return String::new();
    }

    let buf: &[u16] = unsafe {
        std::slice::from_raw_parts(lus.Buffer.0, lus.Length as usize / 2)
    };
    return utf16_to_string(buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_plain() {
        assert_eq!(utf16_to_string(&utf16("Administrator")), "Administrator");
        assert_eq!(utf16_to_string(&[]), "");
    }

    #[test]
    fn test_stops_at_nul() {
        let mut units = utf16("NT AUTHORITY");
        units.push(0);
        units.extend(utf16("garbage"));
        assert_eq!(utf16_to_string(&units), "NT AUTHORITY");
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(utf16_to_string(&utf16("Jürgen𝄞")), "Jürgen𝄞");
    }

    #[test]
    fn test_unpaired_surrogate_is_replaced() {
        let units = [0x0061, 0xd800, 0x0062];
        assert_eq!(utf16_to_string(&units), "a\u{fffd}b");
    }
}
