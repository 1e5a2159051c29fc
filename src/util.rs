// Number parsing shared by the polynomial grammar and calculator commands.
// Unlike `str::parse`, an explicit '+' sign is rejected.

pub(crate) fn parse_signed(s: &str) -> Option<i64> {
    match s.as_bytes().first() {
        Some(b'0'..=b'9' | b'-') => s.parse().ok(),
        _ => None,
    }
}

pub(crate) fn parse_unsigned(s: &str) -> Option<u64> {
    match s.as_bytes().first() {
        Some(b'0'..=b'9') => s.parse().ok(),
        _ => None,
    }
}

// whitespace as understood by C's `isspace`
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}
