//! Decoding of the host's `argc`/`argv` pair.

use std::ffi::{CStr, c_char, c_int};

/// Copy the module arguments into owned strings.
///
/// Null entries are skipped and invalid UTF-8 is decoded lossily, so such a
/// token is reported as unknown rather than matched.
///
/// # Safety
///
/// `argv` must be null or point to at least `argc` entries, each null or a
/// valid NUL-terminated string that outlives this call.
pub unsafe fn decode_args(argc: c_int, argv: *const *const c_char) -> Vec<String> {
    let Ok(count) = usize::try_from(argc) else {
        return Vec::new();
    };
    if argv.is_null() {
        return Vec::new();
    }

    (0..count)
        .filter_map(|i| {
            // SAFETY: `i < argc` and the caller guarantees `argc` readable entries.
            let ptr = unsafe { *argv.add(i) };
            if ptr.is_null() {
                return None;
            }
            // SAFETY: non-null entries are NUL-terminated strings per the contract.
            let arg = unsafe { CStr::from_ptr(ptr) };
            Some(arg.to_string_lossy().into_owned())
        })
        .collect()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, std::ffi::CString};

    fn decode(args: &[Option<&CString>]) -> Vec<String> {
        let ptrs: Vec<*const c_char> = args
            .iter()
            .map(|a| a.map_or(std::ptr::null(), |s| s.as_ptr()))
            .collect();
        let argc = c_int::try_from(ptrs.len()).unwrap();
        // SAFETY: `ptrs` holds `argc` entries backed by live CStrings or null.
        unsafe { decode_args(argc, ptrs.as_ptr()) }
    }

    #[test]
    fn decodes_in_order() {
        let quiet = CString::new("quiet").unwrap();
        let over = CString::new("override").unwrap();
        assert_eq!(decode(&[Some(&quiet), Some(&over)]), vec!["quiet", "override"]);
    }

    #[test]
    fn skips_null_entries() {
        let quiet = CString::new("quiet").unwrap();
        assert_eq!(decode(&[None, Some(&quiet), None]), vec!["quiet"]);
    }

    #[test]
    fn invalid_utf8_is_lossy() {
        let raw = CString::new(vec![b'q', 0xff, b't']).unwrap();
        assert_eq!(decode(&[Some(&raw)]), vec!["q\u{FFFD}t"]);
    }

    #[test]
    fn null_or_negative_input_is_empty() {
        // SAFETY: a null argv is never dereferenced.
        assert!(unsafe { decode_args(3, std::ptr::null()) }.is_empty());
        let quiet = CString::new("quiet").unwrap();
        let ptrs = [quiet.as_ptr()];
        // SAFETY: negative argc reads nothing.
        assert!(unsafe { decode_args(-1, ptrs.as_ptr()) }.is_empty());
        // SAFETY: zero argc reads nothing.
        assert!(unsafe { decode_args(0, ptrs.as_ptr()) }.is_empty());
    }
}
