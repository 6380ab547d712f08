use jobdesk_client::{decode_text, DecodeError};

#[test]
fn bom_wins_over_declared_charset() {
    let bytes = [0xEF, 0xBB, 0xBF, b'h', b'i'];
    let decoded = decode_text(&bytes, Some("text/plain; charset=windows-1252")).unwrap();
    assert_eq!(decoded.text, "hi");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn declared_charset_is_used_case_insensitively() {
    let decoded = decode_text(&[0xE9], Some("text/plain; Charset=\"ISO-8859-1\"")).unwrap();
    assert_eq!(decoded.text, "é");
    assert_eq!(decoded.encoding_label, "windows-1252");
}

#[test]
fn undeclared_utf8_is_detected() {
    let decoded = decode_text("naïve façade".as_bytes(), None).unwrap();
    assert_eq!(decoded.text, "naïve façade");
}

#[test]
fn empty_content_decodes_to_empty_text() {
    let decoded = decode_text(b"", Some("text/plain")).unwrap();
    assert_eq!(decoded.text, "");
}

#[test]
fn invalid_bytes_for_declared_charset_fail() {
    let err = decode_text(&[b'a', 0xC3], Some("text/plain; charset=utf-8")).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Malformed {
            encoding: "UTF-8".to_string()
        }
    );
}
