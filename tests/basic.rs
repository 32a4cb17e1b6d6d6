use bytereg::Regex;

#[test]
fn matches_literal_substring() {
    let mut re = Regex::new("hello", "").unwrap();
    assert!(re.test(b"say hello there"));
    assert!(!re.test(b"say goodbye"));
}

#[test]
fn dot_matches_any_byte_except_newline() {
    let mut re = Regex::new("h.llo", "").unwrap();
    assert!(re.test(b"hello"));
    assert!(re.test(b"hallo"));
    assert!(!re.test(b"hllo"));
    assert!(!re.test(b"h\nllo"));
}

#[test]
fn dot_all_flag_lets_dot_cross_newlines() {
    let mut re = Regex::new("h.llo", "s").unwrap();
    assert!(re.test(b"h\nllo"));
}

#[test]
fn exec_reports_match_position_and_text() {
    let mut re = Regex::new("world", "").unwrap();
    let text = b"hello world";
    let m = re.exec(text).unwrap();
    assert_eq!(m.index, 6);
    assert_eq!(m.full_match(text), b"world");
}

#[test]
fn empty_pattern_matches_empty_string_at_zero() {
    let mut re = Regex::new("", "").unwrap();
    let m = re.exec(b"").unwrap();
    assert_eq!(m.index, 0);
    assert_eq!(m.full_match(b""), b"");
}

#[test]
fn empty_pattern_matches_every_text_at_zero() {
    let mut re = Regex::new("", "").unwrap();
    let m = re.exec(b"anything").unwrap();
    assert_eq!(m.index, 0);
}
