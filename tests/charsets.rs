use bytereg::Regex;

#[test]
fn bracket_expression_matches_listed_bytes() {
    let mut re = Regex::new("[abc]", "").unwrap();
    assert!(re.test(b"c"));
    assert!(!re.test(b"d"));
}

#[test]
fn bracket_range_is_inclusive() {
    let mut re = Regex::new("[a-c]", "").unwrap();
    assert!(re.test(b"a"));
    assert!(re.test(b"b"));
    assert!(re.test(b"c"));
    assert!(!re.test(b"d"));
}

#[test]
fn negated_bracket_excludes_listed_bytes() {
    let mut re = Regex::new("[^a-c]", "").unwrap();
    assert!(!re.test(b"b"));
    assert!(re.test(b"z"));
}

#[test]
fn leading_close_bracket_is_a_literal_member() {
    let mut re = Regex::new("[]a]", "").unwrap();
    assert!(re.test(b"]"));
    assert!(re.test(b"a"));
    assert!(!re.test(b"b"));
}

#[test]
fn shorthand_digit_word_and_space_classes() {
    assert!(Regex::new(r"\d", "").unwrap().test(b"5"));
    assert!(!Regex::new(r"\d", "").unwrap().test(b"x"));
    assert!(Regex::new(r"\w", "").unwrap().test(b"_"));
    assert!(Regex::new(r"\s", "").unwrap().test(b"\t"));
}

#[test]
fn shorthand_complements_invert_membership() {
    assert!(Regex::new(r"\D", "").unwrap().test(b"x"));
    assert!(!Regex::new(r"\D", "").unwrap().test(b"5"));
    assert!(Regex::new(r"\W", "").unwrap().test(b"!"));
    assert!(Regex::new(r"\S", "").unwrap().test(b"x"));
}

#[test]
fn bracket_body_mixes_literals_ranges_and_shorthand_escapes() {
    let mut re = Regex::new(r"[a-z\d_]+", "").unwrap();
    let text = b"snake_case_42!";
    let m = re.exec(text).unwrap();
    assert_eq!(m.full_match(text), b"snake_case_42");
}

#[test]
fn case_insensitive_flag_applies_to_bracket_members() {
    let mut re = Regex::new("[a-c]", "i").unwrap();
    assert!(re.test(b"B"));
}
