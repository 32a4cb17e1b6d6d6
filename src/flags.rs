//! Typed flag bitset: named accessor methods over a packed `u8` instead of
//! raw magic-number bit twiddling at every call site.

use std::fmt;

const GLOBAL: u8 = 0x01;
const IGNORE_CASE: u8 = 0x02;
const MULTILINE: u8 = 0x04;
const DOT_ALL: u8 = 0x08;
const UNICODE: u8 = 0x10;
const STICKY: u8 = 0x20;

/// Parsed form of the flag string accepted by `Regex::new`. Unknown
/// characters are ignored; `u` and `y` are accepted and stored but never
/// consulted, kept only so callers that pass them don't get an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexFlags(u8);

impl RegexFlags {
    pub fn parse(spec: &str) -> Self {
        let mut bits = 0u8;
        for ch in spec.chars() {
            bits |= match ch {
                'g' => GLOBAL,
                'i' => IGNORE_CASE,
                'm' => MULTILINE,
                's' => DOT_ALL,
                'u' => UNICODE,
                'y' => STICKY,
                _ => 0,
            };
        }
        Self(bits)
    }

    pub fn global(self) -> bool {
        self.0 & GLOBAL != 0
    }

    pub fn ignore_case(self) -> bool {
        self.0 & IGNORE_CASE != 0
    }

    pub fn multiline(self) -> bool {
        self.0 & MULTILINE != 0
    }

    pub fn dot_all(self) -> bool {
        self.0 & DOT_ALL != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl fmt::Display for RegexFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        if self.global() {
            out.push('g');
        }
        if self.ignore_case() {
            out.push('i');
        }
        if self.multiline() {
            out.push('m');
        }
        if self.dot_all() {
            out.push('s');
        }
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_flags_are_ignored() {
        let flags = RegexFlags::parse("gzi");
        assert!(flags.global());
        assert!(flags.ignore_case());
        assert!(!flags.multiline());
    }

    #[test]
    fn round_trips_through_display() {
        let flags = RegexFlags::parse("gims");
        assert_eq!(flags.to_string(), "gims");
    }
}
