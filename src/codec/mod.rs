//! Choice codec for multi-valued answers.
//!
//! A multi-choice answer is stored in a single text column as the selected codes
//! joined by [`SEPARATOR`]. Codes are never escaped, so a code must not contain
//! the separator itself. The schema builder rejects such codes.

/// Separator placed between codes in the stored representation.
pub const SEPARATOR: char = ',';

/// Encodes and decodes sets of selected codes to and from their stored form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChoiceCodec;

impl ChoiceCodec {
    /// Join the selected codes in selection order. An empty selection encodes to `""`.
    pub fn encode<S: AsRef<str>>(codes: &[S]) -> String {
        let mut out = String::new();
        for (i, code) in codes.iter().enumerate() {
            if i > 0 {
                out.push(SEPARATOR);
            }
            out.push_str(code.as_ref());
        }
        out
    }

    /// Split a stored value back into its codes.
    ///
    /// The parts are returned verbatim, including codes that are no longer part of
    /// the slot's allowed set. `""` decodes to an empty list, not `[""]`.
    pub fn decode(stored: &str) -> Vec<String> {
        if stored.is_empty() {
            return Vec::new();
        }
        stored.split(SEPARATOR).map(str::to_string).collect()
    }

    /// Storage width that fits every code selected at once, separators included.
    pub fn storage_width<'a, I>(codes: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        codes.into_iter().map(str::len).sum::<usize>() * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(ChoiceCodec::encode(&empty), "");
    }

    #[test]
    fn test_decode_empty_is_empty_list() {
        assert!(ChoiceCodec::decode("").is_empty());
    }

    #[test]
    fn test_round_trip_keeps_selection_order() {
        let codes = vec!["W", "AA", "B"];
        let stored = ChoiceCodec::encode(&codes);
        assert_eq!(stored, "W,AA,B");
        assert_eq!(ChoiceCodec::decode(&stored), vec!["W", "AA", "B"]);
    }

    #[test]
    fn test_single_code() {
        assert_eq!(ChoiceCodec::encode(&["OTHER"]), "OTHER");
        assert_eq!(ChoiceCodec::decode("OTHER"), vec!["OTHER"]);
    }

    #[test]
    fn test_decode_keeps_unknown_parts() {
        assert_eq!(ChoiceCodec::decode("A,legacy,Z"), vec!["A", "legacy", "Z"]);
    }

    #[test]
    fn test_storage_width() {
        // AA + A + B + N + W + T = 7 chars, doubled
        let codes = ["AA", "A", "B", "N", "W", "T"];
        assert_eq!(ChoiceCodec::storage_width(codes), 14);

        let all_selected = ChoiceCodec::encode(&codes);
        assert!(all_selected.len() <= ChoiceCodec::storage_width(codes));
    }
}
