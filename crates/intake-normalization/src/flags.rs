/// Coerces spreadsheet truthy encodings to a boolean.
///
/// Accepts `TRUE/FALSE`, `1/0`, `YES/NO` (plus `T/F`, `Y/N`, `1.0/0.0`)
/// case-insensitively. Anything else is `false`.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_uppercase().as_str(),
        "TRUE" | "T" | "1" | "1.0" | "YES" | "Y"
    )
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn truthy_encodings() {
        for value in ["TRUE", "true", " True ", "1", "yes", "Y", "1.0"] {
            assert!(parse_flag(value), "{value:?}");
        }
    }

    #[test]
    fn everything_else_is_false() {
        for value in ["FALSE", "0", "no", "", "nan", "maybe", "2"] {
            assert!(!parse_flag(value), "{value:?}");
        }
    }
}
