//! Splits stored page bodies into their ingredients and instructions sections.
//!
//! A stored page looks like:
//!
//! ```text
//! <!-- Ingredients -->
//! ...
//! <!-- Instructions -->
//! ...
//! ```

pub const INGREDIENTS_MARKER: &str = "<!-- Ingredients -->";
pub const INSTRUCTIONS_MARKER: &str = "<!-- Instructions -->";

/// A stored page that does not follow the sectioned layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeError {
    ContentBeforeSection { line_number: usize, line: String },
}

impl std::fmt::Display for RecipeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeError::ContentBeforeSection { line_number, line } => write!(
                f,
                "line {} appears before any section marker: {:?}",
                line_number, line
            ),
        }
    }
}

impl std::error::Error for RecipeError {}

#[derive(Clone, Copy)]
enum Section {
    Ingredients,
    Instructions,
}

/// Parse stored content into `(ingredients, instructions)`.
///
/// Every non-marker line is appended with a trailing newline to the section
/// opened by the most recent marker.
pub fn parse(content: &str) -> Result<(String, String), RecipeError> {
    let mut ingredients = String::new();
    let mut instructions = String::new();
    let mut current: Option<Section> = None;

    for (idx, line) in content.lines().enumerate() {
        match line {
            INGREDIENTS_MARKER => current = Some(Section::Ingredients),
            INSTRUCTIONS_MARKER => current = Some(Section::Instructions),
            _ => {
                let target = match current {
                    Some(Section::Ingredients) => &mut ingredients,
                    Some(Section::Instructions) => &mut instructions,
                    None => {
                        return Err(RecipeError::ContentBeforeSection {
                            line_number: idx + 1,
                            line: line.to_string(),
                        });
                    }
                };
                target.push_str(line);
                target.push('\n');
            }
        }
    }

    Ok((ingredients, instructions))
}

/// Serialize both sections into the on-disk layout understood by [`parse`].
pub fn serialize(ingredients: &str, instructions: &str) -> String {
    let mut out = String::with_capacity(
        INGREDIENTS_MARKER.len() + INSTRUCTIONS_MARKER.len() + ingredients.len() + instructions.len() + 4,
    );
    out.push_str(INGREDIENTS_MARKER);
    out.push('\n');
    push_section(&mut out, ingredients);
    out.push_str(INSTRUCTIONS_MARKER);
    out.push('\n');
    push_section(&mut out, instructions);
    out
}

fn push_section(out: &mut String, text: &str) {
    out.push_str(text);
    if !text.is_empty() && !text.ends_with('\n') {
        out.push('\n');
    }
}

/// Normalize section text submitted from a form: LF line endings and a
/// trailing newline on non-empty text.
pub fn normalize_section(text: &str) -> String {
    let mut out = text.replace("\r\n", "\n");
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_sections() {
        let content = "<!-- Ingredients -->\nSalt\n<!-- Instructions -->\nMix.\n";
        let (ingredients, instructions) = parse(content).unwrap();
        assert_eq!(ingredients, "Salt\n");
        assert_eq!(instructions, "Mix.\n");
    }

    #[test]
    fn empty_sections_are_legal() {
        let (ingredients, instructions) =
            parse("<!-- Ingredients -->\n<!-- Instructions -->\n").unwrap();
        assert!(ingredients.is_empty());
        assert!(instructions.is_empty());

        assert_eq!(parse("").unwrap(), (String::new(), String::new()));
    }

    #[test]
    fn markers_may_repeat_and_switch_back() {
        let content = "<!-- Ingredients -->\na\n<!-- Instructions -->\nb\n<!-- Ingredients -->\nc\n";
        let (ingredients, instructions) = parse(content).unwrap();
        assert_eq!(ingredients, "a\nc\n");
        assert_eq!(instructions, "b\n");
    }

    #[test]
    fn crlf_content_is_understood() {
        let content = "<!-- Ingredients -->\r\nFlour\r\n<!-- Instructions -->\r\nBake\r\n";
        let (ingredients, instructions) = parse(content).unwrap();
        assert_eq!(ingredients, "Flour\n");
        assert_eq!(instructions, "Bake\n");
    }

    #[test]
    fn content_before_any_marker_is_an_error() {
        let err = parse("stray\n<!-- Ingredients -->\nSalt\n").unwrap_err();
        assert_eq!(
            err,
            RecipeError::ContentBeforeSection { line_number: 1, line: "stray".to_string() }
        );
    }

    #[test]
    fn serialized_sections_parse_back_unchanged() {
        let cases = [
            ("", ""),
            ("Salt\n", "Mix.\n"),
            ("- 2 cups flour\n- 1 egg\n\n", "1. Whisk\n\n2. Bake at 180C\n"),
            ("", "Only steps\n"),
        ];
        for (ingredients, instructions) in cases {
            let stored = serialize(ingredients, instructions);
            assert_eq!(
                parse(&stored).unwrap(),
                (ingredients.to_string(), instructions.to_string()),
                "stored form: {:?}",
                stored
            );
        }
    }

    #[test]
    fn serialize_terminates_unterminated_sections() {
        assert_eq!(
            serialize("Salt", "Mix."),
            "<!-- Ingredients -->\nSalt\n<!-- Instructions -->\nMix.\n"
        );
    }

    #[test]
    fn normalize_section_fixes_form_input() {
        assert_eq!(normalize_section("a\r\nb"), "a\nb\n");
        assert_eq!(normalize_section(""), "");
        assert_eq!(normalize_section("done\n"), "done\n");
    }
}
