use blog_errors::FieldErrors;

const MAX_TAGS: usize = 10;
const MAX_TAG_LENGTH: usize = 32;
const MAX_FILE_NAME_LENGTH: usize = 128;

pub struct InputSanitizer;

impl InputSanitizer {
    /// Records `message` under `field` when `value` is blank.
    pub fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            errors.add(field, message);
        }
    }

    /// Like [`InputSanitizer::require`], for fields that may be left out.
    pub fn require_if_present(
        errors: &mut FieldErrors,
        field: &str,
        value: Option<&str>,
        message: &str,
    ) {
        if let Some(value) = value {
            Self::require(errors, field, value, message);
        }
    }

    /// Trims, lowercases and dedups tag names, dropping blanks and
    /// truncating overlong ones. Keeps at most ten, first come first kept.
    pub fn normalize_tags(tags: &[String]) -> Vec<String> {
        let mut normalized: Vec<String> = Vec::new();
        for tag in tags {
            let tag: String = tag.trim().to_lowercase().chars().take(MAX_TAG_LENGTH).collect();
            if tag.is_empty() || normalized.contains(&tag) {
                continue;
            }
            normalized.push(tag);
            if normalized.len() == MAX_TAGS {
                break;
            }
        }
        normalized
    }

    /// Reduces a client-supplied upload name to a safe final path component.
    /// Returns `None` when nothing usable is left.
    pub fn sanitize_file_name(name: &str) -> Option<String> {
        let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
        let cleaned: String = base
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            .take(MAX_FILE_NAME_LENGTH)
            .collect();
        let cleaned = cleaned.trim_start_matches('.').to_string();

        if cleaned.is_empty() {
            tracing::warn!("Rejected upload file name: {:?}", name);
            None
        } else {
            Some(cleaned)
        }
    }
}
