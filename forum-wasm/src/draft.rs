use serde::{Deserialize, Serialize};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all the required fields.";
pub const CODE_ADVISORY_MESSAGE: &str = "Please write the code in HTML.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    #[default]
    Question,
    Article,
}

impl PostType {
    pub fn label(self) -> &'static str {
        match self {
            PostType::Question => "Question",
            PostType::Article => "Article",
        }
    }
}

/// The post being edited. Lives only in browser memory; it is rebuilt from
/// the form's signals at submit time and thrown away afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    pub tags: String,
    pub abstract_text: String,
    pub img_url: String,
    pub code: String,
}

impl Draft {
    /// Required fields: title and content always; tags for questions,
    /// abstract for articles. Exactly one of the tags/abstract requirements
    /// is active at a time. The image URL and code snippet are never
    /// required.
    pub fn validate(&self) -> Result<(), String> {
        let missing = self.title.trim().is_empty()
            || self.content.trim().is_empty()
            || (self.post_type == PostType::Question && self.tags.trim().is_empty())
            || (self.post_type == PostType::Article && self.abstract_text.trim().is_empty());

        if missing {
            return Err(REQUIRED_FIELDS_MESSAGE.to_string());
        }
        Ok(())
    }
}

/// Storage key for an upload: upload-time milliseconds concatenated with
/// the original filename. Practically unique per upload, not
/// collision-proof.
pub fn storage_key(uploaded_at_ms: i64, filename: &str) -> String {
    format!("{}{}", uploaded_at_ms, filename)
}

/// Advisory check on the code snippet: warn unless the text carries an HTML
/// root element or a doctype declaration. Never blocks submission.
pub fn code_advisory(code: &str) -> Option<&'static str> {
    if code.contains("<html") || code.contains("<!DOCTYPE html") {
        None
    } else {
        Some(CODE_ADVISORY_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Draft {
        Draft {
            post_type: PostType::Question,
            title: "How to center a div".into(),
            content: "Using flex".into(),
            tags: "css,flexbox".into(),
            ..Draft::default()
        }
    }

    #[test]
    fn complete_question_passes_validation() {
        assert!(question().validate().is_ok());
    }

    #[test]
    fn question_with_empty_tags_fails_with_message() {
        let mut draft = question();
        draft.tags.clear();
        assert_eq!(draft.validate(), Err(REQUIRED_FIELDS_MESSAGE.to_string()));
    }

    #[test]
    fn article_with_empty_abstract_fails() {
        let draft = Draft {
            post_type: PostType::Article,
            title: "Centering in 2024".into(),
            content: "Long form text".into(),
            ..Draft::default()
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn switching_post_type_swaps_the_active_requirement() {
        // Valid as a question; the same fields as an article lack an
        // abstract, while the title survives the switch untouched.
        let mut draft = question();
        assert!(draft.validate().is_ok());

        draft.post_type = PostType::Article;
        assert!(draft.validate().is_err());
        assert_eq!(draft.title, "How to center a div");

        draft.abstract_text = "A short overview".into();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn image_and_code_are_never_required() {
        let draft = question();
        assert!(draft.img_url.is_empty() && draft.code.is_empty());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn storage_key_ends_with_the_original_filename() {
        let key = storage_key(1_700_000_000_000, "cat.png");
        assert_eq!(key, "1700000000000cat.png");
        assert!(key.ends_with("cat.png"));
    }

    #[test]
    fn fragment_without_html_markers_gets_the_advisory() {
        assert_eq!(code_advisory("<div>hi</div>"), Some(CODE_ADVISORY_MESSAGE));
    }

    #[test]
    fn document_with_markers_clears_the_advisory() {
        assert_eq!(code_advisory("<!DOCTYPE html><html></html>"), None);
        assert_eq!(code_advisory("<html lang=\"en\">"), None);
    }
}
