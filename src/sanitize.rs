use once_cell::sync::Lazy;
use regex::Regex;

static BUTTON_ELEMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<button\b[^>]*>.*?</button\s*>").unwrap());
static STRAY_BUTTON_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</?button\b[^>]*>").unwrap());

/// Strip interactive `<button>` elements (and whatever they wrap) from an upstream description.
/// Everything else is returned as-is.
pub fn sanitize_description(html: &str) -> String {
    let without_elements = BUTTON_ELEMENT.replace_all(html, "");
    STRAY_BUTTON_TAG.replace_all(&without_elements, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_buttons_with_content() {
        let html = r#"<p>Pantai Nirwana</p><button class="btn" onclick="x()">Pesan <b>now</b></button><p>end</p>"#;
        assert_eq!(sanitize_description(html), "<p>Pantai Nirwana</p><p>end</p>");
    }

    #[test]
    fn case_and_newlines() {
        let html = "a<BUTTON type=\"submit\">\nclick\n</Button >b";
        assert_eq!(sanitize_description(html), "ab");
    }

    #[test]
    fn stray_tags_are_dropped() {
        assert_eq!(sanitize_description("x<button>y"), "xy");
        assert_eq!(sanitize_description("<button><button>x</button></button>z"), "z");
    }

    #[test]
    fn other_markup_untouched() {
        let html = "<p><a href=\"/b\">buttons</a> <buttonish/></p>";
        assert_eq!(sanitize_description(html), html);
    }
}
