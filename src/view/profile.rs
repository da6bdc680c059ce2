use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};

use crate::core::config::Configurable;

const CARD_STYLE: &str = "border: 1px solid #ddd; border-radius: 8px; padding: 20px; \
max-width: 300px; text-align: center; box-shadow: 0 2px 5px rgba(0,0,0,0.1); \
font-family: Arial, sans-serif;";

const IMAGE_STYLE: &str = "width: 100px; height: 100px; border-radius: 50%; \
object-fit: cover; margin-bottom: 15px;";

/// Static profile card, read from the `[profile]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileCard {
    pub name: String,
    pub title: String,
    /// Image URL
    pub image: String,
    pub description: String,
}

impl Default for ProfileCard {
    fn default() -> Self {
        Self {
            name: "Anonymous".to_string(),
            title: "List keeper".to_string(),
            image: "https://via.placeholder.com/100".to_string(),
            description: "Keeps notes and to-dos.".to_string(),
        }
    }
}

impl Configurable for ProfileCard {
    const PREFIX: &'static str = "profile";
}

impl ProfileCard {
    pub fn render_html(&self) -> String {
        let name = encode_text(&self.name);
        let mut out = String::with_capacity(512);

        let _ = writeln!(out, r#"<div style="{CARD_STYLE}">"#);
        let _ = writeln!(
            out,
            r#"  <img src="{}" alt="{}'s profile" style="{IMAGE_STYLE}" />"#,
            encode_double_quoted_attribute(&self.image),
            encode_double_quoted_attribute(&self.name),
        );
        let _ = writeln!(out, "  <h2>{name}</h2>");
        let _ = writeln!(out, "  <h4>{}</h4>", encode_text(&self.title));
        let _ = writeln!(out, "  <p>{}</p>", encode_text(&self.description));
        out.push_str("</div>\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ConfigStore;

    #[test]
    fn renders_every_field() {
        let card = ProfileCard {
            name: "Ada".into(),
            title: "Engineer".into(),
            image: "https://example.com/ada.png".into(),
            description: "Writes programs.".into(),
        };
        let html = card.render_html();

        assert!(html.starts_with("<div style=\"border: 1px solid #ddd;"));
        assert!(html.contains(r#"src="https://example.com/ada.png""#));
        assert!(html.contains(r#"alt="Ada's profile""#));
        assert!(html.contains("<h2>Ada</h2>"));
        assert!(html.contains("<h4>Engineer</h4>"));
        assert!(html.contains("<p>Writes programs.</p>"));
        assert!(html.contains("border-radius: 50%"));
    }

    #[test]
    fn escapes_markup_in_fields() {
        let card = ProfileCard {
            name: "<script>".into(),
            image: "x\" onerror=\"alert(1)".into(),
            ..ProfileCard::default()
        };
        let html = card.render_html();

        assert!(!html.contains("<script>"));
        assert!(html.contains("<h2>&lt;script&gt;</h2>"));
        assert!(!html.contains("\" onerror=\""));
    }

    #[test]
    fn loads_from_profile_section() {
        let store = ConfigStore::parse(
            r#"
            [profile]
            name = "Grace"
            title = "Admiral"
        "#,
        )
        .unwrap();
        let card: ProfileCard = store.get().unwrap();
        assert_eq!(card.name, "Grace");
        assert_eq!(card.title, "Admiral");
        assert_eq!(card.image, ProfileCard::default().image);
    }
}
