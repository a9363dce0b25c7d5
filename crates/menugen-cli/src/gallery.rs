use menugen_shared::MenuResult;
use std::fmt::Write;

pub const EMPTY_GALLERY: &str = "No dishes with generated images.";

/// Plain-text rendering of a gallery, one block per dish.
pub fn render_gallery(result: &MenuResult) -> String {
    if result.items.is_empty() {
        return EMPTY_GALLERY.to_string();
    }

    let mut out = String::new();
    for (i, item) in result.items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}. {}", i + 1, item.name);
        if !item.description.is_empty() {
            let _ = writeln!(out, "   {}", item.description);
        }
        let _ = writeln!(out, "   {}", item.image_url);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use menugen_shared::ProcessedMenuItem;

    fn item(name: &str, description: &str) -> ProcessedMenuItem {
        ProcessedMenuItem {
            name: name.to_string(),
            description: description.to_string(),
            image_url: format!("https://img/{}.png", name.to_lowercase()),
        }
    }

    #[test]
    fn test_empty_gallery() {
        assert_eq!(render_gallery(&MenuResult::default()), EMPTY_GALLERY);
    }

    #[test]
    fn test_numbered_entries() {
        let result = MenuResult {
            items: vec![item("Soup", "Hot soup"), item("Bread", "")],
        };

        assert_eq!(
            render_gallery(&result),
            "1. Soup\n   Hot soup\n   https://img/soup.png\n\n2. Bread\n   https://img/bread.png\n"
        );
    }
}
