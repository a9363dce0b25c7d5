//! Common types

use serde::{Deserialize, Deserializer, Serialize};

/// A dish as read off the menu by the vision model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    /// Missing and `null` both read as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A dish paired with its generated photo. `image_url` is empty when
/// generation failed for this item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedMenuItem {
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl ProcessedMenuItem {
    pub fn new(item: MenuItem, image_url: Option<String>) -> Self {
        Self {
            name: item.name,
            description: item.description,
            image_url: image_url.unwrap_or_default(),
        }
    }

    pub fn has_image(&self) -> bool {
        !self.image_url.trim().is_empty()
    }
}

/// Gallery returned by `POST /api/process-menu`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuResult {
    pub items: Vec<ProcessedMenuItem>,
}

impl MenuResult {
    /// Keep only the items that received an image.
    pub fn from_processed(items: Vec<ProcessedMenuItem>) -> Self {
        Self {
            items: items.into_iter().filter(ProcessedMenuItem::has_image).collect(),
        }
    }
}

/// Signed-in user as reported by `GET /api/auth/user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub username: String,
}

/// Flat error body produced by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processed(name: &str, url: &str) -> ProcessedMenuItem {
        ProcessedMenuItem {
            name: name.to_string(),
            description: String::new(),
            image_url: url.to_string(),
        }
    }

    #[test]
    fn test_from_processed_drops_items_without_image() {
        let result = MenuResult::from_processed(vec![
            processed("Soup", "https://img/soup.png"),
            processed("Salad", ""),
            processed("Pie", "https://img/pie.png"),
        ]);

        let names: Vec<_> = result.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Soup", "Pie"]);
    }

    #[test]
    fn test_menu_item_description_defaults_to_empty() {
        let item: MenuItem = serde_json::from_str(r#"{"name":"Bread"}"#).unwrap();
        assert_eq!(item.description, "");
    }

    #[test]
    fn test_menu_item_null_description_is_empty() {
        let item: MenuItem = serde_json::from_str(r#"{"name":"Soup","description":null}"#).unwrap();
        assert_eq!(item.description, "");
    }

    #[test]
    fn test_identity_skips_missing_optional_fields() {
        let identity = Identity {
            id: "42".to_string(),
            email: None,
            name: None,
            username: "42".to_string(),
        };
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "42", "username": "42" }));
    }
}
