use futures::future::join_all;
use menugen_shared::{MenuItem, MenuResult, ProcessedMenuItem};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::models::MenuImage;
use crate::utils::error::ApiError;

pub const MENU_ANALYSIS_PROMPT: &str = "Analyze this menu image and extract all the food items. \
For each item, provide the name and a brief description. Return the response as a JSON array \
with objects containing 'name' and 'description' fields. Focus only on food items, ignore drinks, \
prices, and other non-food content.";

/// First `[` through last `]`, across lines.
static JSON_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("static regex"));

/// The two model calls the pipeline depends on.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MenuModels: Send + Sync {
    /// Raw text answer of the vision model for `prompt` over `image`.
    async fn read_menu(&self, image: &MenuImage, prompt: &str) -> Result<String, ApiError>;

    /// URL of one generated image, `None` when the provider returned none.
    async fn render_dish(&self, prompt: &str) -> Result<Option<String>, ApiError>;
}

pub struct MenuService {
    models: Box<dyn MenuModels>,
}

impl MenuService {
    pub fn new(models: Box<dyn MenuModels>) -> Self {
        Self { models }
    }

    /// Extract, render, then keep only the dishes that got an image.
    pub async fn process(&self, image: &MenuImage) -> Result<MenuResult, ApiError> {
        let items = self.extract_items(image).await?;
        let extracted = items.len();
        info!("Extracted {} menu items", extracted);

        let processed = self.render_items(items).await;
        let result = MenuResult::from_processed(processed);

        info!("Rendered {}/{} menu items", result.items.len(), extracted);
        Ok(result)
    }

    pub async fn extract_items(&self, image: &MenuImage) -> Result<Vec<MenuItem>, ApiError> {
        debug!(
            "Sending {} byte {} image to vision model",
            image.bytes.len(),
            image.content_type
        );
        let text = self.models.read_menu(image, MENU_ANALYSIS_PROMPT).await?;
        parse_menu_items(&text)
    }

    /// One generation call per item, all in flight at once. Output order
    /// follows input order.
    pub async fn render_items(&self, items: Vec<MenuItem>) -> Vec<ProcessedMenuItem> {
        join_all(items.into_iter().map(|item| self.render_item(item))).await
    }

    async fn render_item(&self, item: MenuItem) -> ProcessedMenuItem {
        let prompt = dish_prompt(&item);
        match self.models.render_dish(&prompt).await {
            Ok(url) => ProcessedMenuItem::new(item, url),
            Err(e) => {
                warn!("Error generating image for {}: {}", item.name, e);
                ProcessedMenuItem::new(item, None)
            }
        }
    }
}

/// Treats the model output as untrusted text: only the bracketed array is
/// considered, anything around it is ignored.
pub fn parse_menu_items(text: &str) -> Result<Vec<MenuItem>, ApiError> {
    let text = if text.trim().is_empty() { "[]" } else { text };

    let json = JSON_ARRAY
        .find(text)
        .ok_or_else(|| ApiError::MenuParse("No valid JSON found in response".to_string()))?;

    serde_json::from_str(json.as_str()).map_err(|e| ApiError::MenuParse(e.to_string()))
}

pub fn dish_prompt(item: &MenuItem) -> String {
    format!(
        "Create a stunning, professional food photography image of {}. {}. \
The image should be high-quality, well-lit, appetizing, and suitable for a restaurant menu. \
Focus on making the dish look delicious and visually appealing with proper plating and garnishing.",
        item.name, item.description
    )
}
