//! Prompt construction for the storefront's text-generation features.
//!
//! Each builder produces the message list and sampling parameters for
//! one endpoint. The wording is part of the product surface, so it
//! lives here rather than inline in the handlers.

use serde::{Deserialize, Serialize};

/// Chat participant role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single message in a chat-completion conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Messages plus sampling parameters, ready to send.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Product description: short persuasive copy for a listing page.
pub fn product_description(title: &str, category: &str, features: &str) -> Prompt {
    let category = if category.is_empty() { "general" } else { category };
    let features = if features.is_empty() { "not specified" } else { features };
    let request = format!(
        "Generate a compelling product description for an e-commerce website.\n\
         Product: {title}\n\
         Category: {category}\n\
         Key Features: {features}\n\
         \n\
         Requirements:\n\
         - 2-3 sentences maximum\n\
         - Highlight key benefits\n\
         - Use persuasive language\n\
         - Include relevant keywords\n\
         - Make it SEO-friendly\n\
         - Professional tone"
    );
    Prompt {
        messages: vec![
            ChatMessage::system(
                "You are an expert e-commerce copywriter who creates compelling \
                 product descriptions that drive sales.",
            ),
            ChatMessage::user(request),
        ],
        max_tokens: 200,
        temperature: 0.7,
    }
}

/// Shopping assistant chat, with prior conversation threaded through.
pub fn shopping_chat(message: &str, history: &[ChatMessage]) -> Prompt {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(
        "You are a helpful shopping assistant for an e-commerce website called \
         SmartCart. You can help customers with:\n\
         - Product recommendations\n\
         - Shopping advice\n\
         - General questions about products\n\
         - Order status inquiries\n\
         - Return and refund policies\n\
         \n\
         Be friendly, helpful, and concise. If you don't know something specific \
         about our inventory, suggest they browse our product categories or \
         contact support.",
    ));
    messages.extend(history.iter().cloned());
    messages.push(ChatMessage::user(message));
    Prompt {
        messages,
        max_tokens: 300,
        temperature: 0.7,
    }
}

/// Personalized product recommendations.
pub fn recommendations(preferences: &str, purchase_history: &str) -> Prompt {
    let preferences = if preferences.is_empty() { "Not specified" } else { preferences };
    let purchase_history = if purchase_history.is_empty() {
        "No previous purchases"
    } else {
        purchase_history
    };
    let request = format!(
        "Based on the following user data, generate 5 personalized product \
         recommendations:\n\
         \n\
         User Preferences: {preferences}\n\
         Purchase History: {purchase_history}\n\
         \n\
         Generate recommendations that are:\n\
         - Relevant to their interests\n\
         - Varied across different categories\n\
         - Include both popular and unique items\n\
         - Consider seasonal trends\n\
         - Include price range variety\n\
         \n\
         Format as a JSON array with product suggestions including category and \
         reasoning."
    );
    Prompt {
        messages: vec![
            ChatMessage::system(
                "You are an expert product recommendation engine for e-commerce.",
            ),
            ChatMessage::user(request),
        ],
        max_tokens: 500,
        temperature: 0.8,
    }
}

/// SEO page content for a product.
pub fn seo_content(product_name: &str, category: &str, keywords: &str) -> Prompt {
    let keywords = if keywords.is_empty() { "not specified" } else { keywords };
    let request = format!(
        "Generate SEO-optimized content for an e-commerce product page:\n\
         \n\
         Product: {product_name}\n\
         Category: {category}\n\
         Target Keywords: {keywords}\n\
         \n\
         Generate:\n\
         1. Meta title (50-60 characters)\n\
         2. Meta description (150-160 characters)\n\
         3. H1 tag\n\
         4. 3-5 bullet points for key features\n\
         5. 2-3 FAQ questions and answers\n\
         \n\
         Make it SEO-friendly and conversion-focused."
    );
    Prompt {
        messages: vec![
            ChatMessage::system(
                "You are an expert SEO content writer for e-commerce websites.",
            ),
            ChatMessage::user(request),
        ],
        max_tokens: 600,
        temperature: 0.7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_prompt_fills_defaults() {
        let prompt = product_description("Wireless Mouse", "", "");
        assert_eq!(prompt.max_tokens, 200);
        assert_eq!(prompt.messages.len(), 2);
        assert!(prompt.messages[1].content.contains("Category: general"));
        assert!(prompt.messages[1].content.contains("Key Features: not specified"));
    }

    #[test]
    fn test_chat_prompt_threads_history() {
        let history = vec![
            ChatMessage::user("Do you sell headphones?"),
            ChatMessage {
                role: ChatRole::Assistant,
                content: "Yes, in our electronics category.".to_string(),
            },
        ];
        let prompt = shopping_chat("What about wireless ones?", &history);
        assert_eq!(prompt.messages.len(), 4);
        assert_eq!(prompt.messages[0].role, ChatRole::System);
        assert_eq!(prompt.messages[3].content, "What about wireless ones?");
    }

    #[test]
    fn test_recommendations_uses_higher_temperature() {
        let prompt = recommendations("hiking gear", "");
        assert_eq!(prompt.temperature, 0.8);
        assert!(prompt.messages[1].content.contains("hiking gear"));
        assert!(prompt.messages[1].content.contains("No previous purchases"));
    }

    #[test]
    fn test_seo_prompt_parameters() {
        let prompt = seo_content("Trail Runner", "sports", "running shoes");
        assert_eq!(prompt.max_tokens, 600);
        assert!(prompt.messages[1].content.contains("Target Keywords: running shoes"));
    }
}
