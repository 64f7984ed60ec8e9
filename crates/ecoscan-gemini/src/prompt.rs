// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The fixed instruction payload sent with every image.
//!
//! The category list in both the prose and the response schema is generated
//! from [`GarbageCategory`], so adding a variant updates the contract.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use ecoscan_core::types::{GarbageCategory, ImagePayload};
use strum::IntoEnumIterator;

use crate::types::{Content, GenerateContentRequest, GenerationConfig, Part};

/// Sampling temperature; classification should be deterministic.
const TEMPERATURE: f32 = 0.0;

/// What each category covers, as explained to the model.
fn category_guidance(category: GarbageCategory) -> &'static str {
    match category {
        GarbageCategory::Special => {
            "Electronic waste (phones, batteries, light bulbs), hazardous materials (chemicals, paint, medical waste)"
        }
        GarbageCategory::NonBiodegradable => {
            "Plastics (bottles, bags, wrappers), metals (cans, foil), glass (bottles, jars), rubber, styrofoam"
        }
        GarbageCategory::Biodegradable => {
            "Food waste, organic materials (leaves, grass), paper, cardboard, wood"
        }
        GarbageCategory::Residual => {
            "Mixed waste, soiled materials, ceramics, or items that don't clearly fit other categories"
        }
    }
}

fn category_names() -> Vec<String> {
    GarbageCategory::iter().map(|c| c.to_string()).collect()
}

/// System instruction constraining the model to the classification task.
pub fn system_instruction() -> String {
    let names = category_names();
    format!(
        "You are an expert waste classification system. Your sole purpose is to identify the \
         main object in an image and classify it into one of {} waste categories: {}. Provide a \
         JSON response based strictly on the provided schema without any extra explanation.",
        names.len(),
        names.join(", ")
    )
}

/// User-turn instruction accompanying the image.
pub fn task_instruction() -> String {
    let mut text = String::from(
        "Analyze the primary object in the foreground of this image, ignoring any background \
         clutter.\n\nIdentify and classify it into one of these waste categories:\n\n",
    );
    for (i, category) in GarbageCategory::iter().enumerate() {
        text.push_str(&format!(
            "{}. **{}** - {}\n",
            i + 1,
            category,
            category_guidance(category)
        ));
    }
    text.push_str("\nProvide the item name and its category.");
    text
}

/// JSON schema of the expected answer.
pub fn response_schema() -> serde_json::Value {
    let names = category_names();
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "itemName": {
                "type": "STRING",
                "description": "The name of the identified item (e.g., \"Plastic Water Bottle\", \"Banana Peel\", \"AA Battery\")."
            },
            "garbageType": {
                "type": "STRING",
                "enum": names,
                "description": format!("The waste category: {}.", names.join(", "))
            },
            "description": {
                "type": "STRING",
                "description": "Brief explanation of why it belongs to this category."
            }
        },
        "required": ["itemName", "garbageType"]
    })
}

/// Builds the classification request for one image.
pub fn classification_request(image: &ImagePayload) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![
                Part::inline_data(image.mime_type(), STANDARD.encode(image.data())),
                Part::text(task_instruction()),
            ],
        }],
        system_instruction: Some(Content {
            role: None,
            parts: vec![Part::text(system_instruction())],
        }),
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
            temperature: Some(TEMPERATURE),
        },
    }
}
