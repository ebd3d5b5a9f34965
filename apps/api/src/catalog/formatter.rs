//! Formats catalog products into the textual context block appended to
//! image-generation prompts, plus the reference-image extraction that rides
//! along with it.

use serde::Serialize;

use crate::catalog::item::{CatalogItem, ProductType};

/// Section order is fixed so the rendered block is deterministic.
const SECTION_ORDER: [(ProductType, &str); 7] = [
    (ProductType::Desk, "**BUREAUX DISPONIBLES:**"),
    (ProductType::Chair, "**CHAISES DISPONIBLES:**"),
    (ProductType::MeetingTable, "**TABLES DE RÉUNION DISPONIBLES:**"),
    (ProductType::Storage, "**RANGEMENTS DISPONIBLES:**"),
    (ProductType::Lighting, "**ÉCLAIRAGE DISPONIBLE:**"),
    (ProductType::Decoration, "**DÉCORATION DISPONIBLE:**"),
    (ProductType::Other, "**AUTRES PRODUITS:**"),
];

/// Catalog context bundle sent alongside the base prompt: the textual block,
/// the product reference-image URLs, and the product count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogContext {
    pub text: String,
    pub images: Vec<String>,
    pub total_products: usize,
}

/// Renders the catalog as a grouped product list with the closing
/// exact-names instruction. Empty catalog renders as an empty string.
pub fn format_catalog_for_prompt(products: &[CatalogItem]) -> String {
    if products.is_empty() {
        return String::new();
    }

    let mut sections: Vec<String> = Vec::new();
    for (product_type, title) in SECTION_ORDER {
        let group: Vec<&CatalogItem> = products
            .iter()
            .filter(|p| p.product_type == product_type)
            .collect();
        if group.is_empty() {
            continue;
        }
        sections.push(format!("\n{title}"));
        for product in group {
            sections.push(format!(
                "- {} ({}€): {}",
                product.name, product.price, product.description
            ));
        }
    }

    let header = "\n\n--- CATALOGUE DE PRODUITS DISPONIBLES ---";
    let instruction = "\n\n**IMPORTANT:** Utilisez UNIQUEMENT les produits listés ci-dessus pour l'aménagement. Respectez les noms exacts et les descriptions.\n";

    format!("{header}{}{instruction}", sections.join("\n"))
}

/// Reference-image URLs for the products that carry one.
pub fn catalog_images(products: &[CatalogItem]) -> Vec<String> {
    products
        .iter()
        .filter_map(|p| p.image_url.clone())
        .collect()
}

pub fn catalog_context(products: &[CatalogItem]) -> CatalogContext {
    CatalogContext {
        text: format_catalog_for_prompt(products),
        images: catalog_images(products),
        total_products: products.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn item(name: &str, product_type: ProductType, price: f64, image: Option<&str>) -> CatalogItem {
        CatalogItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: format!("Description {name}"),
            product_type,
            price,
            image_url: image.map(str::to_string),
            dimensions: None,
            brand: None,
            material: None,
            color: None,
        }
    }

    #[test]
    fn test_empty_catalog_renders_empty_string() {
        assert_eq!(format_catalog_for_prompt(&[]), "");
    }

    #[test]
    fn test_sections_follow_fixed_order() {
        let products = vec![
            item("Lampe", ProductType::Lighting, 45.0, None),
            item("Bureau", ProductType::Desk, 200.0, None),
            item("Chaise", ProductType::Chair, 150.0, None),
        ];
        let text = format_catalog_for_prompt(&products);
        let desk_pos = text.find("BUREAUX DISPONIBLES").unwrap();
        let chair_pos = text.find("CHAISES DISPONIBLES").unwrap();
        let lighting_pos = text.find("ÉCLAIRAGE DISPONIBLE").unwrap();
        assert!(desk_pos < chair_pos && chair_pos < lighting_pos);
    }

    #[test]
    fn test_absent_categories_render_no_section() {
        let products = vec![item("Bureau", ProductType::Desk, 200.0, None)];
        let text = format_catalog_for_prompt(&products);
        assert!(text.contains("BUREAUX DISPONIBLES"));
        assert!(!text.contains("CHAISES DISPONIBLES"));
        assert!(!text.contains("AUTRES PRODUITS"));
    }

    #[test]
    fn test_lines_carry_name_price_description() {
        let products = vec![item("Bureau Compact", ProductType::Desk, 249.5, None)];
        let text = format_catalog_for_prompt(&products);
        assert!(text.contains("- Bureau Compact (249.5€): Description Bureau Compact"));
    }

    #[test]
    fn test_instruction_block_closes_the_context() {
        let products = vec![item("Bureau", ProductType::Desk, 200.0, None)];
        let text = format_catalog_for_prompt(&products);
        assert!(text.trim_end().ends_with("Respectez les noms exacts et les descriptions."));
    }

    #[test]
    fn test_catalog_context_collects_images_and_count() {
        let products = vec![
            item("Bureau", ProductType::Desk, 200.0, Some("https://example.com/d.jpg")),
            item("Chaise", ProductType::Chair, 150.0, None),
        ];
        let context = catalog_context(&products);
        assert_eq!(context.total_products, 2);
        assert_eq!(context.images, vec!["https://example.com/d.jpg".to_string()]);
        assert!(!context.text.is_empty());
    }
}
