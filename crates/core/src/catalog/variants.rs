//! Size × colour variant generation and SKU formatting.

use serde::{Deserialize, Serialize};

use super::colors::color_hex;

/// One purchasable size/colour combination of a catalogue product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub size: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_hex: Option<String>,
    pub sku: String,
    pub is_active: bool,
}

/// Upper-case a SKU component and collapse whitespace runs into `-`.
///
/// ```
/// use shelfmerch_core::catalog::sku_part;
///
/// assert_eq!(sku_part("Heather  Grey"), "HEATHER-GREY");
/// assert_eq!(sku_part("2xl"), "2XL");
/// ```
#[must_use]
pub fn sku_part(value: &str) -> String {
    value
        .split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Derive a SKU base from a product name: alphanumeric words, upper-cased,
/// joined by `-`.
///
/// ```
/// use shelfmerch_core::catalog::sku_base_from_name;
///
/// assert_eq!(sku_base_from_name("Premium Cotton T-Shirt"), "PREMIUM-COTTON-T-SHIRT");
/// ```
#[must_use]
pub fn sku_base_from_name(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Build `BASE-SIZE-COLOR`.
#[must_use]
pub fn variant_sku(base: &str, size: &str, color: &str) -> String {
    format!("{}-{}-{}", sku_part(base), sku_part(size), sku_part(color))
}

/// Every size × colour combination, sizes outermost, in input order.
///
/// Returns an empty list when either input is empty.
#[must_use]
pub fn generate_variants(base_sku: &str, sizes: &[String], colors: &[String]) -> Vec<ProductVariant> {
    sizes
        .iter()
        .flat_map(|size| {
            colors.iter().map(move |color| ProductVariant {
                size: size.clone(),
                color: color.clone(),
                color_hex: color_hex(color).map(str::to_owned),
                sku: variant_sku(base_sku, size, color),
                is_active: true,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_generate_variants_cartesian_product() {
        let variants = generate_variants(
            "TEE",
            &strings(&["M", "L"]),
            &strings(&["Black", "Sky Blue", "Ultraviolet"]),
        );

        assert_eq!(variants.len(), 6);
        let skus: Vec<_> = variants.iter().map(|v| v.sku.as_str()).collect();
        assert_eq!(
            skus,
            [
                "TEE-M-BLACK",
                "TEE-M-SKY-BLUE",
                "TEE-M-ULTRAVIOLET",
                "TEE-L-BLACK",
                "TEE-L-SKY-BLUE",
                "TEE-L-ULTRAVIOLET",
            ]
        );
        assert!(variants.iter().all(|v| v.is_active));
        assert_eq!(variants[0].color_hex.as_deref(), Some("#000000"));
        assert_eq!(variants[2].color_hex, None);
    }

    #[test]
    fn test_generate_variants_empty_axis() {
        assert!(generate_variants("TEE", &[], &strings(&["Black"])).is_empty());
        assert!(generate_variants("TEE", &strings(&["M"]), &[]).is_empty());
    }

    #[test]
    fn test_sku_base_from_name_strips_punctuation() {
        assert_eq!(sku_base_from_name("  Kid's Hoodie (Zip) "), "KID-S-HOODIE-ZIP");
    }
}
