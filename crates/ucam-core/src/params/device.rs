use serde::Serialize;

use super::tree::ParameterTree;

/// Product identity from the `Brand` parameter group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub brand: String,
    pub product_name: String,
    pub product_number: String,
    pub product_short_name: String,
    pub product_type: String,
    pub product_variant: String,
    pub web_url: String,
}

impl DeviceInfo {
    /// Map a `Brand` group tree; missing leaves become empty strings.
    pub fn from_tree(tree: &ParameterTree) -> Self {
        let text = |key: &str| {
            tree.get(key)
                .and_then(|node| node.as_str_lossy())
                .unwrap_or_default()
        };
        Self {
            brand: text("Brand"),
            product_name: text("ProdFullName"),
            product_number: text("ProdNbr"),
            product_short_name: text("ProdShortName"),
            product_type: text("ProdType"),
            product_variant: text("ProdVariant"),
            web_url: text("WebURL"),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn brand_group_maps_to_device_info() {
        let tree = ParameterTree::from_value(
            "Brand",
            json!({
                "Brand": "AXIS",
                "ProdFullName": "AXIS P3265-LVE Dome Camera",
                "ProdNbr": "P3265-LVE",
                "ProdType": "Dome Camera"
            }),
        )
        .unwrap();

        let info = DeviceInfo::from_tree(&tree);
        assert_eq!(info.brand, "AXIS");
        assert_eq!(info.product_number, "P3265-LVE");
        assert_eq!(info.product_type, "Dome Camera");
        assert!(info.product_variant.is_empty());
    }
}
