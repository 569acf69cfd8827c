//! Image generation options passed through `custom_fields`.

use serde::Serialize;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageSize {
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1024x1792")]
    Portrait,
    #[serde(rename = "1792x1024")]
    Landscape,
}

/// `Vivid` leans towards hyper-real, dramatic images; `Natural` towards less
/// hyper-real ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    Natural,
    Vivid,
}

/// `Hd` trades speed for finer detail and consistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Standard,
    Hd,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImageConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ImageStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<ImageQuality>,
}

impl ImageConfiguration {
    pub fn size(mut self, size: ImageSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn style(mut self, style: ImageStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn quality(mut self, quality: ImageQuality) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_none() && self.style.is_none() && self.quality.is_none()
    }

    /// Render as `{"configuration": {"image": {...}}}` for a completion request.
    pub fn into_custom_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert(
            "configuration".to_string(),
            json!({ "image": serde_json::to_value(self).unwrap_or(Value::Null) }),
        );
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_only_set_fields() {
        let fields = ImageConfiguration::default()
            .size(ImageSize::Landscape)
            .quality(ImageQuality::Hd)
            .into_custom_fields();

        assert_eq!(
            Value::Object(fields),
            json!({ "configuration": { "image": { "size": "1792x1024", "quality": "hd" } } })
        );
    }

    #[test]
    fn empty_configuration_is_detected() {
        assert!(ImageConfiguration::default().is_empty());
        assert!(!ImageConfiguration::default().style(ImageStyle::Vivid).is_empty());
    }
}
