use serde::{Deserialize, Serialize};

/// Language tag supplied by the collector layer; drives augmentation
/// prompts and risk-profile display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn from_tag(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized == "zh" || normalized.starts_with("zh-") {
            Self::Zh
        } else {
            Self::En
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_chinese_tags() {
        assert_eq!(Language::from_tag("zh"), Language::Zh);
        assert_eq!(Language::from_tag("zh-CN"), Language::Zh);
        assert_eq!(Language::from_tag("ZH-Hant"), Language::Zh);
    }

    #[test]
    fn defaults_to_english() {
        assert_eq!(Language::from_tag("en-US"), Language::En);
        assert_eq!(Language::from_tag(""), Language::En);
        assert_eq!(Language::default(), Language::En);
    }
}
