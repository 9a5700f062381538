//! Announcement records and their localized view
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Announcement,
    Privacy,
    Landing,
    App,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Announcement,
        Category::Privacy,
        Category::Landing,
        Category::App,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Announcement => "announcement",
            Category::Privacy => "privacy",
            Category::Landing => "landing",
            Category::App => "app",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Es,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Es, Language::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "es" => Ok(Language::Es),
            "en" => Ok(Language::En),
            other => Err(other.to_string()),
        }
    }
}

/// A row as stored, with both translations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementRaw {
    pub id: String,
    pub title_es: String,
    pub title_en: String,
    pub full_text_es: String,
    pub full_text_en: String,
    pub category: Category,
    pub created_at: String,
}

/// A row in a single language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub full_text: String,
    pub category: Category,
    pub created_at: String,
}

impl AnnouncementRaw {
    pub fn localize(self, language: Language) -> Announcement {
        let (title, full_text) = match language {
            Language::Es => (self.title_es, self.full_text_es),
            Language::En => (self.title_en, self.full_text_en),
        };
        Announcement {
            id: self.id,
            title,
            full_text,
            category: self.category,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localize() {
        let raw = AnnouncementRaw {
            id: "1".to_string(),
            title_es: "Hola".to_string(),
            title_en: "Hello".to_string(),
            full_text_es: "Texto".to_string(),
            full_text_en: "Text".to_string(),
            category: Category::App,
            created_at: "2025-01-01T00:00:00Z".to_string(),
        };
        let es = raw.clone().localize(Language::Es);
        assert_eq!(es.title, "Hola");
        let en = raw.localize(Language::En);
        assert_eq!(en.full_text, "Text");
        assert_eq!(en.category, Category::App);
    }

    #[test]
    fn test_parse_category_and_language() {
        assert_eq!("privacy".parse::<Category>(), Ok(Category::Privacy));
        assert_eq!("news".parse::<Category>(), Err("news".to_string()));
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
        assert!("fr".parse::<Language>().is_err());
    }
}
