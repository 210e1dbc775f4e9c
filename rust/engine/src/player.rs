use serde::Serialize;

/// A cash game or tournament player seen on a site.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    name: String,
    site_name: String,
    comments: String,
    is_hero: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, site_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            site_name: site_name.into(),
            comments: String::new(),
            is_hero: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn site_name(&self) -> &str {
        &self.site_name
    }
    pub fn comments(&self) -> &str {
        &self.comments
    }
    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.comments = comments.into();
    }
    pub fn is_hero(&self) -> bool {
        self.is_hero
    }
    pub fn set_is_hero(&mut self, is_hero: bool) {
        self.is_hero = is_hero;
    }
}
