use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Commands whose repeated lines accumulate in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiField {
    Title,
    Body,
    Strip,
    StripIdOrClass,
    StripImageSrc,
    SinglePageLink,
    NextPageLink,
    TestUrl,
    LoginExtraFields,
    NativeAdClue,
    Date,
    Author,
}

/// Boolean commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolField {
    Prune,
    AutodetectOnFailure,
    RequiresLogin,
}

/// Commands holding a single string, last line wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringField {
    LoginUsernameField,
    LoginPasswordField,
    NotLoggedIn,
    LoginUri,
}

/// A `name: value` command resolved from the three command tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Multi(MultiField),
    Bool(BoolField),
    Single(StringField),
}

impl Directive {
    /// Look a command name up in the command tables. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let directive = match name {
            "title" => Self::Multi(MultiField::Title),
            "body" => Self::Multi(MultiField::Body),
            "strip" => Self::Multi(MultiField::Strip),
            "strip_id_or_class" => Self::Multi(MultiField::StripIdOrClass),
            "strip_image_src" => Self::Multi(MultiField::StripImageSrc),
            "single_page_link" => Self::Multi(MultiField::SinglePageLink),
            "next_page_link" => Self::Multi(MultiField::NextPageLink),
            "test_url" => Self::Multi(MultiField::TestUrl),
            "login_extra_fields" => Self::Multi(MultiField::LoginExtraFields),
            "native_ad_clue" => Self::Multi(MultiField::NativeAdClue),
            "date" => Self::Multi(MultiField::Date),
            "author" => Self::Multi(MultiField::Author),

            "prune" => Self::Bool(BoolField::Prune),
            "autodetect_on_failure" => Self::Bool(BoolField::AutodetectOnFailure),
            "requires_login" => Self::Bool(BoolField::RequiresLogin),

            "login_username_field" => Self::Single(StringField::LoginUsernameField),
            "login_password_field" => Self::Single(StringField::LoginPasswordField),
            "not_logged_in" => Self::Single(StringField::NotLoggedIn),
            "login_uri" => Self::Single(StringField::LoginUri),

            _ => return None,
        };
        Some(directive)
    }
}

/// Ordered find -> replace map.
///
/// Replacements run in the order they were first declared. Declaring the same
/// find string again updates its replacement without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    entries: Vec<(String, String)>,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, find: String, replace: String) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == find) {
            Some(entry) => entry.1 = replace,
            None => self.entries.push((find, replace)),
        }
    }

    pub fn get(&self, find: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == find)
            .map(|(_, replace)| replace.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate pairs in application order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(find, replace)| (find.as_str(), replace.as_str()))
    }
}

impl Serialize for Replacements {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Extraction rules for one site, built from one config file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteConfig {
    /// Selector expressions, tried in order by the extractor
    pub title: Vec<String>,
    pub body: Vec<String>,
    pub author: Vec<String>,
    pub date: Vec<String>,

    /// Elements and attributes to remove or flag
    pub strip: Vec<String>,
    pub strip_id_or_class: Vec<String>,
    pub strip_image_src: Vec<String>,
    pub native_ad_clue: Vec<String>,

    /// Pagination
    pub single_page_link: Vec<String>,
    pub next_page_link: Vec<String>,

    pub test_url: Vec<String>,

    /// Request headers sent when fetching this site
    pub http_headers: BTreeMap<String, String>,
    /// Substitutions applied to fetched HTML before extraction
    pub string_replacer: Replacements,

    pub prune: bool,
    pub autodetect_on_failure: bool,
    pub requires_login: bool,

    /// Login automation
    pub not_logged_in: String,
    pub login_uri: String,
    pub login_username_field: String,
    pub login_password_field: String,
    pub login_extra_fields: Vec<BTreeMap<String, Vec<String>>>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: Vec::new(),
            body: Vec::new(),
            author: Vec::new(),
            date: Vec::new(),
            strip: Vec::new(),
            strip_id_or_class: Vec::new(),
            strip_image_src: Vec::new(),
            native_ad_clue: Vec::new(),
            single_page_link: Vec::new(),
            next_page_link: Vec::new(),
            test_url: Vec::new(),
            http_headers: BTreeMap::new(),
            string_replacer: Replacements::new(),
            prune: false,
            autodetect_on_failure: false,
            requires_login: false,
            not_logged_in: String::new(),
            login_uri: String::new(),
            login_username_field: String::new(),
            login_password_field: String::new(),
            login_extra_fields: vec![BTreeMap::new()],
        }
    }
}

impl SiteConfig {
    /// Create a new empty site config
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one value to a multi-value field
    pub fn push(&mut self, field: MultiField, value: String) {
        let target = match field {
            MultiField::Title => &mut self.title,
            MultiField::Body => &mut self.body,
            MultiField::Strip => &mut self.strip,
            MultiField::StripIdOrClass => &mut self.strip_id_or_class,
            MultiField::StripImageSrc => &mut self.strip_image_src,
            MultiField::SinglePageLink => &mut self.single_page_link,
            MultiField::NextPageLink => &mut self.next_page_link,
            MultiField::TestUrl => &mut self.test_url,
            MultiField::NativeAdClue => &mut self.native_ad_clue,
            MultiField::Date => &mut self.date,
            MultiField::Author => &mut self.author,
            MultiField::LoginExtraFields => {
                self.push_login_extra_field(&value);
                return;
            }
        };
        target.push(value);
    }

    pub fn set_bool(&mut self, field: BoolField, value: bool) {
        match field {
            BoolField::Prune => self.prune = value,
            BoolField::AutodetectOnFailure => self.autodetect_on_failure = value,
            BoolField::RequiresLogin => self.requires_login = value,
        }
    }

    pub fn set_string(&mut self, field: StringField, value: String) {
        match field {
            StringField::LoginUsernameField => self.login_username_field = value,
            StringField::LoginPasswordField => self.login_password_field = value,
            StringField::NotLoggedIn => self.not_logged_in = value,
            StringField::LoginUri => self.login_uri = value,
        }
    }

    /// `name=value` goes under `name` in the last field map. A token without
    /// `=` is a field name with an empty value.
    fn push_login_extra_field(&mut self, token: &str) {
        let (name, value) = token.split_once('=').unwrap_or((token, ""));

        if self.login_extra_fields.is_empty() {
            self.login_extra_fields.push(BTreeMap::new());
        }
        if let Some(fields) = self.login_extra_fields.last_mut() {
            fields.entry(name.to_string()).or_default().push(value.to_string());
        }
    }

    /// Check if this config has any meaningful extraction directives
    pub fn has_extraction_config(&self) -> bool {
        !self.body.is_empty() || !self.title.is_empty()
    }

    /// Serialize to a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
