//! CSS-like selector parsing for element queries.
//!
//! Supports:
//! - `"*"` - any element
//! - `"div"` - by tag name
//! - `"#navbar"` - by ID
//! - `".skill-card"` - by class
//! - `"[data-lucide]"`, `"[data-lucide='mail']"` - by attribute
//! - `"div.skill-card"` - compound
//! - `".project-card .tags span"` - descendant combinator
//! - `".tags > span"` - child combinator

/// Element view needed to evaluate a selector.
pub trait SelectorTarget: Sized {
    /// Lowercase tag name.
    fn tag(&self) -> String;
    /// Attribute value, if present. `id` and `class` are attributes too.
    fn attr(&self, name: &str) -> Option<String>;
    /// Parent element, if any.
    fn parent_element(&self) -> Option<Self>;

    /// Whether the class list contains `class`.
    fn has_class_name(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }
}

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match any element
    Universal,
    /// Match by tag name
    Type(String),
    /// Match by ID (e.g., `#my-id`)
    Id(String),
    /// Match by class (e.g., `.my-class`)
    Class(String),
    /// Match by attribute presence or value
    Attribute {
        /// Attribute name
        name: String,
        /// Required value; `None` only checks presence
        value: Option<String>,
    },
    /// All parts must match the same element (e.g., `div.card`)
    Compound(Vec<Selector>),
    /// Descendant combinator (e.g., `.card span`)
    Descendant(Box<Selector>, Box<Selector>),
    /// Child combinator (e.g., `.tags > span`)
    Child(Box<Selector>, Box<Selector>),
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is invalid.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser::new(input).parse()
    }

    /// Check if this selector matches an element.
    #[must_use]
    pub fn matches<T: SelectorTarget>(&self, target: &T) -> bool {
        match self {
            Self::Universal => true,
            Self::Type(name) => target.tag().eq_ignore_ascii_case(name),
            Self::Id(id) => target.attr("id").as_deref() == Some(id.as_str()),
            Self::Class(class) => target.has_class_name(class),
            Self::Attribute { name, value } => match (target.attr(name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => &actual == expected,
                (None, _) => false,
            },
            Self::Compound(parts) => parts.iter().all(|p| p.matches(target)),
            Self::Descendant(ancestor, inner) => {
                if !inner.matches(target) {
                    return false;
                }
                let mut current = target.parent_element();
                while let Some(node) = current {
                    if ancestor.matches(&node) {
                        return true;
                    }
                    current = node.parent_element();
                }
                false
            }
            Self::Child(parent, inner) => {
                inner.matches(target)
                    && target
                        .parent_element()
                        .is_some_and(|p| parent.matches(&p))
            }
        }
    }
}

/// Selector parser.
pub struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    /// Create a new parser.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse the selector.
    pub fn parse(&mut self) -> Result<Selector, SelectorError> {
        self.skip_whitespace();
        if self.peek_char().is_none() {
            return Err(SelectorError::Empty);
        }

        let mut selector = self.parse_compound()?;
        loop {
            let had_space = self.skip_whitespace();
            match self.peek_char() {
                None => return Ok(selector),
                Some('>') => {
                    self.advance();
                    self.skip_whitespace();
                    let inner = self.parse_compound()?;
                    selector = Selector::Child(Box::new(selector), Box::new(inner));
                }
                Some(_) if had_space => {
                    let inner = self.parse_compound()?;
                    selector = Selector::Descendant(Box::new(selector), Box::new(inner));
                }
                Some(c) => return Err(SelectorError::UnexpectedChar(c)),
            }
        }
    }

    fn parse_compound(&mut self) -> Result<Selector, SelectorError> {
        let mut parts = Vec::new();
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || c == '>' {
                break;
            }
            parts.push(self.parse_simple()?);
        }

        match parts.len() {
            0 => Err(SelectorError::ExpectedIdentifier),
            1 => Ok(parts.remove(0)),
            _ => Ok(Selector::Compound(parts)),
        }
    }

    fn parse_simple(&mut self) -> Result<Selector, SelectorError> {
        let first = self.peek_char().ok_or(SelectorError::Empty)?;

        match first {
            '*' => {
                self.advance();
                Ok(Selector::Universal)
            }
            '#' => self.parse_id(),
            '.' => self.parse_class(),
            '[' => self.parse_attribute(),
            _ if first.is_alphabetic() => self.parse_type(),
            _ => Err(SelectorError::UnexpectedChar(first)),
        }
    }

    fn parse_id(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // Skip '#'
        let id = self.read_identifier()?;
        Ok(Selector::Id(id))
    }

    fn parse_class(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // Skip '.'
        let class = self.read_identifier()?;
        Ok(Selector::Class(class))
    }

    fn parse_type(&mut self) -> Result<Selector, SelectorError> {
        let name = self.read_identifier()?;
        Ok(Selector::Type(name.to_ascii_lowercase()))
    }

    fn parse_attribute(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // Skip '['

        let name = self.read_until_any(&['=', ']']).trim().to_string();
        if name.is_empty() {
            return Err(SelectorError::InvalidAttribute);
        }

        match self.peek_char() {
            Some(']') => {
                self.advance();
                return Ok(Selector::Attribute { name, value: None });
            }
            Some('=') => self.advance(),
            _ => return Err(SelectorError::UnclosedAttribute),
        }

        let quote = self.peek_char().filter(|c| *c == '\'' || *c == '"');
        if quote.is_some() {
            self.advance();
        }

        let value = match quote {
            Some(q) => self.read_until_any(&[q]),
            None => self.read_until_any(&[']']),
        };

        if quote.is_some() {
            if self.peek_char() != quote {
                return Err(SelectorError::UnclosedAttribute);
            }
            self.advance();
        }

        if self.peek_char() != Some(']') {
            return Err(SelectorError::UnclosedAttribute);
        }
        self.advance();

        Ok(Selector::Attribute {
            name,
            value: Some(value),
        })
    }

    fn read_identifier(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(SelectorError::ExpectedIdentifier);
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn read_until_any(&mut self, stops: &[char]) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if stops.contains(&c) {
                break;
            }
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
        self.pos > start
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}

/// Selector parsing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// Empty selector
    Empty,
    /// Unexpected character
    UnexpectedChar(char),
    /// Expected identifier
    ExpectedIdentifier,
    /// Invalid attribute syntax
    InvalidAttribute,
    /// Unclosed attribute bracket or quote
    UnclosedAttribute,
}

impl std::fmt::Display for SelectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty selector"),
            Self::UnexpectedChar(c) => write!(f, "unexpected character: '{c}'"),
            Self::ExpectedIdentifier => write!(f, "expected identifier"),
            Self::InvalidAttribute => write!(f, "invalid attribute syntax"),
            Self::UnclosedAttribute => write!(f, "unclosed attribute bracket"),
        }
    }
}

impl std::error::Error for SelectorError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Clone)]
    struct Fake {
        tag: &'static str,
        attrs: HashMap<&'static str, &'static str>,
        parent: Option<Box<Fake>>,
    }

    impl Fake {
        fn new(tag: &'static str, attrs: &[(&'static str, &'static str)]) -> Self {
            Self {
                tag,
                attrs: attrs.iter().copied().collect(),
                parent: None,
            }
        }

        fn under(mut self, parent: Self) -> Self {
            self.parent = Some(Box::new(parent));
            self
        }
    }

    impl SelectorTarget for Fake {
        fn tag(&self) -> String {
            self.tag.to_string()
        }
        fn attr(&self, name: &str) -> Option<String> {
            self.attrs.get(name).map(|v| (*v).to_string())
        }
        fn parent_element(&self) -> Option<Self> {
            self.parent.as_deref().cloned()
        }
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(Selector::parse("#navbar"), Ok(Selector::Id("navbar".into())));
    }

    #[test]
    fn test_parse_class() {
        assert_eq!(
            Selector::parse(".skill-card"),
            Ok(Selector::Class("skill-card".into()))
        );
    }

    #[test]
    fn test_parse_type_lowercases() {
        assert_eq!(Selector::parse("DIV"), Ok(Selector::Type("div".into())));
    }

    #[test]
    fn test_parse_attribute_presence_and_value() {
        assert_eq!(
            Selector::parse("[data-lucide]"),
            Ok(Selector::Attribute {
                name: "data-lucide".into(),
                value: None
            })
        );
        assert_eq!(
            Selector::parse("[data-lucide='map-pin']"),
            Ok(Selector::Attribute {
                name: "data-lucide".into(),
                value: Some("map-pin".into())
            })
        );
        assert_eq!(
            Selector::parse("[href=\"#\"]"),
            Ok(Selector::Attribute {
                name: "href".into(),
                value: Some("#".into())
            })
        );
    }

    #[test]
    fn test_parse_universal() {
        assert_eq!(Selector::parse("*"), Ok(Selector::Universal));
        assert_eq!(
            Selector::parse("#c > *"),
            Ok(Selector::Child(
                Box::new(Selector::Id("c".into())),
                Box::new(Selector::Universal)
            ))
        );
    }

    #[test]
    fn test_parse_compound() {
        assert_eq!(
            Selector::parse("div.skill-card"),
            Ok(Selector::Compound(vec![
                Selector::Type("div".into()),
                Selector::Class("skill-card".into()),
            ]))
        );
    }

    #[test]
    fn test_parse_combinators() {
        let sel = Selector::parse(".tags > span").unwrap();
        assert!(matches!(sel, Selector::Child(_, _)));
        let sel = Selector::parse(".project-card   span").unwrap();
        assert!(matches!(sel, Selector::Descendant(_, _)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("#"), Err(SelectorError::ExpectedIdentifier));
        assert_eq!(Selector::parse("[=x]"), Err(SelectorError::InvalidAttribute));
        assert_eq!(
            Selector::parse("[href='x"),
            Err(SelectorError::UnclosedAttribute)
        );
        assert_eq!(Selector::parse("@foo"), Err(SelectorError::UnexpectedChar('@')));
    }

    #[test]
    fn test_matches_simple() {
        let card = Fake::new("div", &[("class", "skill-card tilted"), ("id", "c1")]);
        assert!(Selector::parse("div").unwrap().matches(&card));
        assert!(Selector::parse(".tilted").unwrap().matches(&card));
        assert!(Selector::parse("#c1").unwrap().matches(&card));
        assert!(Selector::parse("div.skill-card").unwrap().matches(&card));
        assert!(!Selector::parse("span.skill-card").unwrap().matches(&card));
        assert!(!Selector::parse(".skill").unwrap().matches(&card));
    }

    #[test]
    fn test_matches_combinators() {
        let card = Fake::new("div", &[("class", "project-card")]);
        let tags = Fake::new("div", &[("class", "tags")]).under(card);
        let span = Fake::new("span", &[]).under(tags);

        assert!(Selector::parse(".tags > span").unwrap().matches(&span));
        assert!(Selector::parse(".project-card span").unwrap().matches(&span));
        assert!(!Selector::parse(".project-card > span").unwrap().matches(&span));
    }
}
