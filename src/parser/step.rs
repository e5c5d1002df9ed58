use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum StepValue {
    String(String),
    Real(f64),
    Integer(i64),
    Boolean(bool),
    Enum(String),
    Reference(u64),
    List(Vec<StepValue>),
    Null,
    Derived,
}

impl StepValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StepValue::String(s) | StepValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StepValue::Real(f) => Some(*f),
            StepValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_reference(&self) -> Option<u64> {
        match self {
            StepValue::Reference(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[StepValue]> {
        match self {
            StepValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// References held directly in a list value, in order.
    #[must_use]
    pub fn references(&self) -> Vec<u64> {
        self.as_list()
            .map(|items| items.iter().filter_map(StepValue::as_reference).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, StepValue::Null | StepValue::Derived)
    }
}

#[derive(Debug, Clone)]
pub struct StepEntity {
    pub id: u64,
    pub entity_type: String,
    pub values: Vec<StepValue>,
}

impl StepEntity {
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StepValue> {
        self.values.get(index)
    }

    #[must_use]
    pub fn string_at(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(StepValue::as_str)
    }

    #[must_use]
    pub fn reference_at(&self, index: usize) -> Option<u64> {
        self.get(index).and_then(StepValue::as_reference)
    }

    #[must_use]
    pub fn references_at(&self, index: usize) -> Vec<u64> {
        self.get(index).map(StepValue::references).unwrap_or_default()
    }
}

/// Metadata from the HEADER section (`FILE_DESCRIPTION`, `FILE_NAME`, `FILE_SCHEMA`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepHeader {
    pub description: Vec<String>,
    pub file_name: String,
    pub time_stamp: String,
    pub author: Vec<String>,
    pub organization: Vec<String>,
    pub preprocessor_version: String,
    pub originating_system: String,
    pub schema: Vec<String>,
}

#[derive(Debug)]
pub struct StepFile {
    pub header: StepHeader,
    entities: IndexMap<u64, StepEntity>,
    by_type: HashMap<String, Vec<u64>>,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    None,
    Header,
    Data,
}

impl StepFile {
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut header = StepHeader::default();
        let mut entities = IndexMap::new();
        let mut seen_magic = false;
        let mut section = Section::None;

        for statement in split_statements(content) {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }

            match statement {
                "ISO-10303-21" => {
                    seen_magic = true;
                    continue;
                }
                "HEADER" => {
                    section = Section::Header;
                    continue;
                }
                "DATA" => {
                    section = Section::Data;
                    continue;
                }
                "ENDSEC" => {
                    section = Section::None;
                    continue;
                }
                "END-ISO-10303-21" => break,
                _ => {}
            }

            match section {
                Section::Header => Self::parse_header_statement(statement, &mut header),
                Section::Data if statement.starts_with('#') => {
                    let entity = Self::parse_entity(statement)?;
                    entities.insert(entity.id, entity);
                }
                _ => {}
            }
        }

        if !seen_magic {
            return Err(ParseError::InvalidStep {
                message: "missing ISO-10303-21 start token".to_string(),
            });
        }
        if header.schema.is_empty() {
            return Err(ParseError::InvalidStep {
                message: "missing FILE_SCHEMA in header".to_string(),
            });
        }

        let mut by_type: HashMap<String, Vec<u64>> = HashMap::new();
        for entity in entities.values() {
            by_type
                .entry(entity.entity_type.clone())
                .or_default()
                .push(entity.id);
        }

        Ok(StepFile {
            header,
            entities,
            by_type,
        })
    }

    fn parse_header_statement(statement: &str, header: &mut StepHeader) {
        let Some((keyword, values)) = split_call(statement) else {
            return;
        };
        let values = Self::parse_values(values);
        let text = |index: usize| {
            values
                .get(index)
                .and_then(StepValue::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let texts = |index: usize| {
            values
                .get(index)
                .and_then(StepValue::as_list)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(StepValue::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default()
        };

        match keyword {
            "FILE_DESCRIPTION" => header.description = texts(0),
            "FILE_NAME" => {
                header.file_name = text(0);
                header.time_stamp = text(1);
                header.author = texts(2);
                header.organization = texts(3);
                header.preprocessor_version = text(4);
                header.originating_system = text(5);
            }
            "FILE_SCHEMA" => header.schema = texts(0),
            _ => {}
        }
    }

    fn parse_entity(statement: &str) -> Result<StepEntity, ParseError> {
        // Format: #123=IFCWALL('guid',#ref,'name',...)
        let malformed = || ParseError::InvalidStep {
            message: format!("malformed entity instance '{}'", truncate(statement, 60)),
        };

        let eq_pos = statement.find('=').ok_or_else(malformed)?;
        let id: u64 = statement[1..eq_pos].trim().parse().map_err(|_| malformed())?;

        let (entity_type, values) = split_call(statement[eq_pos + 1..].trim()).ok_or_else(malformed)?;

        Ok(StepEntity {
            id,
            entity_type: entity_type.to_ascii_uppercase(),
            values: Self::parse_values(values),
        })
    }

    fn parse_values(s: &str) -> Vec<StepValue> {
        let mut values = Vec::new();
        let mut current = String::new();
        let mut in_string = false;
        let mut paren_depth = 0usize;

        for ch in s.chars() {
            match ch {
                '\'' => {
                    in_string = !in_string;
                    current.push(ch);
                }
                '(' if !in_string => {
                    paren_depth += 1;
                    current.push(ch);
                }
                ')' if !in_string => {
                    paren_depth = paren_depth.saturating_sub(1);
                    current.push(ch);
                }
                ',' if !in_string && paren_depth == 0 => {
                    values.push(Self::parse_single_value(&current));
                    current.clear();
                }
                _ => current.push(ch),
            }
        }

        if !current.trim().is_empty() {
            values.push(Self::parse_single_value(&current));
        }

        values
    }

    fn parse_single_value(s: &str) -> StepValue {
        let s = s.trim();

        if s == "$" {
            return StepValue::Null;
        }
        if s == "*" {
            return StepValue::Derived;
        }
        if let Some(stripped) = s.strip_prefix('#') {
            if let Ok(id) = stripped.parse::<u64>() {
                return StepValue::Reference(id);
            }
        }
        if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
            return StepValue::String(decode_step_string(&s[1..s.len() - 1]));
        }
        if s.len() >= 2 && s.starts_with('.') && s.ends_with('.') {
            return match &s[1..s.len() - 1] {
                "T" => StepValue::Boolean(true),
                "F" => StepValue::Boolean(false),
                "U" => StepValue::Null,
                inner => StepValue::Enum(inner.to_string()),
            };
        }
        if s.starts_with('(') && s.ends_with(')') {
            return StepValue::List(Self::parse_values(&s[1..s.len() - 1]));
        }
        if let Ok(i) = s.parse::<i64>() {
            return StepValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return StepValue::Real(f);
        }
        // Typed value like IFCBOOLEAN(.T.) or IFCLABEL('x')
        if let Some((_, inner)) = split_call(s) {
            return Self::parse_single_value(inner);
        }

        StepValue::String(s.to_string())
    }

    #[must_use]
    pub fn get_entity(&self, id: u64) -> Option<&StepEntity> {
        self.entities.get(&id)
    }

    /// Ids of entities with exactly this (upper-case) type, in file order.
    #[must_use]
    pub fn ids_of_type(&self, entity_type: &str) -> &[u64] {
        self.by_type.get(entity_type).map_or(&[], Vec::as_slice)
    }

    /// Entity types present in the file.
    pub fn entity_types(&self) -> impl Iterator<Item = &str> {
        self.by_type.keys().map(String::as_str)
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

/// Splits `NAME(args)` into `("NAME", "args")`.
fn split_call(s: &str) -> Option<(&str, &str)> {
    let paren_pos = s.find('(')?;
    if !s.ends_with(')') {
        return None;
    }
    let keyword = s[..paren_pos].trim();
    if keyword.is_empty() {
        return None;
    }
    Some((keyword, &s[paren_pos + 1..s.len() - 1]))
}

/// Splits exchange-file content at `;` terminators, skipping comments and
/// ignoring terminators inside quoted strings.
fn split_statements(content: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_string {
            current.push(ch);
            if ch == '\'' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '\'' => {
                in_string = true;
                current.push(ch);
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            ';' => statements.push(std::mem::take(&mut current)),
            '\r' | '\n' => {}
            _ => current.push(ch),
        }
    }

    if !current.trim().is_empty() {
        statements.push(current);
    }

    statements
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

/// Decode STEP/IFC encoded strings with Unicode escape sequences.
/// Supports:
/// - `\X2\XXXX\X0\` - 2-byte Unicode (BMP), can have multiple 4-char hex codes
/// - `\X\XX` - 1-byte ISO 8859-1
/// - `\S\c` - character with the high bit set
/// - `\\` - escaped backslash
/// - `''` - escaped apostrophe
fn decode_step_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.peek() {
                Some('X') => {
                    chars.next();
                    match chars.peek() {
                        Some('2') => {
                            chars.next(); // '2'
                            chars.next(); // '\'
                            let mut hex = String::new();
                            while let Some(&c) = chars.peek() {
                                if c == '\\' {
                                    break;
                                }
                                hex.push(c);
                                chars.next();
                            }
                            // \X0\ terminator
                            for _ in 0..4 {
                                chars.next();
                            }
                            for chunk in hex.as_bytes().chunks(4) {
                                let code = std::str::from_utf8(chunk)
                                    .ok()
                                    .and_then(|h| u32::from_str_radix(h, 16).ok())
                                    .and_then(char::from_u32);
                                if let Some(c) = code {
                                    result.push(c);
                                }
                            }
                        }
                        Some('\\') => {
                            chars.next();
                            let hex: String = chars.by_ref().take(2).collect();
                            if let Ok(code) = u8::from_str_radix(&hex, 16) {
                                result.push(char::from(code));
                            }
                        }
                        _ => result.push_str("\\X"),
                    }
                }
                Some('S') => {
                    chars.next(); // 'S'
                    chars.next(); // '\'
                    if let Some(c) = chars.next().and_then(|c| char::from_u32(c as u32 + 128)) {
                        result.push(c);
                    }
                }
                Some('\\') => {
                    chars.next();
                    result.push('\\');
                }
                _ => result.push('\\'),
            },
            '\'' => {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                }
                result.push('\'');
            }
            _ => result.push(ch),
        }
    }

    result
}
