//! Message template parsing, binding, and rendering
//!
//! A template is tokenized exactly once at construction into literal and
//! property tokens. Binding walks the token sequence and pairs property
//! tokens with positional arguments; rendering substitutes bound values
//! back into the literal text. The parser is deliberately forgiving:
//! template strings are caller-authored, and a malformed template must
//! degrade to literal text instead of failing the logging call.

use serde_json::Value;

/// Ordered name/value mapping for bound event properties.
///
/// `serde_json` is built with `preserve_order`, so iteration follows
/// first-seen token order and re-inserting a key overwrites in place.
pub type PropertyMap = serde_json::Map<String, Value>;

/// Default cap on the JSON text captured for a structured argument.
pub const DEFAULT_CAPTURED_STRING_LENGTH: i32 = 70;

/// How a bound argument should be captured into the property map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DestructureHint {
    /// No marker: primitives as-is, objects as capped JSON text
    #[default]
    None,
    /// `@` marker: full-fidelity structural capture, no length cap
    Structure,
    /// `$` marker: force stringification
    Stringify,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Literal(String),
    Property(PropertyToken),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyToken {
    /// Original `{...}` text, used verbatim when no value is bound
    pub raw: String,
    pub name: String,
    pub destructure: DestructureHint,
    /// Trailing `:format` suffix, retained verbatim for format-aware sinks
    pub format: Option<String>,
}

/// A parse-once message template.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    raw: String,
    tokens: Vec<Token>,
    max_captured_string_length: i32,
}

impl MessageTemplate {
    /// Tokenizes `raw` with the default captured-string cap.
    pub fn new(raw: impl Into<String>) -> Self {
        Self::with_max_captured_length(raw, DEFAULT_CAPTURED_STRING_LENGTH)
    }

    /// Tokenizes `raw` with an explicit captured-string cap.
    /// A negative `max_length` disables the cap.
    pub fn with_max_captured_length(raw: impl Into<String>, max_length: i32) -> Self {
        let raw = raw.into();
        let tokens = tokenize(&raw);
        Self {
            raw,
            tokens,
            max_captured_string_length: max_length,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn max_captured_string_length(&self) -> i32 {
        self.max_captured_string_length
    }

    /// Binds positional arguments to property tokens in first-occurrence
    /// order.
    ///
    /// A name that appears more than once consumes a single argument; the
    /// later occurrences reuse the already-bound value. Surplus arguments
    /// are discarded, and property tokens left without an argument are
    /// omitted from the map.
    pub fn bind_properties(&self, args: Vec<Value>) -> PropertyMap {
        let mut properties = PropertyMap::new();
        let mut remaining = args.into_iter();
        for token in &self.tokens {
            if let Token::Property(property) = token {
                if properties.contains_key(&property.name) {
                    continue;
                }
                match remaining.next() {
                    Some(value) => {
                        properties.insert(
                            property.name.clone(),
                            capture(value, property.destructure, self.max_captured_string_length),
                        );
                    }
                    None => break,
                }
            }
        }
        properties
    }

    /// Renders the template against a property map.
    ///
    /// Literal tokens pass through verbatim; property tokens substitute the
    /// bound value's text form. A property with no bound value renders as
    /// its raw placeholder text. Never fails.
    pub fn render(&self, properties: &PropertyMap) -> String {
        let mut out = String::with_capacity(self.raw.len());
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Property(property) => match properties.get(&property.name) {
                    Some(value) => out.push_str(&value_text(value)),
                    None => out.push_str(&property.raw),
                },
            }
        }
        out
    }
}

/// Converts a bound argument into its stored property value.
pub fn capture(value: Value, hint: DestructureHint, max_length: i32) -> Value {
    match hint {
        DestructureHint::Structure => value,
        DestructureHint::Stringify => Value::String(value_text(&value)),
        DestructureHint::None => match value {
            Value::Object(_) | Value::Array(_) => {
                Value::String(truncate_json(value.to_string(), max_length))
            }
            primitive => primitive,
        },
    }
}

/// Text form of a property value: strings verbatim, everything else as
/// compact JSON (`Value`'s `Display`).
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate_json(json: String, max_length: i32) -> String {
    if max_length < 0 {
        return json;
    }
    let max = max_length as usize;
    if json.chars().count() <= max {
        return json;
    }
    let mut truncated: String = json.chars().take(max).collect();
    truncated.push_str("...");
    truncated
}

/// Single left-to-right scan over the template text.
///
/// `{{` and `}}` escape literal braces. A `{` opens a property token that
/// runs to the next `}`; an unterminated `{`, a nested `{`, or malformed
/// token content turns the whole span back into literal text.
fn tokenize(raw: &str) -> Vec<Token> {
    let chars: Vec<char> = raw.chars().collect();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '{' if chars.get(i + 1) == Some(&'{') => {
                literal.push('{');
                i += 2;
            }
            '{' => {
                // Scan for the closing brace; a second opener ends the span.
                let mut j = i + 1;
                let mut close = None;
                while j < chars.len() {
                    match chars[j] {
                        '}' => {
                            close = Some(j);
                            break;
                        }
                        '{' => break,
                        _ => j += 1,
                    }
                }
                match close {
                    Some(end) => {
                        let span: String = chars[i..=end].iter().collect();
                        let body: String = chars[i + 1..end].iter().collect();
                        match parse_property(&body, &span) {
                            Some(property) => {
                                if !literal.is_empty() {
                                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                                }
                                tokens.push(Token::Property(property));
                            }
                            None => literal.push_str(&span),
                        }
                        i = end + 1;
                    }
                    None => {
                        // Unterminated or interrupted span: emit what was
                        // scanned as literal text and resume at the breaking
                        // character (if any) so escapes there still apply.
                        literal.extend(&chars[i..j]);
                        i = j;
                    }
                }
            }
            '}' if chars.get(i + 1) == Some(&'}') => {
                literal.push('}');
                i += 2;
            }
            c => {
                literal.push(c);
                i += 1;
            }
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

fn parse_property(body: &str, raw: &str) -> Option<PropertyToken> {
    let (destructure, rest) = match body.as_bytes().first() {
        Some(b'@') => (DestructureHint::Structure, &body[1..]),
        Some(b'$') => (DestructureHint::Stringify, &body[1..]),
        _ => (DestructureHint::None, body),
    };
    let (name, format) = match rest.split_once(':') {
        Some((name, format)) if !format.is_empty() => (name, Some(format.to_string())),
        Some((name, _)) => (name, None),
        None => (rest, None),
    };
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some(PropertyToken {
        raw: raw.to_string(),
        name: name.to_string(),
        destructure,
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn property_names(template: &MessageTemplate) -> Vec<&str> {
        template
            .tokens()
            .iter()
            .filter_map(|t| match t {
                Token::Property(p) => Some(p.name.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_tokenize_literal_only() {
        let template = MessageTemplate::new("plain text");
        assert_eq!(template.tokens(), &[Token::Literal("plain text".into())]);
    }

    #[test]
    fn test_tokenize_named_property() {
        let template = MessageTemplate::new("Hello {name}!");
        assert_eq!(template.tokens().len(), 3);
        assert_eq!(property_names(&template), vec!["name"]);
    }

    #[test]
    fn test_tokenize_positional_property() {
        let template = MessageTemplate::new("{0} then {1}");
        assert_eq!(property_names(&template), vec!["0", "1"]);
    }

    #[test]
    fn test_tokenize_destructure_hints() {
        let template = MessageTemplate::new("{@request} {$id} {plain}");
        let hints: Vec<DestructureHint> = template
            .tokens()
            .iter()
            .filter_map(|t| match t {
                Token::Property(p) => Some(p.destructure),
                _ => None,
            })
            .collect();
        assert_eq!(
            hints,
            vec![
                DestructureHint::Structure,
                DestructureHint::Stringify,
                DestructureHint::None
            ]
        );
    }

    #[test]
    fn test_tokenize_format_suffix_retained_verbatim() {
        let template = MessageTemplate::new("{count:000} items at {when:HH:mm}");
        let formats: Vec<Option<&str>> = template
            .tokens()
            .iter()
            .filter_map(|t| match t {
                Token::Property(p) => Some(p.format.as_deref()),
                _ => None,
            })
            .collect();
        assert_eq!(formats, vec![Some("000"), Some("HH:mm")]);
    }

    #[test]
    fn test_tokenize_escaped_braces() {
        let template = MessageTemplate::new("{{literal}}");
        assert_eq!(template.tokens(), &[Token::Literal("{literal}".into())]);
    }

    #[test]
    fn test_tokenize_unterminated_brace_is_literal() {
        let template = MessageTemplate::new("broken {span");
        assert_eq!(template.tokens(), &[Token::Literal("broken {span".into())]);
    }

    #[test]
    fn test_tokenize_malformed_body_is_literal() {
        let template = MessageTemplate::new("odd {a b} end");
        assert_eq!(template.tokens(), &[Token::Literal("odd {a b} end".into())]);
    }

    #[test]
    fn test_tokenize_interrupted_span_recovers() {
        let template = MessageTemplate::new("x { y {name}");
        assert_eq!(
            template.tokens(),
            &[
                Token::Literal("x { y ".into()),
                Token::Property(PropertyToken {
                    raw: "{name}".into(),
                    name: "name".into(),
                    destructure: DestructureHint::None,
                    format: None,
                }),
            ]
        );
    }

    #[test]
    fn test_tokenize_lone_closing_brace() {
        let template = MessageTemplate::new("a } b");
        assert_eq!(template.tokens(), &[Token::Literal("a } b".into())]);
    }

    #[test]
    fn test_bind_and_render_round_trip() {
        let template = MessageTemplate::new("Hello {name}");
        let properties = template.bind_properties(vec![json!("World")]);
        assert_eq!(properties.get("name"), Some(&json!("World")));
        assert_eq!(template.render(&properties), "Hello World");
    }

    #[test]
    fn test_bind_duplicate_name_consumes_one_argument() {
        let template = MessageTemplate::new("{a} and {a}");
        let properties = template.bind_properties(vec![json!(1)]);
        assert_eq!(properties.len(), 1);
        assert_eq!(properties.get("a"), Some(&json!(1)));
        assert_eq!(template.render(&properties), "1 and 1");
    }

    #[test]
    fn test_bind_surplus_arguments_discarded() {
        let template = MessageTemplate::new("{only}");
        let properties = template.bind_properties(vec![json!("kept"), json!("dropped")]);
        assert_eq!(properties.len(), 1);
        assert_eq!(properties.get("only"), Some(&json!("kept")));
    }

    #[test]
    fn test_bind_missing_arguments_omitted() {
        let template = MessageTemplate::new("{a} {b}");
        let properties = template.bind_properties(vec![json!("x")]);
        assert_eq!(properties.len(), 1);
        assert!(!properties.contains_key("b"));
        // The unbound token renders as its raw placeholder.
        assert_eq!(template.render(&properties), "x {b}");
    }

    #[test]
    fn test_bind_preserves_first_seen_order() {
        let template = MessageTemplate::new("{z} {a} {m}");
        let properties = template.bind_properties(vec![json!(1), json!(2), json!(3)]);
        let keys: Vec<&String> = properties.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_capture_primitives_stored_as_is() {
        let template = MessageTemplate::new("{s} {n} {b} {nil}");
        let properties = template.bind_properties(vec![
            json!("text"),
            json!(42.5),
            json!(true),
            Value::Null,
        ]);
        assert_eq!(properties.get("s"), Some(&json!("text")));
        assert_eq!(properties.get("n"), Some(&json!(42.5)));
        assert_eq!(properties.get("b"), Some(&json!(true)));
        assert_eq!(properties.get("nil"), Some(&Value::Null));
    }

    #[test]
    fn test_capture_object_truncated_to_default_cap() {
        let template = MessageTemplate::new("{data}");
        let long_value: String = "x".repeat(200);
        let properties = template.bind_properties(vec![json!({ "payload": long_value })]);
        match properties.get("data") {
            Some(Value::String(s)) => {
                assert_eq!(s.chars().count(), 73); // 70 chars + "..."
                assert!(s.ends_with("..."));
            }
            other => panic!("Expected capped JSON string, got {:?}", other),
        }
    }

    #[test]
    fn test_capture_unbounded_when_cap_disabled() {
        let template = MessageTemplate::with_max_captured_length("{data}", -1);
        let long_value: String = "x".repeat(200);
        let properties = template.bind_properties(vec![json!({ "payload": long_value })]);
        match properties.get("data") {
            Some(Value::String(s)) => {
                assert!(s.len() > 200);
                assert!(!s.ends_with("..."));
            }
            other => panic!("Expected uncapped JSON string, got {:?}", other),
        }
    }

    #[test]
    fn test_capture_structure_hint_keeps_full_value() {
        let template = MessageTemplate::new("{@data}");
        let long_value: String = "x".repeat(200);
        let value = json!({ "payload": long_value });
        let properties = template.bind_properties(vec![value.clone()]);
        assert_eq!(properties.get("data"), Some(&value));
    }

    #[test]
    fn test_capture_stringify_hint() {
        let template = MessageTemplate::new("{$n} {$s}");
        let properties = template.bind_properties(vec![json!(7), json!("already")]);
        assert_eq!(properties.get("n"), Some(&json!("7")));
        assert_eq!(properties.get("s"), Some(&json!("already")));
    }

    #[test]
    fn test_render_empty_properties_never_panics() {
        let template = MessageTemplate::new("{{literal}} and {missing}");
        assert_eq!(
            template.render(&PropertyMap::new()),
            "{literal} and {missing}"
        );
    }

    #[test]
    fn test_render_object_value_as_compact_json() {
        let template = MessageTemplate::new("{@obj}");
        let properties = template.bind_properties(vec![json!({"a": 1})]);
        assert_eq!(template.render(&properties), r#"{"a":1}"#);
    }

    #[test]
    fn test_tokens_cached_once() {
        let template = MessageTemplate::new("Hello {name}");
        let before = template.tokens().len();
        let _ = template.bind_properties(vec![json!("a")]);
        let _ = template.render(&PropertyMap::new());
        assert_eq!(template.tokens().len(), before);
    }
}
