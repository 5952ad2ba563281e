//! Minimal XML-RPC codec.
//!
//! Covers the subset of XML-RPC these protocols exchange: `methodCall`
//! documents with string parameters, and `methodResponse` documents carrying
//! a string, int, boolean, string array, struct, or fault envelope. The
//! parser is deliberately lenient: it scans for the relevant elements rather
//! than validating the whole document.

use regex::Regex;
use std::sync::LazyLock;

static METHOD_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<methodName>\s*([^<]+?)\s*</methodName>").unwrap());

static PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<param>\s*<value>(.*?)</value>\s*</param>").unwrap());

static RESPONSE_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<params>\s*<param>\s*<value>(.*)</value>\s*</param>").unwrap());

static MEMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<member>\s*<name>\s*([^<]+?)\s*</name>\s*<value>(.*?)</value>\s*</member>")
        .unwrap()
});

static ARRAY_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<value>(.*?)</value>").unwrap());

static FAULT_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<name>\s*faultCode\s*</name>\s*<value>\s*(?:<int>|<i4>)?\s*(-?\d+)").unwrap()
});

static FAULT_STRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<name>\s*faultString\s*</name>\s*<value>\s*(?:<string>)?(.*?)(?:</string>)?\s*</value>")
        .unwrap()
});

/// Decoded XML-RPC value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i32),
    Bool(bool),
    Array(Vec<Value>),
    Struct(Vec<(String, Value)>),
}

impl Value {
    /// Coerces the value to display text, for captured replies.
    pub fn as_text(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            Value::Array(items) => items
                .iter()
                .map(Value::as_text)
                .collect::<Vec<_>>()
                .join(", "),
            Value::Struct(members) => members
                .iter()
                .map(|(k, v)| format!("{k}: {}", v.as_text()))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Looks up a struct member by name.
    pub fn member(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct(members) => members.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }
}

/// An inbound `methodCall` with its parameters coerced to strings.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub name: String,
    pub params: Vec<String>,
}

/// A decoded `methodResponse`.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcResponse {
    Value(Value),
    Fault { code: i32, message: String },
}

/// Codec-level decoding failures.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("missing methodName element")]
    MissingMethodName,

    #[error("missing response value")]
    MissingValue,
}

/// Escapes text for embedding in XML content.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Reverses [`escape`].
pub fn unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Builds a `methodCall` document with string parameters.
pub fn build_method_call(method: &str, params: &[&str]) -> String {
    let mut doc = String::from("<?xml version=\"1.0\"?>\n<methodCall>\n");
    doc.push_str(&format!("  <methodName>{}</methodName>\n", escape(method)));
    doc.push_str("  <params>\n");
    for param in params {
        doc.push_str(&format!(
            "    <param><value><string>{}</string></value></param>\n",
            escape(param)
        ));
    }
    doc.push_str("  </params>\n</methodCall>\n");
    doc
}

/// Builds a `methodResponse` carrying one string value.
pub fn build_string_response(value: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n<methodResponse>\n  <params>\n    <param><value><string>{}</string></value></param>\n  </params>\n</methodResponse>\n",
        escape(value)
    )
}

/// Builds a `methodResponse` carrying one int value.
pub fn build_int_response(value: i32) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n<methodResponse>\n  <params>\n    <param><value><int>{value}</int></value></param>\n  </params>\n</methodResponse>\n"
    )
}

/// Builds a `methodResponse` carrying an array of strings.
pub fn build_array_response(items: &[String]) -> String {
    let mut doc = String::from(
        "<?xml version=\"1.0\"?>\n<methodResponse>\n  <params>\n    <param><value><array><data>\n",
    );
    for item in items {
        doc.push_str(&format!(
            "      <value><string>{}</string></value>\n",
            escape(item)
        ));
    }
    doc.push_str("    </data></array></value></param>\n  </params>\n</methodResponse>\n");
    doc
}

/// Builds a `methodResponse` fault envelope.
pub fn build_fault(code: i32, message: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n<methodResponse>\n  <fault>\n    <value><struct>\n      <member><name>faultCode</name><value><int>{code}</int></value></member>\n      <member><name>faultString</name><value><string>{}</string></value></member>\n    </struct></value>\n  </fault>\n</methodResponse>\n",
        escape(message)
    )
}

/// Parses an inbound `methodCall` document.
///
/// Parameter values are coerced to strings; the two pingback methods and the
/// `weblogUpdates` calls only exchange string parameters.
pub fn parse_method_call(xml: &str) -> Result<MethodCall, CodecError> {
    let name = METHOD_NAME_RE
        .captures(xml)
        .and_then(|c| c.get(1))
        .map(|m| unescape(m.as_str()))
        .ok_or(CodecError::MissingMethodName)?;

    let params = PARAM_RE
        .captures_iter(xml)
        .filter_map(|c| c.get(1))
        .map(|m| parse_value(m.as_str()).as_text())
        .collect();

    Ok(MethodCall { name, params })
}

/// Parses a `methodResponse` document into a value or a fault.
pub fn parse_method_response(xml: &str) -> Result<RpcResponse, CodecError> {
    if xml.contains("<fault>") {
        let code = FAULT_CODE_RE
            .captures(xml)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        let message = FAULT_STRING_RE
            .captures(xml)
            .and_then(|c| c.get(1))
            .map(|m| unescape(m.as_str().trim()))
            .unwrap_or_default();
        return Ok(RpcResponse::Fault { code, message });
    }

    let inner = RESPONSE_VALUE_RE
        .captures(xml)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or(CodecError::MissingValue)?;

    Ok(RpcResponse::Value(parse_value(inner)))
}

fn parse_value(inner: &str) -> Value {
    let trimmed = inner.trim();

    if let Some(text) = strip_tag(trimmed, "string") {
        return Value::String(unescape(text));
    }
    for int_tag in ["int", "i4"] {
        if let Some(text) = strip_tag(trimmed, int_tag) {
            return match text.trim().parse() {
                Ok(i) => Value::Int(i),
                Err(_) => Value::String(unescape(text)),
            };
        }
    }
    if let Some(text) = strip_tag(trimmed, "boolean") {
        return Value::Bool(text.trim() == "1" || text.trim().eq_ignore_ascii_case("true"));
    }
    if trimmed.starts_with("<struct") {
        let members = MEMBER_RE
            .captures_iter(trimmed)
            .filter_map(|c| Some((c.get(1)?, c.get(2)?)))
            .map(|(name, value)| (unescape(name.as_str()), parse_value(value.as_str())))
            .collect();
        return Value::Struct(members);
    }
    if trimmed.starts_with("<array") {
        let items = ARRAY_VALUE_RE
            .captures_iter(trimmed)
            .filter_map(|c| c.get(1))
            .map(|m| parse_value(m.as_str()))
            .collect();
        return Value::Array(items);
    }

    // Untyped <value> content is a string per the XML-RPC specification.
    Value::String(unescape(trimmed))
}

fn strip_tag<'a>(s: &'a str, tag: &str) -> Option<&'a str> {
    if s == format!("<{tag}/>") {
        return Some("");
    }
    s.strip_prefix(&format!("<{tag}>"))?
        .strip_suffix(&format!("</{tag}>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_round_trip() {
        let raw = r#"a < b & c > "d" 'e'"#;
        assert_eq!(unescape(&escape(raw)), raw);
    }

    #[test]
    fn test_build_and_parse_method_call() {
        let doc = build_method_call(
            "pingback.ping",
            &["http://a.example/post/", "http://b.example/entry/"],
        );
        let call = parse_method_call(&doc).unwrap();
        assert_eq!(call.name, "pingback.ping");
        assert_eq!(
            call.params,
            vec![
                "http://a.example/post/".to_string(),
                "http://b.example/entry/".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_method_call_untyped_values() {
        let doc = "<?xml version=\"1.0\"?><methodCall><methodName>pingback.ping</methodName>\
            <params><param><value>http://a.example/?x=1&amp;y=2</value></param></params></methodCall>";
        let call = parse_method_call(doc).unwrap();
        assert_eq!(call.params, vec!["http://a.example/?x=1&y=2".to_string()]);
    }

    #[test]
    fn test_parse_method_call_without_name_fails() {
        assert!(matches!(
            parse_method_call("<methodCall></methodCall>"),
            Err(CodecError::MissingMethodName)
        ));
    }

    #[test]
    fn test_parse_string_response() {
        let doc = build_string_response("Pingback registered.");
        assert_eq!(
            parse_method_response(&doc).unwrap(),
            RpcResponse::Value(Value::String("Pingback registered.".to_string()))
        );
    }

    #[test]
    fn test_parse_int_response() {
        let doc = build_int_response(48);
        assert_eq!(
            parse_method_response(&doc).unwrap(),
            RpcResponse::Value(Value::Int(48))
        );
    }

    #[test]
    fn test_parse_array_response() {
        let doc = build_array_response(&["http://a.example/".to_string(), "http://b.example/".to_string()]);
        let RpcResponse::Value(Value::Array(items)) = parse_method_response(&doc).unwrap() else {
            panic!("expected array");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Value::String("http://a.example/".to_string()));
    }

    #[test]
    fn test_parse_struct_response() {
        let doc = "<?xml version=\"1.0\"?><methodResponse><params><param><value><struct>\
            <member><name>flerror</name><value><boolean>0</boolean></value></member>\
            <member><name>message</name><value><string>Thanks for the ping.</string></value></member>\
            </struct></value></param></params></methodResponse>";
        let RpcResponse::Value(value) = parse_method_response(doc).unwrap() else {
            panic!("expected value");
        };
        assert_eq!(value.member("flerror"), Some(&Value::Bool(false)));
        assert_eq!(
            value.member("message"),
            Some(&Value::String("Thanks for the ping.".to_string()))
        );
    }

    #[test]
    fn test_parse_fault_response() {
        let doc = build_fault(-32601, "server error. requested method not found");
        assert_eq!(
            parse_method_response(&doc).unwrap(),
            RpcResponse::Fault {
                code: -32601,
                message: "server error. requested method not found".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_empty_response_fails() {
        assert!(matches!(
            parse_method_response("<methodResponse></methodResponse>"),
            Err(CodecError::MissingValue)
        ));
    }
}
