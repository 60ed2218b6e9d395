use std::borrow::Cow;

use crate::error::Error;

/// Resolve the predefined entities and character references in parsed text.
pub(crate) fn parse_entities(content: Cow<'_, str>) -> Result<Cow<'_, str>, Error> {
    if !content.contains('&') {
        return Ok(content);
    }
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '&' {
            result.push(c);
            continue;
        }
        let mut entity = String::new();
        let mut is_complete = false;
        for c in chars.by_ref() {
            if c == ';' {
                is_complete = true;
                break;
            }
            entity.push(c);
        }
        if !is_complete {
            return Err(Error::UnclosedEntity(entity));
        }
        match entity.as_str() {
            "amp" => result.push('&'),
            "apos" => result.push('\''),
            "gt" => result.push('>'),
            "lt" => result.push('<'),
            "quot" => result.push('"'),
            _ => result.push(parse_char_reference(&entity)?),
        }
    }
    Ok(result.into())
}

fn parse_char_reference(entity: &str) -> Result<char, Error> {
    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(decimal) = entity.strip_prefix('#') {
        decimal.parse::<u32>().ok()
    } else {
        None
    };
    code.and_then(char::from_u32)
        .ok_or_else(|| Error::InvalidEntity(entity.to_string()))
}

/// Escape text content.
pub(crate) fn serialize_text(content: &str) -> Cow<'_, str> {
    escape(content, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    })
}

/// Escape an attribute value for use between double quotes.
pub(crate) fn serialize_attribute(content: &str) -> Cow<'_, str> {
    escape(content, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '"' => Some("&quot;"),
        '\n' => Some("&#10;"),
        '\r' => Some("&#13;"),
        '\t' => Some("&#9;"),
        _ => None,
    })
}

fn escape<F>(content: &str, replacement: F) -> Cow<'_, str>
where
    F: Fn(char) -> Option<&'static str>,
{
    if !content.chars().any(|c| replacement(c).is_some()) {
        return Cow::Borrowed(content);
    }
    let mut result = String::with_capacity(content.len() + 8);
    for c in content.chars() {
        match replacement(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let text = "A &amp; B";
        assert_eq!(parse_entities(text.into()).unwrap(), "A & B");
    }

    #[test]
    fn test_parse_multiple() {
        let text = "&amp;&apos;&gt;&lt;&quot;";
        assert_eq!(parse_entities(text.into()).unwrap(), "&'><\"");
    }

    #[test]
    fn test_parse_char_references() {
        let text = "&#65;&#x42;&#x1F600;";
        assert_eq!(parse_entities(text.into()).unwrap(), "AB\u{1F600}");
    }

    #[test]
    fn test_parse_unknown_entity() {
        let err = parse_entities("&unknown;".into()).unwrap_err();
        assert!(matches!(err, Error::InvalidEntity(entity) if entity == "unknown"));
    }

    #[test]
    fn test_parse_invalid_char_reference() {
        let err = parse_entities("&#xD800;".into()).unwrap_err();
        assert!(matches!(err, Error::InvalidEntity(_)));
    }

    #[test]
    fn test_parse_unfinished_entity() {
        let err = parse_entities("&amp".into()).unwrap_err();
        assert!(matches!(err, Error::UnclosedEntity(entity) if entity == "amp"));
    }

    #[test]
    fn test_parse_no_entities() {
        let text = "hello";
        let result = parse_entities(text.into()).unwrap();
        // this is the same slice
        assert!(std::ptr::eq(text, result.as_ref()));
    }

    #[test]
    fn test_serialize_text() {
        assert_eq!(serialize_text("A & B < C > D \""), "A &amp; B &lt; C &gt; D \"");
    }

    #[test]
    fn test_serialize_attribute() {
        assert_eq!(
            serialize_attribute("say \"hi\"\n& <go>"),
            "say &quot;hi&quot;&#10;&amp; &lt;go>"
        );
    }

    #[test]
    fn test_serialize_no_entities() {
        let text = "hello";
        let result = serialize_text(text);
        // this is the same slice
        assert!(std::ptr::eq(text, result.as_ref()));
    }
}
