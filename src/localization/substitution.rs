//! Placeholder substitution for catalog messages

/// Replace `{{KEY}}` placeholders in `template` with values from a JSON object.
///
/// The template is scanned once, so substituted values are never expanded again.
/// Non-object variables leave the template untouched. Placeholders without a
/// matching variable are kept as-is.
pub fn substitute_variables(template: &str, variables: &serde_json::Value) -> String {
    let vars = match variables {
        serde_json::Value::Object(map) => map,
        _ => return template.to_string(),
    };

    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        result.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        let Some(close) = after_open.find("}}") else {
            result.push_str(&rest[open..]);
            return result;
        };

        let key = &after_open[..close];
        match vars.get(key) {
            Some(value) => result.push_str(&render_value(value)),
            None => {
                result.push_str("{{");
                result.push_str(key);
                result.push_str("}}");
            }
        }
        rest = &after_open[close + 2..];
    }

    result.push_str(rest);
    result
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => String::new(),
        // Arrays and objects render as JSON
        _ => value.to_string(),
    }
}
