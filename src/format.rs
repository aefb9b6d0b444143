//! Text forms of index values as they appear on the dashboard.

use serde_json::Value;

pub const NOT_AVAILABLE: &str = "N/A";

/// Renders a number the way a browser prints it: shortest round-trip digits,
/// exponent form outside `[1e-6, 1e21)`.
pub fn js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    format!("{value}")
}

/// `Number.prototype.toFixed`: exact halves round away from zero.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return js_number(value);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    let expanded = format!("{:.*}", digits + 25, magnitude);
    let Some((int_part, frac)) = expanded.split_once('.') else {
        return format!("{sign}{expanded}");
    };
    let tail = &frac[digits..];
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    let rounded = if is_tie {
        let truncated = if digits == 0 {
            int_part.to_string()
        } else {
            format!("{int_part}.{}", &frac[..digits])
        };
        increment_last_digit(&truncated)
    } else {
        format!("{:.*}", digits, magnitude)
    };
    format!("{sign}{rounded}")
}

/// Adds one unit in the last place of a plain decimal string.
fn increment_last_digit(number: &str) -> String {
    let mut bytes = number.as_bytes().to_vec();
    for byte in bytes.iter_mut().rev() {
        match *byte {
            b'.' => continue,
            b'9' => *byte = b'0',
            _ => {
                *byte += 1;
                return String::from_utf8_lossy(&bytes).into_owned();
            }
        }
    }
    format!("1{}", String::from_utf8_lossy(&bytes))
}

pub fn value_or_na(value: Option<f64>) -> String {
    value.map(js_number).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Bachi is shown as a percentage with two decimals.
pub fn percent_or_na(value: Option<f64>) -> String {
    value
        .map(|v| format!("{}%", to_fixed(v, 2)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Chart axis label for an `Age` cell, which may be numeric or text.
pub fn label_text(value: &Value) -> String {
    match value {
        Value::Number(n) => n.as_f64().map(js_number).unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON that is safe to place inside a `<script>` element.
pub fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}
