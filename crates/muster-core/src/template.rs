use muster_model::HostRecord;

/// Interpolate `{field}` placeholders in `template` against a host's fields.
///
/// Returns `None` when any referenced field is absent or non-scalar, or when
/// the template itself is malformed (unclosed or stray brace). `{{` and `}}`
/// render literal braces.
pub fn interpolate(template: &str, host: &HostRecord) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => field.push(ch),
                        None => return None,
                    }
                }
                out.push_str(&host.field_str(&field)?);
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return None;
                }
            }
            _ => out.push(c),
        }
    }

    Some(out)
}
