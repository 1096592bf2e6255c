/// Remove the `extends` clause from the declaration of `class_name`.
///
/// Handles generic arguments and comma-separated interface lists; stops at
/// `implements` or the opening brace. Text without a matching declaration is
/// returned unchanged.
pub fn strip_extends(text: &str, class_name: &str) -> String {
    let Some(name_end) = find_declaration(text, class_name) else {
        return text.to_string();
    };
    let after_generics = skip_generics(text, name_end);
    let rest = &text[after_generics..];
    let trimmed = rest.trim_start();
    let Some(clause) = trimmed.strip_prefix("extends") else {
        return text.to_string();
    };
    if !clause.starts_with(char::is_whitespace) {
        return text.to_string();
    }
    let clause_start = after_generics + (rest.len() - trimmed.len()) + "extends".len();
    let clause_end = clause_end(text, clause_start);
    format!("{} {}", &text[..after_generics], &text[clause_end..])
}

fn is_ident(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Byte offset just past the class name of its `class`/`interface` declaration.
fn find_declaration(text: &str, class_name: &str) -> Option<usize> {
    for keyword in ["class", "interface"] {
        let needle = format!("{keyword} {class_name}");
        for (index, _) in text.match_indices(&needle) {
            let before_ok = text[..index].chars().next_back().is_none_or(|c| !is_ident(c));
            let end = index + needle.len();
            let after_ok = text[end..].chars().next().is_none_or(|c| !is_ident(c));
            if before_ok && after_ok {
                return Some(end);
            }
        }
    }
    None
}

fn skip_generics(text: &str, start: usize) -> usize {
    let rest = &text[start..];
    let trimmed = rest.trim_start();
    if !trimmed.starts_with('<') {
        return start;
    }
    let open = start + (rest.len() - trimmed.len());
    let mut depth = 0usize;
    for (offset, c) in text[open..].char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return open + offset + 1;
                }
            }
            _ => {}
        }
    }
    start
}

/// Offset of `implements` or `{` that closes an extends clause, or where the
/// clause's trailing whitespace begins.
fn clause_end(text: &str, start: usize) -> usize {
    let mut depth = 0usize;
    let mut end = text.len();
    for (offset, c) in text[start..].char_indices() {
        let index = start + offset;
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            '{' if depth == 0 => {
                end = index;
                break;
            }
            'i' if depth == 0 && text[index..].starts_with("implements") => {
                let before_ok = text[..index].chars().next_back().is_none_or(|c| !is_ident(c));
                let after_ok = text[index + "implements".len()..]
                    .chars()
                    .next()
                    .is_none_or(|c| !is_ident(c));
                if before_ok && after_ok {
                    end = index;
                    break;
                }
            }
            _ => {}
        }
    }
    end
}
