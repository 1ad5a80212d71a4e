//! Bracket-depth scanning shared by the group splitter and the condition parser.

/// Walks `text`, yielding `(byte index, char, depth after char)` for every
/// character outside a quoted string literal.
///
/// `{` and `[` share one depth counter, as do `}` and `]`. A quote only opens
/// a literal at the start of a key or value (after `{`, `[`, `:`, `,` or at
/// the start of `text`), so `O'Brien` is plain text.
pub(crate) fn scan_depth(text: &str) -> impl Iterator<Item = (usize, char, i32)> + '_ {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;

    text.char_indices().filter_map(move |(idx, c)| {
        if let Some(q) = quote {
            if c == q {
                quote = None;
                prev = Some(c);
            }
            return None;
        }
        match c {
            '\'' | '"' if matches!(prev, None | Some('{' | '[' | ':' | ',')) => {
                quote = Some(c);
                return None;
            }
            '{' | '[' => depth += 1,
            '}' | ']' => depth -= 1,
            _ => {}
        }
        if !c.is_whitespace() {
            prev = Some(c);
        }
        Some((idx, c, depth))
    })
}

/// Split the argument list of `find(...)` into at most two raw groups.
///
/// ```text
/// {_id :23113} ,{name :1 ,age :1}  =>  ["{_id :23113}", "{name :1 ,age :1}"]
/// ```
///
/// Everything after the first group (minus one leading comma) is returned
/// verbatim as the second group; the condition parser rejects it if it is
/// malformed.
pub fn split_groups(args: &str) -> Vec<&str> {
    let args = args.trim();
    if !args.starts_with(['{', '[']) {
        return Vec::new();
    }

    let end = scan_depth(args)
        .find(|&(_, _, depth)| depth <= 0)
        .map(|(idx, c, _)| idx + c.len_utf8());

    // Unclosed first group: hand the whole text to the parser
    let Some(end) = end else {
        return vec![args];
    };

    let mut groups = vec![&args[..end]];
    let rest = args[end..].trim_start();
    let rest = rest.strip_prefix(',').unwrap_or(rest).trim();
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_two_groups() {
        assert_eq!(
            split_groups("{_id: 23113}, {name: 1, age: 1}"),
            vec!["{_id: 23113}", "{name: 1, age: 1}"]
        );
        assert_eq!(
            split_groups("{_id:23113},{name:1,age:1}"),
            vec!["{_id:23113}", "{name:1,age:1}"]
        );
    }

    #[test]
    fn test_split_empty() {
        assert!(split_groups("").is_empty());
        assert!(split_groups("   ").is_empty());
    }

    #[test]
    fn test_split_single_nested_group() {
        assert_eq!(
            split_groups(" {age :{$gte :21}} "),
            vec!["{age :{$gte :21}}"]
        );
        assert_eq!(
            split_groups("{$or :[{ticket_no : 725}, {winner: true}]}"),
            vec!["{$or :[{ticket_no : 725}, {winner: true}]}"]
        );
    }

    #[test]
    fn test_split_no_opening_bracket() {
        assert!(split_groups("name: 1").is_empty());
    }

    #[test]
    fn test_split_remainder_is_verbatim() {
        assert_eq!(
            split_groups("{a:1} , {b:1}, {c:1}"),
            vec!["{a:1}", "{b:1}, {c:1}"]
        );
    }

    #[test]
    fn test_split_trailing_comma_only() {
        assert_eq!(split_groups("{a:1} , "), vec!["{a:1}"]);
    }

    #[test]
    fn test_split_unclosed_group() {
        assert_eq!(split_groups("{a:{b:1}"), vec!["{a:{b:1}"]);
    }

    #[test]
    fn test_apostrophe_inside_word_is_not_a_quote() {
        assert_eq!(
            split_groups("{name: O'Brien}, {name: 1}"),
            vec!["{name: O'Brien}", "{name: 1}"]
        );
    }

    #[test]
    fn test_split_ignores_brackets_in_strings() {
        assert_eq!(
            split_groups("{name:'}'},{name:1}"),
            vec!["{name:'}'}", "{name:1}"]
        );
    }
}
