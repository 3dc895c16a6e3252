/// Returns the unqualified part of a type name.
///
/// Path separators of Rust (`::`), PHP-style namespaces (`\`) and route-ish names (`/`) are all accepted.
/// Generic arguments are dropped, so `store::Versioned<blog::Post>` yields `Versioned`.
pub fn basename(name: &str) -> &str {
    let name = name.split('<').next().unwrap_or(name).trim();
    let name = name.trim_end_matches(['\\', '/', ':']);

    let start = name
        .rfind("::")
        .map(|index| index + 2)
        .into_iter()
        .chain(name.rfind(['\\', '/']).map(|index| index + 1))
        .max()
        .unwrap_or(0);

    &name[start..]
}

/// Converts a type name into `snake_case`.
///
/// Every whitespace separated word is capitalized and joined, then an underscore is placed before each upper-case
/// ASCII letter that follows another character. `BlogPost` becomes `blog_post` and `HTTPRequest` becomes `h_t_t_p_request`.
pub fn snake_case(value: &str) -> String {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_lowercase()) {
        return value.to_owned();
    }

    let mut snake = String::with_capacity(value.len() + 4);
    let mut word_start = true;

    for c in value.chars() {
        if c.is_whitespace() {
            word_start = true;
            continue;
        }

        let starts_word = c.is_ascii_uppercase() || (word_start && c.is_ascii_lowercase());
        word_start = false;

        if starts_word && !snake.is_empty() {
            snake.push('_');
        }

        snake.extend(c.to_lowercase());
    }

    snake
}
