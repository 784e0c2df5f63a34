//! SQL `LIKE` pattern matching (`%`, `_`, backslash escape).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Any,
    One,
    Char(char),
}

fn tokenize(pattern: &str, fold: bool) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        let token = match c {
            '%' => Token::Any,
            '_' => Token::One,
            '\\' => Token::Char(chars.next().unwrap_or('\\')),
            other => Token::Char(other),
        };
        tokens.push(match token {
            Token::Char(c) if fold => Token::Char(fold_char(c)),
            t => t,
        });
    }
    tokens
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Whether `text` matches `pattern`; `case_insensitive` gives `ILIKE`.
pub(crate) fn like_match(text: &str, pattern: &str, case_insensitive: bool) -> bool {
    let tokens = tokenize(pattern, case_insensitive);
    let text: Vec<char> = if case_insensitive {
        text.chars().map(fold_char).collect()
    } else {
        text.chars().collect()
    };

    // Greedy matching with backtracking to the last `%`.
    let (mut t, mut p) = (0usize, 0usize);
    let mut star: Option<(usize, usize)> = None;
    while t < text.len() {
        match tokens.get(p) {
            Some(Token::Any) => {
                star = Some((p, t));
                p += 1;
            }
            Some(Token::One) => {
                t += 1;
                p += 1;
            }
            Some(Token::Char(c)) if *c == text[t] => {
                t += 1;
                p += 1;
            }
            _ => match star {
                Some((sp, st)) => {
                    p = sp + 1;
                    t = st + 1;
                    star = Some((sp, st + 1));
                }
                None => return false,
            },
        }
    }
    tokens[p..].iter().all(|tok| *tok == Token::Any)
}
