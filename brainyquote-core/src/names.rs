/// Нормализует имя автора: каждое слово (разделитель - одиночный пробел)
/// с заглавной буквы, остальные буквы строчные.
///
/// `e. e. cummings` -> `E. E. Cummings`
///
/// Инициалы, дефисы и частицы ("von", "de") отдельно не обрабатываются.
pub fn fix(name: &str) -> String {
    name.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
}

/// Первая буква в titlecase, остальные строчные (пустая строка остаётся пустой).
///
/// `ß` -> `Ss`, `ﬁ` -> `Fi`, `ǆ` -> `ǅ`: если заглавная форма первой буквы
/// состоит из нескольких символов, заглавным остаётся только первый.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(word.len());
    match titlecase_digraph(first) {
        Some(title) => out.push(title),
        None => {
            let mut upper = first.to_uppercase();
            out.extend(upper.next());
            out.extend(upper.flat_map(char::to_lowercase));
        }
    }
    out.extend(chars.flat_map(char::to_lowercase));
    out
}

// Диграфы, у которых titlecase отличается и от заглавной, и от строчной формы
fn titlecase_digraph(c: char) -> Option<char> {
    match c {
        '\u{01C4}'..='\u{01C6}' => Some('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => Some('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => Some('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => Some('\u{01F2}'),
        _ => None,
    }
}
