use std::convert::Infallible;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::constants::PRETTY_WRAP_WORDS;
use crate::types::Quote;

/// Способ отрисовки цитаты в текст.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Только текст цитаты
    Content,
    /// `--- author`, выровненный по правому краю текста
    Signature,
    /// `{content} --- {author}` одной строкой
    Tight,
    /// `Tight`, разбитый на строки по N слов
    Wrapped(NonZeroUsize),
    /// Текст, перевод строки, подпись
    #[default]
    Default,
}

impl Format {
    /// Формат для [`Quote::pretty`]
    pub fn pretty() -> Self {
        NonZeroUsize::new(PRETTY_WRAP_WORDS).map_or(Self::Default, Self::Wrapped)
    }
}

/// Разбор строкового селектора: `content`, `signature`, `tight`, `<N>`.
/// Всё остальное (включая `0`) - [`Format::Default`].
impl FromStr for Format {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fmt = match s {
            "content" => Self::Content,
            "signature" => Self::Signature,
            "tight" => Self::Tight,
            // Переполнение usize - ширина usize::MAX, т.е. одна строка
            digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                NonZeroUsize::new(digits.parse::<usize>().unwrap_or(usize::MAX))
                    .map_or(Self::Default, Self::Wrapped)
            }
            _ => Self::Default,
        };
        Ok(fmt)
    }
}

impl Quote {
    /// Отрисовать цитату в выбранном формате
    pub fn render(&self, format: Format) -> String {
        match format {
            Format::Content => self.content().to_string(),
            Format::Signature => self.signature(),
            Format::Tight => format!("{} --- {}", self.content(), self.author()),
            Format::Wrapped(width) => wrap_words(&self.render(Format::Tight), width.get()),
            Format::Default => format!("{}\n{}", self.content(), self.signature()),
        }
    }

    fn signature(&self) -> String {
        let width = self.content().chars().count();
        format!("{:>width$}", format!("--- {}", self.author()))
    }

    /// HTML-фрагмент `<div class="quote">`. Спецсимволы не экранируются.
    pub fn to_html(&self) -> String {
        html_fragment(self.content(), self.author())
    }

    /// XML-фрагмент `<quote>`. Спецсимволы не экранируются.
    pub fn to_xml(&self) -> String {
        xml_fragment(self.content(), self.author())
    }

    /// Как [`Quote::to_html`], но с экранированием `& < > " '`
    pub fn to_html_escaped(&self) -> String {
        html_fragment(&escape_markup(self.content()), &escape_markup(self.author()))
    }

    /// Как [`Quote::to_xml`], но с экранированием `& < > " '`
    pub fn to_xml_escaped(&self) -> String {
        xml_fragment(&escape_markup(self.content()), &escape_markup(self.author()))
    }
}

fn html_fragment(content: &str, author: &str) -> String {
    format!(
        "\n  <div class=\"quote\">\n    <div class=\"content\">{content}</div>\n    <div class=\"author\">--- {author}</div>\n  </div>"
    )
}

fn xml_fragment(content: &str, author: &str) -> String {
    format!(
        "\n  <quote>\n    <content>{content}</content>\n    <author>--- {author}</author>\n  </quote>"
    )
}

// слова режутся по одиночному пробелу, поэтому склейка строк обратно даёт исходник
fn wrap_words(text: &str, width: usize) -> String {
    let words: Vec<&str> = text.split(' ').collect();
    words
        .chunks(width)
        .map(|line| line.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
