/// Маркер, по которому ищется текст цитаты (`<a title="view quote">`)
pub const VIEW_QUOTE_TITLE: &str = "view quote";

/// Маркер ссылки на автора (`<a title="view author">`)
pub const VIEW_AUTHOR_TITLE: &str = "view author";

/// Хвост заголовка раздела на странице "цитата дня"
pub const QUOTE_OF_THE_DAY_SUFFIX: &str = "Quote of the Day";

/// Темы, по которым идём, если фильтры не заданы
pub const DEFAULT_TOPICS: [&str; 10] = [
    "Motivational",
    "Friendship",
    "Love",
    "Smile",
    "Life",
    "Inspirational",
    "Family",
    "Nature",
    "Positive",
    "Attitude",
];

/// Цитата-заглушка: содержимое
pub const DEFAULT_QUOTE_CONTENT: &str = "Je pense, donc je suis.";
/// Цитата-заглушка: тема
pub const DEFAULT_QUOTE_TOPIC: &str = "Reason";
/// Цитата-заглушка: автор
pub const DEFAULT_QUOTE_AUTHOR: &str = "Rene Descartes";

/// Ширина строки (в словах) для [`crate::Quote::pretty`]
pub const PRETTY_WRAP_WORDS: usize = 7;
