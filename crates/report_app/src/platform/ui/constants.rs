use ratatui::style::Color;
use report_core::Theme;

pub const SEARCH_LABEL: &str = " Поиск по имени ";
pub const URL_LABEL: &str = " Источник данных (API) ";
pub const EXPORT_LABEL: &str = " Колонки для PDF ";
pub const LOADING_TEXT: &str = "Загрузка...";
pub const EXPORTING_TEXT: &str = "Формирование PDF...";
pub const EMPTY_TEXT: &str = "Нет записей";

pub const TABLE_HINTS: &[(&str, &str)] = &[
    ("/", "поиск"),
    ("u", "URL"),
    ("1-4", "сортировка"),
    ("F1-F4", "колонки"),
    ("←→", "страницы"),
    ("e", "PDF"),
    ("r", "обновить"),
    ("t", "тема"),
    ("Esc", "скрыть"),
    ("q", "выход"),
];
pub const SEARCH_HINTS: &[(&str, &str)] = &[("Enter/Esc", "к таблице")];
pub const URL_HINTS: &[(&str, &str)] = &[("Enter", "загрузить"), ("Esc", "отмена")];

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub header_fg: Color,
    pub header_bg: Color,
    pub stripe_bg: Color,
    pub error: Color,
    pub success: Color,
}

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(248, 250, 252),
    text: Color::Rgb(15, 23, 42),
    muted: Color::Rgb(100, 116, 139),
    accent: Color::Rgb(99, 102, 241),
    header_fg: Color::Rgb(255, 255, 255),
    header_bg: Color::Rgb(99, 102, 241),
    stripe_bg: Color::Rgb(238, 242, 255),
    error: Color::Rgb(220, 38, 38),
    success: Color::Rgb(22, 163, 74),
};

pub const DARK: Palette = Palette {
    background: Color::Rgb(15, 23, 42),
    text: Color::Rgb(226, 232, 240),
    muted: Color::Rgb(148, 163, 184),
    accent: Color::Rgb(129, 140, 248),
    header_fg: Color::Rgb(255, 255, 255),
    header_bg: Color::Rgb(67, 56, 202),
    stripe_bg: Color::Rgb(30, 41, 59),
    error: Color::Rgb(248, 113, 113),
    success: Color::Rgb(74, 222, 128),
};

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => LIGHT,
        Theme::Dark => DARK,
    }
}
