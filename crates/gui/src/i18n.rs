use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lang {
    #[default]
    En,
    Ru,
}

impl Lang {
    pub fn display_name(self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Ru => "Русский",
        }
    }

    pub fn all() -> &'static [Lang] {
        &[Lang::En, Lang::Ru]
    }
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=En (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::Ru,
        _ => Lang::En,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::En => 0,
            Lang::Ru => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
///
/// Part titles and descriptions come from the part table and are not translated.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Navigation ──────────────────────────────────────
        "nav.home" => if ru { "Главная" } else { "Home" },
        "nav.lathe" => if ru { "Интерактивный станок" } else { "Interactive Lathe" },
        "nav.settings" => if ru { "Настройки" } else { "Settings" },
        "nav.language" => if ru { "Язык" } else { "Language" },
        "nav.quit" => if ru { "Выход" } else { "Quit" },

        // ── Home page ───────────────────────────────────────
        "home.title" => if ru { "Токарный станок в разобранном виде" } else { "Lathe Exploded Diagram" },
        "home.subtitle" => if ru {
            "Изучите основные узлы токарного станка в 3D."
        } else {
            "Explore the main assemblies of a metal lathe in 3D."
        },
        "home.open" => if ru { "Открыть интерактивный станок →" } else { "Open the interactive lathe →" },

        // ── Explorer ────────────────────────────────────────
        "lathe.hint" => if ru {
            "Вращайте мышью (левая кнопка) и масштабируйте колесом. Нажмите на узел, чтобы узнать подробности."
        } else {
            "Use mouse to rotate (Left Click) and zoom (Scroll). Click components for details."
        },
        "overlay.close" => if ru { "Закрыть" } else { "Close" },

        // ── Status bar ──────────────────────────────────────
        "status.hovered" => if ru { "Под курсором" } else { "Hovered" },
        "status.selected" => if ru { "Выбрано" } else { "Selected" },
        "status.none" => if ru { "нет" } else { "none" },
        "status.parts" => if ru { "Узлов" } else { "Parts" },
        "status.ready" => if ru { "Готово" } else { "Ready" },

        // ── Camera readout ──────────────────────────────────
        "camera.azimuth" => if ru { "Азимут" } else { "Azimuth" },
        "camera.polar" => if ru { "Наклон" } else { "Polar" },
        "camera.distance" => if ru { "Дистанция" } else { "Distance" },

        // ── Settings window ─────────────────────────────────
        "settings.title" => if ru { "Настройки" } else { "Settings" },
        "settings.viewport" => if ru { "Вьюпорт" } else { "Viewport" },
        "settings.background" => if ru { "Цвет фона:" } else { "Background:" },
        "settings.camera_info" => if ru { "Показывать параметры камеры" } else { "Show camera info" },
        "settings.interface" => if ru { "Интерфейс" } else { "Interface" },
        "settings.font_size" => if ru { "Размер шрифта:" } else { "Font size:" },
        "settings.language" => if ru { "Язык:" } else { "Language:" },
        "settings.reset" => if ru { "Сбросить по умолчанию" } else { "Reset to defaults" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        _ => {
            tracing::trace!("missing translation key '{key}'");
            "???"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english() {
        assert_eq!(Lang::default(), Lang::En);
        assert_eq!(
            t("lathe.hint"),
            "Use mouse to rotate (Left Click) and zoom (Scroll). Click components for details."
        );
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(t("no.such.key"), "???");
    }
}
