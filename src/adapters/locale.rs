use crate::domain::ports::LocaleProvider;
use std::env;

const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

/// Reads the ambient locale from the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvLocale;

impl EnvLocale {
    pub fn new() -> Self {
        Self
    }
}

impl LocaleProvider for EnvLocale {
    fn default_encoding(&self) -> Option<String> {
        // 第一個非空的變數決定語系，與 setlocale 的優先順序相同
        let value = LOCALE_VARS
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|val| !val.is_empty())?;
        charset_of(&value)
    }
}

/// A locale fixed at construction, for overrides and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocale(Option<String>);

impl FixedLocale {
    pub fn new(encoding: impl Into<String>) -> Self {
        Self(Some(encoding.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl LocaleProvider for FixedLocale {
    fn default_encoding(&self) -> Option<String> {
        self.0.clone()
    }
}

/// `zh_TW.UTF-8@latin` -> `UTF-8`. `C` and `POSIX` declare no charset.
pub fn charset_of(locale: &str) -> Option<String> {
    let locale = locale.split('@').next().unwrap_or(locale);
    if locale == "C" || locale == "POSIX" {
        return None;
    }
    locale
        .split_once('.')
        .map(|(_, charset)| charset.to_string())
        .filter(|charset| !charset.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_of() {
        assert_eq!(charset_of("zh_TW.UTF-8"), Some("UTF-8".to_string()));
        assert_eq!(charset_of("en_US.ISO-8859-1@euro"), Some("ISO-8859-1".to_string()));
        assert_eq!(charset_of("C.UTF-8"), Some("UTF-8".to_string()));
        assert_eq!(charset_of("C"), None);
        assert_eq!(charset_of("POSIX"), None);
        assert_eq!(charset_of("en_US"), None);
        assert_eq!(charset_of("en_US."), None);
    }

    #[test]
    fn test_fixed_locale() {
        assert_eq!(FixedLocale::new("utf-8").default_encoding(), Some("utf-8".to_string()));
        assert_eq!(FixedLocale::none().default_encoding(), None);
    }

    #[test]
    fn test_env_locale_lookup_order() {
        let saved: Vec<(&str, Option<String>)> =
            LOCALE_VARS.iter().map(|var| (*var, env::var(var).ok())).collect();

        // 空字串的 LC_ALL 不算數，往下找 LC_CTYPE
        env::set_var("LC_ALL", "");
        env::set_var("LC_CTYPE", "en_US.ISO-8859-1");
        env::set_var("LANG", "en_US.UTF-8");
        let skipped_empty = EnvLocale::new().default_encoding();

        env::set_var("LC_ALL", "C");
        let c_wins = EnvLocale::new().default_encoding();

        env::remove_var("LC_ALL");
        env::remove_var("LC_CTYPE");
        let lang_only = EnvLocale::new().default_encoding();

        for (var, value) in saved {
            match value {
                Some(value) => env::set_var(var, value),
                None => env::remove_var(var),
            }
        }

        assert_eq!(skipped_empty, Some("ISO-8859-1".to_string()));
        assert_eq!(c_wins, None);
        assert_eq!(lang_only, Some("UTF-8".to_string()));
    }
}
