//! Host background color resolution.
//!
//! Resolved fresh before every rewrite so a theme switch is honored on the
//! very next element; nothing is cached here.

use crate::models::{RecolorConfig, Theme};

/// Read-back of effective background colors from the host environment.
pub trait BackgroundProbe {
    /// Effective background of the document's primary content root.
    fn content_background(&self) -> Option<String>;

    /// Effective background of the outer application-shell container.
    fn shell_background(&self) -> Option<String>;

    /// The host's binary theme flag, used only as the last fallback.
    fn theme(&self) -> Theme;
}

/// Values the host reports for "no background here".
const TRANSPARENT_TOKENS: &[&str] = &["", "transparent", "rgba(0, 0, 0, 0)", "rgba(0,0,0,0)"];

/// Resolve the color that white artwork should become.
///
/// Chain: content root, then application shell, then a theme-keyed
/// constant. Always terminates in a concrete color.
pub fn resolve_background(probe: &impl BackgroundProbe, config: &RecolorConfig) -> String {
    if let Some(background) = usable(probe.content_background()) {
        return background;
    }
    if let Some(background) = usable(probe.shell_background()) {
        return background;
    }

    let fallback = if probe.theme().is_dark() {
        config.dark_fallback.clone()
    } else {
        config.light_fallback.clone()
    };
    tracing::debug!(theme = ?probe.theme(), background = %fallback, "No container background, using theme fallback");
    fallback
}

fn usable(value: Option<String>) -> Option<String> {
    value.filter(|v| !TRANSPARENT_TOKENS.contains(&v.trim().to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeProbe {
        content: Option<String>,
        shell: Option<String>,
        theme: Theme,
    }

    impl BackgroundProbe for FakeProbe {
        fn content_background(&self) -> Option<String> {
            self.content.clone()
        }

        fn shell_background(&self) -> Option<String> {
            self.shell.clone()
        }

        fn theme(&self) -> Theme {
            self.theme
        }
    }

    fn probe(content: Option<&str>, shell: Option<&str>, theme: Theme) -> FakeProbe {
        FakeProbe {
            content: content.map(str::to_string),
            shell: shell.map(str::to_string),
            theme,
        }
    }

    #[test]
    fn test_content_background_wins() {
        let p = probe(Some("rgb(30, 30, 30)"), Some("#111"), Theme::Dark);
        assert_eq!(
            resolve_background(&p, &RecolorConfig::default()),
            "rgb(30, 30, 30)"
        );
    }

    #[test]
    fn test_transparent_content_falls_through_to_shell() {
        for token in ["", "transparent", "rgba(0, 0, 0, 0)", "rgba(0,0,0,0)", "TRANSPARENT"] {
            let p = probe(Some(token), Some("#111"), Theme::Dark);
            assert_eq!(resolve_background(&p, &RecolorConfig::default()), "#111");
        }
    }

    #[test]
    fn test_dark_theme_fallback() {
        let p = probe(None, Some("transparent"), Theme::Dark);
        assert_eq!(resolve_background(&p, &RecolorConfig::default()), "#202020");
    }

    #[test]
    fn test_light_theme_fallback() {
        let p = probe(None, None, Theme::Light);
        assert_eq!(resolve_background(&p, &RecolorConfig::default()), "white");
    }

    #[test]
    fn test_configured_fallback_overrides_default() {
        let config = RecolorConfig {
            dark_fallback: "#101010".to_string(),
            ..RecolorConfig::default()
        };
        let p = probe(None, None, Theme::Dark);
        assert_eq!(resolve_background(&p, &config), "#101010");
    }
}
