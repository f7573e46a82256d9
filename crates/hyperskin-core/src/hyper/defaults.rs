//! The complete default Hyper configuration.
//!
//! Every read is deep-merged over this value, so every key listed here is
//! always present in a loaded [`HyperConfig`](super::HyperConfig).

use std::sync::LazyLock;

use crate::jsliteral::{Object, Value};

pub static DEFAULT_HYPER_CONFIG: LazyLock<Value> = LazyLock::new(build_default_config);

fn obj<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Object(entries.into_iter().collect::<Object>())
}

fn s(text: &str) -> Value {
    Value::String(text.to_string())
}

fn n(number: f64) -> Value {
    Value::Number(number)
}

fn b(flag: bool) -> Value {
    Value::Bool(flag)
}

fn build_default_config() -> Value {
    let colors = obj([
        ("black", s("#000000")),
        ("red", s("#C51E14")),
        ("green", s("#1DC121")),
        ("yellow", s("#C7C329")),
        ("blue", s("#0A2FC4")),
        ("magenta", s("#C839C5")),
        ("cyan", s("#20C5C6")),
        ("white", s("#C7C7C7")),
        ("lightBlack", s("#686868")),
        ("lightRed", s("#FD6F6B")),
        ("lightGreen", s("#67F86F")),
        ("lightYellow", s("#FFFA72")),
        ("lightBlue", s("#6A76FB")),
        ("lightMagenta", s("#FD7CFC")),
        ("lightCyan", s("#68FDFE")),
        ("lightWhite", s("#FFFFFF")),
    ]);

    let config = obj([
        ("fontSize", n(14.0)),
        (
            "fontFamily",
            s(r#""JetBrains Mono", Menlo, "DejaVu Sans Mono", Consolas, "Lucida Console", monospace"#),
        ),
        ("fontWeight", s("normal")),
        ("fontWeightBold", s("bold")),
        ("lineHeight", n(1.2)),
        ("letterSpacing", n(0.0)),
        ("cursorColor", s("rgba(248,28,229,0.8)")),
        ("cursorAccentColor", s("#000")),
        ("cursorShape", s("BLOCK")),
        ("cursorBlink", b(false)),
        ("foregroundColor", s("#fff")),
        ("backgroundColor", s("#000")),
        ("selectionColor", s("rgba(248,28,229,0.3)")),
        ("borderColor", s("#333")),
        ("css", s("")),
        ("termCSS", s("")),
        ("workingDirectory", s("")),
        ("showHamburgerMenu", s("")),
        ("showWindowControls", s("")),
        ("padding", s("12px 14px")),
        ("colors", colors),
        ("shell", s("")),
        ("shellArgs", Value::Array(Vec::new())),
        ("env", obj([])),
        ("bell", s("SOUND")),
        ("copyOnSelect", b(false)),
        ("defaultSSHApp", b(true)),
        ("quickEdit", b(false)),
        ("webGLRenderer", b(true)),
        ("disableLigatures", b(false)),
        ("disableAutoUpdates", b(false)),
        ("screenReaderMode", b(false)),
        ("preserveCWD", b(true)),
        ("macOptionSelectionMode", s("vertical")),
        ("webLinksActivationKey", s("")),
    ]);

    obj([
        ("config", config),
        ("plugins", Value::Array(Vec::new())),
        ("localPlugins", Value::Array(Vec::new())),
        ("keymaps", obj([])),
    ])
}
