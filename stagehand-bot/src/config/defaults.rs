//! Default configuration values
//!
//! Template written by `stagehand --init-config`.

/// Default configuration as TOML
pub const DEFAULT_CONFIG_TOML: &str = r##"
# stagehand configuration

[account]
# Bot login name. Leave username/token unset to connect anonymously
# (the bot still reacts to rewards/commands but never replies in chat).
# username = "mybot"
# Chat token; prefer the STAGEHAND_TOKEN environment variable.
# token = "oauth:..."
channels = []

[commands]
prefix = "!"

[rewards]
# Channel-point reward ids. Only rewards with the text-input option
# carry the redeemer's message through chat.
theme = ""
font = ""

[editor]
# Uncomment to override the OS-dependent VS Code settings location.
# settings_path = "/home/me/.config/Code/User/settings.json"

[theme]
# Theme names are case sensitive in the editor; spell them exactly.
catalog = [
    "One Dark Pro",
    "One Dark Pro Flat",
    "GitHub Dark",
    "One Monokai",
    "Monokai",
    "Abyss",
    "Solarized Dark",
    "Tomorrow Night Blue",
]
default = "One Dark Pro Flat"
reset_secs = 300

[font]
# Only fonts installed on this machine will render.
catalog = [
    "Consolas",
    "Fira Code",
    "Source Code Pro",
    "Input Mono Narrow",
    "Noto Sans Mono",
]
default = "Input Mono Narrow"
reset_secs = 300

[font_size]
min = 10
max = 20
default = 16
# 0 keeps the adjusted size until changed again.
reset_secs = 0
"##;
