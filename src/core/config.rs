use winsys::input::MouseBinding;

use std::env;
use std::path::Path;
use std::path::PathBuf;

pub const FIFO_VAR: &str = "YAXWM_FIFO";
pub const CONF_VAR: &str = "YAXWM_CONF";
pub const DEFAULT_FIFO: &str = concat!("/tmp/", WM_NAME!(), ".fifo");

/// Process-level configuration resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub fifo: PathBuf,
    pub reply_fifo: PathBuf,
    pub script: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        let fifo = env::var(FIFO_VAR).ok();

        if fifo.is_none() {
            // the startup script talks to us through this
            env::set_var(FIFO_VAR, DEFAULT_FIFO);
        }

        Self::resolve(
            fifo,
            env::var(CONF_VAR).ok(),
            env::var("XDG_CONFIG_HOME").ok(),
            env::var("HOME").ok(),
            |path| path.is_file(),
        )
    }

    fn resolve(
        fifo: Option<String>,
        conf: Option<String>,
        xdg_config_home: Option<String>,
        home: Option<String>,
        exists: impl Fn(&Path) -> bool,
    ) -> Self {
        let fifo = PathBuf::from(fifo.unwrap_or_else(|| DEFAULT_FIFO.to_owned()));

        let mut reply_fifo = fifo.clone().into_os_string();
        reply_fifo.push(".reply");

        let rc = concat!(WM_NAME!(), "/", WM_NAME!(), "rc");

        let script = match conf {
            Some(conf) => Some(PathBuf::from(conf)),
            None => xdg_config_home
                .map(|xdg| Path::new(&xdg).join(rc))
                .into_iter()
                .chain(home.map(|home| Path::new(&home).join(".config").join(rc)))
                .find(|path| exists(path)),
        };

        Self {
            fifo,
            reply_fifo: PathBuf::from(reply_fifo),
            script,
        }
    }
}

/// Runtime settings that the command channel may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub border_width: u32,
    pub focus_color: u32,
    pub unfocus_color: u32,
    pub smart_borders: bool,
    pub focus_follows_mouse: bool,
    pub tile_to_head: bool,
    pub mouse: MouseBinding,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            border_width: Self::BORDER_WIDTH,
            focus_color: Self::FOCUS_COLOR,
            unfocus_color: Self::UNFOCUS_COLOR,
            smart_borders: Self::SMART_BORDERS,
            focus_follows_mouse: Self::FOCUS_FOLLOWS_MOUSE,
            tile_to_head: Self::TILE_TO_HEAD,
            mouse: Self::MOUSE_BINDING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths() {
        let config = Config::resolve(None, None, None, None, |_| true);

        assert_eq!(config.fifo, PathBuf::from("/tmp/yaxwm.fifo"));
        assert_eq!(config.reply_fifo, PathBuf::from("/tmp/yaxwm.fifo.reply"));
        assert_eq!(config.script, None);
    }

    #[test]
    fn script_lookup_order() {
        let config = Config::resolve(
            Some("/run/user/1000/wm".to_owned()),
            None,
            Some("/xdg".to_owned()),
            Some("/home/user".to_owned()),
            |path| path.starts_with("/home"),
        );

        assert_eq!(config.reply_fifo, PathBuf::from("/run/user/1000/wm.reply"));
        assert_eq!(
            config.script,
            Some(PathBuf::from("/home/user/.config/yaxwm/yaxwmrc"))
        );

        let config = Config::resolve(
            None,
            Some("/etc/yaxwmrc".to_owned()),
            Some("/xdg".to_owned()),
            None,
            |_| true,
        );

        assert_eq!(config.script, Some(PathBuf::from("/etc/yaxwmrc")));
    }
}
